use crate::consts;
use tracing::{debug, info};

/// Keeps track of which track preview is playing.  Only one preview plays at a
/// time; starting a new one stops the previous one.
///
/// Audio decoding is not supported, so "playing" a preview consists of
/// recording & logging it.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Jukebox {
    playing: Option<String>,
    volume: f32,
}

impl Jukebox {
    pub(crate) fn new() -> Jukebox {
        Jukebox {
            playing: None,
            volume: consts::PREVIEW_VOLUME,
        }
    }

    /// Start playing `preview`, or just stop the current preview if the
    /// track doesn't have one
    pub(crate) fn play(&mut self, preview: Option<&str>) {
        self.stop();
        if let Some(p) = preview {
            info!(preview = p, volume = self.volume, "Playing preview");
            self.playing = Some(p.to_owned());
        } else {
            debug!("Track has no preview");
        }
    }

    pub(crate) fn stop(&mut self) {
        if let Some(p) = self.playing.take() {
            debug!(preview = p, "Stopped preview");
        }
    }

    pub(crate) fn playing(&self) -> Option<&str> {
        self.playing.as_deref()
    }

    #[cfg(test)]
    pub(crate) fn volume(&self) -> f32 {
        self.volume
    }
}

impl Default for Jukebox {
    fn default() -> Jukebox {
        Jukebox::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_preview_at_a_time() {
        let mut jukebox = Jukebox::new();
        assert_eq!(jukebox.playing(), None);
        assert!((jukebox.volume() - 0.4).abs() < f32::EPSILON);
        jukebox.play(Some("a.mp3"));
        assert_eq!(jukebox.playing(), Some("a.mp3"));
        jukebox.play(Some("b.mp3"));
        assert_eq!(jukebox.playing(), Some("b.mp3"));
        jukebox.play(None);
        assert_eq!(jukebox.playing(), None);
        jukebox.play(Some("c.mp3"));
        jukebox.stop();
        assert_eq!(jukebox.playing(), None);
    }
}
