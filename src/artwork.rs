//! Track artwork, reduced to what a terminal can show: a single color per
//! track.
//!
//! An artwork reference is either a `#rrggbb` color literal or the path to a
//! local image file, in which case the color is the average of the decoded
//! image's pixels.  Relative paths are resolved against the directory of the
//! tracks file.  Remote images cannot be fetched; they fail to load and the
//! renderer falls back to the default colors.
use image::RgbImage;
use ratatui::style::Color;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Artwork {
    pub(crate) color: Color,
}

impl Artwork {
    /// Load the artwork for `reference`, resolving relative paths against
    /// `base`
    pub(crate) fn load(reference: &str, base: Option<&Path>) -> Result<Artwork, LoadError> {
        let reference = reference.trim();
        if reference.is_empty() {
            return Err(LoadError(LoadErrorSource::Empty));
        }
        if let Some(hex) = reference.strip_prefix('#') {
            return parse_hex(hex)
                .map(|color| Artwork { color })
                .ok_or_else(|| LoadError(LoadErrorSource::BadColor(reference.to_owned())));
        }
        if reference.contains("://") {
            return Err(LoadError(LoadErrorSource::Remote(reference.to_owned())));
        }
        let path = match base {
            Some(base) => base.join(reference),
            None => PathBuf::from(reference),
        };
        let data = fs_err::read(path).map_err(|e| LoadError(LoadErrorSource::Read(e)))?;
        let image = image::load_from_memory(&data)
            .map_err(|e| LoadError(LoadErrorSource::Decode(e)))?
            .into_rgb8();
        average_color(&image)
            .map(|color| Artwork { color })
            .ok_or(LoadError(LoadErrorSource::NoPixels))
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
}

/// Mean of each channel over all of the image's pixels, or `None` for an
/// empty image
fn average_color(image: &RgbImage) -> Option<Color> {
    let count = u64::from(image.width()) * u64::from(image.height());
    if count == 0 {
        return None;
    }
    let mut sums = [0u64; 3];
    for pixel in image.pixels() {
        for (sum, &c) in sums.iter_mut().zip(&pixel.0) {
            *sum += u64::from(c);
        }
    }
    let [r, g, b] = sums.map(|sum| u8::try_from(sum / count).unwrap_or(u8::MAX));
    Some(Color::Rgb(r, g, b))
}

/// Artwork for every reference seen so far, including failures so that each
/// one is only attempted (and logged) once
#[derive(Debug, Default)]
pub(crate) struct ArtworkCache {
    base: Option<PathBuf>,
    entries: HashMap<String, Result<Artwork, LoadError>>,
}

impl ArtworkCache {
    pub(crate) fn new(base: Option<PathBuf>) -> ArtworkCache {
        ArtworkCache {
            base,
            entries: HashMap::new(),
        }
    }

    /// Return the artwork for `reference`, loading it if it hasn't been
    /// requested before
    pub(crate) fn get(&mut self, reference: &str) -> Result<Artwork, &LoadError> {
        let base = self.base.as_deref();
        self.entries
            .entry(reference.to_owned())
            .or_insert_with(|| {
                let r = Artwork::load(reference, base);
                if let Err(ref e) = r {
                    warn!(reference, "Artwork unavailable; using fallback: {}", e.chain());
                }
                r
            })
            .as_ref()
            .copied()
    }

    /// Load every reference in `references` ahead of time
    pub(crate) fn preload<'a, I: IntoIterator<Item = &'a str>>(&mut self, references: I) {
        for r in references {
            let _ = self.get(r);
        }
    }

    /// Return the artwork for `reference` if it has already been loaded
    /// successfully
    pub(crate) fn cached(&self, reference: &str) -> Option<Artwork> {
        self.entries.get(reference)?.as_ref().ok().copied()
    }
}

#[derive(Debug, Error)]
#[error("Failed to load artwork")]
pub(crate) struct LoadError(#[source] LoadErrorSource);

impl LoadError {
    /// Render the error and its cause on one line for logging
    fn chain(&self) -> String {
        format!("{self}: {}", self.0)
    }
}

#[derive(Debug, Error)]
enum LoadErrorSource {
    #[error("no artwork reference given")]
    Empty,
    #[error("invalid color literal {0:?}")]
    BadColor(String),
    #[error("remote artwork {0:?} cannot be displayed")]
    Remote(String),
    #[error("failed to read image file")]
    Read(#[source] std::io::Error),
    #[error("failed to decode image file")]
    Decode(#[source] image::ImageError),
    #[error("image has no pixels")]
    NoPixels,
}
