use crate::artwork::ArtworkCache;
use crate::consts;
use crate::options::Adjustable;
use crate::util::EnumExt;
use enum_map::Enum;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, info};

/// Suffix of the image URL that Last.fm serves in place of missing artwork
const LASTFM_PLACEHOLDER_IMAGE: &str = "2a96cbd8b46e442fc41c2b86b821562f.png";

/// A music track that can ride on the snake
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub(crate) struct Track {
    pub(crate) name: String,
    pub(crate) artist: String,

    /// Reference to the track's artwork (see [`crate::artwork`])
    #[serde(default)]
    pub(crate) image: String,

    /// Location of a short audio preview, if the track has one
    #[serde(default)]
    pub(crate) preview: Option<String>,
}

impl Track {
    /// Return the track's preview location, if it has a nonempty one
    pub(crate) fn preview(&self) -> Option<&str> {
        self.preview.as_deref().filter(|p| !p.is_empty())
    }

    /// Tracks without real artwork are not playable
    fn has_artwork(&self) -> bool {
        !self.image.is_empty()
            && !self.image.contains("placeholder")
            && !self.image.ends_with(LASTFM_PLACEHOLDER_IMAGE)
    }
}

/// The listening period from which a player's top tracks are drawn
#[derive(Clone, Copy, Debug, Default, Deserialize, Enum, Eq, Hash, PartialEq, Serialize)]
pub(crate) enum Period {
    #[serde(rename = "7day")]
    Week,
    #[serde(rename = "1month")]
    Month,
    #[serde(rename = "3month")]
    Quarter,
    #[serde(rename = "6month")]
    HalfYear,
    #[default]
    #[serde(rename = "12month")]
    Year,
    #[serde(rename = "overall")]
    Overall,
}

impl Period {
    /// The identifier used for the period in track files, configuration, and
    /// on the command line
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Period::Week => "7day",
            Period::Month => "1month",
            Period::Quarter => "3month",
            Period::HalfYear => "6month",
            Period::Year => "12month",
            Period::Overall => "overall",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Period::Week => "7 days",
            Period::Month => "1 month",
            Period::Quarter => "3 months",
            Period::HalfYear => "6 months",
            Period::Year => "1 year",
            Period::Overall => "All time",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for Period {
    type Err = ParsePeriodError;

    fn from_str(s: &str) -> Result<Period, ParsePeriodError> {
        Period::iter()
            .find(|p| p.as_str() == s)
            .ok_or(ParsePeriodError)
    }
}

impl Adjustable for Period {
    fn increase(&mut self) {
        if let Some(p) = self.next() {
            *self = p;
        }
    }

    fn decrease(&mut self) {
        if let Some(p) = self.prev() {
            *self = p;
        }
    }

    fn toggle(&mut self) {}

    fn can_increase(&self) -> bool {
        *self != Period::max()
    }

    fn can_decrease(&self) -> bool {
        *self != Period::min()
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[error(r#"invalid listening period; expected one of "7day", "1month", "3month", "6month", "12month", or "overall""#)]
pub(crate) struct ParsePeriodError;

/// A source of tracks for the game
pub(crate) trait TrackProvider: fmt::Debug {
    /// Fetch the playable tracks for `period`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the tracks could not be obtained or if fewer than
    /// [`MIN_TRACKS`] of them are playable.
    ///
    /// [`MIN_TRACKS`]: consts::MIN_TRACKS
    fn fetch(&self, period: Period) -> Result<Vec<Track>, TrackError>;

    /// Directory against which relative artwork paths are resolved
    fn artwork_base(&self) -> Option<&Path> {
        None
    }
}

/// Reads tracks from a JSON file on disk.
///
/// The file contains either an array of tracks or an object mapping period
/// identifiers to arrays of tracks.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct TrackFile {
    path: PathBuf,
}

impl TrackFile {
    pub(crate) fn new(path: PathBuf) -> TrackFile {
        TrackFile { path }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }
}

impl TrackProvider for TrackFile {
    fn fetch(&self, period: Period) -> Result<Vec<Track>, TrackError> {
        debug!(path = %self.path.display(), %period, "Loading tracks");
        let src = fs_err::read(&self.path).map_err(TrackError::read)?;
        let tracks = match serde_json::from_slice(&src).map_err(TrackError::deserialize)? {
            TrackPayload::List(tracks) => tracks,
            TrackPayload::ByPeriod(mut periods) => periods
                .remove(&period)
                .ok_or_else(|| TrackError::missing_period(period))?,
        };
        let tracks = playable(tracks)?;
        info!(count = tracks.len(), %period, "Loaded tracks");
        Ok(tracks)
    }

    fn artwork_base(&self) -> Option<&Path> {
        self.path.parent()
    }
}

/// A fetched set of tracks along with the color of each one's artwork
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Library {
    period: Period,
    tracks: Vec<Track>,
    colors: Vec<Option<Color>>,
}

impl Library {
    pub(crate) fn new(period: Period, tracks: Vec<Track>, artwork: &mut ArtworkCache) -> Library {
        artwork.preload(tracks.iter().map(|t| t.image.as_str()));
        let colors = tracks
            .iter()
            .map(|t| artwork.cached(&t.image).map(|a| a.color))
            .collect();
        Library {
            period,
            tracks,
            colors,
        }
    }

    /// Fetch the tracks for `period` from `provider` and load their artwork
    pub(crate) fn fetch(provider: &dyn TrackProvider, period: Period) -> Result<Library, TrackError> {
        let tracks = provider.fetch(period)?;
        let mut artwork = ArtworkCache::new(provider.artwork_base().map(Path::to_path_buf));
        Ok(Library::new(period, tracks, &mut artwork))
    }

    pub(crate) fn period(&self) -> Period {
        self.period
    }

    pub(crate) fn len(&self) -> usize {
        self.tracks.len()
    }

    pub(crate) fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// Return the color of the artwork of track `index`, if it could be
    /// loaded
    pub(crate) fn color(&self, index: usize) -> Option<Color> {
        self.colors.get(index).copied().flatten()
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(untagged)]
enum TrackPayload {
    List(Vec<Track>),
    ByPeriod(HashMap<Period, Vec<Track>>),
}

/// Discard tracks without artwork and check that enough remain to play
pub(crate) fn playable(tracks: Vec<Track>) -> Result<Vec<Track>, TrackError> {
    let total = tracks.len();
    let tracks = tracks
        .into_iter()
        .filter(Track::has_artwork)
        .collect::<Vec<_>>();
    if tracks.len() < total {
        debug!(
            dropped = total - tracks.len(),
            "Dropped tracks without artwork"
        );
    }
    if tracks.len() < consts::MIN_TRACKS {
        return Err(TrackError::insufficient(tracks.len()));
    }
    Ok(tracks)
}

/// Serves a fixed list of tracks and counts how often it is asked
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct StaticTracks {
    pub(crate) tracks: Vec<Track>,
    pub(crate) fetches: std::cell::Cell<usize>,
}

#[cfg(test)]
impl StaticTracks {
    /// `n` playable tracks, each with a color literal for artwork and a
    /// preview
    pub(crate) fn sample(n: usize) -> StaticTracks {
        let tracks = (0..n)
            .map(|i| Track {
                name: format!("Song {i}"),
                artist: format!("Band {i}"),
                image: format!("#{:02x}8040", i * 16),
                preview: Some(format!("https://example.com/preview{i}.mp3")),
            })
            .collect();
        StaticTracks {
            tracks,
            fetches: std::cell::Cell::new(0),
        }
    }
}

#[cfg(test)]
impl TrackProvider for StaticTracks {
    fn fetch(&self, _period: Period) -> Result<Vec<Track>, TrackError> {
        self.fetches.set(self.fetches.get() + 1);
        playable(self.tracks.clone())
    }
}

#[derive(Debug, Error)]
#[error("Failed to load tracks")]
pub(crate) struct TrackError(#[source] TrackErrorSource);

impl TrackError {
    fn read(e: std::io::Error) -> Self {
        TrackError(TrackErrorSource::Read(e))
    }

    fn deserialize(e: serde_json::Error) -> Self {
        TrackError(TrackErrorSource::Deserialize(e))
    }

    fn missing_period(period: Period) -> Self {
        TrackError(TrackErrorSource::MissingPeriod(period.as_str()))
    }

    fn insufficient(found: usize) -> Self {
        TrackError(TrackErrorSource::InsufficientTracks {
            found,
            required: consts::MIN_TRACKS,
        })
    }

    #[cfg(test)]
    /// Returns true if the tracks were obtained but too few were playable
    pub(crate) fn is_insufficient(&self) -> bool {
        matches!(self.0, TrackErrorSource::InsufficientTracks { .. })
    }
}

#[derive(Debug, Error)]
enum TrackErrorSource {
    #[error("failed to read tracks file")]
    Read(#[source] std::io::Error),
    #[error("failed to deserialize tracks")]
    Deserialize(#[source] serde_json::Error),
    #[error("tracks file has no tracks for period {0:?}")]
    MissingPeriod(&'static str),
    #[error("only {found} playable tracks found; at least {required} are needed")]
    InsufficientTracks { found: usize, required: usize },
}
