use crate::consts;
use crate::game::{ClockParams, PhysicsParams, SessionParams};
use crate::options::Options;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Program configuration read from a configuration file
#[derive(Clone, Deserialize, Debug, Default, PartialEq)]
pub(crate) struct Config {
    /// Board & timing settings
    #[serde(default)]
    pub(crate) game: GameConfig,

    /// Settings for the bounce animation
    #[serde(default)]
    pub(crate) physics: PhysicsParams,

    /// Initial values for the options in the main menu
    #[serde(default)]
    pub(crate) options: Options,

    /// Settings about data files
    #[serde(default)]
    pub(crate) files: FileConfig,
}

impl Config {
    /// Return the default configuration file path
    pub(crate) fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join("musicsnake").join("config.toml"))
            .ok_or(ConfigError::NoPath)
    }

    /// Read configuration from a file on disk.  If the file does not exist and
    /// `allow_missing` is true, a default `Config` value is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read or if the file's contents
    /// could not be deserialized or are invalid.
    pub(crate) fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
                return Ok(Config::default())
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        toml::from_str(&content).map_err(Into::into)
    }

    /// Return the parameters for a new game, with bouncing enabled or not
    pub(crate) fn session_params(&self, bounce: bool) -> SessionParams {
        SessionParams {
            grid_size: self.game.grid_size,
            clock: self.game.clock,
            physics: bounce.then_some(self.physics),
        }
    }

    /// Return the path of the tracks file: the file given in the
    /// configuration or, if that is not set, the default tracks file path
    pub(crate) fn tracks_file(&self) -> Result<PathBuf, ConfigError> {
        if let Some(ref p) = self.files.tracks_file {
            Ok(p.clone())
        } else {
            dirs::data_local_dir()
                .map(|p| p.join("musicsnake").join("tracks.json"))
                .ok_or(ConfigError::NoDataPath)
        }
    }
}

#[derive(Clone, Copy, Deserialize, Debug, PartialEq)]
#[serde(try_from = "RawGameConfig")]
pub(crate) struct GameConfig {
    /// Number of cells along each side of the board
    pub(crate) grid_size: u16,

    pub(crate) clock: ClockParams,
}

impl Default for GameConfig {
    fn default() -> GameConfig {
        GameConfig {
            grid_size: consts::GRID_SIZE,
            clock: ClockParams::default(),
        }
    }
}

#[derive(Clone, Deserialize, Debug, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
struct RawGameConfig {
    grid_size: u16,
    initial_interval_ms: u64,
    min_interval_ms: u64,
    acceleration: f64,
    max_frame_delta_ms: u64,
}

impl Default for RawGameConfig {
    fn default() -> RawGameConfig {
        RawGameConfig {
            grid_size: consts::GRID_SIZE,
            initial_interval_ms: duration_ms(consts::INITIAL_INTERVAL),
            min_interval_ms: duration_ms(consts::MIN_INTERVAL),
            acceleration: consts::ACCELERATION,
            max_frame_delta_ms: duration_ms(consts::MAX_FRAME_DELTA),
        }
    }
}

fn duration_ms(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

impl TryFrom<RawGameConfig> for GameConfig {
    type Error = InvalidValue;

    fn try_from(value: RawGameConfig) -> Result<GameConfig, InvalidValue> {
        if !(consts::MIN_GRID_SIZE..=consts::MAX_GRID_SIZE).contains(&value.grid_size) {
            return Err(InvalidValue {
                key: "grid-size",
                expected: "an integer from 5 to 20",
            });
        }
        if value.min_interval_ms == 0 {
            return Err(InvalidValue {
                key: "min-interval-ms",
                expected: "a positive integer",
            });
        }
        if value.initial_interval_ms < value.min_interval_ms {
            return Err(InvalidValue {
                key: "initial-interval-ms",
                expected: "an integer no less than min-interval-ms",
            });
        }
        if !(value.acceleration > 0.0 && value.acceleration <= 1.0) {
            return Err(InvalidValue {
                key: "acceleration",
                expected: "a number greater than 0 and at most 1",
            });
        }
        if value.max_frame_delta_ms == 0 {
            return Err(InvalidValue {
                key: "max-frame-delta-ms",
                expected: "a positive integer",
            });
        }
        Ok(GameConfig {
            grid_size: value.grid_size,
            clock: ClockParams {
                initial_interval: Duration::from_millis(value.initial_interval_ms),
                min_interval: Duration::from_millis(value.min_interval_ms),
                acceleration: value.acceleration,
                max_frame_delta: Duration::from_millis(value.max_frame_delta_ms),
            },
        })
    }
}

#[derive(Clone, Deserialize, Debug, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct RawPhysicsConfig {
    push: f64,
    gravity: f64,
    bounce: f64,
    rest_epsilon: f64,
}

impl Default for RawPhysicsConfig {
    fn default() -> RawPhysicsConfig {
        RawPhysicsConfig {
            push: consts::PUSH_FORCE,
            gravity: consts::GRAVITY,
            bounce: consts::BOUNCE,
            rest_epsilon: consts::REST_EPSILON,
        }
    }
}

impl TryFrom<RawPhysicsConfig> for PhysicsParams {
    type Error = InvalidValue;

    fn try_from(value: RawPhysicsConfig) -> Result<PhysicsParams, InvalidValue> {
        if !(value.push.is_finite() && value.push >= 0.0) {
            return Err(InvalidValue {
                key: "push",
                expected: "a nonnegative number",
            });
        }
        if !(value.gravity.is_finite() && value.gravity > 0.0) {
            return Err(InvalidValue {
                key: "gravity",
                expected: "a positive number",
            });
        }
        if !(0.0..1.0).contains(&value.bounce) {
            return Err(InvalidValue {
                key: "bounce",
                expected: "a number from 0 up to but not including 1",
            });
        }
        if !(value.rest_epsilon.is_finite() && value.rest_epsilon > 0.0) {
            return Err(InvalidValue {
                key: "rest-epsilon",
                expected: "a positive number",
            });
        }
        Ok(PhysicsParams {
            push: value.push,
            gravity: value.gravity,
            bounce: value.bounce,
            rest_epsilon: value.rest_epsilon,
        })
    }
}

/// A configuration value outside of its permitted range
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[error("invalid value for {key}: expected {expected}")]
pub(crate) struct InvalidValue {
    key: &'static str,
    expected: &'static str,
}

#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct FileConfig {
    /// Path to the JSON file of tracks
    pub(crate) tracks_file: Option<PathBuf>,

    /// Path to which to write logs; nothing is logged if this is unset
    pub(crate) log_file: Option<PathBuf>,
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to determine path to local configuration directory")]
    NoPath,
    #[error("failed to determine path to local data directory")]
    NoDataPath,
    #[error("failed to read configuration file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
}
