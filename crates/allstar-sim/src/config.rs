//! Runner configuration read from the environment.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use allstar_core::error::GameError;
use allstar_core::stage::Stage;
use allstar_session::domain::tuning::GameTuning;
use thiserror::Error;

/// Configuration errors. All of them are fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A variable was set but could not be parsed.
    #[error("{name} must be a valid {expected}, got {value:?}")]
    InvalidVar {
        /// Variable name.
        name: &'static str,
        /// What the value should have been.
        expected: &'static str,
        /// The raw value.
        value: String,
    },

    /// The tuning file could not be read.
    #[error("failed to read tuning file {}: {source}", .path.display())]
    TuningRead {
        /// Path from `ALLSTAR_TUNING`.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The tuning file is not a valid tuning document.
    #[error("failed to parse tuning file {}: {source}", .path.display())]
    TuningParse {
        /// Path from `ALLSTAR_TUNING`.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// The resulting tuning does not validate.
    #[error(transparent)]
    InvalidTuning(#[from] GameError),
}

/// Runner settings.
#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    /// Frame length.
    pub tick: Duration,
    /// Frames to play before giving up.
    pub max_frames: u64,
    /// Pace frames against the system clock instead of simulating them.
    pub realtime: bool,
    /// Seed for the fallback commentary picks; random when unset.
    pub seed: Option<u64>,
    /// Stage the playthrough begins on. Unknown names fall back to `Start`.
    pub start_stage: Stage,
    /// Engine and commentary tuning.
    pub tuning: GameTuning,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(16),
            max_frames: 20_000,
            realtime: false,
            seed: None,
            start_stage: Stage::Start,
            tuning: GameTuning::default(),
        }
    }
}

impl SimConfig {
    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if any variable is malformed or the tuning file
    /// cannot be loaded.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the configuration through `lookup`, which maps a variable name
    /// to its value.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if any variable is malformed or the tuning file
    /// cannot be loaded.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let tuning = match lookup("ALLSTAR_TUNING") {
            Some(path) => load_tuning(Path::new(&path))?,
            None => defaults.tuning,
        };
        let mut config = Self {
            tick: parse_var::<u64>(&lookup, "ALLSTAR_TICK_MS", "frame length in milliseconds")?
                .map_or(defaults.tick, Duration::from_millis),
            max_frames: parse_var(&lookup, "ALLSTAR_MAX_FRAMES", "frame count")?
                .unwrap_or(defaults.max_frames),
            realtime: parse_flag(&lookup, "ALLSTAR_REALTIME")?.unwrap_or(defaults.realtime),
            seed: parse_var(&lookup, "ALLSTAR_SEED", "u64 seed")?,
            start_stage: lookup("ALLSTAR_START_STAGE")
                .map_or(defaults.start_stage, |name| Stage::parse_or_reset(&name)),
            tuning,
        };

        if let Some(retries) = parse_var(&lookup, "ALLSTAR_COMMENTARY_RETRIES", "retry count")? {
            config.tuning.commentary.retries = retries;
        }
        if let Some(backoff) =
            parse_var(&lookup, "ALLSTAR_COMMENTARY_BACKOFF_MS", "backoff in milliseconds")?
        {
            config.tuning.commentary.backoff_ms = backoff;
        }

        if config.tick.is_zero() {
            return Err(ConfigError::InvalidVar {
                name: "ALLSTAR_TICK_MS",
                expected: "positive frame length",
                value: "0".to_owned(),
            });
        }
        config.tuning.validate()?;
        Ok(config)
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    expected: &'static str,
) -> Result<Option<T>, ConfigError> {
    lookup(name)
        .map(|value| {
            value.trim().parse().map_err(|_| ConfigError::InvalidVar {
                name,
                expected,
                value,
            })
        })
        .transpose()
}

fn parse_flag(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<bool>, ConfigError> {
    lookup(name)
        .map(|value| match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" => Ok(true),
            "0" | "false" | "no" => Ok(false),
            _ => Err(ConfigError::InvalidVar {
                name,
                expected: "boolean",
                value,
            }),
        })
        .transpose()
}

fn load_tuning(path: &Path) -> Result<GameTuning, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::TuningRead {
        path: path.to_owned(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ConfigError::TuningParse {
        path: path.to_owned(),
        source,
    })
}
