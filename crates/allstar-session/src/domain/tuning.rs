//! Tuning for a whole play session.

use allstar_commentary::application::service::CommentaryPolicy;
use allstar_core::error::GameError;
use allstar_football::domain::tuning::FootballTuning;
use allstar_gym::domain::tuning::GymTuning;
use allstar_sleep::domain::tuning::SleepTuning;
use serde::{Deserialize, Serialize};

/// Every engine's tuning plus the commentary policy. Missing sections fall
/// back to their defaults when deserialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameTuning {
    /// Rhythm challenge.
    pub gym: GymTuning,
    /// Target challenge.
    pub football: FootballTuning,
    /// Pulse challenge.
    pub sleep: SleepTuning,
    /// Commentary retries and timeouts.
    pub commentary: CommentaryPolicy,
}

impl GameTuning {
    /// Checks every section.
    ///
    /// # Errors
    ///
    /// Returns `GameError::InvalidTuning` naming the first bad value.
    pub fn validate(&self) -> Result<(), GameError> {
        self.gym.validate()?;
        self.football.validate()?;
        self.sleep.validate()?;
        Ok(())
    }
}
