//! Tuning constants for the pulse challenge.

use std::time::Duration;

use allstar_core::error::GameError;
use allstar_core::tuning::{ensure_non_negative, ensure_positive};
use serde::{Deserialize, Serialize};

/// Empirically tuned pulse-challenge parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SleepTuning {
    /// Minimum time between two spawned pulses.
    pub spawn_gap_ms: u64,
    /// Age unit: a pulse's age is `elapsed / lifetime_unit`.
    pub lifetime_unit_ms: u64,
    /// Scale gained per age unit.
    pub growth: f64,
    /// Pulses are discarded once their scale reaches this.
    pub max_scale: f64,
    /// Scale at which a pulse sits on the target ring.
    pub sweet_spot: f64,
    /// Maximum distance from the sweet spot that counts as in sync.
    pub sync_threshold: f64,
    /// Recovery gained per synced tap.
    pub reward: f64,
    /// Recovery lost per missed tap.
    pub penalty: f64,
    /// Recovery needed to pass; also the recovery ceiling.
    pub target_recovery: f64,
    /// Celebration beat before completion is reported.
    pub completion_delay_ms: u64,
    /// How long tap feedback stays visible.
    pub feedback_ms: u64,
}

impl SleepTuning {
    /// Minimum time between two spawned pulses.
    #[must_use]
    pub fn spawn_gap(&self) -> Duration {
        Duration::from_millis(self.spawn_gap_ms)
    }

    /// Delay between passing and reporting completion.
    #[must_use]
    pub fn completion_delay(&self) -> Duration {
        Duration::from_millis(self.completion_delay_ms)
    }

    /// How long tap feedback stays visible.
    #[must_use]
    pub fn feedback(&self) -> Duration {
        Duration::from_millis(self.feedback_ms)
    }

    /// Checks the values are usable.
    ///
    /// # Errors
    ///
    /// Returns `GameError::InvalidTuning` naming the first offending field.
    pub fn validate(&self) -> Result<(), GameError> {
        if self.lifetime_unit_ms == 0 {
            return Err(GameError::InvalidTuning(
                "sleep.lifetime_unit_ms must be positive".to_owned(),
            ));
        }
        ensure_positive("sleep.growth", self.growth)?;
        ensure_positive("sleep.max_scale", self.max_scale)?;
        ensure_positive("sleep.sync_threshold", self.sync_threshold)?;
        ensure_positive("sleep.reward", self.reward)?;
        ensure_non_negative("sleep.penalty", self.penalty)?;
        ensure_positive("sleep.target_recovery", self.target_recovery)?;
        if self.sweet_spot >= self.max_scale {
            return Err(GameError::InvalidTuning(format!(
                "sleep.sweet_spot ({}) must be below sleep.max_scale ({})",
                self.sweet_spot, self.max_scale
            )));
        }
        Ok(())
    }
}

impl Default for SleepTuning {
    fn default() -> Self {
        Self {
            spawn_gap_ms: 1300,
            lifetime_unit_ms: 1600,
            growth: 2.2,
            max_scale: 2.5,
            sweet_spot: 1.0,
            sync_threshold: 0.18,
            reward: 10.0,
            penalty: 5.0,
            target_recovery: 100.0,
            completion_delay_ms: 1000,
            feedback_ms: 800,
        }
    }
}
