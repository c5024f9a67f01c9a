//! Tuning constants for the rhythm challenge.

use std::time::Duration;

use allstar_core::error::GameError;
use allstar_core::tuning::{ensure_non_negative, ensure_ordered, ensure_positive};
use serde::{Deserialize, Serialize};

/// Empirically tuned rhythm-challenge parameters. All speeds are per fixed step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GymTuning {
    /// Zone travel per step.
    pub zone_step: f64,
    /// Lower reflection bound of the zone centre.
    pub zone_min: f64,
    /// Upper reflection bound of the zone centre.
    pub zone_max: f64,
    /// Downward drift of the weight per step.
    pub fall_speed: f64,
    /// Upward pull per step while input is held.
    pub lift_speed: f64,
    /// Lowest weight position.
    pub weight_min: f64,
    /// Highest weight position.
    pub weight_max: f64,
    /// Initial weight and zone position.
    pub start_position: f64,
    /// Maximum weight/zone distance that counts as in the zone.
    pub tolerance: f64,
    /// Progress gained per in-zone step.
    pub progress_gain: f64,
    /// Progress lost per out-of-zone step.
    pub progress_decay: f64,
    /// Progress needed to pass.
    pub target_reps: f64,
    /// Fixed simulation steps per second.
    pub steps_per_second: u32,
    /// Celebration beat before completion is reported.
    pub completion_delay_ms: u64,
}

impl GymTuning {
    /// Length of one fixed simulation step.
    #[must_use]
    pub fn step(&self) -> Duration {
        Duration::from_secs(1) / self.steps_per_second.max(1)
    }

    /// Delay between passing and reporting completion.
    #[must_use]
    pub fn completion_delay(&self) -> Duration {
        Duration::from_millis(self.completion_delay_ms)
    }

    /// Checks the values are usable.
    ///
    /// # Errors
    ///
    /// Returns `GameError::InvalidTuning` naming the first offending field.
    pub fn validate(&self) -> Result<(), GameError> {
        ensure_ordered("gym.zone", self.zone_min, self.zone_max)?;
        ensure_ordered("gym.weight", self.weight_min, self.weight_max)?;
        ensure_positive("gym.zone_step", self.zone_step)?;
        ensure_non_negative("gym.fall_speed", self.fall_speed)?;
        ensure_non_negative("gym.lift_speed", self.lift_speed)?;
        ensure_positive("gym.tolerance", self.tolerance)?;
        ensure_positive("gym.progress_gain", self.progress_gain)?;
        ensure_non_negative("gym.progress_decay", self.progress_decay)?;
        ensure_positive("gym.target_reps", self.target_reps)?;
        if self.steps_per_second == 0 {
            return Err(GameError::InvalidTuning(
                "gym.steps_per_second must be positive".to_owned(),
            ));
        }
        Ok(())
    }
}

impl Default for GymTuning {
    fn default() -> Self {
        Self {
            zone_step: 0.9,
            zone_min: 20.0,
            zone_max: 80.0,
            fall_speed: 0.7,
            lift_speed: 1.6,
            weight_min: 5.0,
            weight_max: 95.0,
            start_position: 50.0,
            tolerance: 12.0,
            progress_gain: 0.05,
            progress_decay: 0.02,
            target_reps: 15.0,
            steps_per_second: 60,
            completion_delay_ms: 1000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tuning_is_valid() {
        assert!(GymTuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_document_keeps_other_defaults() {
        let tuning: GymTuning = serde_json::from_str(r#"{"tolerance": 8.0}"#).unwrap();

        assert!((tuning.tolerance - 8.0).abs() < f64::EPSILON);
        assert!((tuning.target_reps - 15.0).abs() < f64::EPSILON);
        assert_eq!(tuning.completion_delay_ms, 1000);
    }

    #[test]
    fn test_inverted_zone_bounds_are_rejected() {
        let tuning = GymTuning {
            zone_min: 80.0,
            zone_max: 20.0,
            ..GymTuning::default()
        };

        assert!(matches!(tuning.validate(), Err(GameError::InvalidTuning(_))));
    }

    #[test]
    fn test_step_is_one_sixtieth_of_a_second() {
        assert_eq!(GymTuning::default().step(), Duration::from_secs(1) / 60);
    }
}
