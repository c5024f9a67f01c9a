//! Rhythm challenge state and its per-step update.

use allstar_core::geometry::{Direction, bounce};
use serde::{Deserialize, Serialize};

use super::tuning::GymTuning;

/// Immutable snapshot of the rhythm simulation. Replaced wholesale each step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RhythmState {
    /// Weight position; larger is lower on screen.
    pub weight_position: f64,
    /// Centre of the target band.
    pub zone_position: f64,
    /// Current travel direction of the band.
    pub zone_direction: Direction,
    /// Accumulated progress towards `target_reps`.
    pub progress: f64,
}

impl RhythmState {
    /// The opening state: weight and band centred, no progress.
    #[must_use]
    pub fn initial(tuning: &GymTuning) -> Self {
        Self {
            weight_position: tuning.start_position,
            zone_position: tuning.start_position,
            zone_direction: Direction::Increasing,
            progress: 0.0,
        }
    }

    /// Whether the weight sits inside the band.
    #[must_use]
    pub fn in_zone(&self, tuning: &GymTuning) -> bool {
        (self.weight_position - self.zone_position).abs() < tuning.tolerance
    }

    /// Whether progress has reached the pass threshold.
    #[must_use]
    pub fn is_passed(&self, tuning: &GymTuning) -> bool {
        self.progress >= tuning.target_reps
    }

    /// Computes the state one fixed step later.
    ///
    /// The band moves first, then the weight; the in-zone test uses the
    /// updated positions.
    #[must_use]
    pub fn advance(self, holding: bool, tuning: &GymTuning) -> Self {
        let (zone_position, zone_direction) = bounce(
            self.zone_position,
            self.zone_direction,
            tuning.zone_step,
            tuning.zone_min,
            tuning.zone_max,
        );

        let lift = if holding { tuning.lift_speed } else { 0.0 };
        let weight_position = (self.weight_position + tuning.fall_speed - lift)
            .max(tuning.weight_min)
            .min(tuning.weight_max);

        let moved = Self {
            weight_position,
            zone_position,
            zone_direction,
            progress: self.progress,
        };

        let progress = if moved.in_zone(tuning) {
            self.progress + tuning.progress_gain
        } else {
            (self.progress - tuning.progress_decay).max(0.0)
        };

        Self { progress, ..moved }
    }
}
