//! Tuning constants for the football challenge.

use std::time::Duration;

use allstar_core::error::GameError;
use allstar_core::geometry::Point;
use allstar_core::tuning::{ensure_non_negative, ensure_ordered, ensure_positive};
use serde::{Deserialize, Serialize};

/// Empirically tuned football-challenge parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FootballTuning {
    /// Number of moving-target rounds before the keeper round.
    pub moving_rounds: u32,
    /// Horizontal centre of the target orbit.
    pub path_center_x: f64,
    /// Vertical centre of the target orbit.
    pub path_center_y: f64,
    /// Orbit radius in round 0; grows by `radius_per_round`.
    pub radius_base: f64,
    /// Orbit radius added per round.
    pub radius_per_round: f64,
    /// Angular speed in round 0 (radians per second).
    pub speed_base: f64,
    /// Angular speed added per round.
    pub speed_per_round: f64,
    /// Vertical swing of the orbit.
    pub vertical_amplitude: f64,
    /// Vertical frequency relative to the horizontal one.
    pub vertical_speed_factor: f64,
    /// Hit tolerance is `tolerance_base - round`.
    pub tolerance_base: f64,
    /// Target diameter in round 0, in pixels.
    pub target_diameter_base: f64,
    /// Target diameter lost per round.
    pub target_diameter_per_round: f64,
    /// Keeper's leftmost position.
    pub keeper_min: f64,
    /// Keeper's rightmost position.
    pub keeper_max: f64,
    /// Keeper's opening position.
    pub keeper_start: f64,
    /// Keeper travel per step.
    pub keeper_step: f64,
    /// Horizontal reach within which the keeper saves.
    pub save_radius: f64,
    /// Left post.
    pub goal_min_x: f64,
    /// Right post.
    pub goal_max_x: f64,
    /// Goal line; shots must land above it.
    pub goal_max_y: f64,
    /// Where the ball rests between shots.
    pub ball_rest: Point,
    /// Ball scale while in flight.
    pub ball_flight_scale: f64,
    /// Input lock after each shot.
    pub shot_window_ms: u64,
    /// Celebration after the winning goal.
    pub celebration_ms: u64,
    /// Fixed simulation step.
    pub step_ms: u64,
}

impl FootballTuning {
    /// The keeper round's index.
    #[must_use]
    pub fn final_round(&self) -> u32 {
        self.moving_rounds + 1
    }

    /// Hit tolerance for a moving-target round. Strictly decreasing in `round`.
    #[must_use]
    pub fn hit_tolerance(&self, round: u32) -> f64 {
        self.tolerance_base - f64::from(round)
    }

    /// Orbit radius for `round`.
    #[must_use]
    pub fn path_radius(&self, round: u32) -> f64 {
        self.radius_base + self.radius_per_round * f64::from(round)
    }

    /// Angular speed for `round`.
    #[must_use]
    pub fn path_speed(&self, round: u32) -> f64 {
        self.speed_base + self.speed_per_round * f64::from(round)
    }

    /// Rendered target radius for `round`, in pixels.
    #[must_use]
    pub fn target_radius(&self, round: u32) -> f64 {
        (self.target_diameter_base - self.target_diameter_per_round * f64::from(round)) / 2.0
    }

    /// Input lock after each shot.
    #[must_use]
    pub fn shot_window(&self) -> Duration {
        Duration::from_millis(self.shot_window_ms)
    }

    /// Celebration after the winning goal.
    #[must_use]
    pub fn celebration(&self) -> Duration {
        Duration::from_millis(self.celebration_ms)
    }

    /// Fixed simulation step.
    #[must_use]
    pub fn step(&self) -> Duration {
        Duration::from_millis(self.step_ms)
    }

    /// Checks the values are usable.
    ///
    /// # Errors
    ///
    /// Returns `GameError::InvalidTuning` naming the first offending field.
    pub fn validate(&self) -> Result<(), GameError> {
        if self.moving_rounds == 0 {
            return Err(GameError::InvalidTuning(
                "football.moving_rounds must be at least 1".to_owned(),
            ));
        }
        ensure_positive(
            "football.hit_tolerance(last moving round)",
            self.hit_tolerance(self.moving_rounds),
        )?;
        ensure_ordered("football.keeper", self.keeper_min, self.keeper_max)?;
        ensure_ordered("football.goal_x", self.goal_min_x, self.goal_max_x)?;
        ensure_positive("football.keeper_step", self.keeper_step)?;
        ensure_non_negative("football.save_radius", self.save_radius)?;
        ensure_non_negative("football.speed_base", self.speed_base)?;
        ensure_non_negative("football.speed_per_round", self.speed_per_round)?;
        if self.step_ms == 0 {
            return Err(GameError::InvalidTuning(
                "football.step_ms must be positive".to_owned(),
            ));
        }
        Ok(())
    }
}

impl Default for FootballTuning {
    fn default() -> Self {
        Self {
            moving_rounds: 3,
            path_center_x: 50.0,
            path_center_y: 35.0,
            radius_base: 20.0,
            radius_per_round: 5.0,
            speed_base: 1.2,
            speed_per_round: 0.4,
            vertical_amplitude: 15.0,
            vertical_speed_factor: 0.7,
            tolerance_base: 15.0,
            target_diameter_base: 60.0,
            target_diameter_per_round: 4.0,
            keeper_min: 25.0,
            keeper_max: 75.0,
            keeper_start: 50.0,
            keeper_step: 5.5,
            save_radius: 12.0,
            goal_min_x: 15.0,
            goal_max_x: 85.0,
            goal_max_y: 50.0,
            ball_rest: Point { x: 50.0, y: 85.0 },
            ball_flight_scale: 0.25,
            shot_window_ms: 600,
            celebration_ms: 1500,
            step_ms: 16,
        }
    }
}
