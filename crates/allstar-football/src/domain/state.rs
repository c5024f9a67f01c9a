//! Football challenge state, target motion and shot judgement.

use allstar_core::geometry::{Direction, Point, bounce};
use serde::{Deserialize, Serialize};

use super::tuning::FootballTuning;

/// Banner line before the first shot.
pub const OPENING_LINE: &str = "Show that world-class touch";
/// Banner line after a goal that advances the round.
pub const GOAL_LINE: &str = "BOTTLE THAT MAGIC!";
/// Banner line after the winning goal.
pub const WINNER_LINE: &str = "GOLDEN BOOT WINNER!";
/// Banner line after a miss or a save.
pub const MISS_LINE: &str = "EYES ON THE PRIZE, BABY!";

/// How a single shot was judged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShotVerdict {
    /// The shot beat the target window or the keeper.
    Scored,
    /// Outside the target window, or outside the goal.
    Missed,
    /// In the goal but within the keeper's reach.
    Saved,
}

/// The ball as rendered.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    /// Centre of the ball.
    pub position: Point,
    /// Render scale; shrinks while in flight.
    pub scale: f64,
}

impl Ball {
    fn at_rest(tuning: &FootballTuning) -> Self {
        Self {
            position: tuning.ball_rest,
            scale: 1.0,
        }
    }
}

/// Immutable snapshot of the football simulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetState {
    /// Current round, starting at 1. Only ever increases.
    pub round: u32,
    /// Centre of the moving target.
    pub target_position: Point,
    /// Rendered target radius in pixels.
    pub target_radius: f64,
    /// Keeper's horizontal position.
    pub keeper_x: f64,
    /// Keeper's travel direction.
    pub keeper_direction: Direction,
    /// The ball.
    pub ball: Ball,
    /// True while a shot is being resolved.
    pub is_locked: bool,
}

/// Centre of the moving target for `round` at `t` seconds.
#[must_use]
pub fn target_path(tuning: &FootballTuning, round: u32, t: f64) -> Point {
    let radius = tuning.path_radius(round);
    let speed = tuning.path_speed(round);
    Point {
        x: tuning.path_center_x + (t * speed).cos() * radius,
        y: tuning.path_center_y
            + (t * speed * tuning.vertical_speed_factor).sin() * tuning.vertical_amplitude,
    }
}

impl TargetState {
    /// Round one, target at the start of its orbit, keeper centred.
    #[must_use]
    pub fn initial(tuning: &FootballTuning) -> Self {
        Self {
            round: 1,
            target_position: target_path(tuning, 1, 0.0),
            target_radius: tuning.target_radius(1),
            keeper_x: tuning.keeper_start,
            keeper_direction: Direction::Increasing,
            ball: Ball::at_rest(tuning),
            is_locked: false,
        }
    }

    /// Whether this is the keeper round.
    #[must_use]
    pub fn is_keeper_round(&self, tuning: &FootballTuning) -> bool {
        self.round > tuning.moving_rounds
    }

    /// Moves the target (moving rounds) or the keeper (keeper round) to
    /// simulation time `t`. Nothing moves while a shot is in flight.
    #[must_use]
    pub fn advance(self, t: f64, tuning: &FootballTuning) -> Self {
        if self.is_locked {
            return self;
        }
        if self.is_keeper_round(tuning) {
            let (keeper_x, keeper_direction) = bounce(
                self.keeper_x,
                self.keeper_direction,
                tuning.keeper_step,
                tuning.keeper_min,
                tuning.keeper_max,
            );
            Self {
                keeper_x,
                keeper_direction,
                ..self
            }
        } else {
            Self {
                target_position: target_path(tuning, self.round, t),
                ..self
            }
        }
    }

    /// Judges a shot at `click` against this (captured) state.
    #[must_use]
    pub fn judge(&self, click: Point, tuning: &FootballTuning) -> ShotVerdict {
        if self.is_keeper_round(tuning) {
            let in_goal = click.y < tuning.goal_max_y
                && click.x > tuning.goal_min_x
                && click.x < tuning.goal_max_x;
            if !in_goal {
                ShotVerdict::Missed
            } else if (click.x - self.keeper_x).abs() < tuning.save_radius {
                ShotVerdict::Saved
            } else {
                ShotVerdict::Scored
            }
        } else if click.distance_to(self.target_position) < tuning.hit_tolerance(self.round) {
            ShotVerdict::Scored
        } else {
            ShotVerdict::Missed
        }
    }

    /// Locks input and sends the ball towards `click`.
    #[must_use]
    pub fn with_shot_in_flight(self, click: Point, tuning: &FootballTuning) -> Self {
        Self {
            is_locked: true,
            ball: Ball {
                position: click,
                scale: tuning.ball_flight_scale,
            },
            ..self
        }
    }

    /// Applies a judged shot once its flight is over.
    ///
    /// A goal in a moving round advances the round and places the target on
    /// the new round's path at simulation time `t`; the winning goal keeps
    /// the state locked. Anything else unlocks the same round.
    #[must_use]
    pub fn resolve(self, verdict: ShotVerdict, t: f64, tuning: &FootballTuning) -> Self {
        match verdict {
            ShotVerdict::Scored if self.is_keeper_round(tuning) => self,
            ShotVerdict::Scored => {
                let round = self.round + 1;
                Self {
                    round,
                    target_position: target_path(tuning, round, t),
                    target_radius: tuning.target_radius(round),
                    ball: Ball::at_rest(tuning),
                    is_locked: false,
                    ..self
                }
            }
            ShotVerdict::Missed | ShotVerdict::Saved => Self {
                ball: Ball::at_rest(tuning),
                is_locked: false,
                ..self
            },
        }
    }
}

/// Banner line for a resolved shot.
#[must_use]
pub fn verdict_line(verdict: ShotVerdict, winning: bool) -> &'static str {
    match verdict {
        ShotVerdict::Scored if winning => WINNER_LINE,
        ShotVerdict::Scored => GOAL_LINE,
        ShotVerdict::Missed | ShotVerdict::Saved => MISS_LINE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tuning() -> FootballTuning {
        FootballTuning::default()
    }

    fn keeper_round(keeper_x: f64) -> TargetState {
        TargetState {
            round: 4,
            keeper_x,
            ..TargetState::initial(&tuning())
        }
    }

    #[test]
    fn test_initial_target_starts_at_orbit_origin() {
        let state = TargetState::initial(&tuning());

        assert_eq!(state.round, 1);
        assert!((state.target_position.x - 75.0).abs() < 1e-9);
        assert!((state.target_position.y - 35.0).abs() < 1e-9);
        assert!((state.target_radius - 28.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_target_follows_parametric_path() {
        let tuning = tuning();
        let t = 1.3;
        let expected_x = 50.0 + (t * 2.4_f64).cos() * 35.0;
        let expected_y = 35.0 + (t * 2.4_f64 * 0.7).sin() * 15.0;

        let point = target_path(&tuning, 3, t);

        assert!((point.x - expected_x).abs() < 1e-9);
        assert!((point.y - expected_y).abs() < 1e-9);
    }

    #[test]
    fn test_hit_inside_tolerance_scores() {
        let state = TargetState::initial(&tuning());
        let click = Point {
            x: state.target_position.x + 13.9,
            y: state.target_position.y,
        };

        assert_eq!(state.judge(click, &tuning()), ShotVerdict::Scored);
    }

    #[test]
    fn test_hit_at_tolerance_boundary_misses() {
        let state = TargetState {
            round: 3,
            ..TargetState::initial(&tuning())
        };
        let click = Point {
            x: state.target_position.x,
            y: state.target_position.y + 12.0,
        };

        assert_eq!(state.judge(click, &tuning()), ShotVerdict::Missed);
    }

    #[test]
    fn test_keeper_within_reach_saves() {
        let state = keeper_round(50.0);
        let click = Point { x: 60.0, y: 20.0 };

        assert_eq!(state.judge(click, &tuning()), ShotVerdict::Saved);
    }

    #[test]
    fn test_keeper_beaten_scores() {
        let state = keeper_round(50.0);
        let click = Point { x: 80.0, y: 20.0 };

        assert_eq!(state.judge(click, &tuning()), ShotVerdict::Scored);
    }

    #[test]
    fn test_shot_outside_goal_misses_even_far_from_keeper() {
        let state = keeper_round(30.0);

        assert_eq!(
            state.judge(Point { x: 80.0, y: 60.0 }, &tuning()),
            ShotVerdict::Missed
        );
        assert_eq!(
            state.judge(Point { x: 90.0, y: 20.0 }, &tuning()),
            ShotVerdict::Missed
        );
    }

    #[test]
    fn test_keeper_stays_within_bounds_and_reverses_at_them() {
        let tuning = tuning();
        let mut state = keeper_round(50.0);
        let mut previous = state.keeper_direction;

        for _ in 0..500 {
            state = state.advance(0.0, &tuning);
            assert!((25.0..=75.0).contains(&state.keeper_x));
            if state.keeper_direction != previous {
                assert!(
                    (state.keeper_x - 25.0).abs() < f64::EPSILON
                        || (state.keeper_x - 75.0).abs() < f64::EPSILON
                );
            }
            previous = state.keeper_direction;
        }
    }

    #[test]
    fn test_locked_state_does_not_move() {
        let tuning = tuning();
        let state = TargetState::initial(&tuning).with_shot_in_flight(Point { x: 1.0, y: 1.0 }, &tuning);

        assert_eq!(state.advance(2.0, &tuning), state);
        assert!((state.ball.scale - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_miss_keeps_round_and_unlocks() {
        let tuning = tuning();
        let state = TargetState {
            round: 2,
            ..TargetState::initial(&tuning)
        }
        .with_shot_in_flight(Point { x: 0.0, y: 0.0 }, &tuning);

        let resolved = state.resolve(ShotVerdict::Missed, 0.0, &tuning);

        assert_eq!(resolved.round, 2);
        assert!(!resolved.is_locked);
        assert_eq!(resolved.ball.position, tuning.ball_rest);
    }

    #[test]
    fn test_goal_advances_round_and_shrinks_target() {
        let tuning = tuning();
        let state = TargetState::initial(&tuning).with_shot_in_flight(Point { x: 0.0, y: 0.0 }, &tuning);

        let resolved = state.resolve(ShotVerdict::Scored, 0.0, &tuning);

        assert_eq!(resolved.round, 2);
        assert!(resolved.target_radius < state.target_radius);
        assert!(!resolved.is_locked);
    }

    #[test]
    fn test_goal_moves_target_onto_next_round_path() {
        let tuning = tuning();
        let state = TargetState::initial(&tuning)
            .advance(1.3, &tuning)
            .with_shot_in_flight(Point { x: 0.0, y: 0.0 }, &tuning);

        let resolved = state.resolve(ShotVerdict::Scored, 1.3, &tuning);

        assert_eq!(resolved.target_position, target_path(&tuning, 2, 1.3));
        assert_ne!(resolved.target_position, state.target_position);
    }

    #[test]
    fn test_winning_goal_stays_locked() {
        let tuning = tuning();
        let state = keeper_round(30.0).with_shot_in_flight(Point { x: 80.0, y: 20.0 }, &tuning);

        let resolved = state.resolve(ShotVerdict::Scored, 0.0, &tuning);

        assert_eq!(resolved.round, 4);
        assert!(resolved.is_locked);
    }

    #[test]
    fn test_verdict_lines() {
        assert_eq!(verdict_line(ShotVerdict::Scored, false), GOAL_LINE);
        assert_eq!(verdict_line(ShotVerdict::Scored, true), WINNER_LINE);
        assert_eq!(verdict_line(ShotVerdict::Saved, true), MISS_LINE);
    }
}
