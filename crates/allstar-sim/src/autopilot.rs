//! A scripted player that can clear every stage.

use allstar_core::geometry::Point;
use allstar_core::stage::Stage;
use allstar_session::application::orchestrator::{ChallengeSnapshot, InputEvent, SessionSnapshot};
use allstar_session::domain::tuning::GameTuning;

/// Aim point in the goal when the keeper covers the left half.
const RIGHT_CORNER: Point = Point { x: 80.0, y: 20.0 };
/// Aim point in the goal when the keeper covers the right half.
const LEFT_CORNER: Point = Point { x: 20.0, y: 20.0 };
/// Where taps land; the pulse engine ignores tap position.
const TAP_POINT: Point = Point { x: 50.0, y: 50.0 };

/// Chooses at most one input per frame from the current snapshot.
#[derive(Debug, Clone)]
pub struct Autopilot {
    keeper_midline: f64,
    sweet_spot: f64,
    tap_margin: f64,
}

impl Autopilot {
    /// An autopilot tuned to the thresholds in `tuning`.
    #[must_use]
    pub fn new(tuning: &GameTuning) -> Self {
        Self {
            keeper_midline: (tuning.football.keeper_min + tuning.football.keeper_max) / 2.0,
            sweet_spot: tuning.sleep.sweet_spot,
            tap_margin: tuning.sleep.sync_threshold / 2.0,
        }
    }

    /// The input to send this frame, if any.
    #[must_use]
    pub fn decide(&self, snapshot: &SessionSnapshot) -> Option<InputEvent> {
        match (snapshot.stage, snapshot.challenge.as_ref()) {
            (Stage::Start | Stage::Burrito | Stage::Proposal, _) => Some(InputEvent::Confirm),
            (_, Some(ChallengeSnapshot::Gym(gym))) => {
                if gym.passed {
                    return None;
                }
                // Holding lifts the weight towards smaller positions.
                let should_hold = gym.state.weight_position > gym.state.zone_position;
                match (should_hold, gym.holding) {
                    (true, false) => Some(InputEvent::Press),
                    (false, true) => Some(InputEvent::Release),
                    _ => None,
                }
            }
            (_, Some(ChallengeSnapshot::Football(football))) => {
                if football.passed || football.state.is_locked {
                    None
                } else if football.keeper_round {
                    let aim = if football.state.keeper_x <= self.keeper_midline {
                        RIGHT_CORNER
                    } else {
                        LEFT_CORNER
                    };
                    Some(InputEvent::Pointer(aim))
                } else {
                    Some(InputEvent::Pointer(football.state.target_position))
                }
            }
            (_, Some(ChallengeSnapshot::Sleep(sleep))) => {
                if !sleep.started {
                    return Some(InputEvent::StartSync);
                }
                let ripe = sleep
                    .state
                    .pulses
                    .iter()
                    .any(|pulse| (pulse.scale - self.sweet_spot).abs() < self.tap_margin);
                (ripe && !sleep.passed).then_some(InputEvent::Pointer(TAP_POINT))
            }
            _ => None,
        }
    }
}
