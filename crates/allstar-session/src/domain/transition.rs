//! The fixed stage order.

use allstar_core::stage::Stage;
use serde::Serialize;

/// Note sent with the commentary request when wrapping back to `Start`.
pub const RESET_NOTE: &str = "Back at the beginning!";

/// One legal move through the stage order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Transition {
    /// Stage being entered.
    pub next: Stage,
    /// Fixed note about the stage just completed.
    pub performance_note: &'static str,
}

impl Transition {
    /// The only transition out of `current`. `Success` wraps back to `Start`.
    #[must_use]
    pub fn after(current: Stage) -> Self {
        let (next, performance_note) = match current {
            Stage::Start => (Stage::Gym, "Drafting the heavy hitters!"),
            Stage::Gym => (Stage::Football, "Powering through the workout!"),
            Stage::Football => (Stage::Sleep, "Scored big on the pitch!"),
            Stage::Sleep => (Stage::Burrito, "Fully rested and recovered!"),
            Stage::Burrito => (Stage::Proposal, "Refueled and ready for the big one!"),
            Stage::Proposal => (Stage::Success, "The contract is signed!"),
            Stage::Success => (Stage::Start, RESET_NOTE),
        };
        Self {
            next,
            performance_note,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_is_total_and_fixed() {
        let mut stage = Stage::Start;
        let mut visited = vec![stage];
        for _ in 0..6 {
            stage = Transition::after(stage).next;
            visited.push(stage);
        }

        assert_eq!(visited, Stage::ALL.to_vec());
    }

    #[test]
    fn test_success_returns_to_start() {
        let transition = Transition::after(Stage::Success);

        assert_eq!(transition.next, Stage::Start);
        assert_eq!(transition.performance_note, RESET_NOTE);
    }

    #[test]
    fn test_note_describes_the_completed_stage() {
        assert_eq!(
            Transition::after(Stage::Gym).performance_note,
            "Powering through the workout!"
        );
        assert_eq!(
            Transition::after(Stage::Sleep).performance_note,
            "Fully rested and recovered!"
        );
    }
}
