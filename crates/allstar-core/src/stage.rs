//! The fixed sequence of game stages.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::GameError;

/// One phase of the game sequence. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    /// Title screen.
    Start,
    /// Rhythm-sync challenge.
    Gym,
    /// Moving-target shooting challenge.
    Football,
    /// Pulse-sync challenge.
    Sleep,
    /// Ingredient-selection menu.
    Burrito,
    /// Binary-choice proposal screen.
    Proposal,
    /// Celebration screen.
    Success,
}

impl Stage {
    /// All stages in play order.
    pub const ALL: [Stage; 7] = [
        Stage::Start,
        Stage::Gym,
        Stage::Football,
        Stage::Sleep,
        Stage::Burrito,
        Stage::Proposal,
        Stage::Success,
    ];

    /// Display name, also used as the commentary stage key.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Stage::Start => "Start",
            Stage::Gym => "Gym",
            Stage::Football => "Football",
            Stage::Sleep => "Sleep",
            Stage::Burrito => "Burrito",
            Stage::Proposal => "Proposal",
            Stage::Success => "Success",
        }
    }

    /// Whether this stage runs a real-time challenge engine.
    #[must_use]
    pub fn has_engine(self) -> bool {
        matches!(self, Stage::Gym | Stage::Football | Stage::Sleep)
    }

    /// Parses a stage name, resetting to `Start` when it is not recognized.
    #[must_use]
    pub fn parse_or_reset(name: &str) -> Self {
        name.parse().unwrap_or_else(|err: GameError| {
            warn!(error = %err, "unrecognized stage, resetting to Start");
            Stage::Start
        })
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Stage {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Stage::ALL
            .into_iter()
            .find(|stage| stage.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| GameError::UnknownStage(s.to_owned()))
    }
}
