//! The rhythm engine: drives `RhythmState` from frame ticks and hold input.

use std::time::Duration;

use allstar_core::challenge::{Challenge, ChallengeResult};
use allstar_core::timing::{Countdown, FixedStep};
use serde::Serialize;
use tracing::{debug, info};

use crate::domain::state::RhythmState;
use crate::domain::tuning::GymTuning;

/// Renderable view of the rhythm challenge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RhythmSnapshot {
    /// Current simulation state.
    pub state: RhythmState,
    /// Whether the weight is inside the band.
    pub in_zone: bool,
    /// Progress as a percentage of the pass threshold.
    pub progress_percent: f64,
    /// Whether the player is holding input.
    pub holding: bool,
    /// Whether the challenge has been passed (celebration may still be running).
    pub passed: bool,
}

/// Gym-stage engine.
#[derive(Debug)]
pub struct RhythmEngine {
    tuning: GymTuning,
    state: RhythmState,
    holding: bool,
    frames: FixedStep,
    celebration: Option<Countdown>,
}

impl RhythmEngine {
    /// Creates an engine in its opening state.
    #[must_use]
    pub fn new(tuning: GymTuning) -> Self {
        let state = RhythmState::initial(&tuning);
        Self::with_state(tuning, state)
    }

    /// Creates an engine from an arbitrary starting state.
    #[must_use]
    pub fn with_state(tuning: GymTuning, state: RhythmState) -> Self {
        let frames = FixedStep::new(tuning.step());
        Self {
            tuning,
            state,
            holding: false,
            frames,
            celebration: None,
        }
    }

    /// Player pressed the lift control.
    pub fn press(&mut self) {
        if !self.holding {
            debug!("lift pressed");
        }
        self.holding = true;
    }

    /// Player released the lift control.
    pub fn release(&mut self) {
        self.holding = false;
    }

    /// Current simulation state.
    #[must_use]
    pub fn state(&self) -> RhythmState {
        self.state
    }

    /// Whether the pass threshold has been reached.
    #[must_use]
    pub fn is_passed(&self) -> bool {
        self.celebration.is_some()
    }

    fn step(&mut self) {
        self.state = self.state.advance(self.holding, &self.tuning);
        if self.state.is_passed(&self.tuning) {
            info!(progress = self.state.progress, "rhythm challenge passed");
            self.celebration = Some(Countdown::new(self.tuning.completion_delay()));
        }
    }
}

impl Challenge for RhythmEngine {
    type Snapshot = RhythmSnapshot;

    fn tick(&mut self, delta: Duration) {
        // Frozen once passed; only the celebration beat keeps running.
        if let Some(celebration) = self.celebration.as_mut() {
            celebration.advance(delta);
            return;
        }

        for _ in 0..self.frames.advance(delta) {
            self.step();
            if self.is_passed() {
                break;
            }
        }
    }

    fn snapshot(&self) -> RhythmSnapshot {
        RhythmSnapshot {
            state: self.state,
            in_zone: self.state.in_zone(&self.tuning),
            progress_percent: self.state.progress / self.tuning.target_reps * 100.0,
            holding: self.holding,
            passed: self.is_passed(),
        }
    }

    fn result(&self) -> ChallengeResult {
        match self.celebration {
            Some(celebration) if celebration.is_elapsed() => ChallengeResult::COMPLETED,
            _ => ChallengeResult::PENDING,
        }
    }
}
