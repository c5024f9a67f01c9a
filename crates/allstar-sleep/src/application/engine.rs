//! The pulse engine: spawning cadence, tap judgement and recovery gating.

use std::time::Duration;

use allstar_core::challenge::{Challenge, ChallengeResult};
use allstar_core::timing::Countdown;
use serde::Serialize;
use tracing::{debug, info};

use crate::domain::state::{PulseState, TapVerdict};
use crate::domain::tuning::SleepTuning;

/// Feedback after a synced tap.
pub const SYNCED_LINE: &str = "PURE HARMONY!";
/// Feedback after a missed tap.
pub const MISSED_LINE: &str = "MISSED THE BEAT!";

/// What happened to a tap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TapOutcome {
    /// The engine has not been started, or the challenge is over.
    Ignored,
    /// The tap was judged.
    Judged(TapVerdict),
}

/// Renderable view of the pulse challenge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PulseSnapshot {
    /// Current simulation state.
    pub state: PulseState,
    /// Whether the player has started the challenge.
    pub started: bool,
    /// Transient tap feedback, if still visible.
    pub feedback: Option<&'static str>,
    /// Whether full recovery has been reached.
    pub passed: bool,
}

#[derive(Debug, Clone, Copy)]
struct Feedback {
    line: &'static str,
    visible_for: Countdown,
}

/// Sleep-stage engine. Inert until [`PulseEngine::start`] is called.
#[derive(Debug)]
pub struct PulseEngine {
    tuning: SleepTuning,
    state: PulseState,
    started: bool,
    now: Duration,
    feedback: Option<Feedback>,
    celebration: Option<Countdown>,
}

impl PulseEngine {
    /// Creates an engine waiting to be started.
    #[must_use]
    pub fn new(tuning: SleepTuning) -> Self {
        Self::with_state(tuning, PulseState::default())
    }

    /// Creates an engine from an arbitrary starting state.
    #[must_use]
    pub fn with_state(tuning: SleepTuning, state: PulseState) -> Self {
        Self {
            tuning,
            state,
            started: false,
            now: Duration::ZERO,
            feedback: None,
            celebration: None,
        }
    }

    /// Player started the challenge. Idempotent.
    pub fn start(&mut self) {
        if !self.started {
            info!("pulse challenge started");
        }
        self.started = true;
    }

    /// Current simulation state.
    #[must_use]
    pub fn state(&self) -> &PulseState {
        &self.state
    }

    /// Whether full recovery has been reached.
    #[must_use]
    pub fn is_passed(&self) -> bool {
        self.celebration.is_some()
    }

    /// Taps, judging against the pulses as of the last tick.
    pub fn tap(&mut self) -> TapOutcome {
        if !self.started || self.is_passed() {
            return TapOutcome::Ignored;
        }

        let (state, verdict) = std::mem::take(&mut self.state).tap(&self.tuning);
        self.state = state;

        let line = match verdict {
            TapVerdict::Synced(_) => SYNCED_LINE,
            TapVerdict::Missed => MISSED_LINE,
        };
        self.feedback = Some(Feedback {
            line,
            visible_for: Countdown::new(self.tuning.feedback()),
        });
        debug!(
            ?verdict,
            recovery = self.state.recovery,
            streak = self.state.streak,
            "tap judged"
        );

        if self.state.is_passed(&self.tuning) {
            info!(streak = self.state.streak, "pulse challenge passed");
            self.celebration = Some(Countdown::new(self.tuning.completion_delay()));
        }
        TapOutcome::Judged(verdict)
    }
}

impl Challenge for PulseEngine {
    type Snapshot = PulseSnapshot;

    fn tick(&mut self, delta: Duration) {
        if let Some(feedback) = self.feedback.as_mut() {
            if feedback.visible_for.advance(delta) {
                self.feedback = None;
            }
        }

        if let Some(celebration) = self.celebration.as_mut() {
            celebration.advance(delta);
            return;
        }
        if !self.started {
            return;
        }

        self.now += delta;
        self.state = std::mem::take(&mut self.state).advance(self.now, &self.tuning);
    }

    fn snapshot(&self) -> PulseSnapshot {
        PulseSnapshot {
            state: self.state.clone(),
            started: self.started,
            feedback: self.feedback.map(|feedback| feedback.line),
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
