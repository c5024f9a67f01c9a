//! The target engine: target/keeper motion, shot locking and round progress.

use std::time::Duration;

use allstar_core::challenge::{Challenge, ChallengeResult};
use allstar_core::geometry::Point;
use allstar_core::timing::{Countdown, FixedStep};
use serde::Serialize;
use tracing::{debug, info};

use crate::domain::state::{OPENING_LINE, ShotVerdict, TargetState, verdict_line};
use crate::domain::tuning::FootballTuning;

/// What happened to a pointer press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ShotOutcome {
    /// A shot is already in flight, or the challenge is over.
    Ignored,
    /// The shot was judged against the target as it stood at input time.
    /// Its effect applies when the resolution window closes.
    Taken(ShotVerdict),
}

/// A judged shot waiting for its flight to finish.
#[derive(Debug, Clone, Copy)]
struct PendingShot {
    verdict: ShotVerdict,
    window: Countdown,
}

/// Renderable view of the football challenge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetSnapshot {
    /// Current simulation state.
    pub state: TargetState,
    /// Whether the keeper round is active.
    pub keeper_round: bool,
    /// Hit tolerance of the current moving round.
    pub hit_tolerance: f64,
    /// Verdict of the most recently resolved shot.
    pub last_verdict: Option<ShotVerdict>,
    /// Banner line.
    pub message: &'static str,
    /// Whether the winning goal has been scored.
    pub passed: bool,
}

/// Football-stage engine.
#[derive(Debug)]
pub struct TargetEngine {
    tuning: FootballTuning,
    state: TargetState,
    elapsed: Duration,
    frames: FixedStep,
    pending: Option<PendingShot>,
    celebration: Option<Countdown>,
    last_verdict: Option<ShotVerdict>,
    message: &'static str,
}

impl TargetEngine {
    /// Creates an engine at round one.
    #[must_use]
    pub fn new(tuning: FootballTuning) -> Self {
        let state = TargetState::initial(&tuning);
        Self::with_state(tuning, state)
    }

    /// Creates an engine from an arbitrary starting state.
    #[must_use]
    pub fn with_state(tuning: FootballTuning, state: TargetState) -> Self {
        let frames = FixedStep::new(tuning.step());
        Self {
            tuning,
            state,
            elapsed: Duration::ZERO,
            frames,
            pending: None,
            celebration: None,
            last_verdict: None,
            message: OPENING_LINE,
        }
    }

    /// Current simulation state.
    #[must_use]
    pub fn state(&self) -> TargetState {
        self.state
    }

    /// Whether the winning goal has been scored.
    #[must_use]
    pub fn is_passed(&self) -> bool {
        self.celebration.is_some()
    }

    /// Shoots at `click`. The target and keeper positions are captured now,
    /// not when the ball lands.
    pub fn shoot(&mut self, click: Point) -> ShotOutcome {
        if self.state.is_locked || self.is_passed() {
            debug!(x = click.x, y = click.y, "shot ignored while locked");
            return ShotOutcome::Ignored;
        }

        let verdict = self.state.judge(click, &self.tuning);
        debug!(
            round = self.state.round,
            x = click.x,
            y = click.y,
            ?verdict,
            "shot taken"
        );

        self.state = self.state.with_shot_in_flight(click, &self.tuning);
        self.pending = Some(PendingShot {
            verdict,
            window: Countdown::new(self.tuning.shot_window()),
        });
        ShotOutcome::Taken(verdict)
    }

    fn land_pending_shot(&mut self, delta: Duration) {
        let Some(mut pending) = self.pending.take() else {
            return;
        };
        if !pending.window.advance(delta) {
            self.pending = Some(pending);
            return;
        }

        let winning =
            pending.verdict == ShotVerdict::Scored && self.state.is_keeper_round(&self.tuning);
        self.state = self
            .state
            .resolve(pending.verdict, self.elapsed.as_secs_f64(), &self.tuning);
        self.last_verdict = Some(pending.verdict);
        self.message = verdict_line(pending.verdict, winning);

        if winning {
            info!("football challenge passed");
            self.celebration = Some(Countdown::new(self.tuning.celebration()));
        } else {
            debug!(round = self.state.round, verdict = ?pending.verdict, "shot resolved");
        }
    }
}

impl Challenge for TargetEngine {
    type Snapshot = TargetSnapshot;

    fn tick(&mut self, delta: Duration) {
        if let Some(celebration) = self.celebration.as_mut() {
            celebration.advance(delta);
            return;
        }

        self.land_pending_shot(delta);
        if self.is_passed() {
            return;
        }

        let step = self.frames.step();
        for _ in 0..self.frames.advance(delta) {
            self.elapsed += step;
            self.state = self
                .state
                .advance(self.elapsed.as_secs_f64(), &self.tuning);
        }
    }

    fn snapshot(&self) -> TargetSnapshot {
        TargetSnapshot {
            state: self.state,
            keeper_round: self.state.is_keeper_round(&self.tuning),
            hit_tolerance: self.tuning.hit_tolerance(self.state.round),
            last_verdict: self.last_verdict,
            message: self.message,
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
