//! The game orchestrator: owns the stage, runs the active engine and
//! dispatches commentary for every transition.

use std::time::Duration;

use allstar_commentary::application::service::CommentaryService;
use allstar_commentary::domain::banner::{BannerView, CommentaryBanner, Generation, loading_phrase};
use allstar_commentary::domain::commentary::CommentaryResult;
use allstar_core::challenge::Challenge;
use allstar_core::commentary::CommentaryRequest;
use allstar_core::error::GameError;
use allstar_core::geometry::Point;
use allstar_core::stage::Stage;
use allstar_football::application::engine::{ShotOutcome, TargetEngine, TargetSnapshot};
use allstar_football::domain::state::ShotVerdict;
use allstar_gym::application::engine::{RhythmEngine, RhythmSnapshot};
use allstar_sleep::application::engine::{PulseEngine, PulseSnapshot, TapOutcome};
use allstar_sleep::domain::state::TapVerdict;
use serde::Serialize;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::transition::Transition;
use crate::domain::tuning::GameTuning;

/// Player input. Pointer positions are stage-relative, in `[0, 100]²`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Hold input pressed.
    Press,
    /// Hold input released.
    Release,
    /// Pointer press or tap.
    Pointer(Point),
    /// Start the pulse challenge.
    StartSync,
    /// Confirm on a menu stage.
    Confirm,
}

/// What an input did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    /// Not meaningful for the current stage or engine state.
    Ignored,
    /// The rhythm hold changed.
    Hold(bool),
    /// A shot was taken.
    Shot(ShotVerdict),
    /// A tap was judged.
    Tap(TapVerdict),
    /// The pulse challenge is running.
    SyncStarted,
    /// A menu stage was confirmed; carries the stage entered.
    Advanced(Stage),
}

/// Renderable view of whichever engine is active.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChallengeSnapshot {
    /// Rhythm challenge.
    Gym(RhythmSnapshot),
    /// Target challenge.
    Football(TargetSnapshot),
    /// Pulse challenge.
    Sleep(PulseSnapshot),
}

/// Renderable view of the whole session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    /// Current stage.
    pub stage: Stage,
    /// Commentary banner, hidden on `Start` and `Success`.
    pub banner: Option<BannerView>,
    /// Active engine, if the stage has one.
    pub challenge: Option<ChallengeSnapshot>,
}

#[derive(Debug)]
enum ActiveChallenge {
    Gym(RhythmEngine),
    Football(TargetEngine),
    Sleep(PulseEngine),
}

impl ActiveChallenge {
    fn for_stage(stage: Stage, tuning: &GameTuning) -> Option<Self> {
        match stage {
            Stage::Gym => Some(Self::Gym(RhythmEngine::new(tuning.gym.clone()))),
            Stage::Football => Some(Self::Football(TargetEngine::new(tuning.football.clone()))),
            Stage::Sleep => Some(Self::Sleep(PulseEngine::new(tuning.sleep.clone()))),
            Stage::Start | Stage::Burrito | Stage::Proposal | Stage::Success => None,
        }
    }

    fn tick(&mut self, delta: Duration) {
        match self {
            Self::Gym(engine) => engine.tick(delta),
            Self::Football(engine) => engine.tick(delta),
            Self::Sleep(engine) => engine.tick(delta),
        }
    }

    fn completed(&self) -> bool {
        match self {
            Self::Gym(engine) => engine.result().completed,
            Self::Football(engine) => engine.result().completed,
            Self::Sleep(engine) => engine.result().completed,
        }
    }

    fn snapshot(&self) -> ChallengeSnapshot {
        match self {
            Self::Gym(engine) => ChallengeSnapshot::Gym(engine.snapshot()),
            Self::Football(engine) => ChallengeSnapshot::Football(engine.snapshot()),
            Self::Sleep(engine) => ChallengeSnapshot::Sleep(engine.snapshot()),
        }
    }
}

/// A finished commentary task. `Err` means the task was lost before it
/// could answer.
#[derive(Debug)]
struct Delivery {
    generation: Generation,
    outcome: Result<CommentaryResult, String>,
}

/// Root of the game. Input and ticks both take `&mut self`, so an input can
/// never interleave with a partially applied tick.
#[derive(Debug)]
pub struct GameOrchestrator {
    tuning: GameTuning,
    stage: Stage,
    active: Option<ActiveChallenge>,
    banner: CommentaryBanner,
    commentary: CommentaryService,
    runtime: Handle,
    deliveries_tx: UnboundedSender<Delivery>,
    deliveries: UnboundedReceiver<Delivery>,
}

impl GameOrchestrator {
    /// Creates a session on the `Start` stage. Commentary requests are
    /// spawned on `runtime`.
    ///
    /// # Errors
    ///
    /// Returns `GameError::InvalidTuning` if `tuning` does not validate.
    pub fn new(
        tuning: GameTuning,
        commentary: CommentaryService,
        runtime: Handle,
    ) -> Result<Self, GameError> {
        tuning.validate()?;
        let (deliveries_tx, deliveries) = mpsc::unbounded_channel();
        Ok(Self {
            tuning,
            stage: Stage::Start,
            active: None,
            banner: CommentaryBanner::new(),
            commentary,
            runtime,
            deliveries_tx,
            deliveries,
        })
    }

    /// Current stage.
    #[must_use]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Moves to the next stage, discarding the active engine, and requests
    /// commentary in the background. Returns the stage entered.
    pub fn advance(&mut self) -> Stage {
        let from = self.stage;
        let transition = Transition::after(from);
        self.stage = transition.next;
        self.active = ActiveChallenge::for_stage(self.stage, &self.tuning);

        let generation = self.banner.begin(loading_phrase(self.stage));
        let request = CommentaryRequest {
            correlation_id: Uuid::new_v4(),
            stage: self.stage.name().to_owned(),
            performance_note: transition.performance_note.to_owned(),
        };
        info!(
            from = %from,
            to = %self.stage,
            generation,
            correlation_id = %request.correlation_id,
            "stage advanced"
        );
        self.dispatch(generation, request);
        self.stage
    }

    /// Jumps straight to `stage` with a fresh engine. No commentary is
    /// requested, so the banner keeps whatever it last showed.
    pub fn resume_at(&mut self, stage: Stage) {
        info!(from = %self.stage, to = %stage, "session resumed");
        self.stage = stage;
        self.active = ActiveChallenge::for_stage(stage, &self.tuning);
    }

    /// Applies finished commentary, ticks the active engine and advances
    /// when it reports completion.
    pub fn tick(&mut self, delta: Duration) {
        self.collect_commentary();

        let completed = self.active.as_mut().is_some_and(|active| {
            active.tick(delta);
            active.completed()
        });
        if completed {
            info!(stage = %self.stage, "challenge completed");
            self.advance();
        }
    }

    /// Routes `event` to the active engine, or to the menu flow.
    pub fn handle_input(&mut self, event: InputEvent) -> InputOutcome {
        if event == InputEvent::Confirm {
            return self.confirm();
        }
        if let InputEvent::Pointer(point) = event
            && let Err(err) = Point::new(point.x, point.y)
        {
            warn!(stage = %self.stage, error = %err, "pointer input rejected");
            return InputOutcome::Ignored;
        }

        let Some(active) = self.active.as_mut() else {
            debug!(stage = %self.stage, ?event, "input ignored without an engine");
            return InputOutcome::Ignored;
        };
        match (event, active) {
            (InputEvent::Press, ActiveChallenge::Gym(engine)) => {
                engine.press();
                InputOutcome::Hold(true)
            }
            (InputEvent::Release, ActiveChallenge::Gym(engine)) => {
                engine.release();
                InputOutcome::Hold(false)
            }
            (InputEvent::Pointer(click), ActiveChallenge::Football(engine)) => {
                match engine.shoot(click) {
                    ShotOutcome::Taken(verdict) => InputOutcome::Shot(verdict),
                    ShotOutcome::Ignored => InputOutcome::Ignored,
                }
            }
            (InputEvent::Pointer(_), ActiveChallenge::Sleep(engine)) => match engine.tap() {
                TapOutcome::Judged(verdict) => InputOutcome::Tap(verdict),
                TapOutcome::Ignored => InputOutcome::Ignored,
            },
            (InputEvent::StartSync, ActiveChallenge::Sleep(engine)) => {
                engine.start();
                InputOutcome::SyncStarted
            }
            _ => InputOutcome::Ignored,
        }
    }

    /// Renderable view of the session.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        let banner = match self.stage {
            Stage::Start | Stage::Success => None,
            _ => Some(self.banner.view()),
        };
        SessionSnapshot {
            stage: self.stage,
            banner,
            challenge: self.active.as_ref().map(ActiveChallenge::snapshot),
        }
    }

    fn confirm(&mut self) -> InputOutcome {
        if self.stage.has_engine() || self.stage == Stage::Success {
            return InputOutcome::Ignored;
        }
        InputOutcome::Advanced(self.advance())
    }

    fn dispatch(&self, generation: Generation, request: CommentaryRequest) {
        let service = self.commentary.clone();
        let deliveries = self.deliveries_tx.clone();
        self.runtime.spawn(async move {
            let fetch = tokio::spawn(async move { service.fetch(&request).await });
            let outcome = fetch.await.map_err(|err| err.to_string());
            if deliveries.send(Delivery { generation, outcome }).is_err() {
                debug!(generation, "session ended before commentary arrived");
            }
        });
    }

    fn collect_commentary(&mut self) {
        while let Ok(Delivery { generation, outcome }) = self.deliveries.try_recv() {
            match outcome {
                Ok(result) => {
                    if self.banner.resolve(generation, result) {
                        debug!(generation, "commentary applied");
                    }
                }
                Err(reason) => {
                    warn!(generation, reason = %reason, "commentary task lost, showing default line");
                    self.banner.abandon(generation);
                }
            }
        }
    }
}
