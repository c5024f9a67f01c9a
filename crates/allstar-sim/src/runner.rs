//! Drives a session frame by frame until it reaches `Success`.

use std::sync::Arc;
use std::time::Duration;

use allstar_core::clock::SystemClock;
use allstar_core::scheduler::{DEFAULT_MAX_DELTA, FrameScheduler};
use allstar_core::stage::Stage;
use allstar_session::application::orchestrator::GameOrchestrator;
use thiserror::Error;
use tracing::{debug, info};

use crate::autopilot::Autopilot;
use crate::config::SimConfig;

/// Ways a playthrough can fail.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RunError {
    /// The frame budget ran out before `Success`.
    #[error("frame budget of {frames} exhausted on stage {stage}")]
    FrameBudgetExhausted {
        /// Frames played.
        frames: u64,
        /// Stage the session was stuck on.
        stage: Stage,
    },
}

/// Where frame deltas come from.
#[derive(Debug)]
pub enum FrameSource {
    /// Sleeps between frames and measures real elapsed time.
    Realtime {
        /// Measures each frame.
        scheduler: FrameScheduler,
        /// Target frame length.
        interval: Duration,
    },
    /// Every frame is exactly `step` long and nothing sleeps.
    Simulated {
        /// Frame length.
        step: Duration,
    },
}

impl FrameSource {
    /// The frame source `config` asks for.
    #[must_use]
    pub fn from_config(config: &SimConfig) -> Self {
        if config.realtime {
            Self::Realtime {
                scheduler: FrameScheduler::new(Arc::new(SystemClock), DEFAULT_MAX_DELTA),
                interval: config.tick,
            }
        } else {
            Self::Simulated { step: config.tick }
        }
    }

    /// Waits for the next frame and returns its length. Always yields to the
    /// runtime so commentary tasks keep moving.
    pub async fn next_frame(&mut self) -> Duration {
        match self {
            Self::Realtime {
                scheduler,
                interval,
            } => {
                tokio::time::sleep(*interval).await;
                scheduler.tick()
            }
            Self::Simulated { step } => {
                tokio::task::yield_now().await;
                *step
            }
        }
    }
}

/// Plays `orchestrator` with `autopilot` until it reaches `Success`.
/// Returns the number of frames played.
///
/// # Errors
///
/// Returns `RunError::FrameBudgetExhausted` if `max_frames` pass first.
pub async fn run_playthrough(
    orchestrator: &mut GameOrchestrator,
    autopilot: &Autopilot,
    frames: &mut FrameSource,
    max_frames: u64,
) -> Result<u64, RunError> {
    let mut stage = orchestrator.stage();
    for frame in 0..max_frames {
        let snapshot = orchestrator.snapshot();
        if snapshot.stage == Stage::Success {
            info!(frames = frame, "playthrough complete");
            return Ok(frame);
        }
        if snapshot.stage != stage {
            info!(frame, from = %stage, to = %snapshot.stage, "autopilot entered stage");
            stage = snapshot.stage;
        }

        if let Some(event) = autopilot.decide(&snapshot) {
            let outcome = orchestrator.handle_input(event);
            debug!(frame, ?event, ?outcome, "autopilot input");
        }

        let delta = frames.next_frame().await;
        orchestrator.tick(delta);
    }

    Err(RunError::FrameBudgetExhausted {
        frames: max_frames,
        stage: orchestrator.stage(),
    })
}
