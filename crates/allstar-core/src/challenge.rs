//! The contract every real-time challenge engine fulfils.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Uniform completion report polled by the orchestrator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeResult {
    /// True once the challenge has been passed and its celebration delay
    /// has elapsed.
    pub completed: bool,
}

impl ChallengeResult {
    /// A passed challenge.
    pub const COMPLETED: Self = Self { completed: true };

    /// A challenge still in play.
    pub const PENDING: Self = Self { completed: false };
}

/// A per-stage simulation driven by the shared frame scheduler.
///
/// Engines never call back into the orchestrator; completion is observed by
/// polling [`Challenge::result`] after each tick.
pub trait Challenge: Send {
    /// Read-only view sufficient to render the challenge.
    type Snapshot: Clone + Serialize;

    /// Advances the simulation by `delta` of wall time.
    fn tick(&mut self, delta: Duration);

    /// Returns the current renderable state.
    fn snapshot(&self) -> Self::Snapshot;

    /// Returns whether the challenge has completed.
    fn result(&self) -> ChallengeResult;
}
