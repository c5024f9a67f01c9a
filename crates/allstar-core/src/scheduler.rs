//! Frame scheduler: turns a `Clock` into per-frame deltas.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::clock::Clock;

/// Default upper bound on a single frame delta.
pub const DEFAULT_MAX_DELTA: Duration = Duration::from_millis(250);

/// Produces the elapsed time between successive frames.
///
/// Deltas are clamped to `max_delta` so a stalled host does not make the
/// engines jump arbitrarily far in one tick.
pub struct FrameScheduler {
    clock: Arc<dyn Clock>,
    last: Instant,
    max_delta: Duration,
}

impl FrameScheduler {
    /// Creates a scheduler whose first frame starts now.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, max_delta: Duration) -> Self {
        let last = clock.now();
        Self {
            clock,
            last,
            max_delta,
        }
    }

    /// Returns the (clamped) time since the previous tick.
    pub fn tick(&mut self) -> Duration {
        let now = self.clock.now();
        let delta = now.saturating_duration_since(self.last);
        self.last = now;
        delta.min(self.max_delta)
    }
}

impl std::fmt::Debug for FrameScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameScheduler")
            .field("last", &self.last)
            .field("max_delta", &self.max_delta)
            .finish_non_exhaustive()
    }
}
