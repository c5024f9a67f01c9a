//! Shared test mocks and utilities for the All-Star quest engines.

mod clock;
mod commentary;
mod rng;

pub use clock::ManualClock;
pub use commentary::{
    FailingCommentarySource, RateLimitedCommentarySource, ScriptedCommentarySource, ScriptedReply,
    StaticCommentarySource,
};
pub use rng::{MockRng, SequenceRng};
