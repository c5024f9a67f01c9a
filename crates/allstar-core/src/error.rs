//! Error types shared across the workspace.

use std::time::Duration;

use thiserror::Error;

/// Top-level game error type.
#[derive(Debug, Error, PartialEq)]
pub enum GameError {
    /// A stage name did not match any known stage.
    #[error("unknown stage: {0}")]
    UnknownStage(String),

    /// Input that cannot be interpreted at all (as opposed to a miss).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A tuning document contains values the engines cannot run with.
    #[error("invalid tuning: {0}")]
    InvalidTuning(String),
}

/// Failures of the external commentary collaborator.
///
/// None of these ever reach the player; callers substitute fallback
/// commentary.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommentaryError {
    /// The service could not be reached or returned an error.
    #[error("commentary service unavailable: {0}")]
    Unavailable(String),

    /// The service explicitly asked us to back off.
    #[error("commentary service rate limited")]
    RateLimited,

    /// The response did not follow the `message | energy` format.
    #[error("malformed commentary payload: {0}")]
    MalformedPayload(String),

    /// A single attempt exceeded the request timeout.
    #[error("commentary request timed out after {0:?}")]
    Timeout(Duration),
}
