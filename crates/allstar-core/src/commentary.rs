//! Commentary collaborator abstraction.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CommentaryError;

/// One request for stage-transition commentary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentaryRequest {
    /// Correlation ID to trace the request through the system.
    pub correlation_id: Uuid,
    /// Name of the stage being entered.
    pub stage: String,
    /// Short fixed note about the stage just completed.
    pub performance_note: String,
}

/// External text service producing a short motivational line.
///
/// Implementations return the raw `"Commentary: <message> | <energy>"` text;
/// parsing and fallback are the caller's concern.
#[async_trait]
pub trait CommentarySource: Send + Sync {
    /// Generates raw commentary text for `request`.
    async fn generate(&self, request: &CommentaryRequest) -> Result<String, CommentaryError>;
}
