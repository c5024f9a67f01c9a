//! A commentary source for running without any external service.

use allstar_core::commentary::{CommentaryRequest, CommentarySource};
use allstar_core::error::CommentaryError;
use async_trait::async_trait;

/// Always unavailable, so every request resolves to local commentary.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineCommentarySource;

#[async_trait]
impl CommentarySource for OfflineCommentarySource {
    async fn generate(&self, _request: &CommentaryRequest) -> Result<String, CommentaryError> {
        Err(CommentaryError::Unavailable("running offline".to_owned()))
    }
}
