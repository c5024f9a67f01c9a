//! Test commentary sources — mock `CommentarySource` implementations.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use allstar_core::commentary::{CommentaryRequest, CommentarySource};
use allstar_core::error::CommentaryError;
use async_trait::async_trait;
use tokio::sync::Notify;

/// A source that always answers with the same raw text.
#[derive(Debug)]
pub struct StaticCommentarySource {
    text: String,
    calls: AtomicUsize,
}

impl StaticCommentarySource {
    /// Create a source answering every request with `text`.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of `generate` calls received.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CommentarySource for StaticCommentarySource {
    async fn generate(&self, _request: &CommentaryRequest) -> Result<String, CommentaryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.text.clone())
    }
}

/// A source that is always unreachable. Useful for testing fallback paths.
#[derive(Debug, Default)]
pub struct FailingCommentarySource {
    calls: AtomicUsize,
}

impl FailingCommentarySource {
    /// Number of `generate` calls received.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CommentarySource for FailingCommentarySource {
    async fn generate(&self, _request: &CommentaryRequest) -> Result<String, CommentaryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(CommentaryError::Unavailable("connection refused".into()))
    }
}

/// A source that always signals rate limiting.
#[derive(Debug, Default)]
pub struct RateLimitedCommentarySource {
    calls: AtomicUsize,
}

impl RateLimitedCommentarySource {
    /// Number of `generate` calls received.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CommentarySource for RateLimitedCommentarySource {
    async fn generate(&self, _request: &CommentaryRequest) -> Result<String, CommentaryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(CommentaryError::RateLimited)
    }
}

/// One scripted answer, optionally held back until its gate is opened.
#[derive(Debug)]
pub struct ScriptedReply {
    reply: Result<String, CommentaryError>,
    gate: Option<Arc<Notify>>,
}

impl ScriptedReply {
    /// An answer delivered immediately.
    #[must_use]
    pub fn immediate(reply: Result<String, CommentaryError>) -> Self {
        Self { reply, gate: None }
    }

    /// An answer delivered only after `gate` is notified.
    #[must_use]
    pub fn gated(reply: Result<String, CommentaryError>, gate: Arc<Notify>) -> Self {
        Self {
            reply,
            gate: Some(gate),
        }
    }
}

/// A source that replays scripted answers in order and records every request.
/// Once the script is exhausted it reports the service as unavailable.
#[derive(Debug, Default)]
pub struct ScriptedCommentarySource {
    replies: Mutex<VecDeque<ScriptedReply>>,
    requests: Mutex<Vec<CommentaryRequest>>,
}

impl ScriptedCommentarySource {
    /// Create a source that answers with `replies`, first to last.
    #[must_use]
    pub fn new(replies: Vec<ScriptedReply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Returns a snapshot of all requests received.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn requests(&self) -> Vec<CommentaryRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommentarySource for ScriptedCommentarySource {
    async fn generate(&self, request: &CommentaryRequest) -> Result<String, CommentaryError> {
        self.requests.lock().unwrap().push(request.clone());
        let next = self.replies.lock().unwrap().pop_front();
        let Some(scripted) = next else {
            return Err(CommentaryError::Unavailable("script exhausted".into()));
        };
        if let Some(gate) = scripted.gate {
            gate.notified().await;
        }
        scripted.reply
    }
}
