//! Fetching commentary with retries, timeouts and local fallback.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use allstar_core::commentary::{CommentaryRequest, CommentarySource};
use allstar_core::error::CommentaryError;
use allstar_core::rng::DeterministicRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::domain::commentary::CommentaryResult;
use crate::domain::fallback::fallback_for;

/// Retry and timeout policy for commentary requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentaryPolicy {
    /// Extra attempts after the first failure.
    pub retries: u32,
    /// Backoff unit; the wait before attempt `n + 1` is `n` units.
    pub backoff_ms: u64,
    /// Upper bound on a single attempt.
    pub request_timeout_ms: u64,
}

impl CommentaryPolicy {
    /// Backoff unit.
    #[must_use]
    pub fn backoff(&self) -> Duration {
        Duration::from_millis(self.backoff_ms)
    }

    /// Upper bound on a single attempt.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl Default for CommentaryPolicy {
    fn default() -> Self {
        Self {
            retries: 1,
            backoff_ms: 500,
            request_timeout_ms: 5_000,
        }
    }
}

/// Resolves commentary requests. Never fails: every error path ends in a
/// line from the local fallback pool.
#[derive(Clone)]
pub struct CommentaryService {
    source: Arc<dyn CommentarySource>,
    rng: Arc<Mutex<dyn DeterministicRng>>,
    policy: CommentaryPolicy,
}

impl CommentaryService {
    /// Create a service over `source`, drawing fallbacks from `rng`.
    #[must_use]
    pub fn new(
        source: Arc<dyn CommentarySource>,
        rng: Arc<Mutex<dyn DeterministicRng>>,
        policy: CommentaryPolicy,
    ) -> Self {
        Self {
            source,
            rng,
            policy,
        }
    }

    /// Fetches commentary for `request`.
    ///
    /// Rate limiting short-circuits to the fallback; other failures are
    /// retried with linear backoff first.
    #[instrument(
        skip(self, request),
        fields(correlation_id = %request.correlation_id, stage = %request.stage)
    )]
    pub async fn fetch(&self, request: &CommentaryRequest) -> CommentaryResult {
        let attempts = self.policy.retries.saturating_add(1);
        for attempt in 1..=attempts {
            match self.attempt(request).await {
                Ok(result) => {
                    debug!(attempt, energy_level = result.energy_level, "commentary received");
                    return result;
                }
                Err(CommentaryError::RateLimited) => {
                    warn!(attempt, "commentary rate limited, using local line");
                    break;
                }
                Err(err) => {
                    warn!(attempt, error = %err, "commentary attempt failed");
                    if attempt < attempts {
                        tokio::time::sleep(self.policy.backoff() * attempt).await;
                    }
                }
            }
        }
        self.fallback(&request.stage)
    }

    async fn attempt(&self, request: &CommentaryRequest) -> Result<CommentaryResult, CommentaryError> {
        let timeout = self.policy.request_timeout();
        let text = tokio::time::timeout(timeout, self.source.generate(request))
            .await
            .map_err(|_| CommentaryError::Timeout(timeout))??;
        CommentaryResult::parse(&text)
    }

    fn fallback(&self, stage: &str) -> CommentaryResult {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        fallback_for(stage, &mut *rng)
    }
}

impl std::fmt::Debug for CommentaryService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommentaryService")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use allstar_test_support::{
        FailingCommentarySource, MockRng, RateLimitedCommentarySource, ScriptedCommentarySource,
        ScriptedReply, SequenceRng, StaticCommentarySource,
    };
    use tokio::sync::Notify;
    use uuid::Uuid;

    use crate::application::offline::OfflineCommentarySource;
    use crate::domain::fallback::pool_for;

    fn quick_policy() -> CommentaryPolicy {
        CommentaryPolicy {
            retries: 1,
            backoff_ms: 0,
            request_timeout_ms: 50,
        }
    }

    fn request(stage: &str) -> CommentaryRequest {
        CommentaryRequest {
            correlation_id: Uuid::new_v4(),
            stage: stage.to_owned(),
            performance_note: "Powering through the workout!".to_owned(),
        }
    }

    fn service_with(source: Arc<dyn CommentarySource>) -> CommentaryService {
        CommentaryService::new(source, Arc::new(Mutex::new(MockRng)), quick_policy())
    }

    fn pool_messages(stage: &str) -> Vec<String> {
        pool_for(stage)
            .iter()
            .map(|line| CommentaryResult::parse(line).unwrap().message)
            .collect()
    }

    #[tokio::test]
    async fn test_successful_answer_is_parsed() {
        let source = Arc::new(StaticCommentarySource::new(
            "Commentary: Legendary form! | 88",
        ));
        let service = service_with(source.clone());

        let result = service.fetch(&request("Gym")).await;

        assert_eq!(result.message, "Legendary form!");
        assert_eq!(result.energy_level, 88);
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn test_unavailable_source_is_retried_then_falls_back() {
        let source = Arc::new(FailingCommentarySource::default());
        let service = service_with(source.clone());

        let result = service.fetch(&request("Gym")).await;

        assert_eq!(source.calls(), 2);
        assert!(pool_messages("Gym").contains(&result.message));
        assert!((1..=100).contains(&result.energy_level));
    }

    #[tokio::test]
    async fn test_rate_limit_skips_retries() {
        let source = Arc::new(RateLimitedCommentarySource::default());
        let service = service_with(source.clone());

        let result = service.fetch(&request("Football")).await;

        assert_eq!(source.calls(), 1);
        assert!(pool_messages("Football").contains(&result.message));
    }

    #[tokio::test]
    async fn test_malformed_answer_counts_as_failure() {
        let source = Arc::new(StaticCommentarySource::new("no separator at all"));
        let service = service_with(source.clone());

        let result = service.fetch(&request("Sleep")).await;

        assert_eq!(source.calls(), 2);
        assert!(pool_messages("Sleep").contains(&result.message));
    }

    #[tokio::test]
    async fn test_retry_recovers_after_one_failure() {
        let source = Arc::new(ScriptedCommentarySource::new(vec![
            ScriptedReply::immediate(Err(CommentaryError::Unavailable("blip".into()))),
            ScriptedReply::immediate(Ok("Second time lucky | 77".to_owned())),
        ]));
        let service = service_with(source.clone());

        let result = service.fetch(&request("Burrito")).await;

        assert_eq!(result.message, "Second time lucky");
        assert_eq!(source.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_slow_source_times_out_to_fallback() {
        let never = Arc::new(Notify::new());
        let source = Arc::new(ScriptedCommentarySource::new(vec![
            ScriptedReply::gated(Ok("too late | 50".to_owned()), never.clone()),
            ScriptedReply::gated(Ok("too late | 50".to_owned()), never),
        ]));
        let service = service_with(source);

        let result = service.fetch(&request("Proposal")).await;

        assert!(pool_messages("Proposal").contains(&result.message));
        assert_eq!(result.energy_level, 100);
    }

    #[tokio::test]
    async fn test_fallback_pick_uses_injected_rng() {
        let service = CommentaryService::new(
            Arc::new(OfflineCommentarySource),
            Arc::new(Mutex::new(SequenceRng::new(vec![1]))),
            CommentaryPolicy {
                retries: 0,
                ..quick_policy()
            },
        );

        let result = service.fetch(&request("Gym")).await;

        assert_eq!(
            result.message,
            "Those gains look good, but you look better! Keep it up!"
        );
    }
}
