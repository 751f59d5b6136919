//! Retry wrapper around a single extraction operation.
//!
//! Every transport or schema failure is swallowed, logged at debug, and
//! retried immediately (no backoff). After `MAX_ATTEMPTS` the kind's
//! deterministic fallback is returned, so callers never see an error from
//! this layer.

use tracing::debug;

use super::client::Extractor;
use super::schema::ExtractionResult;
use super::{ExtractionInput, ExtractionKind};

pub const MAX_ATTEMPTS: u32 = 5;

/// Outcome of one retry-wrapped invocation. `result` holds the kind's
/// fallback when `succeeded` is false.
#[derive(Debug, Clone)]
pub struct RetryOutcome {
    pub kind: ExtractionKind,
    pub succeeded: bool,
    pub result: ExtractionResult,
    pub attempts_used: u32,
}

/// Invokes `kind` against the extractor, gating each response on the kind's
/// schema contract. Attempts are strictly sequential.
pub async fn invoke_with_retry(
    extractor: &dyn Extractor,
    kind: ExtractionKind,
    input: &ExtractionInput,
) -> RetryOutcome {
    let endpoint = kind.endpoint();

    for attempt in 1..=MAX_ATTEMPTS {
        match extractor.invoke(kind, input).await {
            Ok(raw) => {
                debug!(endpoint, attempt, "received extraction payload");
                match kind.validate(&raw) {
                    Ok(result) => {
                        return RetryOutcome {
                            kind,
                            succeeded: true,
                            result,
                            attempts_used: attempt,
                        };
                    }
                    Err(e) => {
                        debug!(endpoint, attempt, error = %e, "schema validation failed, retrying");
                    }
                }
            }
            Err(e) => {
                debug!(endpoint, attempt, error = %e, "extraction call failed, retrying");
            }
        }
    }

    debug!(endpoint, "retry budget exhausted, using fallback");
    RetryOutcome {
        kind,
        succeeded: false,
        result: kind.fallback(),
        attempts_used: MAX_ATTEMPTS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::client::ExtractorError;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Fails with a transport error until `succeed_on`, then returns `payload`.
    struct FlakyExtractor {
        calls: AtomicU32,
        succeed_on: u32,
        payload: Value,
    }

    impl FlakyExtractor {
        fn new(succeed_on: u32, payload: Value) -> Self {
            Self {
                calls: AtomicU32::new(0),
                succeed_on,
                payload,
            }
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Extractor for FlakyExtractor {
        async fn invoke(
            &self,
            kind: ExtractionKind,
            _input: &ExtractionInput,
        ) -> Result<Value, ExtractorError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if call >= self.succeed_on {
                Ok(self.payload.clone())
            } else {
                Err(ExtractorError::Api {
                    endpoint: kind.endpoint(),
                    status: 500,
                    message: "boom".to_string(),
                })
            }
        }
    }

    fn sample_input() -> ExtractionInput {
        ExtractionInput::new("resume body", Some("Backend Engineer".to_string()))
    }

    #[tokio::test]
    async fn test_always_failing_operation_returns_fallback_after_max_attempts() {
        for kind in ExtractionKind::ALL {
            let extractor = FlakyExtractor::new(u32::MAX, json!({}));
            let outcome = invoke_with_retry(&extractor, kind, &sample_input()).await;

            assert!(!outcome.succeeded);
            assert_eq!(outcome.attempts_used, MAX_ATTEMPTS);
            assert_eq!(extractor.calls(), MAX_ATTEMPTS);
            assert_eq!(outcome.result, kind.fallback());
        }
    }

    #[tokio::test]
    async fn test_success_on_attempt_k_stops_retrying() {
        let payload = json!({"score": 74, "items": ["Quantify achievements"]});
        let extractor = FlakyExtractor::new(3, payload);
        let outcome = invoke_with_retry(&extractor, ExtractionKind::Score, &sample_input()).await;

        assert!(outcome.succeeded);
        assert_eq!(outcome.attempts_used, 3);
        // No attempt k+1.
        assert_eq!(extractor.calls(), 3);
    }

    #[tokio::test]
    async fn test_non_conforming_payload_counts_as_failed_attempt() {
        // Transport always succeeds but the shape never conforms.
        let extractor = FlakyExtractor::new(1, json!({"unexpected": true}));
        let outcome = invoke_with_retry(&extractor, ExtractionKind::Contact, &sample_input()).await;

        assert!(!outcome.succeeded);
        assert_eq!(extractor.calls(), MAX_ATTEMPTS);
        assert_eq!(outcome.result, ExtractionKind::Contact.fallback());
    }

    #[tokio::test]
    async fn test_first_attempt_success_uses_single_call() {
        let payload = json!({"name": "Ada Lovelace"});
        let extractor = FlakyExtractor::new(1, payload);
        let outcome = invoke_with_retry(&extractor, ExtractionKind::Name, &sample_input()).await;

        assert!(outcome.succeeded);
        assert_eq!(outcome.attempts_used, 1);
        assert_eq!(extractor.calls(), 1);
    }
}
