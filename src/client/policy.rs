//! Retry policy for the generation loop.
//!
//! The loop is driven by pattern-matching on [`Decision`] rather than by
//! exception control flow: the invocation layer hands back a classified
//! [`InvokeError`] and this module decides what happens next.

use crate::error::InvokeError;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Fixed delay before retrying a decode or transport failure.
const SHORT_RETRY_DELAY: Duration = Duration::from_secs(1);

/// What to do after a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Decision {
    /// Sleep for `delay`, then attempt again.
    Retry { delay: Duration },
    /// Non-retryable condition; abort immediately even with budget left.
    Abort,
    /// Retryable condition, but the attempt budget is spent.
    Exhausted,
}

/// Decide the next step after attempt number `attempt` (1-based) failed with
/// `err`, given a total budget of `max_retries` attempts.
pub(crate) fn decide(err: &InvokeError, attempt: u32, max_retries: u32) -> Decision {
    let budget_left = attempt < max_retries;
    match err {
        InvokeError::Throttled { .. } | InvokeError::ServiceUnavailable { .. } => {
            if budget_left {
                Decision::Retry {
                    delay: transient_backoff(attempt),
                }
            } else {
                Decision::Exhausted
            }
        }
        InvokeError::Transport { .. } | InvokeError::Decode { .. } | InvokeError::EmptyCompletion => {
            if budget_left {
                Decision::Retry {
                    delay: SHORT_RETRY_DELAY,
                }
            } else {
                Decision::Exhausted
            }
        }
        InvokeError::Service { .. } => Decision::Abort,
    }
}

/// Exponential backoff for transient service conditions:
/// `2^(attempt-1) + fractional_jitter` seconds for the 1-based failed attempt.
///
/// The doubling term grows by at least the full jitter range per step, so
/// successive delays are non-decreasing regardless of the jitter drawn.
fn transient_backoff(attempt: u32) -> Duration {
    let exp = attempt.saturating_sub(1).min(16);
    Duration::from_secs(1u64 << exp) + fractional_jitter()
}

/// Sub-second jitter in [0, 1s) derived from the clock's subsecond phase.
fn fractional_jitter() -> Duration {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| u64::from(d.subsec_millis()))
        .unwrap_or(0);
    Duration::from_millis(millis)
}
