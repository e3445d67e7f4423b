//! Retry and deadline orchestration for the upstream agent call.
//!
//! Two independent cancellation signals compose here: the retry loop stops
//! on attempt-count or its own elapsed budget, and `with_deadline` races the
//! whole orchestrated call against a wall-clock SLA. The signals stay
//! separate so each is testable in isolation, and so a deadline expiry is
//! distinguishable from retry exhaustion at the error level.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use tokio::time::Instant;
use tracing::{debug, trace, warn};

use crate::agent::AgentError;

/// Bounded-retry configuration for transient upstream failures.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    /// Per-attempt delay schedule; the last entry is reused for attempts
    /// beyond the schedule length.
    pub delays: Vec<Duration>,
    /// Elapsed-time stop condition for the retry loop itself (distinct from
    /// the outer wall-clock deadline).
    pub max_total: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delays: vec![
                Duration::from_secs(1),
                Duration::from_secs(2),
                Duration::from_secs(4),
            ],
            max_total: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    /// Delay to sleep after the given (1-based) failed attempt.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let idx = (attempt as usize).saturating_sub(1);
        self.delays
            .get(idx)
            .or_else(|| self.delays.last())
            .copied()
            .unwrap_or(Duration::from_secs(1))
    }
}

/// Observable states of the retry loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryState {
    Idle,
    Attempting { attempt: u32 },
    Waiting { next_attempt: u32 },
    Succeeded,
    Exhausted,
}

#[derive(Debug, Error)]
pub enum RetryError {
    /// All attempts (or the retry time budget) consumed; wraps the final
    /// transient failure.
    #[error("retries exhausted after {attempts} attempts: {last}")]
    Exhausted { attempts: u32, last: AgentError },

    /// Non-retryable failure, propagated from the first attempt that hit it.
    #[error(transparent)]
    Fatal(AgentError),
}

/// Runs `op` under `policy`, retrying transient [`AgentError`]s.
///
/// Stops on whichever comes first: attempt count reaching
/// `policy.max_attempts`, or elapsed time reaching `policy.max_total`.
/// Non-retryable errors short-circuit as [`RetryError::Fatal`].
pub async fn run_with_retry<T, F, Fut>(policy: &RetryPolicy, mut op: F) -> Result<T, RetryError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AgentError>>,
{
    let started = Instant::now();
    let mut state = RetryState::Idle;
    trace!(?state, "retry transition");
    let mut attempt = 0u32;

    loop {
        attempt += 1;
        state = RetryState::Attempting { attempt };
        trace!(?state, "retry transition");

        match op().await {
            Ok(value) => {
                state = RetryState::Succeeded;
                trace!(?state, "retry transition");
                debug!(attempt, "agent call succeeded");
                return Ok(value);
            }
            Err(err) if !err.is_retryable() => {
                state = RetryState::Exhausted;
                trace!(?state, "retry transition");
                warn!(attempt, error = %err, "non-retryable agent failure");
                return Err(RetryError::Fatal(err));
            }
            Err(err) => {
                let elapsed = started.elapsed();
                if attempt >= policy.max_attempts || elapsed >= policy.max_total {
                    state = RetryState::Exhausted;
                    trace!(?state, "retry transition");
                    warn!(
                        attempt,
                        elapsed_ms = elapsed.as_millis() as u64,
                        error = %err,
                        "retries exhausted"
                    );
                    return Err(RetryError::Exhausted {
                        attempts: attempt,
                        last: err,
                    });
                }

                let delay = policy.delay_for(attempt);
                state = RetryState::Waiting {
                    next_attempt: attempt + 1,
                };
                trace!(?state, "retry transition");
                warn!(
                    attempt,
                    max_attempts = policy.max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "agent call failed, retrying"
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}

/// Wall-clock SLA violation; deliberately a different type from
/// [`RetryError`] so the two failure modes never blur.
#[derive(Debug, Error)]
#[error("analysis deadline of {}s exceeded", budget.as_secs())]
pub struct DeadlineExceeded {
    pub budget: Duration,
}

/// Races `fut` against a hard wall-clock budget. On expiry the in-flight
/// future is dropped (best-effort abandonment of the upstream call).
pub async fn with_deadline<T, Fut>(budget: Duration, fut: Fut) -> Result<T, DeadlineExceeded>
where
    Fut: Future<Output = T>,
{
    tokio::time::timeout(budget, fut)
        .await
        .map_err(|_| DeadlineExceeded { budget })
}
