use std::{future::Future, time::Duration};

use backon::{ExponentialBuilder, Retryable};

use crate::{CurateError, Res, warning};

/// Exponential backoff for remote operations.
///
/// Only transient failures (rate limits, timeouts, 5xx) are retried. When the
/// attempts run out the last error is returned unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, the first call included.
    pub attempts: usize,
    pub min_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 5,
            min_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    /// Same attempt budget without sleeping between attempts.
    pub fn immediate(attempts: usize) -> Self {
        Self {
            attempts,
            min_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
        }
    }

    pub fn none() -> Self {
        Self::immediate(1)
    }

    fn backoff(&self) -> ExponentialBuilder {
        ExponentialBuilder::default()
            .with_min_delay(self.min_delay)
            .with_max_delay(self.max_delay)
            .with_factor(2.0)
            .with_max_times(self.attempts.saturating_sub(1))
    }

    /// Wait before the next attempt after `err`.
    ///
    /// A rate limit with a `Retry-After` hint waits at least that long, but
    /// never more than `max_delay`.
    pub fn delay_for(&self, err: &CurateError, backoff: Duration) -> Duration {
        match err {
            CurateError::RateLimited {
                retry_after: Some(secs),
            } => backoff.max(Duration::from_secs(*secs).min(self.max_delay)),
            _ => backoff,
        }
    }

    /// Runs `operation` until it succeeds, fails terminally or the budget is spent.
    pub async fn run<T, F, Fut>(&self, label: &str, operation: F) -> Res<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Res<T>>,
    {
        operation
            .retry(self.backoff())
            .sleep(tokio::time::sleep)
            .when(CurateError::is_transient)
            .adjust(|err: &CurateError, backoff: Option<Duration>| {
                backoff.map(|delay| self.delay_for(err, delay))
            })
            .notify(|err: &CurateError, delay: Duration| {
                warning!("{} failed ({}), retrying in {:?}", label, err, delay);
            })
            .await
    }
}
