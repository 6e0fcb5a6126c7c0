//! Bounded retry with exponential backoff and an overall deadline.
//!
//! Shared by the platform adapters and the match service so every network
//! call has the same failure envelope.

use std::future::Future;
use std::time::Duration;

use rand::Rng;
use tokio::time::{sleep, timeout, Instant};
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Retry settings for one class of network call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first. Zero is treated as one.
    pub max_attempts: u32,
    /// Delay before the second attempt; doubles each retry.
    pub initial_backoff: Duration,
    /// Upper bound on a single computed delay.
    pub max_backoff: Duration,
    /// Budget for all attempts and delays combined.
    pub total_timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_millis(500),
            max_backoff: Duration::from_secs(8),
            total_timeout: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    /// A policy that tries once with no delay.
    #[must_use]
    pub const fn once(total_timeout: Duration) -> Self {
        Self {
            max_attempts: 1,
            initial_backoff: Duration::ZERO,
            max_backoff: Duration::ZERO,
            total_timeout,
        }
    }

    /// Run `op` until it succeeds, fails with a non-retryable error, or the
    /// attempt budget is spent.
    ///
    /// When the overall deadline passes, `on_timeout` builds the error to
    /// return from the elapsed time.
    ///
    /// # Errors
    ///
    /// Returns the last error from `op`, or the `on_timeout` error.
    pub async fn run<T, F, Fut, E>(
        &self,
        operation: &'static str,
        mut op: F,
        on_timeout: E,
    ) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
        E: FnOnce(Duration) -> Error,
    {
        let started = Instant::now();
        let max_attempts = self.max_attempts.max(1);

        let attempts = async {
            let mut attempt = 0;
            loop {
                attempt += 1;
                match op().await {
                    Ok(value) => return Ok(value),
                    Err(err) if attempt < max_attempts && err.is_retryable() => {
                        if let Some(hint) = err.retry_after() {
                            let remaining = self.total_timeout.saturating_sub(started.elapsed());
                            if hint >= remaining {
                                warn!(
                                    operation,
                                    attempt,
                                    retry_after_ms = hint.as_millis() as u64,
                                    remaining_ms = remaining.as_millis() as u64,
                                    error = %err,
                                    "Server delay exceeds retry budget, giving up"
                                );
                                return Err(err);
                            }
                        }
                        let delay = err
                            .retry_after()
                            .unwrap_or_else(|| self.backoff_delay(attempt));
                        warn!(
                            operation,
                            attempt,
                            max_attempts,
                            delay_ms = delay.as_millis() as u64,
                            error = %err,
                            "Request failed, retrying"
                        );
                        if !delay.is_zero() {
                            sleep(delay).await;
                        }
                    }
                    Err(err) => {
                        debug!(operation, attempt, error = %err, "Giving up");
                        return Err(err);
                    }
                }
            }
        };

        match timeout(self.total_timeout, attempts).await {
            Ok(result) => result,
            Err(_) => Err(on_timeout(started.elapsed())),
        }
    }

    /// Exponential delay for the given (1-based) failed attempt, capped at
    /// `max_backoff`, plus up to 25% random jitter.
    fn backoff_delay(&self, attempt: u32) -> Duration {
        if self.initial_backoff.is_zero() {
            return Duration::ZERO;
        }
        let exponent = attempt.saturating_sub(1).min(16);
        let base = self
            .initial_backoff
            .saturating_mul(1u32 << exponent)
            .min(self.max_backoff.max(self.initial_backoff));
        let jitter_ms = base.as_millis() as u64 / 4;
        let jitter = if jitter_ms == 0 {
            0
        } else {
            rand::thread_rng().gen_range(0..=jitter_ms)
        };
        base + Duration::from_millis(jitter)
    }
}
