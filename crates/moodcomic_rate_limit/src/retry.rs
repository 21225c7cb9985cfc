//! Exponential backoff for rate-limit errors.

use derive_getters::Getters;
use moodcomic_error::RetryableError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use tokio_retry2::{Retry, RetryError, strategy::jitter};
use tracing::{debug, warn};

/// Retry configuration.
///
/// A retryable failure on attempt `i` (zero-based) waits `base_delay_ms * 2^i`
/// before the next attempt. After `max_attempts` attempts the last error is
/// returned.
#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_setters::Setters,
)]
#[setters(prefix = "with_")]
pub struct RetryPolicy {
    /// Total attempts, including the first
    #[serde(default = "default_max_attempts")]
    max_attempts: u32,

    /// Backoff before the second attempt (milliseconds)
    #[serde(default = "default_base_delay_ms")]
    base_delay_ms: u64,

    /// Randomize each backoff to spread concurrent retries
    #[serde(default)]
    jitter: bool,
}

fn default_max_attempts() -> u32 {
    3
}

fn default_base_delay_ms() -> u64 {
    1000
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            base_delay_ms: default_base_delay_ms(),
            jitter: false,
        }
    }
}

impl RetryPolicy {
    /// Policy that never retries.
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Backoff waits between attempts, in order.
    ///
    /// ```
    /// use moodcomic_rate_limit::RetryPolicy;
    /// use std::time::Duration;
    ///
    /// let delays: Vec<_> = RetryPolicy::default().delays().collect();
    /// assert_eq!(delays, vec![Duration::from_millis(1000), Duration::from_millis(2000)]);
    /// ```
    pub fn delays(&self) -> impl Iterator<Item = Duration> + use<> {
        let base = self.base_delay_ms;
        let retries = self.max_attempts.max(1) - 1;
        let jittered = self.jitter;
        (0..retries).map(move |i| {
            let delay = Duration::from_millis(base.saturating_mul(2u64.saturating_pow(i)));
            if jittered { jitter(delay) } else { delay }
        })
    }

    /// Run `operation`, retrying retryable failures with exponential backoff.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let text = policy.with_retry(|| async {
    ///     client.complete(&request).await
    /// }).await?;
    /// ```
    pub async fn with_retry<T, E, F, Fut>(&self, mut operation: F) -> Result<T, E>
    where
        F: FnMut() -> Fut + Send + Sync,
        Fut: Future<Output = Result<T, E>>,
        E: RetryableError + Display,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 0u32;

        Retry::spawn(self.delays(), || {
            attempt += 1;
            let current = attempt;
            let call = operation();
            async move {
                match call.await {
                    Ok(value) => {
                        if current > 1 {
                            debug!(attempt = current, "Operation succeeded after retry");
                        }
                        Ok(value)
                    }
                    Err(e) if e.is_retryable() && current < max_attempts => {
                        warn!(
                            error = %e,
                            attempt = current,
                            max_attempts,
                            "Rate limited, backing off"
                        );
                        Err(RetryError::Transient {
                            err: e,
                            retry_after: None,
                        })
                    }
                    Err(e) if e.is_retryable() => {
                        warn!(error = %e, attempts = current, "Retries exhausted");
                        Err(RetryError::Permanent(e))
                    }
                    Err(e) => {
                        debug!(error = %e, "Permanent error, failing immediately");
                        Err(RetryError::Permanent(e))
                    }
                }
            }
        })
        .await
    }
}
