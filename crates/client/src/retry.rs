//! Exponential-backoff retry for page fetches.
//!
//! Only classifications where a repeat attempt can plausibly succeed are
//! retried ([`ClientError::is_retryable`]); validation failures and missing
//! records fail immediately.

use std::future::Future;
use std::time::Duration;

use crate::error::ClientError;

/// Tunable parameters for the exponential-backoff strategy.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Delay before the second attempt.
    pub initial_delay: Duration,
    /// Upper bound on the delay between attempts.
    pub max_delay: Duration,
    /// Factor by which the delay grows after each failure.
    pub multiplier: f64,
    /// Total number of attempts, including the first.
    pub max_attempts: u32,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
            multiplier: 2.0,
            max_attempts: 3,
        }
    }
}

impl RetryConfig {
    /// Configuration for mutations: one retry only, so a user-triggered
    /// action never grinds through a long backoff ladder.
    pub fn for_mutations() -> Self {
        Self {
            max_attempts: 2,
            ..Default::default()
        }
    }
}

/// Calculate the next backoff delay from the current delay and config.
///
/// The result is clamped to [`RetryConfig::max_delay`].
pub fn next_delay(current: Duration, config: &RetryConfig) -> Duration {
    let next_ms = (current.as_millis() as f64 * config.multiplier) as u64;
    Duration::from_millis(next_ms).min(config.max_delay)
}

/// Run `op` until it succeeds, the error is terminal, or attempts run out.
pub async fn with_retries<T, F, Fut>(config: &RetryConfig, mut op: F) -> Result<T, ClientError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ClientError>>,
{
    let mut delay = config.initial_delay;
    let mut attempt = 0u32;

    loop {
        attempt += 1;
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_retryable() && attempt < config.max_attempts => {
                tracing::warn!(
                    code = %err.code,
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    "Retrying after transient failure",
                );
                tokio::time::sleep(delay).await;
                delay = next_delay(delay, config);
            }
            Err(err) => return Err(err),
        }
    }
}
