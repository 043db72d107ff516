//! Fixed-delay retry policy
//!
//! Every attempt that fails with a retryable error is followed by the same
//! delay, except the last one. No exponential growth, no jitter.

use backoff::backoff::Backoff;
use std::future::Future;
use std::time::Duration;
use tracing::warn;

use crate::config::FetchConfig;
use crate::error::{Error, Result};

/// Default number of attempts per request
pub const DEFAULT_RETRIES: u32 = 5;

/// Retry policy: how many attempts, and how long to wait between them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_RETRIES,
            delay: Duration::ZERO,
        }
    }
}

impl From<&FetchConfig> for RetryPolicy {
    fn from(config: &FetchConfig) -> Self {
        Self {
            max_attempts: config.retries,
            delay: Duration::from_millis(config.retry_delay_ms),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
        }
    }

    /// Run `job` until it succeeds or the attempts are used up.
    ///
    /// Returns the last observed error on exhaustion. Non-retryable
    /// errors are returned immediately.
    pub async fn run<T, F, Fut>(&self, job: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        self.run_notify(job, |err: &Error, delay: Duration| {
            warn!("Attempt failed, retrying in {}ms: {}", delay.as_millis(), err);
        })
        .await
    }

    /// Like [`RetryPolicy::run`], calling `on_retry` before every inter-attempt delay
    pub async fn run_notify<T, F, Fut, N>(&self, mut job: F, mut on_retry: N) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
        N: FnMut(&Error, Duration),
    {
        if self.max_attempts == 0 {
            return Err(Error::NoResult {
                retries: self.max_attempts,
            });
        }

        let operation = || {
            let attempt = job();
            async move {
                attempt.await.map_err(|e| {
                    if e.is_retryable() {
                        backoff::Error::transient(e)
                    } else {
                        backoff::Error::permanent(e)
                    }
                })
            }
        };

        backoff::future::retry_notify(
            FixedAttempts::new(self),
            operation,
            |err: Error, delay: Duration| on_retry(&err, delay),
        )
        .await
    }
}

/// `Backoff` that yields a constant delay for the remaining attempts
#[derive(Debug)]
struct FixedAttempts {
    remaining_retries: u32,
    policy: RetryPolicy,
}

impl FixedAttempts {
    fn new(policy: &RetryPolicy) -> Self {
        Self {
            remaining_retries: policy.max_attempts.saturating_sub(1),
            policy: *policy,
        }
    }
}

impl Backoff for FixedAttempts {
    fn reset(&mut self) {
        *self = FixedAttempts::new(&self.policy);
    }

    fn next_backoff(&mut self) -> Option<Duration> {
        if self.remaining_retries == 0 {
            return None;
        }
        self.remaining_retries -= 1;
        Some(self.policy.delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn transient(n: u32) -> Error {
        Error::fetch("https://explorer.test/address/x", format!("failure #{}", n))
    }

    #[tokio::test]
    async fn test_success_after_transient_failures() {
        let counter = AtomicU32::new(0);
        let attempts = &counter;
        let mut delays = 0;

        let result = RetryPolicy::new(5, Duration::ZERO)
            .run_notify(
                || async move {
                    let n = attempts.fetch_add(1, Ordering::SeqCst) + 1;
                    if n <= 2 {
                        Err(transient(n))
                    } else {
                        Ok("stats")
                    }
                },
                |_, _| delays += 1,
            )
            .await;

        assert_eq!(result.unwrap(), "stats");
        assert_eq!(counter.load(Ordering::SeqCst), 3);
        assert_eq!(delays, 2);
    }

    #[tokio::test]
    async fn test_exhaustion_surfaces_last_error() {
        let counter = AtomicU32::new(0);
        let attempts = &counter;
        let mut delays = 0;

        let result: Result<()> = RetryPolicy::new(3, Duration::ZERO)
            .run_notify(
                || async move {
                    let n = attempts.fetch_add(1, Ordering::SeqCst) + 1;
                    Err(transient(n))
                },
                |_, _| delays += 1,
            )
            .await;

        assert_eq!(counter.load(Ordering::SeqCst), 3);
        assert_eq!(delays, 2);
        match result.unwrap_err() {
            Error::Fetch { reason, .. } => assert_eq!(reason, "failure #3"),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_fixed_delay_between_attempts_only() {
        let counter = AtomicU32::new(0);
        let attempts = &counter;
        let started = tokio::time::Instant::now();

        let result: Result<()> = RetryPolicy::new(3, Duration::from_millis(250))
            .run(|| async move {
                let n = attempts.fetch_add(1, Ordering::SeqCst) + 1;
                Err(transient(n))
            })
            .await;

        assert!(result.is_err());
        // two delays, none after the final attempt
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_millis(500));
        assert!(elapsed < Duration::from_millis(750));
    }

    #[tokio::test]
    async fn test_permanent_error_not_retried() {
        let counter = AtomicU32::new(0);
        let attempts = &counter;

        let result: Result<()> = RetryPolicy::default()
            .run(|| async move {
                attempts.fetch_add(1, Ordering::SeqCst);
                Err(Error::malformed("https://explorer.test", "missing chain_stats"))
            })
            .await;

        assert!(matches!(result, Err(Error::MalformedResponse { .. })));
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_zero_attempts_yields_no_result() {
        let result: Result<()> = RetryPolicy::new(0, Duration::ZERO)
            .run(|| async move { Ok(()) })
            .await;

        assert!(matches!(result, Err(Error::NoResult { retries: 0 })));
    }

    #[test]
    fn test_policy_from_config() {
        let config = FetchConfig {
            retries: 7,
            retry_delay_ms: 1500,
            timeout_ms: 30_000,
        };
        let policy = RetryPolicy::from(&config);
        assert_eq!(policy.max_attempts, 7);
        assert_eq!(policy.delay, Duration::from_millis(1500));
    }
}
