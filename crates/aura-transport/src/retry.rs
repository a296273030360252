//! Bounded retry for idempotent calls.
//!
//! Only the silent session bootstrap and the prediction check retry;
//! everything else surfaces the first failure to the caller.

use std::future::Future;
use std::time::Duration;

/// How many times to attempt an operation, and how long to wait between
/// attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first. Values below 1 behave as 1.
    pub max_attempts: u32,

    /// Fixed pause between attempts.
    pub backoff: Duration,
}

impl RetryPolicy {
    /// A policy that tries once and never retries.
    pub const fn none() -> Self {
        Self {
            max_attempts: 1,
            backoff: Duration::ZERO,
        }
    }

    /// Runs `op`, re-running it while `should_retry` approves the error and
    /// attempts remain. Returns the first success or the last error.
    pub async fn run<T, E, F, Fut, P>(&self, mut op: F, should_retry: P) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        P: Fn(&E) -> bool,
    {
        let attempts = self.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(e) if attempt < attempts && should_retry(&e) => {
                    tracing::debug!(attempt, max_attempts = attempts, "retrying after failure");
                    attempt += 1;
                    if !self.backoff.is_zero() {
                        tokio::time::sleep(self.backoff).await;
                    }
                }
                Err(e) => return Err(e),
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 2,
            backoff: Duration::from_millis(250),
        }
    }
}
