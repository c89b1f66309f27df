//! Bounded attempt loop for whole solves.
//!
//! Each attempt starts from scratch; the caller's closure decides what an
//! attempt is and whether it succeeded.

use slidepass_core::RetryConfig;
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use tracing::{error, warn};

/// How many times to try and how long to wait in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn from_config(config: &RetryConfig) -> Self {
        Self {
            max_attempts: config.max_attempts,
            delay: Duration::from_millis(config.delay_ms),
        }
    }

    /// Run `task` until it succeeds or `max_attempts` is reached.
    ///
    /// `task` receives the 1-based attempt number. Returns the last error when
    /// all attempts fail.
    ///
    /// Config validation rejects `max_attempts = 0`; a policy built by hand with
    /// zero attempts is treated as one.
    pub async fn run<F, Fut, T, E>(&self, mut task: F) -> Result<T, E>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match task(attempt).await {
                Ok(result) => return Ok(result),
                Err(e) if attempt >= max_attempts => {
                    error!(
                        "Attempt {}/{} failed, giving up: {}",
                        attempt, max_attempts, e
                    );
                    return Err(e);
                }
                Err(e) => {
                    warn!(
                        "Attempt {}/{} failed: {}. Retrying in {:?}...",
                        attempt, max_attempts, e, self.delay
                    );
                    tokio::time::sleep(self.delay).await;
                    attempt += 1;
                }
            }
        }
    }
}
