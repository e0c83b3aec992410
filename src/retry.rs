//! Bounded retry for device calls that fail while the device is busy.

use std::thread;
use std::time::Duration;

use tracing::{debug, error, warn};

use crate::error::{Error, Result};

pub const DEFAULT_MAX_RETRIES: u32 = 5;
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    pub max_retries: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            delay: DEFAULT_RETRY_DELAY,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, delay: Duration) -> Self {
        Self { max_retries, delay }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_retries + 1
    }
}

/// Run `op`, retrying transient SDK errors with a fixed delay.
///
/// Only [`Error::is_transient`] errors are retried; anything else is returned
/// as-is. Once `policy.max_retries` retries have failed the last error is
/// wrapped in [`Error::RetriesExhausted`].
pub fn retry_with<T, F>(policy: &RetryPolicy, operation: &str, mut op: F) -> Result<T>
where
    F: FnMut() -> Result<T>,
{
    let mut failures: u32 = 0;
    loop {
        match op() {
            Ok(value) => {
                if failures > 0 {
                    debug!(operation, failures, "succeeded after retrying");
                }
                return Ok(value);
            }
            Err(err) if err.is_transient() => {
                failures += 1;
                if failures > policy.max_retries {
                    error!("Failed {operation}");
                    return Err(Error::RetriesExhausted {
                        operation: operation.to_string(),
                        attempts: failures,
                        source: Box::new(err),
                    });
                }
                warn!("failed {operation}, trying again: {err}");
                if !policy.delay.is_zero() {
                    thread::sleep(policy.delay);
                }
            }
            Err(err) => return Err(err),
        }
    }
}

/// [`retry_with`] using the default policy (5 retries, 200 ms apart).
pub fn retry<T, F>(operation: &str, op: F) -> Result<T>
where
    F: FnMut() -> Result<T>,
{
    retry_with(&RetryPolicy::default(), operation, op)
}
