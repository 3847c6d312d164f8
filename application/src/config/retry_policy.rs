//! Retry policy — provider call retry control.
//!
//! A call is attempted at most [`MAX_ATTEMPTS`] times: the first try plus a
//! single retry after a transient failure. Only the wait before that retry is
//! configurable.

use std::time::Duration;

/// Attempts per call, including the first. Fixed at one retry.
pub const MAX_ATTEMPTS: u32 = 2;

/// Default wait before the retry.
pub const DEFAULT_BACKOFF: Duration = Duration::from_millis(1000);

/// Single-retry, flat-delay policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Wait before the retry.
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            backoff: DEFAULT_BACKOFF,
        }
    }
}

impl RetryPolicy {
    // ==================== Builder Methods ====================

    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    pub fn with_backoff_ms(self, millis: u64) -> Self {
        self.with_backoff(Duration::from_millis(millis))
    }

    /// Whether a transient failure on `attempt` (1-based) may be retried.
    pub fn allows_retry_after(&self, attempt: u32) -> bool {
        attempt < MAX_ATTEMPTS
    }
}
