//! Application-level configuration.
//!
//! This module provides configuration types that control how use cases behave:
//!
//! - [`RetryPolicy`] — single retry and its backoff
//! - [`ReviewRoster`] — which provider fills each role
//! - [`ReviewSettings`] — prompt limits and retry policy for a review run

pub mod retry_policy;
pub mod roster;

pub use retry_policy::RetryPolicy;
pub use roster::ReviewRoster;

use peer_review_domain::DEFAULT_MAX_PROMPT_CHARS;

/// Static settings for review runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewSettings {
    /// Maximum accepted prompt length, in characters.
    pub max_prompt_chars: usize,
    pub retry: RetryPolicy,
}

impl Default for ReviewSettings {
    fn default() -> Self {
        Self {
            max_prompt_chars: DEFAULT_MAX_PROMPT_CHARS,
            retry: RetryPolicy::default(),
        }
    }
}
