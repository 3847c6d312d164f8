//! Review run configuration from TOML (`[review]` section)

use peer_review_application::{RetryPolicy, ReviewSettings};
use peer_review_domain::DEFAULT_MAX_PROMPT_CHARS;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileReviewConfig {
    /// Maximum prompt length in characters (after trimming)
    pub max_prompt_chars: usize,
    /// Flat wait before the single retry, in milliseconds
    pub retry_delay_ms: u64,
}

impl Default for FileReviewConfig {
    fn default() -> Self {
        Self {
            max_prompt_chars: DEFAULT_MAX_PROMPT_CHARS,
            retry_delay_ms: 1000,
        }
    }
}

impl FileReviewConfig {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::default().with_backoff_ms(self.retry_delay_ms)
    }

    pub fn to_settings(&self) -> ReviewSettings {
        ReviewSettings {
            max_prompt_chars: self.max_prompt_chars,
            retry: self.retry_policy(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_application_defaults() {
        assert_eq!(FileReviewConfig::default().to_settings(), ReviewSettings::default());
    }

    #[test]
    fn test_custom_retry_delay() {
        let config: FileReviewConfig = toml::from_str("retry_delay_ms = 250").unwrap();
        let policy = config.retry_policy();
        assert_eq!(policy.backoff.as_millis(), 250);
        assert_eq!(config.max_prompt_chars, 10_000);
    }

    #[test]
    fn test_attempt_count_cannot_be_raised() {
        // Older files may still carry an attempt count; it has no effect.
        let config: FileReviewConfig =
            toml::from_str("retry_attempts = 4\nretry_delay_ms = 10").unwrap();
        let policy = config.retry_policy();
        assert!(policy.allows_retry_after(1));
        assert!(!policy.allows_retry_after(2));
        assert!(!policy.allows_retry_after(3));
    }
}
