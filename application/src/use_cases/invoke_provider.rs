//! Provider invocation with bounded retry
//!
//! Wraps one logical call to one provider. Transient failures (as decided by
//! [`ProviderError::class`]) are retried once after the [`RetryPolicy`]
//! backoff; everything else ends the call with a provider-agnostic
//! [`ReviewError::Provider`].

use crate::config::RetryPolicy;
use crate::ports::text_generation::{ProviderBinding, ProviderError};
use peer_review_domain::core::string::log_excerpt;
use peer_review_domain::{ProviderIdentity, ReviewError, Role};
use tracing::{debug, warn};

/// Longest raw error excerpt written to the log.
const MAX_LOGGED_ERROR_LEN: usize = 500;

/// Invokes providers under a retry policy.
///
/// Holds no mutable state, so one invoker can serve concurrent calls for
/// different roles.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProviderInvoker {
    policy: RetryPolicy,
}

impl ProviderInvoker {
    pub fn new(policy: RetryPolicy) -> Self {
        Self { policy }
    }

    /// Call `binding` for `role` and return its trimmed text.
    ///
    /// A response without text becomes the empty string.
    pub async fn invoke(
        &self,
        role: Role,
        binding: &ProviderBinding,
        system_instruction: &str,
        user_message: &str,
    ) -> Result<String, ReviewError> {
        let identity = binding.identity();
        let mut attempt = 0;

        loop {
            attempt += 1;
            debug!(
                role = role.as_str(),
                provider = %identity,
                model = %binding.model,
                attempt,
                "Invoking provider"
            );

            let error = match binding
                .provider
                .generate(&binding.model, system_instruction, user_message)
                .await
            {
                Ok(text) => {
                    return Ok(text.map(|t| t.trim().to_string()).unwrap_or_default());
                }
                Err(e) => e,
            };

            let class = error.class();
            if class.is_transient() && self.policy.allows_retry_after(attempt) {
                warn!(
                    role = role.as_str(),
                    provider = %identity,
                    attempt,
                    error = %log_excerpt(&error.to_string(), MAX_LOGGED_ERROR_LEN),
                    "Transient provider error, retrying in {}ms",
                    self.policy.backoff.as_millis()
                );
                tokio::time::sleep(self.policy.backoff).await;
                continue;
            }

            warn!(
                role = role.as_str(),
                provider = %identity,
                attempt,
                transient = class.is_transient(),
                error = %log_excerpt(&error.to_string(), MAX_LOGGED_ERROR_LEN),
                "Provider call failed"
            );
            return Err(Self::failure(role, identity, &error));
        }
    }

    /// The user-facing error for a call that will not be retried.
    fn failure(role: Role, identity: &ProviderIdentity, error: &ProviderError) -> ReviewError {
        let message = if error.is_timeout() {
            format!("Request to {identity} timed out. Please try again.")
        } else {
            format!("Unable to connect to {identity}. Please check your API key and try again.")
        };
        ReviewError::provider(role, identity.clone(), message)
    }
}
