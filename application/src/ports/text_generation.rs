//! Text generation port
//!
//! Defines the interface for calling a text-generation backend.

use async_trait::async_trait;
use peer_review_domain::{ErrorClass, ProviderIdentity, classify};
use std::sync::Arc;
use thiserror::Error;

/// Raw failure of a single provider call.
///
/// The `Display` text is the classification signal and is only ever logged;
/// it never reaches the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("Request timed out")]
    Timeout,

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Other error: {0}")]
    Other(String),
}

impl ProviderError {
    /// Classify this failure.
    ///
    /// Structural variants decide directly; anything else falls back to the
    /// text classifier. Unparseable bodies are always permanent.
    pub fn class(&self) -> ErrorClass {
        match self {
            ProviderError::Timeout | ProviderError::Connection(_) => ErrorClass::Transient,
            ProviderError::Auth(_) | ProviderError::InvalidResponse(_) => ErrorClass::Permanent,
            ProviderError::Http { status, .. } if *status == 408 || *status == 429 => {
                ErrorClass::Transient
            }
            ProviderError::Http { status, .. } if (500..600).contains(status) => {
                ErrorClass::Transient
            }
            ProviderError::Http { status, .. } if (400..500).contains(status) => {
                ErrorClass::Permanent
            }
            other => classify(&other.to_string()),
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ProviderError::Timeout)
    }
}

/// A text-generation backend (Anthropic, OpenAI, Gemini, or a test fake).
///
/// Implementations perform exactly one call per `generate`; retrying is the
/// invoker's job.
#[async_trait]
pub trait TextGenerationProvider: Send + Sync {
    /// Display name used in labels and messages
    fn identity(&self) -> &ProviderIdentity;

    /// Generate a completion.
    ///
    /// `Ok(None)` means the backend answered without any text content.
    async fn generate(
        &self,
        model: &str,
        system_instruction: &str,
        user_message: &str,
    ) -> Result<Option<String>, ProviderError>;
}

/// A provider paired with the model it should be called with.
#[derive(Clone)]
pub struct ProviderBinding {
    pub provider: Arc<dyn TextGenerationProvider>,
    pub model: String,
}

impl ProviderBinding {
    pub fn new(provider: Arc<dyn TextGenerationProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    pub fn identity(&self) -> &ProviderIdentity {
        self.provider.identity()
    }
}

impl std::fmt::Debug for ProviderBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderBinding")
            .field("identity", self.identity())
            .field("model", &self.model)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http(status: u16, body: &str) -> ProviderError {
        ProviderError::Http {
            status,
            body: body.to_string(),
        }
    }

    #[test]
    fn test_structural_classification() {
        assert!(ProviderError::Timeout.class().is_transient());
        assert!(ProviderError::Connection("reset".into()).class().is_transient());
        assert!(http(429, "").class().is_transient());
        assert!(http(503, "").class().is_transient());
        assert!(!http(401, "").class().is_transient());
        assert!(!ProviderError::Auth("bad key".into()).class().is_transient());
    }

    #[test]
    fn test_client_error_body_does_not_flip_classification() {
        // a 400 whose body happens to mention a timeout is still a bad request
        assert!(!http(400, "invalid timeout parameter").class().is_transient());
    }

    #[test]
    fn test_invalid_response_is_permanent() {
        let parse_error = ProviderError::InvalidResponse(
            "expected value at line 1 column 512".into(),
        );
        assert!(!parse_error.class().is_transient());
        assert!(
            !ProviderError::InvalidResponse("request timed out mid-body".into())
                .class()
                .is_transient()
        );
    }

    #[test]
    fn test_other_falls_back_to_text() {
        assert!(ProviderError::Other("rate limit hit".into()).class().is_transient());
        assert!(!ProviderError::Other("unknown model".into()).class().is_transient());
        assert!(
            ProviderError::InvalidResponse("upstream 502 bad gateway".into())
                .class()
                .is_transient()
        );
    }
}
