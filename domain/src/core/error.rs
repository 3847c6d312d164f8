//! Classified error taxonomy surfaced to callers.

use crate::core::role::{ProviderIdentity, Role};
use thiserror::Error;

/// Fallback message for anything that could not be classified.
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

/// The single failure outcome of a review run or a provider call.
///
/// Every variant carries a user-facing message. Raw provider diagnostics are
/// never stored here; they are logged where they occur.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReviewError {
    /// Missing or unusable configuration (e.g. credentials). Never retried.
    #[error("{message}")]
    Configuration { message: String },

    /// A provider call failed after the retry policy was exhausted.
    #[error("{message}")]
    Provider {
        role: Role,
        identity: ProviderIdentity,
        message: String,
    },

    /// Caller input was rejected. Surfaced verbatim.
    #[error("{message}")]
    Validation { message: String },

    /// Anything uncategorized.
    #[error("{message}")]
    Unknown { message: String },
}

impl ReviewError {
    pub fn configuration(message: impl Into<String>) -> Self {
        ReviewError::Configuration {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ReviewError::Validation {
            message: message.into(),
        }
    }

    pub fn provider(role: Role, identity: ProviderIdentity, message: impl Into<String>) -> Self {
        ReviewError::Provider {
            role,
            identity,
            message: message.into(),
        }
    }

    /// Unknown error with the generic fallback message.
    pub fn unknown() -> Self {
        ReviewError::Unknown {
            message: GENERIC_ERROR_MESSAGE.to_string(),
        }
    }

    /// The message that may be shown to the user.
    pub fn user_message(&self) -> &str {
        match self {
            ReviewError::Configuration { message }
            | ReviewError::Provider { message, .. }
            | ReviewError::Validation { message }
            | ReviewError::Unknown { message } => message,
        }
    }

    /// The role whose call failed, for provider errors.
    pub fn role(&self) -> Option<Role> {
        match self {
            ReviewError::Provider { role, .. } => Some(*role),
            _ => None,
        }
    }

    /// Stable machine-readable tag.
    pub fn kind(&self) -> &'static str {
        match self {
            ReviewError::Configuration { .. } => "configuration",
            ReviewError::Provider { .. } => "provider",
            ReviewError::Validation { .. } => "validation",
            ReviewError::Unknown { .. } => "unknown",
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ReviewError::Validation { .. })
    }
}
