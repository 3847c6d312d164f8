//! Roles and provider identities.

use serde::{Deserialize, Serialize};

/// A logical participant in the review pipeline (Value Object)
///
/// `A` and `B` answer and critique each other; `Summarizer` condenses the
/// two critiques. The pipeline branches on roles only, never on which
/// backend happens to fill a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    A,
    B,
    Summarizer,
}

impl Role {
    /// The roles that answer and critique, in stage order.
    pub const PARTICIPANTS: [Role; 2] = [Role::A, Role::B];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::A => "a",
            Role::B => "b",
            Role::Summarizer => "summarizer",
        }
    }

    /// The participant whose stage-1 output this role critiques.
    ///
    /// Returns `None` for the summarizer, which critiques no one.
    pub fn counterpart(&self) -> Option<Role> {
        match self {
            Role::A => Some(Role::B),
            Role::B => Some(Role::A),
            Role::Summarizer => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::A => write!(f, "provider A"),
            Role::B => write!(f, "provider B"),
            Role::Summarizer => write!(f, "summarizer"),
        }
    }
}

/// Opaque display name of a configured backend (e.g. "Claude").
///
/// Used for labels and messages only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProviderIdentity(String);

impl ProviderIdentity {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProviderIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ProviderIdentity {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counterpart_is_complement() {
        assert_eq!(Role::A.counterpart(), Some(Role::B));
        assert_eq!(Role::B.counterpart(), Some(Role::A));
        assert_eq!(Role::Summarizer.counterpart(), None);
    }

    #[test]
    fn test_no_participant_is_its_own_counterpart() {
        for role in Role::PARTICIPANTS {
            assert_ne!(role.counterpart(), Some(role));
        }
    }

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Summarizer).unwrap(), "\"summarizer\"");
        assert_eq!(Role::A.as_str(), "a");
    }

    #[test]
    fn test_identity_display() {
        let id = ProviderIdentity::new("anthropic");
        assert_eq!(id.to_string(), "anthropic");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"anthropic\"");
    }
}
