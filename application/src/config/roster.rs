//! Review roster.
//!
//! [`ReviewRoster`] maps each [`Role`] to the provider binding that fills it.
//! It is built once, before any stage runs, and only read afterwards.

use crate::ports::text_generation::ProviderBinding;
use peer_review_domain::Role;

/// Which provider (and model) plays each role.
///
/// The same backend may fill several roles; the pipeline only ever looks up
/// bindings by role.
#[derive(Debug, Clone)]
pub struct ReviewRoster {
    a: ProviderBinding,
    b: ProviderBinding,
    summarizer: ProviderBinding,
}

impl ReviewRoster {
    pub fn new(a: ProviderBinding, b: ProviderBinding, summarizer: ProviderBinding) -> Self {
        Self { a, b, summarizer }
    }

    pub fn binding(&self, role: Role) -> &ProviderBinding {
        match role {
            Role::A => &self.a,
            Role::B => &self.b,
            Role::Summarizer => &self.summarizer,
        }
    }

    /// Label used for `role` inside prompt text.
    pub fn label(&self, role: Role) -> String {
        self.binding(role).identity().to_string()
    }
}
