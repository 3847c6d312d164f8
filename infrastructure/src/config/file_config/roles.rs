//! Role assignment from TOML (`[roles]` section)

use super::providers::ProviderKind;
use peer_review_domain::Role;
use serde::{Deserialize, Serialize};

/// Which provider fills each role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRolesConfig {
    pub a: ProviderKind,
    pub b: ProviderKind,
    pub summarizer: ProviderKind,
}

impl Default for FileRolesConfig {
    fn default() -> Self {
        Self {
            a: ProviderKind::Anthropic,
            b: ProviderKind::OpenAi,
            summarizer: ProviderKind::Anthropic,
        }
    }
}

impl FileRolesConfig {
    pub fn provider_for(&self, role: Role) -> ProviderKind {
        match role {
            Role::A => self.a,
            Role::B => self.b,
            Role::Summarizer => self.summarizer,
        }
    }
}
