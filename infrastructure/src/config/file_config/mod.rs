//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod providers;
mod review;
mod roles;
mod server;

pub use providers::{FileProviderConfig, FileProvidersConfig, ProviderKind};
pub use review::FileReviewConfig;
pub use roles::FileRolesConfig;
pub use server::FileServerConfig;

use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Prompt limits and retry settings
    pub review: FileReviewConfig,
    /// Provider assignment per role
    pub roles: FileRolesConfig,
    /// Per-provider API settings
    pub providers: FileProvidersConfig,
    /// HTTP request boundary
    pub server: FileServerConfig,
}
