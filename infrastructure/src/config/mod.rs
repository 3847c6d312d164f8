//! Configuration file loading for peer-review
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment variables prefixed `PEER_REVIEW_` (nested keys split on `__`)
//! 2. `--config <path>` specified file
//! 3. Project root: `./peer-review.toml` or `./.peer-review.toml`
//! 4. Global: `~/.config/peer-review/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    FileConfig, FileProviderConfig, FileProvidersConfig, FileReviewConfig, FileRolesConfig,
    FileServerConfig, ProviderKind,
};
pub use loader::{ConfigLoader, ENV_PREFIX};
