//! Core domain concepts shared across all subdomains.
//!
//! - [`prompt::Prompt`] — a validated user prompt
//! - [`role::Role`] / [`role::ProviderIdentity`] — who does what in the pipeline
//! - [`error::ReviewError`] — the classified error surfaced to callers

pub mod error;
pub mod prompt;
pub mod role;
pub mod string;
