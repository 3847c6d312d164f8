//! Application layer for peer-review
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use config::{RetryPolicy, ReviewRoster, ReviewSettings};
pub use ports::{
    progress::{NoProgress, ProgressNotifier},
    text_generation::{ProviderBinding, ProviderError, TextGenerationProvider},
};
pub use use_cases::invoke_provider::ProviderInvoker;
pub use use_cases::run_debate::{DebateOutput, DebateStep, RunDebateUseCase};
pub use use_cases::run_review::RunReviewUseCase;
