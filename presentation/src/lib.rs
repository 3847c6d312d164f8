//! Presentation layer for peer-review
//!
//! This crate contains CLI definitions, output formatters,
//! progress reporters, and the HTTP request boundary.

pub mod cli;
pub mod output;
pub mod progress;
pub mod server;

// Re-export commonly used types
pub use cli::commands::{Cli, Command, OutputFormat};
pub use output::console::ConsoleFormatter;
pub use progress::reporter::ProgressReporter;
pub use server::{AppState, ServerError, create_router, serve};
