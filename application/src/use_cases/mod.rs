//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod invoke_provider;
pub mod run_debate;
pub mod run_review;
