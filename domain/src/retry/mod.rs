//! Retry-related domain logic.

pub mod classifier;

pub use classifier::{ErrorClass, TRANSIENT_PATTERNS, classify};
