//! Domain layer for peer-review
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Review pipeline
//!
//! Two participants (roles `A` and `B`) answer the same prompt, then each
//! critiques the other's answer, then a summarizer condenses both critiques:
//!
//! ```text
//!   Initial      A ──┐        ┌── B
//!                    ╳  (each critiques the other)
//!   Critique     A→B ┘        └ B→A
//!                     \      /
//!   Summary          Summarizer
//! ```
//!
//! Each stage is a barrier. The run yields exactly one outcome: a fully
//! populated [`ReviewResult`] or one [`ReviewError`].

pub mod core;
pub mod orchestration;
pub mod prompt;
pub mod retry;

// Re-export commonly used types
pub use core::{
    error::{GENERIC_ERROR_MESSAGE, ReviewError},
    prompt::{DEFAULT_MAX_PROMPT_CHARS, Prompt},
    role::{ProviderIdentity, Role},
};
pub use orchestration::{
    aggregator::{ParticipantOutputs, aggregate},
    entities::{PipelineState, Stage},
    value_objects::{ReviewResult, StageOutput, StageTask},
};
pub use prompt::{DebateTemplate, PromptTemplate, ReviewKind};
pub use retry::{ErrorClass, classify};
