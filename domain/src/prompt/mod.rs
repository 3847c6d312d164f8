//! Prompt templates for the review pipeline and the debate commands.

pub mod debate;
pub mod template;

pub use debate::{DebateTemplate, ReviewKind};
pub use template::PromptTemplate;
