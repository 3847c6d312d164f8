//! Orchestration value objects - immutable outputs of a review run.
//!
//! - [`StageTask`] - one provider call of a stage
//! - [`StageOutput`] - one task's text, labelled by stage and role
//! - [`ReviewResult`] - the complete, fully populated record

use crate::core::role::Role;
use crate::orchestration::entities::Stage;
use serde::{Deserialize, Serialize};

/// One provider call of one stage, with its inputs owned by value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageTask {
    pub stage: Stage,
    pub role: Role,
    pub system_instruction: String,
    pub user_message: String,
}

impl StageTask {
    pub fn new(
        stage: Stage,
        role: Role,
        system_instruction: impl Into<String>,
        user_message: impl Into<String>,
    ) -> Self {
        Self {
            stage,
            role,
            system_instruction: system_instruction.into(),
            user_message: user_message.into(),
        }
    }
}

/// Text produced by one task of one stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageOutput {
    pub stage: Stage,
    pub role: Role,
    pub text: String,
}

impl StageOutput {
    pub fn new(stage: Stage, role: Role, text: impl Into<String>) -> Self {
        Self {
            stage,
            role,
            text: text.into(),
        }
    }
}

/// Final aggregate of a review run.
///
/// Either fully populated or never constructed; there are no optional fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResult {
    /// The validated prompt
    pub prompt: String,
    /// Stage 1 answer of provider A
    pub initial_response_a: String,
    /// Stage 1 answer of provider B
    pub initial_response_b: String,
    /// Stage 2: A's critique of B's answer
    #[serde(rename = "critiqueAofB")]
    pub critique_a_of_b: String,
    /// Stage 2: B's critique of A's answer
    #[serde(rename = "critiqueBofA")]
    pub critique_b_of_a: String,
    /// Stage 3 summary of both critiques
    pub summary: String,
}
