//! Result aggregation.
//!
//! Stage joins are collected into [`ParticipantOutputs`]; once every stage has
//! produced its outputs, [`aggregate`] assembles the [`ReviewResult`].

use crate::core::prompt::Prompt;
use crate::core::role::Role;
use crate::orchestration::entities::Stage;
use crate::orchestration::value_objects::{ReviewResult, StageOutput};

/// One text per participant role, for a single fan-out stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantOutputs {
    pub a: String,
    pub b: String,
}

impl ParticipantOutputs {
    /// Collect a stage's outputs, in any completion order.
    ///
    /// Returns `None` unless exactly one output exists for each participant
    /// role and all of them belong to `stage`.
    pub fn collect(stage: Stage, outputs: Vec<StageOutput>) -> Option<Self> {
        let mut a = None;
        let mut b = None;
        for output in outputs {
            if output.stage != stage {
                return None;
            }
            let slot = match output.role {
                Role::A => &mut a,
                Role::B => &mut b,
                Role::Summarizer => return None,
            };
            if slot.replace(output.text).is_some() {
                return None;
            }
        }
        Some(Self { a: a?, b: b? })
    }

    pub fn get(&self, role: Role) -> Option<&str> {
        match role {
            Role::A => Some(&self.a),
            Role::B => Some(&self.b),
            Role::Summarizer => None,
        }
    }
}

/// Assemble the final record. Pure; nothing here can fail.
pub fn aggregate(
    prompt: &Prompt,
    initial: ParticipantOutputs,
    critiques: ParticipantOutputs,
    summary: String,
) -> ReviewResult {
    ReviewResult {
        prompt: prompt.content().to_string(),
        initial_response_a: initial.a,
        initial_response_b: initial.b,
        critique_a_of_b: critiques.a,
        critique_b_of_a: critiques.b,
        summary,
    }
}
