//! Orchestration domain entities

use crate::core::error::ReviewError;
use serde::{Deserialize, Serialize};

/// Stage of a review run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Every participant answers the prompt
    Initial,
    /// Every participant critiques its counterpart's answer
    Critique,
    /// The summarizer condenses both critiques
    Summary,
}

impl Stage {
    pub const ALL: [Stage; 3] = [Stage::Initial, Stage::Critique, Stage::Summary];

    pub fn as_str(&self) -> &str {
        match self {
            Stage::Initial => "initial",
            Stage::Critique => "critique",
            Stage::Summary => "summary",
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Stage::Initial => "Initial Responses",
            Stage::Critique => "Cross-Critique",
            Stage::Summary => "Summary",
        }
    }

    /// 1-based position in the pipeline.
    pub fn number(&self) -> usize {
        match self {
            Stage::Initial => 1,
            Stage::Critique => 2,
            Stage::Summary => 3,
        }
    }

    pub fn next(&self) -> Option<Stage> {
        match self {
            Stage::Initial => Some(Stage::Critique),
            Stage::Critique => Some(Stage::Summary),
            Stage::Summary => None,
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// State of the review pipeline.
///
/// ```text
/// Pending → Running(Initial) → Running(Critique) → Running(Summary) → Completed
///                 └──────────────────┴──────────────────┴──→ Failed
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineState {
    Pending,
    Running(Stage),
    Completed,
    Failed(ReviewError),
}

impl PipelineState {
    /// Transition after the current stage's barrier is satisfied.
    ///
    /// Terminal states do not move.
    pub fn advance(&self) -> PipelineState {
        match self {
            PipelineState::Pending => PipelineState::Running(Stage::Initial),
            PipelineState::Running(stage) => match stage.next() {
                Some(next) => PipelineState::Running(next),
                None => PipelineState::Completed,
            },
            terminal => terminal.clone(),
        }
    }

    /// Transition into `Failed`. Only running states may fail; others are unchanged.
    pub fn fail(&self, error: ReviewError) -> PipelineState {
        match self {
            PipelineState::Running(_) => PipelineState::Failed(error),
            other => other.clone(),
        }
    }

    pub fn current_stage(&self) -> Option<Stage> {
        match self {
            PipelineState::Running(stage) => Some(*stage),
            _ => None,
        }
    }
}

impl std::fmt::Display for PipelineState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineState::Pending => write!(f, "pending"),
            PipelineState::Running(stage) => write!(f, "stage {} running", stage.number()),
            PipelineState::Completed => write!(f, "completed"),
            PipelineState::Failed(e) => write!(f, "failed ({})", e.kind()),
        }
    }
}
