//! Run Debate use case
//!
//! Single-call peer review steps driven from the command line: an opening
//! review of some content, a follow-up response in an ongoing debate, and a
//! closing summary. Each step is one [`ProviderInvoker`] call, so it shares
//! the retry and error classification of the review pipeline.

use crate::config::RetryPolicy;
use crate::ports::text_generation::ProviderBinding;
use crate::use_cases::invoke_provider::ProviderInvoker;
use peer_review_domain::{DebateTemplate, ReviewError, ReviewKind, Role};
use tracing::info;

/// One debate step and its inputs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DebateStep {
    /// Opening review of `context`
    Review { kind: ReviewKind, context: String },
    /// Reply to the latest points of `debate`
    Respond { context: String, debate: String },
    /// Structured summary of the whole `debate`
    Summary { context: String, debate: String },
}

impl DebateStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            DebateStep::Review { .. } => "review",
            DebateStep::Respond { .. } => "respond",
            DebateStep::Summary { .. } => "summary",
        }
    }

    /// Heading printed above the output, e.g. `openai Review`.
    pub fn title(&self, reviewer: &str) -> String {
        match self {
            DebateStep::Review { .. } => format!("{reviewer} Review"),
            DebateStep::Respond { .. } => format!("{reviewer} Response"),
            DebateStep::Summary { .. } => "Debate Summary".to_string(),
        }
    }

    /// Heading printed below the output, e.g. `End Review`.
    pub fn end_title(&self) -> &'static str {
        match self {
            DebateStep::Review { .. } => "End Review",
            DebateStep::Respond { .. } => "End Response",
            DebateStep::Summary { .. } => "End Summary",
        }
    }

    fn system_instruction(&self, reviewer: &str) -> String {
        match self {
            DebateStep::Review { .. } => DebateTemplate::reviewer_system().to_string(),
            DebateStep::Respond { .. } => DebateTemplate::followup_system().to_string(),
            DebateStep::Summary { .. } => DebateTemplate::summary_system(reviewer),
        }
    }

    fn user_message(&self) -> String {
        match self {
            DebateStep::Review { kind, context } => DebateTemplate::review_user(*kind, context),
            DebateStep::Respond { context, debate } => DebateTemplate::respond_user(context, debate),
            DebateStep::Summary { context, debate } => DebateTemplate::summary_user(context, debate),
        }
    }
}

/// Output of one debate step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebateOutput {
    pub title: String,
    pub end_title: String,
    pub text: String,
}

/// Use case for a single debate step
pub struct RunDebateUseCase {
    reviewer: ProviderBinding,
    invoker: ProviderInvoker,
}

impl RunDebateUseCase {
    pub fn new(reviewer: ProviderBinding, policy: RetryPolicy) -> Self {
        Self {
            reviewer,
            invoker: ProviderInvoker::new(policy),
        }
    }

    pub async fn execute(&self, step: &DebateStep) -> Result<DebateOutput, ReviewError> {
        let reviewer = self.reviewer.identity().to_string();
        info!(step = step.as_str(), provider = %reviewer, "Running debate step");

        // The reviewer is reported under role A.
        let text = self
            .invoker
            .invoke(
                Role::A,
                &self.reviewer,
                &step.system_instruction(&reviewer),
                &step.user_message(),
            )
            .await?;

        Ok(DebateOutput {
            title: step.title(&reviewer),
            end_title: step.end_title().to_string(),
            text,
        })
    }
}
