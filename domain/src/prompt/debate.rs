//! Prompt templates for the file-based debate commands.
//!
//! A debate runs outside the three-stage pipeline: one provider acts as
//! reviewer across several turns, with the author's replies kept in a file.

use serde::{Deserialize, Serialize};

/// What kind of artifact is under review
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewKind {
    Plan,
    #[default]
    Code,
    Branch,
    Feature,
}

impl ReviewKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewKind::Plan => "plan",
            ReviewKind::Code => "code",
            ReviewKind::Branch => "branch",
            ReviewKind::Feature => "feature",
        }
    }
}

impl std::fmt::Display for ReviewKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ReviewKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "plan" => Ok(ReviewKind::Plan),
            "code" => Ok(ReviewKind::Code),
            "branch" => Ok(ReviewKind::Branch),
            "feature" => Ok(ReviewKind::Feature),
            other => Err(format!(
                "unknown review type '{other}' (expected plan, code, branch or feature)"
            )),
        }
    }
}

/// Templates for the debate commands
pub struct DebateTemplate;

impl DebateTemplate {
    /// System instruction for the initial review
    pub fn reviewer_system() -> &'static str {
        r#"You are a senior engineer conducting a peer review. Your role is to provide constructive, actionable feedback.

Guidelines:
- Be specific: Point to exact issues, not vague concerns
- Be constructive: Suggest fixes, not just problems
- Be prioritized: Mark issues as Critical, Major, or Minor
- Be fair: Acknowledge strengths as well as weaknesses
- Be practical: Focus on real-world impact, not theoretical perfection

Structure your review as:

## Summary
Brief overall assessment (2-3 sentences)

## Issues Found
For each issue:
- **[CRITICAL/MAJOR/MINOR]** Issue title
  - Location: Where in the code/plan
  - Problem: What's wrong
  - Suggestion: How to fix it

## Strengths
What's done well (bullet points)

## Questions
Any clarifying questions for the author"#
    }

    /// System instruction for a follow-up turn
    pub fn followup_system() -> &'static str {
        r#"You are continuing a peer review discussion. The author has responded to your feedback.

Guidelines:
- Acknowledge when the author makes valid counter-points
- Provide additional context if your feedback was misunderstood
- Concede gracefully when convinced otherwise
- Press on issues that remain unresolved
- Stay focused on the most important points

Structure your response as:

## Resolved
Points that are now settled (acknowledged by you)

## Still Discussing
Ongoing disagreements with your updated perspective

## New Observations
Any new points based on the author's response"#
    }

    /// System instruction for the closing summary.
    ///
    /// `reviewer` names the provider that played the reviewer.
    pub fn summary_system(reviewer: &str) -> String {
        format!(
            r#"You are summarizing a peer review debate between two engineers ({reviewer} as Reviewer, the other party as Author). Produce a clear, actionable summary.

Output this exact structure:

## Agreed Points
Points where both reached consensus:
- [Point 1]
- [Point 2]

## Disagreed Points
Points where there was no resolution:
- **[Topic]**: Reviewer's view vs Author's view

## Recommended Actions
Prioritized list of concrete actions:
1. [CRITICAL] Action description
2. [MAJOR] Action description
3. [MINOR] Action description

## Key Insights
Notable observations from the debate worth remembering"#
        )
    }

    pub fn review_user(kind: ReviewKind, context: &str) -> String {
        format!(
            "Please review the following {kind}:\n\n---\n\n{context}\n\n---\n\nProvide your peer review following the structure in your instructions."
        )
    }

    pub fn respond_user(context: &str, debate: &str) -> String {
        format!(
            "Original content under review:\n\n---\n\n{context}\n\n---\n\nDebate so far:\n\n---\n\n{debate}\n\n---\n\nContinue the peer review discussion. Respond to the author's latest points following the structure in your instructions."
        )
    }

    pub fn summary_user(context: &str, debate: &str) -> String {
        format!(
            "Original content reviewed:\n\n---\n\n{context}\n\n---\n\nComplete peer review debate:\n\n---\n\n{debate}\n\n---\n\nSynthesize this debate into the structured summary format in your instructions."
        )
    }
}
