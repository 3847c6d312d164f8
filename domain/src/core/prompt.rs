//! Prompt value object

use crate::core::error::ReviewError;
use serde::Serialize;

/// Default maximum prompt length, in characters.
pub const DEFAULT_MAX_PROMPT_CHARS: usize = 10_000;

/// Message for an empty or all-whitespace prompt.
pub const EMPTY_PROMPT_MESSAGE: &str = "Please enter a non-empty prompt.";

/// A validated user prompt (Value Object)
///
/// Holds the trimmed text. Non-empty and at most the configured number of
/// characters; immutable once accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Prompt {
    content: String,
}

impl Prompt {
    /// Validate raw input against `max_chars`.
    ///
    /// Surrounding whitespace is trimmed before both checks.
    pub fn parse(raw: &str, max_chars: usize) -> Result<Self, ReviewError> {
        let content = raw.trim();
        if content.is_empty() {
            return Err(ReviewError::validation(EMPTY_PROMPT_MESSAGE));
        }
        if content.chars().count() > max_chars {
            return Err(ReviewError::validation(too_long_message(max_chars)));
        }
        Ok(Self {
            content: content.to_string(),
        })
    }

    pub fn content(&self) -> &str {
        &self.content
    }

}

impl std::fmt::Display for Prompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

/// "Prompt must be 10,000 characters or fewer."
fn too_long_message(max_chars: usize) -> String {
    format!(
        "Prompt must be {} characters or fewer.",
        group_thousands(max_chars)
    )
}

fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
