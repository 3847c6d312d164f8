//! Transient error classification.
//!
//! A pure predicate over an error's text. New transient signals are added
//! to [`TRANSIENT_PATTERNS`] without touching any retry control flow.

use regex::RegexSet;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Whether a failure is worth retrying unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorClass {
    Transient,
    Permanent,
}

impl ErrorClass {
    pub fn is_transient(&self) -> bool {
        matches!(self, ErrorClass::Transient)
    }
}

/// Transient signal families, matched case-insensitively.
pub const TRANSIENT_PATTERNS: [&str; 4] = [
    // timeout / cancellation
    r"(?i)timeout|timed[\s_-]?out|etimedout|aborted|cancel(l)?ed",
    // rate limiting
    r"(?i)\b429\b|rate[\s_-]?limit|too[\s_-]?many[\s_-]?requests",
    // server-side failure
    r"(?i)\b5\d\d\b|internal[\s_-]?server|service[\s_-]?unavailable|bad[\s_-]?gateway|overloaded",
    // low-level connection failure
    r"(?i)econnreset|econnrefused|enotfound|connection[\s_-]?(reset|refused|closed)|dns[\s_-]?error|failed to lookup address",
];

static TRANSIENT_SET: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new(TRANSIENT_PATTERNS).expect("transient patterns are valid regexes")
});

/// Classify an error message. Total over all inputs; never panics at runtime.
///
/// Any family match means [`ErrorClass::Transient`]; otherwise
/// [`ErrorClass::Permanent`]. The empty string is permanent.
pub fn classify(message: &str) -> ErrorClass {
    if TRANSIENT_SET.is_match(message) {
        ErrorClass::Transient
    } else {
        ErrorClass::Permanent
    }
}
