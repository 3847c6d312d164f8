//! String helpers for logging provider output.

/// Truncate to at most `max_len` bytes with an ellipsis, on a char boundary.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }
    let mut end = max_len.saturating_sub(3).min(s.len());
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &s[..end])
}

/// Collapse a raw diagnostic onto one line and cap its length.
///
/// Provider error bodies can be multi-kilobyte JSON; log lines stay short.
pub fn log_excerpt(s: &str, max_len: usize) -> String {
    let single_line = s.split_whitespace().collect::<Vec<_>>().join(" ");
    truncate(&single_line, max_len)
}
