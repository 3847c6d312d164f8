//! Console output formatter for review results

use colored::Colorize;
use peer_review_application::DebateOutput;
use peer_review_domain::ReviewResult;

/// Formats review results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete review result
    ///
    /// `label_a` and `label_b` name the providers that played roles A and B.
    pub fn format(result: &ReviewResult, label_a: &str, label_b: &str) -> String {
        let mut output = String::new();

        // Header
        output.push_str(&Self::header("Peer Review Results"));
        output.push('\n');

        // Prompt
        output.push_str(&format!("{} {}\n", "Prompt:".cyan().bold(), result.prompt));

        // Stage 1: Initial Responses
        output.push_str(&Self::section_header("Stage 1: Initial Responses"));
        output.push_str(&Self::entry(label_a, &result.initial_response_a));
        output.push_str(&Self::entry(label_b, &result.initial_response_b));

        // Stage 2: Cross-Critique
        output.push_str(&Self::section_header("Stage 2: Cross-Critique"));
        output.push_str(&Self::entry(
            &format!("{label_a} on {label_b}"),
            &result.critique_a_of_b,
        ));
        output.push_str(&Self::entry(
            &format!("{label_b} on {label_a}"),
            &result.critique_b_of_a,
        ));

        // Stage 3: Summary
        output.push_str(&Self::section_header("Stage 3: Summary"));
        output.push_str(&format!("\n{}\n", result.summary));

        output.push_str(&Self::footer());

        output
    }

    /// Format as JSON
    pub fn format_json(result: &ReviewResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format the summary only (concise output)
    pub fn format_summary_only(result: &ReviewResult) -> String {
        let mut output = String::new();

        output.push_str(&format!("{}\n\n", "=== Peer Review Summary ===".cyan().bold()));
        output.push_str(&format!("{} {}\n\n", "Q:".bold(), result.prompt));
        output.push_str(&result.summary);
        output.push('\n');

        output
    }

    /// Frame the text of one debate step.
    pub fn format_debate(output: &DebateOutput) -> String {
        format!(
            "--- {} ---\n\n{}\n\n--- {} ---",
            output.title, output.text, output.end_title
        )
    }

    fn entry(label: &str, text: &str) -> String {
        format!("\n{}\n{}\n", format!("── {label} ──").yellow().bold(), text)
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}
