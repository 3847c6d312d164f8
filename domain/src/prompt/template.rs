//! Prompt templates for the review pipeline

/// Templates for each stage of a review run
pub struct PromptTemplate;

impl PromptTemplate {
    /// System instruction shared by every stage-1 task
    pub fn initial_system() -> &'static str {
        "Answer the user's question concisely and accurately. Do not preface or summarize unless asked."
    }

    /// Stage-1 user message: the raw prompt, unchanged
    pub fn initial_user(prompt: &str) -> String {
        prompt.to_string()
    }

    /// System instruction for critiquing another provider's answer
    pub fn critique_system() -> &'static str {
        r#"You are a fair, constructive critic. Given a user prompt and another model's response, write a short critique. Focus on:
- Factual accuracy and possible hallucinations
- Logic and reasoning gaps
- Clarity and completeness
Be specific and concise. Do not be overly harsh or complimentary."#
    }

    /// Stage-2 user message: the prompt plus the counterpart's answer
    pub fn critique_user(prompt: &str, peer_label: &str, peer_response: &str) -> String {
        format!(
            "User prompt:\n\n{prompt}\n\n---\n\n{peer_label}'s response:\n\n{peer_response}\n\n---\n\nCritique {peer_label}'s response (concise, constructive)."
        )
    }

    /// System instruction for the neutral summarizer
    pub fn summary_system() -> &'static str {
        r#"You are a neutral summarizer. You will receive two critiques, each written by one model about the other model's response. Your job:
1. Summarize the main points of both critiques in a balanced way.
2. Give a single, unbiased takeaway: what should the user keep in mind when reading the two original responses?

Be brief and even-handed. Do not favor either model."#
    }

    /// Stage-3 user message built from the two critiques only
    pub fn summary_user(
        label_a: &str,
        critique_a_of_b: &str,
        label_b: &str,
        critique_b_of_a: &str,
    ) -> String {
        format!(
            "{label_a}'s critique of {label_b}'s response:\n\n{critique_a_of_b}\n\n---\n\n{label_b}'s critique of {label_a}'s response:\n\n{critique_b_of_a}\n\n---\n\nSummarize both critiques and provide one unbiased takeaway for the user."
        )
    }
}
