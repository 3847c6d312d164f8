//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use peer_review_domain::ReviewKind;
use std::path::PathBuf;

/// Output format for review results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// All three stages
    Full,
    /// Only the final summary
    Summary,
    /// JSON output
    Json,
}

/// CLI arguments for peer-review
#[derive(Parser, Debug)]
#[command(name = "peer-review")]
#[command(author, version, about = "Two LLMs answer, critique each other, and get summarized")]
#[command(long_about = r#"
peer-review sends one prompt through a three-stage pipeline:

1. Initial Responses: provider A and provider B answer the prompt in parallel
2. Cross-Critique: each provider critiques the other's answer in parallel
3. Summary: a summarizer condenses both critiques into one takeaway

Any failure stops the run; there are no partial results.

Configuration files are loaded from (in priority order):
1. PEER_REVIEW_* environment variables (e.g. PEER_REVIEW_SERVER__PORT=8080)
2. --config <path>        Explicit config file
3. ./peer-review.toml     Project-level config
4. ~/.config/peer-review/config.toml   Global config

Example:
  peer-review ask "What is the borrow checker?"
  peer-review serve --port 8080
  peer-review review --context-file plan.md --review-type plan
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the three-stage review for one prompt
    Ask {
        /// The prompt to review
        prompt: String,

        /// Output format
        #[arg(short, long, value_enum, default_value = "full")]
        output: OutputFormat,

        /// Suppress progress indicators
        #[arg(short, long)]
        quiet: bool,
    },

    /// Serve the review pipeline over HTTP
    Serve {
        /// Address to bind (overrides [server] host)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind (overrides [server] port)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Start a debate: one provider reviews the given content
    Review {
        /// File with the content under review
        #[arg(long, value_name = "PATH")]
        context_file: PathBuf,

        /// Kind of content (plan, code, branch, feature)
        #[arg(long, default_value = "code")]
        review_type: ReviewKind,

        /// Provider acting as reviewer (defaults to the role A provider)
        #[arg(long)]
        provider: Option<String>,
    },

    /// Continue a debate from the author's latest reply
    Respond {
        /// File with the content under review
        #[arg(long, value_name = "PATH")]
        context_file: PathBuf,

        /// File with the debate so far
        #[arg(long, value_name = "PATH")]
        debate_file: PathBuf,

        /// Provider acting as reviewer (defaults to the role A provider)
        #[arg(long)]
        provider: Option<String>,
    },

    /// Summarize a finished debate
    Summary {
        /// File with the content under review
        #[arg(long, value_name = "PATH")]
        context_file: PathBuf,

        /// File with the complete debate
        #[arg(long, value_name = "PATH")]
        debate_file: PathBuf,

        /// Provider acting as reviewer (defaults to the role A provider)
        #[arg(long)]
        provider: Option<String>,
    },
}
