//! CLI entrypoint for peer-review
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::{CommandFactory, Parser};
use peer_review_application::{DebateStep, RunDebateUseCase, RunReviewUseCase};
use peer_review_domain::{Prompt, ReviewError, Role};
use peer_review_infrastructure::{ConfigLoader, FileConfig, ProviderKind, ProviderRegistry};
use peer_review_presentation::{
    AppState, Cli, Command, ConsoleFormatter, OutputFormat, ProgressReporter,
};
use std::path::Path;
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    // stdout carries results only
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", user_message(&e));
            ExitCode::FAILURE
        }
    }
}

/// The text shown for a failure: the classified message when there is one.
fn user_message(error: &anyhow::Error) -> String {
    match error.downcast_ref::<ReviewError>() {
        Some(review_error) => review_error.user_message().to_string(),
        None => error.to_string(),
    }
}

async fn run(cli: Cli) -> Result<()> {
    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    // Load configuration
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
    }
    .map_err(|e| anyhow!("Invalid configuration: {e}"))?;

    info!("Starting peer-review");

    match command {
        Command::Ask {
            prompt,
            output,
            quiet,
        } => ask(&config, &prompt, output, quiet).await,
        Command::Serve { host, port } => serve(&config, host, port).await,
        Command::Review {
            context_file,
            review_type,
            provider,
        } => {
            let step = DebateStep::Review {
                kind: review_type,
                context: read_input_file(&context_file)?,
            };
            debate(&config, provider.as_deref(), step).await
        }
        Command::Respond {
            context_file,
            debate_file,
            provider,
        } => {
            let step = DebateStep::Respond {
                context: read_input_file(&context_file)?,
                debate: read_input_file(&debate_file)?,
            };
            debate(&config, provider.as_deref(), step).await
        }
        Command::Summary {
            context_file,
            debate_file,
            provider,
        } => {
            let step = DebateStep::Summary {
                context: read_input_file(&context_file)?,
                debate: read_input_file(&debate_file)?,
            };
            debate(&config, provider.as_deref(), step).await
        }
    }
}

async fn ask(
    config: &FileConfig,
    raw_prompt: &str,
    output: OutputFormat,
    quiet: bool,
) -> Result<()> {
    let settings = config.review.to_settings();
    // Input problems are reported before credential problems
    let prompt = Prompt::parse(raw_prompt, settings.max_prompt_chars)?;

    // === Dependency Injection ===
    let roster = ProviderRegistry::new(config).build_roster()?;
    let label_a = roster.label(Role::A);
    let label_b = roster.label(Role::B);
    let use_case = RunReviewUseCase::new(roster, settings);

    // Execute with or without progress reporting
    let result = if quiet {
        use_case.execute(&prompt).await
    } else {
        let progress = ProgressReporter::new();
        use_case.execute_with_progress(&prompt, &progress).await
    }
    .inspect_err(|e| error!(kind = e.kind(), "Review failed: {}", e.user_message()))?;

    // Output results
    let rendered = match output {
        OutputFormat::Full => ConsoleFormatter::format(&result, &label_a, &label_b),
        OutputFormat::Summary => ConsoleFormatter::format_summary_only(&result),
        OutputFormat::Json => ConsoleFormatter::format_json(&result),
    };

    println!("{}", rendered);

    Ok(())
}

async fn serve(config: &FileConfig, host: Option<String>, port: Option<u16>) -> Result<()> {
    let mut server = config.server.clone();
    if let Some(host) = host {
        server.host = host;
    }
    if let Some(port) = port {
        server.port = port;
    }

    let settings = config.review.to_settings();
    let state = match ProviderRegistry::new(config).build_roster() {
        Ok(roster) => AppState::new(RunReviewUseCase::new(roster, settings)),
        Err(e) => {
            warn!("Review requests will fail until configured: {}", e.user_message());
            AppState::unconfigured(settings.max_prompt_chars, e)
        }
    };

    peer_review_presentation::serve(state, &server.address()).await?;
    Ok(())
}

async fn debate(config: &FileConfig, provider: Option<&str>, step: DebateStep) -> Result<()> {
    let kind = match provider {
        Some(name) => name.parse::<ProviderKind>().map_err(|e| anyhow!(e))?,
        None => config.roles.provider_for(Role::A),
    };

    let binding = ProviderRegistry::new(config).build_single(kind)?;
    let use_case = RunDebateUseCase::new(binding, config.review.retry_policy());

    let output = use_case.execute(&step).await?;
    println!("{}", ConsoleFormatter::format_debate(&output));

    Ok(())
}

/// Read a UTF-8 input file for the debate commands.
fn read_input_file(path: &Path) -> Result<String> {
    if !path.exists() {
        bail!("File not found: {}", path.display());
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}
