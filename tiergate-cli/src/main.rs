// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! TierGate CLI - tiered chat and image features behind a premium gate.
//!
//! # Examples
//!
//! ```bash
//! # Ask a question (standard tier unless the email is premium)
//! tiergate ask --email a@x.com "What is the capital of France?"
//!
//! # Analyze an uploaded image (OCR + vision)
//! tiergate analyze --email a@x.com exam.png
//!
//! # Generate an image
//! tiergate imagine --email a@x.com "a dragon reading a newspaper"
//!
//! # Buy premium access
//! tiergate buy --email a@x.com
//!
//! # Complete a purchase from the gateway's success redirect
//! tiergate callback "http://localhost:8501/?email=a%40x.com&session_id=cs_..."
//!
//! # Show tier and resolved models
//! tiergate status --email a@x.com
//! ```

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tiergate_store::StoreError;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{analyze, ask, buy, callback, imagine, status, AppContext};

// ============================================================================
// CLI Definition
// ============================================================================

/// TierGate CLI - tiered model access with premium entitlement.
#[derive(Parser)]
#[command(name = "tiergate")]
#[command(about = "Tiered chat and image features behind a premium gate")]
#[command(version)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,

    /// Path to the secrets file (defaults to the user config dir).
    #[arg(long, global = true)]
    pub secrets: Option<PathBuf>,

    /// Use an in-memory entitlement store instead of the SQLite database.
    #[arg(long, global = true)]
    pub ephemeral: bool,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Quiet mode (minimal output).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// CLI commands. Each one is a single user action mapping to at most one
/// external call.
#[derive(Subcommand)]
pub enum Commands {
    /// Ask the chat model a question (tiered).
    Ask(ask::AskArgs),

    /// Analyze an image: OCR plus vision analysis.
    Analyze(analyze::AnalyzeArgs),

    /// Generate an image from a prompt (tiered).
    Imagine(imagine::ImagineArgs),

    /// Buy premium access via hosted checkout.
    Buy(buy::BuyArgs),

    /// Complete a purchase from a gateway redirect URL.
    Callback(callback::CallbackArgs),

    /// Show the tier and resolved models for an email.
    Status(status::StatusArgs),
}

/// CLI exit codes.
#[repr(i32)]
pub enum ExitCode {
    /// Success.
    Success = 0,
    /// General error.
    Error = 1,
    /// Required configuration (secrets) missing.
    ConfigMissing = 2,
}

// ============================================================================
// Logging Setup
// ============================================================================

/// Crate targets covered by the log filter. The workspace crates emit
/// under their own names, so a bare `tiergate=` directive would only
/// match this binary.
const LOG_TARGETS: &[&str] = &[
    "tiergate",
    "tiergate_core",
    "tiergate_adapters",
    "tiergate_store",
    "tiergate_gate",
];

/// Builds the filter directives for the requested verbosity.
fn log_filter(verbose: bool) -> String {
    let level = if verbose { "debug" } else { "warn" };
    let mut directives: Vec<String> = LOG_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect();
    if verbose {
        directives.push("info".to_string());
    }
    directives.join(",")
}

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return; // No logging in quiet mode
    }

    let filter = EnvFilter::new(log_filter(verbose));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let result = run(&cli).await;

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("Error: {e:#}");
        }

        let code = if is_missing_config(&e) {
            ExitCode::ConfigMissing
        } else {
            ExitCode::Error
        };
        std::process::exit(code as i32);
    }
}

async fn run(cli: &Cli) -> Result<()> {
    let ctx = AppContext::init(cli)?;

    match &cli.command {
        Commands::Ask(args) => ask::run(args, &ctx).await,
        Commands::Analyze(args) => analyze::run(args, &ctx).await,
        Commands::Imagine(args) => imagine::run(args, &ctx).await,
        Commands::Buy(args) => buy::run(args, &ctx).await,
        Commands::Callback(args) => callback::run(args, &ctx).await,
        Commands::Status(args) => status::run(args, &ctx),
    }
}

/// Returns true if the error chain bottoms out in a missing secret.
fn is_missing_config(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        matches!(
            cause.downcast_ref::<StoreError>(),
            Some(StoreError::MissingSecret { .. })
        )
    })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_filter_covers_workspace_crates() {
        let filter = log_filter(true);

        for target in ["tiergate_core", "tiergate_adapters", "tiergate_store", "tiergate_gate"] {
            assert!(
                filter.contains(&format!("{target}=debug")),
                "missing directive for {target}: {filter}"
            );
        }
        assert!(filter.ends_with(",info"));
    }

    #[test]
    fn test_default_filter_keeps_store_warnings() {
        let filter = log_filter(false);

        assert!(filter.contains("tiergate_store=warn"));
        assert!(!filter.contains("debug"));
    }

    #[test]
    fn test_filters_parse() {
        assert!(EnvFilter::try_new(log_filter(true)).is_ok());
        assert!(EnvFilter::try_new(log_filter(false)).is_ok());
    }
}
