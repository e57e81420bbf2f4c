//! appforge CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Success
//! - 1: General error
//! - 2: Invalid arguments
//! - 3: Validation failure

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;

use commands::{Cli, Commands};

/// CI-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL_ERROR: u8 = 1;
    pub const INVALID_ARGS: u8 = 2;
    pub const VALIDATION_FAILURE: u8 = 3;
}

/// Raised by commands that ran fine but found problems.
#[derive(Debug, thiserror::Error)]
#[error("validation failed with {0} diagnostic(s)")]
pub struct ValidationFailed(pub usize);

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_directives = if cli.global.verbose {
        "forge=debug,warn"
    } else {
        "forge=warn,warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives));

    // Logs go to stderr so `detect --json` output stays clean
    let log_result = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    if log_result.is_err() {
        // Logging already initialized, continue
    }

    let result = match cli.command {
        Commands::Detect(ref args) => commands::detect::execute(&cli.global, args).await,
        Commands::Check(ref args) => commands::check::execute(&cli.global, args).await,
        Commands::Edit(ref args) => commands::edit::execute(&cli.global, args).await,
    };

    match result {
        Ok(()) => ExitCode::from(ExitCodes::SUCCESS),
        Err(e) => {
            let exit_code = categorize_error(&e);
            if exit_code != ExitCodes::VALIDATION_FAILURE {
                eprintln!("❌ Error: {:#}", e);
            }
            ExitCode::from(exit_code)
        }
    }
}

/// Categorize error to determine exit code
fn categorize_error(e: &anyhow::Error) -> u8 {
    if e.downcast_ref::<ValidationFailed>().is_some() {
        return ExitCodes::VALIDATION_FAILURE;
    }

    match e.downcast_ref::<forge_lint::LintError>() {
        Some(forge_lint::LintError::RootNotFound(_)) | Some(forge_lint::LintError::FileNotFound(_)) => {
            return ExitCodes::INVALID_ARGS;
        }
        Some(forge_lint::LintError::InvalidConfig { .. })
        | Some(forge_lint::LintError::InvalidPattern { .. }) => return ExitCodes::INVALID_ARGS,
        _ => {}
    }

    let msg = e.to_string().to_lowercase();
    if msg.contains("argument") || msg.contains("not found") {
        ExitCodes::INVALID_ARGS
    } else {
        ExitCodes::GENERAL_ERROR
    }
}
