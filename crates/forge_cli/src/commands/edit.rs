//! Edit command - fix files in the interactive line editor.

use std::io;

use anyhow::Result;
use clap::Args;
use tracing::{debug, info};

use forge_editor::{start_editing_session, SessionOutcome};

use super::GlobalArgs;
use crate::ValidationFailed;

#[derive(Args)]
pub struct EditArgs {
    /// File to edit, relative to the project root. Defaults to the file with errors.
    pub file: Option<String>,
}

pub async fn execute(global: &GlobalArgs, args: &EditArgs) -> Result<()> {
    let validator = global.validator()?;
    let rescan = validator.clone();
    let file = args.file.clone();

    let outcome = tokio::task::spawn_blocking(move || {
        let stdin = io::stdin();
        start_editing_session(validator, file.as_deref(), stdin.lock(), io::stdout())
    })
    .await??;
    debug!("Editing session ended: {:?}", outcome);

    match outcome {
        SessionOutcome::NothingToEdit => return Ok(()),
        SessionOutcome::NoFileLoaded => anyhow::bail!("No file loaded"),
        SessionOutcome::Exited | SessionOutcome::Interrupted => {}
    }

    info!("Re-checking project after editing");
    let report = tokio::task::spawn_blocking(move || rescan.detect_errors()).await?;
    if report.is_clean() {
        println!("\n✅ All validations passed!");
        Ok(())
    } else {
        println!("\n⚠️  {} error(s) remain", report.len());
        Err(ValidationFailed(report.len()).into())
    }
}
