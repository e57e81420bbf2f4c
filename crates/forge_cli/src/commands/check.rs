//! Check command - validate a single file.

use anyhow::Result;
use clap::Args;

use forge_lint::ValidationReport;

use super::GlobalArgs;
use crate::ValidationFailed;

#[derive(Args)]
pub struct CheckArgs {
    /// File to check, relative to the project root
    pub file: String,

    /// Print diagnostics as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn execute(global: &GlobalArgs, args: &CheckArgs) -> Result<()> {
    let validator = global.validator()?;
    let file = args.file.clone();

    let result = tokio::task::spawn_blocking(move || validator.validate_file(&file)).await??;

    let Some(diagnostics) = result else {
        println!("⚠️  No validation available for {}", args.file);
        return Ok(());
    };

    let report = ValidationReport::from(diagnostics);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if report.is_clean() {
        println!("✅ No errors found in {}", args.file);
    } else {
        print!("{}", report.render());
    }

    if report.is_clean() {
        Ok(())
    } else {
        Err(ValidationFailed(report.len()).into())
    }
}
