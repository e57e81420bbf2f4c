//! Detect command - scan the whole project.

use anyhow::Result;
use clap::Args;
use tracing::info;

use super::GlobalArgs;
use crate::ValidationFailed;

#[derive(Args)]
pub struct DetectArgs {
    /// Print diagnostics as JSON
    #[arg(long)]
    pub json: bool,

    /// Print a per-category summary after the listing
    #[arg(long)]
    pub summary: bool,
}

pub async fn execute(global: &GlobalArgs, args: &DetectArgs) -> Result<()> {
    let validator = global.validator()?;
    info!("Detecting errors in {}", validator.root().display());

    let report = tokio::task::spawn_blocking(move || validator.detect_errors()).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.render());

        if args.summary && !report.is_clean() {
            let summary = report.summary();
            println!("\n📊 {} diagnostic(s) in {} file(s)", summary.total, summary.files);
            for (category, count) in &summary.by_category {
                println!("   {:<10} {}", category.as_str(), count);
            }
        }
    }

    if report.is_clean() {
        Ok(())
    } else {
        Err(ValidationFailed(report.len()).into())
    }
}
