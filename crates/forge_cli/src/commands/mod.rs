//! CLI command definitions.
//!
//! This module defines the command structure for the appforge CLI. Each
//! subcommand maps to one step of the detect / fix / re-check loop.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use forge_lint::{JsEngine, LintConfig, Validator};

pub mod check;
pub mod detect;
pub mod edit;

/// appforge - lint and fix generated web projects
#[derive(Parser)]
#[command(name = "forge")]
#[command(version, about = "appforge - lint and fix generated web projects")]
#[command(long_about = r#"
appforge checks generated HTML/CSS/JavaScript projects for structural
problems and offers a line editor to fix them.

WORKFLOWS:
  detect   → Scan the whole project and list diagnostics
  check    → Check a single file
  edit     → Scan, then fix files in an interactive line editor

CONFIGURATION:
  An optional forge.yaml at the project root sets js_engine,
  js_timeout_secs and exclude patterns. Command-line flags win.

EXIT CODES:
  0 - Success
  1 - General error
  2 - Invalid arguments
  3 - Validation failure
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Project root directory
    #[arg(short, long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// JavaScript engine used for syntax checks
    #[arg(long, global = true, env = "FORGE_JS_ENGINE")]
    pub js_engine: Option<String>,

    /// Argument passed to the JavaScript engine before the file (repeatable)
    #[arg(long = "js-engine-arg", global = true, allow_hyphen_values = true)]
    pub js_engine_args: Vec<String>,

    /// Skip the JavaScript engine and use the bracket heuristic
    #[arg(long, global = true)]
    pub no_js_engine: bool,

    /// Seconds to wait for the JavaScript engine
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    pub js_timeout: Option<u64>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl GlobalArgs {
    /// Project configuration with command-line overrides applied.
    pub fn lint_config(&self) -> Result<LintConfig> {
        let mut config = if self.root.is_dir() {
            LintConfig::load(&self.root)?
        } else {
            LintConfig::default()
        };

        if let Some(command) = &self.js_engine {
            let mut engine = JsEngine::new(command.clone());
            if self.js_engine_args.is_empty() {
                engine = engine.arg("-c");
            } else {
                for arg in &self.js_engine_args {
                    engine = engine.arg(arg.clone());
                }
            }
            config = config.js_engine(engine);
        }

        if self.no_js_engine {
            config = config.without_js_engine();
        }

        if let Some(seconds) = self.js_timeout {
            config = config.js_timeout(seconds);
        }

        Ok(config)
    }

    /// Validator for the selected project root.
    pub fn validator(&self) -> Result<Validator> {
        let config = self.lint_config()?;
        let validator = Validator::new(&self.root, config)
            .with_context(|| format!("Cannot validate project at {}", self.root.display()))?;
        Ok(validator)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan a project for HTML, CSS, JavaScript and package.json problems
    Detect(detect::DetectArgs),

    /// Check a single file with the checker for its type
    Check(check::CheckArgs),

    /// Fix problems in an interactive line editor
    Edit(edit::EditArgs),
}
