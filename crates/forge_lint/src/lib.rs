//! # forge_lint
//!
//! Heuristic validation of generated web projects for appforge.
//!
//! The validator walks a project root and reports structural problems in
//! HTML, CSS, JavaScript and `package.json` files as a flat list of
//! positioned diagnostics. It never modifies files.
//!
//! ## Checkers
//!
//! - **HTML**: open-tag stack, void elements skipped
//! - **CSS**: running `{`/`}` counter
//! - **JavaScript**: external engine in parse-only mode, with a bracket
//!   counting fallback
//! - **JSON**: strict parse of the root `package.json`
//!
//! ## Example
//!
//! ```rust,no_run
//! use forge_lint::{LintConfig, Validator};
//!
//! let validator = Validator::new("./generated_projects/site", LintConfig::default()).unwrap();
//! let report = validator.detect_errors();
//!
//! for diagnostic in &report {
//!     eprintln!("{}", diagnostic);
//! }
//!
//! // Serialized diagnostics use the `file`/`line`/`type`/`message` shape.
//! let json = serde_json::to_string_pretty(&report).unwrap();
//! ```

pub mod checkers;
pub mod config;
pub mod diagnostic;
pub mod error;
pub mod validator;

pub use config::{JsEngine, LintConfig, CONFIG_FILE, DEFAULT_JS_TIMEOUT_SECS};
pub use diagnostic::{Category, Diagnostic, ReportSummary, ValidationReport};
pub use error::{LintError, LintResult};
pub use validator::Validator;
