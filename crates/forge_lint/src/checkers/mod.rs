//! Per-category checkers.
//!
//! Each checker is a pure function over a file's text. [`check_file`] reads
//! the file and turns read or decode failures into a single diagnostic, so
//! one bad file never stops a scan.

pub mod css;
pub mod html;
pub mod javascript;
pub mod json;

use std::path::Path;

use tracing::debug;

use crate::config::LintConfig;
use crate::diagnostic::{Category, Diagnostic};

/// Pick the checker for a path: by lower-cased extension, then by the
/// `package.json` file name.
pub fn category_for(path: &Path) -> Option<Category> {
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase());

    match extension.as_deref() {
        Some("html") => Some(Category::Html),
        Some("css") => Some(Category::Css),
        Some("js") => Some(Category::JavaScript),
        _ if path.file_name().map_or(false, |n| n == json::PACKAGE_JSON) => Some(Category::Json),
        _ => None,
    }
}

/// Run one category's checker against a file on disk.
///
/// `file` is the root-relative name put into diagnostics.
pub fn check_file(category: Category, path: &Path, file: &str, config: &LintConfig) -> Vec<Diagnostic> {
    debug!("Checking {} as {}", file, category);

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => return vec![Diagnostic::file_error(file, category, e)],
    };

    match category {
        Category::Html => html::check(file, &content),
        Category::Css => css::check(file, &content),
        Category::JavaScript => javascript::check(file, &content, config)
            .unwrap_or_else(|e| vec![Diagnostic::file_error(file, category, e)]),
        Category::Json => json::check(file, &content),
    }
}
