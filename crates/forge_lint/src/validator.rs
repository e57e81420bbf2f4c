//! Project scanning and aggregation.

use std::path::{Path, PathBuf};

use glob::Pattern;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::checkers::{self, json::PACKAGE_JSON};
use crate::config::LintConfig;
use crate::diagnostic::{Category, Diagnostic, ValidationReport};
use crate::error::{LintError, LintResult};

/// Validator bound to one project root.
///
/// The validator only reads. Every call re-reads the files it checks.
#[derive(Debug, Clone)]
pub struct Validator {
    root: PathBuf,
    config: LintConfig,
    exclude: Vec<Pattern>,
}

impl Validator {
    /// Create a validator for `root` with an explicit configuration.
    pub fn new(root: impl Into<PathBuf>, config: LintConfig) -> LintResult<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(LintError::RootNotFound(root));
        }

        let exclude = config
            .exclude
            .iter()
            .map(|p| {
                Pattern::new(p).map_err(|e| LintError::InvalidPattern {
                    pattern: p.clone(),
                    message: e.to_string(),
                })
            })
            .collect::<LintResult<Vec<_>>>()?;

        Ok(Self { root, config, exclude })
    }

    /// Create a validator using the project's `forge.yaml`, if any.
    pub fn open(root: impl Into<PathBuf>) -> LintResult<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(LintError::RootNotFound(root));
        }
        let config = LintConfig::load(&root)?;
        Self::new(root, config)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &LintConfig {
        &self.config
    }

    /// Scan the whole project.
    ///
    /// Passes run in a fixed order: HTML, CSS, JavaScript, then the root
    /// `package.json`.
    pub fn detect_errors(&self) -> ValidationReport {
        info!("Validating project at {:?}", self.root);
        let mut report = ValidationReport::new();

        for category in [Category::Html, Category::Css, Category::JavaScript] {
            let files = self.files_with_category(category);
            debug!("{} pass: {} file(s)", category, files.len());

            for path in files {
                let file = self.relative_name(&path);
                report.extend(checkers::check_file(category, &path, &file, &self.config));
            }
        }

        let package_json = self.root.join(PACKAGE_JSON);
        if package_json.is_file() && !self.is_excluded(Path::new(PACKAGE_JSON)) {
            report.extend(checkers::check_file(
                Category::Json,
                &package_json,
                PACKAGE_JSON,
                &self.config,
            ));
        }

        info!("Validation finished with {} diagnostic(s)", report.len());
        report
    }

    /// Run the single applicable checker against one file on disk.
    ///
    /// Returns `Ok(None)` when no checker handles the file's type.
    pub fn validate_file(&self, file: impl AsRef<Path>) -> LintResult<Option<Vec<Diagnostic>>> {
        let file = file.as_ref();
        let path = if file.is_absolute() {
            file.to_path_buf()
        } else {
            self.root.join(file)
        };

        if !path.is_file() {
            return Err(LintError::FileNotFound(path));
        }

        let Some(category) = checkers::category_for(&path) else {
            debug!("No checker for {:?}", path);
            return Ok(None);
        };

        let name = self.relative_name(&path);
        Ok(Some(checkers::check_file(category, &path, &name, &self.config)))
    }

    /// Checker that would handle `path`, if any.
    pub fn checker_for(&self, path: impl AsRef<Path>) -> Option<Category> {
        checkers::category_for(path.as_ref())
    }

    /// Root-relative display name for a path.
    pub fn relative_name(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .to_string_lossy()
            .to_string()
    }

    fn files_with_category(&self, category: Category) -> Vec<PathBuf> {
        let Some(extension) = category.extension() else {
            return Vec::new();
        };

        WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| e.path().extension().map_or(false, |ext| ext == extension))
            .filter(|e| {
                let relative = e.path().strip_prefix(&self.root).unwrap_or(e.path());
                !self.is_excluded(relative)
            })
            .map(|e| e.into_path())
            .collect()
    }

    fn is_excluded(&self, relative: &Path) -> bool {
        self.exclude.iter().any(|p| p.matches_path(relative))
    }
}
