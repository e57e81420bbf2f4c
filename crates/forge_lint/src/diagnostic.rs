//! Diagnostic records and the ordered report built from them.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// File category a diagnostic belongs to.
///
/// The serialized spelling is part of the contract with callers and must not
/// change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "HTML")]
    Html,
    #[serde(rename = "CSS")]
    Css,
    #[serde(rename = "JavaScript")]
    JavaScript,
    #[serde(rename = "JSON")]
    Json,
}

impl Category {
    /// All categories in scan order.
    pub const ALL: [Category; 4] = [
        Category::Html,
        Category::Css,
        Category::JavaScript,
        Category::Json,
    ];

    /// Contract spelling of the category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Html => "HTML",
            Self::Css => "CSS",
            Self::JavaScript => "JavaScript",
            Self::Json => "JSON",
        }
    }

    /// File extension scanned for this category, if it is extension based.
    pub fn extension(&self) -> Option<&'static str> {
        match self {
            Self::Html => Some("html"),
            Self::Css => Some("css"),
            Self::JavaScript => Some("js"),
            Self::Json => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One detected problem, located by file and line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Path relative to the project root
    pub file: String,
    /// 1-based line number, `1` when the problem cannot be localized
    pub line: usize,
    /// File category
    #[serde(rename = "type")]
    pub category: Category,
    /// Human-readable description
    pub message: String,
}

impl Diagnostic {
    pub fn new(
        file: impl Into<String>,
        line: usize,
        category: Category,
        message: impl Into<String>,
    ) -> Self {
        Self {
            file: file.into(),
            line: line.max(1),
            category,
            message: message.into(),
        }
    }

    /// Diagnostic for a file that could not be read or decoded.
    pub fn file_error(file: impl Into<String>, category: Category, error: impl fmt::Display) -> Self {
        Self::new(file, 1, category, format!("File error: {}", error))
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} [{}] {}", self.file, self.line, self.category, self.message)
    }
}

/// Ordered collection of diagnostics from one project scan.
///
/// Order is discovery order. Nothing is deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationReport {
    diagnostics: Vec<Diagnostic>,
}

/// Per-category counts for a report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportSummary {
    pub total: usize,
    pub files: usize,
    pub by_category: BTreeMap<Category, usize>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn extend(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        self.diagnostics.extend(diagnostics);
    }

    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.diagnostics.iter()
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Distinct files that have diagnostics, in first-seen order.
    pub fn files(&self) -> Vec<&str> {
        let mut files: Vec<&str> = Vec::new();
        for diagnostic in &self.diagnostics {
            if !files.contains(&diagnostic.file.as_str()) {
                files.push(&diagnostic.file);
            }
        }
        files
    }

    /// Diagnostics reported against one file.
    pub fn for_file<'a>(&'a self, file: &'a str) -> impl Iterator<Item = &'a Diagnostic> + 'a {
        self.diagnostics.iter().filter(move |d| d.file == file)
    }

    /// Count diagnostics per category.
    pub fn summary(&self) -> ReportSummary {
        let mut by_category = BTreeMap::new();
        for diagnostic in &self.diagnostics {
            *by_category.entry(diagnostic.category).or_insert(0) += 1;
        }

        ReportSummary {
            total: self.diagnostics.len(),
            files: self.files().len(),
            by_category,
        }
    }

    /// Generate a human-readable, numbered listing.
    pub fn render(&self) -> String {
        if self.diagnostics.is_empty() {
            return "✅ No errors detected!\n".to_string();
        }

        let mut report = String::new();
        report.push_str(&format!("🔍 Found {} error(s):\n", self.diagnostics.len()));
        report.push_str(&"=".repeat(60));
        report.push('\n');

        for (i, diagnostic) in self.diagnostics.iter().enumerate() {
            report.push_str(&format!(
                "\n{}. {} Error in {}:{}\n",
                i + 1,
                diagnostic.category,
                diagnostic.file,
                diagnostic.line
            ));
            report.push_str(&format!("   {}\n", diagnostic.message));
        }

        report.push_str(&"=".repeat(60));
        report.push('\n');
        report
    }
}

impl From<Vec<Diagnostic>> for ValidationReport {
    fn from(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }
}

impl IntoIterator for ValidationReport {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationReport {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.iter()
    }
}
