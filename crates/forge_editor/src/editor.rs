//! Line editor state machine.

use std::fmt::Write as _;
use std::path::{Component, Path, PathBuf};

use forge_lint::{Diagnostic, ValidationReport, Validator};
use tracing::{debug, info};

use crate::buffer::TextBuffer;
use crate::error::{EditorError, EditorResult};

/// Editor lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorState {
    NoFileLoaded,
    FileLoaded,
}

/// Line editor over one file of a project.
///
/// The editor owns its buffer. Diagnostics shown next to the buffer come from
/// the most recent project scan handed to it, not from the buffer itself.
#[derive(Debug)]
pub struct LineEditor {
    validator: Validator,
    buffer: TextBuffer,
    name: Option<String>,
    diagnostics: Vec<Diagnostic>,
}

impl LineEditor {
    pub fn new(validator: Validator) -> Self {
        Self {
            validator,
            buffer: TextBuffer::new(),
            name: None,
            diagnostics: Vec::new(),
        }
    }

    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    pub fn root(&self) -> &Path {
        self.validator.root()
    }

    pub fn state(&self) -> EditorState {
        if self.buffer.is_bound() {
            EditorState::FileLoaded
        } else {
            EditorState::NoFileLoaded
        }
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    /// Root-relative name of the loaded file.
    pub fn file_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Absolute path of the loaded file.
    pub fn path(&self) -> Option<&Path> {
        self.buffer.path()
    }

    /// Diagnostics from the most recent scan.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn set_diagnostics(&mut self, report: ValidationReport) {
        self.diagnostics = report.into_diagnostics();
    }

    /// Scan the whole project and remember the result for `display`.
    pub fn detect(&mut self) -> ValidationReport {
        let report = self.validator.detect_errors();
        self.diagnostics = report.diagnostics().to_vec();
        report
    }

    /// Load a file given relative to the project root.
    ///
    /// On failure the editor keeps whatever it had loaded before.
    pub fn load(&mut self, file: &str) -> EditorResult<()> {
        let (path, name) = self.resolve(file)?;
        let buffer = TextBuffer::open(&path)?;

        info!("Loaded {} ({} lines)", name, buffer.len());
        self.buffer = buffer;
        self.name = Some(name);
        Ok(())
    }

    /// Drop the loaded file without saving.
    pub fn unload(&mut self) {
        if let Some(name) = self.name.take() {
            debug!("Unloaded {}", name);
        }
        self.buffer = TextBuffer::new();
    }

    fn resolve(&self, file: &str) -> EditorResult<(PathBuf, String)> {
        let candidate = self.root().join(file);
        if !candidate.is_file() {
            return Err(EditorError::FileNotFound(file.to_string()));
        }

        let root = self.root().canonicalize()?;
        let path = candidate.canonicalize()?;
        let canonical_name = path
            .strip_prefix(&root)
            .map_err(|_| EditorError::OutsideRoot(path.clone()))?;

        // Name the file the way a project scan does: relative to the root as
        // given, without following links.
        let name = candidate
            .strip_prefix(self.root())
            .ok()
            .filter(|rel| {
                rel.components()
                    .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
            })
            .map(|rel| {
                rel.components()
                    .filter(|c| matches!(c, Component::Normal(_)))
                    .collect::<PathBuf>()
            })
            .unwrap_or_else(|| canonical_name.to_path_buf())
            .to_string_lossy()
            .to_string();

        Ok((path, name))
    }

    fn loaded(&self) -> EditorResult<&str> {
        self.name.as_deref().ok_or(EditorError::NoFileLoaded)
    }

    /// Line `n` of the buffer, 1-based.
    pub fn line(&self, n: usize) -> EditorResult<&str> {
        self.loaded()?;
        self.buffer.line(n)
    }

    /// Lines `start..=end` of the buffer.
    pub fn lines(&self, start: usize, end: usize) -> EditorResult<&[String]> {
        self.loaded()?;
        self.buffer.range(start, end)
    }

    pub fn check_insert(&self, n: usize) -> EditorResult<()> {
        self.loaded()?;
        self.buffer.check_insert(n)
    }

    /// Render the buffer with line numbers, flagging lines with diagnostics.
    pub fn display(&self) -> EditorResult<String> {
        let name = self.loaded()?;
        let file_diagnostics: Vec<&Diagnostic> =
            self.diagnostics.iter().filter(|d| d.file == name).collect();

        let title = Path::new(name)
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| name.to_string());

        let mut out = String::new();
        let _ = writeln!(out, "\n📄 {}", title);
        let _ = writeln!(out, "{}", "-".repeat(60));

        for (index, line) in self.buffer.lines().iter().enumerate() {
            let line_no = index + 1;
            let marker = if file_diagnostics.iter().any(|d| d.line == line_no) {
                "❌ "
            } else {
                "   "
            };
            let _ = writeln!(out, "{}{:3}: {}", marker, line_no, line);
        }

        let _ = writeln!(out, "{}", "-".repeat(60));

        if !file_diagnostics.is_empty() {
            let _ = writeln!(out, "\n🔍 Errors in this file:");
            for diagnostic in file_diagnostics {
                let _ = writeln!(out, "   Line {}: {}", diagnostic.line, diagnostic.message);
            }
        }

        Ok(out)
    }

    /// Replace line `n` with `text`.
    pub fn edit(&mut self, n: usize, text: impl Into<String>) -> EditorResult<()> {
        self.loaded()?;
        self.buffer.set_line(n, text)?;
        debug!("Edited line {}", n);
        Ok(())
    }

    /// Insert `text` as a new line after line `n` (0 inserts at the top).
    pub fn insert(&mut self, n: usize, text: impl Into<String>) -> EditorResult<()> {
        self.loaded()?;
        self.buffer.insert_after(n, text)?;
        debug!("Inserted line after {}", n);
        Ok(())
    }

    /// Remove line `n`, returning its text. Confirmation is the caller's job.
    pub fn delete(&mut self, n: usize) -> EditorResult<String> {
        self.loaded()?;
        let removed = self.buffer.remove(n)?;
        debug!("Deleted line {}", n);
        Ok(removed)
    }

    /// Replace lines `start..=end` with zero or more new lines.
    pub fn replace(&mut self, start: usize, end: usize, new_lines: Vec<String>) -> EditorResult<()> {
        self.loaded()?;
        let count = new_lines.len();
        self.buffer.replace_range(start, end, new_lines)?;
        debug!("Replaced lines {}-{} with {} line(s)", start, end, count);
        Ok(())
    }

    /// Write the buffer back over the loaded file.
    pub fn save(&self) -> EditorResult<()> {
        let name = self.loaded()?;
        self.buffer.save()?;
        info!("Saved {}", name);
        Ok(())
    }

    /// Run the applicable checker on the file as it is on disk.
    ///
    /// Unsaved buffer edits are not seen. `Ok(None)` means no checker handles
    /// this file type.
    pub fn test(&self) -> EditorResult<Option<Vec<Diagnostic>>> {
        let name = self.loaded()?;
        Ok(self.validator.validate_file(name)?)
    }
}
