//! Line buffer for the file being edited.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{EditorError, EditorResult};

/// In-memory, line-indexed copy of one file.
///
/// Lines are stored 0-based and addressed 1-based by every public method.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    path: Option<PathBuf>,
    lines: Vec<String>,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an unbound buffer from text, split on `\n`.
    pub fn from_content(content: &str) -> Self {
        Self {
            path: None,
            lines: content.split('\n').map(str::to_string).collect(),
        }
    }

    /// Read `path` into a new buffer bound to it.
    pub fn open(path: impl Into<PathBuf>) -> EditorResult<Self> {
        let path = path.into();
        let content = fs::read_to_string(&path)?;
        debug!("Read {} line(s) from {:?}", content.split('\n').count(), path);

        let mut buffer = Self::from_content(&content);
        buffer.path = Some(path);
        Ok(buffer)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_bound(&self) -> bool {
        self.path.is_some()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Buffer content joined with `\n`.
    pub fn content(&self) -> String {
        self.lines.join("\n")
    }

    /// Line `n`, 1-based.
    pub fn line(&self, n: usize) -> EditorResult<&str> {
        self.check_line(n)?;
        Ok(&self.lines[n - 1])
    }

    /// Lines `start..=end`, 1-based.
    pub fn range(&self, start: usize, end: usize) -> EditorResult<&[String]> {
        self.check_range(start, end)?;
        Ok(&self.lines[start - 1..end])
    }

    pub fn check_line(&self, n: usize) -> EditorResult<()> {
        if n < 1 || n > self.lines.len() {
            return Err(EditorError::InvalidLine {
                line: n,
                min: 1,
                max: self.lines.len(),
            });
        }
        Ok(())
    }

    /// Insertion points run from 0 (before the first line) to `len`.
    pub fn check_insert(&self, n: usize) -> EditorResult<()> {
        if n > self.lines.len() {
            return Err(EditorError::InvalidLine {
                line: n,
                min: 0,
                max: self.lines.len(),
            });
        }
        Ok(())
    }

    pub fn check_range(&self, start: usize, end: usize) -> EditorResult<()> {
        if start < 1 || end > self.lines.len() || start > end {
            return Err(EditorError::InvalidRange {
                start,
                end,
                max: self.lines.len(),
            });
        }
        Ok(())
    }

    /// Replace line `n`.
    pub fn set_line(&mut self, n: usize, text: impl Into<String>) -> EditorResult<()> {
        self.check_line(n)?;
        self.lines[n - 1] = text.into();
        Ok(())
    }

    /// Insert a new line after line `n`.
    pub fn insert_after(&mut self, n: usize, text: impl Into<String>) -> EditorResult<()> {
        self.check_insert(n)?;
        self.lines.insert(n, text.into());
        Ok(())
    }

    /// Remove line `n` and return it.
    pub fn remove(&mut self, n: usize) -> EditorResult<String> {
        self.check_line(n)?;
        Ok(self.lines.remove(n - 1))
    }

    /// Replace lines `start..=end` with `new_lines`.
    pub fn replace_range(&mut self, start: usize, end: usize, new_lines: Vec<String>) -> EditorResult<()> {
        self.check_range(start, end)?;
        self.lines.splice(start - 1..end, new_lines);
        Ok(())
    }

    /// Overwrite the bound file with the buffer content.
    ///
    /// The whole file is rewritten in place; the buffer is kept on failure.
    pub fn save(&self) -> EditorResult<&Path> {
        let path = self.path.as_deref().ok_or(EditorError::NoFileLoaded)?;
        fs::write(path, self.content())?;
        debug!("Wrote {} line(s) to {:?}", self.lines.len(), path);
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn buffer(lines: &[&str]) -> TextBuffer {
        TextBuffer::from_content(&lines.join("\n"))
    }

    #[test]
    fn test_split_and_join() {
        let buf = TextBuffer::from_content("a\nb\n");
        assert_eq!(buf.lines(), &["a", "b", ""]);
        assert_eq!(buf.content(), "a\nb\n");
        assert_eq!(TextBuffer::from_content("").len(), 1);
    }

    #[test]
    fn test_set_line_bounds() {
        let mut buf = buffer(&["a", "b"]);
        buf.set_line(2, "B").unwrap();
        assert_eq!(buf.line(2).unwrap(), "B");

        assert!(matches!(buf.set_line(0, "x"), Err(EditorError::InvalidLine { min: 1, max: 2, .. })));
        assert!(buf.set_line(3, "x").is_err());
        assert_eq!(buf.lines(), &["a", "B"]);
    }

    #[test]
    fn test_insert_after() {
        let mut buf = buffer(&["a", "b"]);
        buf.insert_after(0, "first").unwrap();
        buf.insert_after(3, "last").unwrap();
        assert_eq!(buf.lines(), &["first", "a", "b", "last"]);

        let err = buf.insert_after(5, "x").unwrap_err();
        assert_eq!(err.to_string(), "Invalid line number! Valid range: 0-4");
        assert_eq!(buf.len(), 4);
    }

    #[test]
    fn test_remove() {
        let mut buf = buffer(&["a", "b", "c"]);
        assert_eq!(buf.remove(2).unwrap(), "b");
        assert_eq!(buf.lines(), &["a", "c"]);
        assert!(buf.remove(3).is_err());
    }

    #[test]
    fn test_replace_range_changes_length() {
        let mut buf = buffer(&["1", "2", "3", "4"]);
        buf.replace_range(2, 3, vec!["x".into(), "y".into(), "z".into()]).unwrap();
        assert_eq!(buf.lines(), &["1", "x", "y", "z", "4"]);

        buf.replace_range(1, 5, Vec::new()).unwrap();
        assert!(buf.is_empty());
    }

    #[test]
    fn test_replace_range_rejects_bad_ranges() {
        let mut buf = buffer(&["1", "2", "3"]);
        for (start, end) in [(0, 1), (2, 1), (1, 4)] {
            let err = buf.replace_range(start, end, vec!["x".into()]).unwrap_err();
            assert_eq!(err.to_string(), "Invalid line range! Valid range: 1-3");
        }
        assert_eq!(buf.lines(), &["1", "2", "3"]);
    }

    #[test]
    fn test_save_requires_path() {
        let buf = buffer(&["a"]);
        assert!(matches!(buf.save(), Err(EditorError::NoFileLoaded)));
    }

    #[test]
    fn test_open_and_save() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("index.html");
        fs::write(&path, "<p>\n</p>").unwrap();

        let mut buf = TextBuffer::open(&path).unwrap();
        assert!(buf.is_bound());
        buf.set_line(1, "<div>").unwrap();
        buf.set_line(2, "</div>").unwrap();
        buf.save().unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "<div>\n</div>");
    }
}
