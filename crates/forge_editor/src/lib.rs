//! # forge_editor
//!
//! Line-oriented interactive editor used to fix files that the appforge
//! validator flagged.
//!
//! A [`LineEditor`] holds one file as a [`TextBuffer`] and applies
//! line-level edits to it. An [`EditorSession`] drives the editor from a
//! text command stream (`edit`, `insert`, `delete`, `replace`, `show`,
//! `save`, `test`, `exit`, `help`).
//!
//! ## Example
//!
//! ```rust,no_run
//! use forge_editor::LineEditor;
//! use forge_lint::{LintConfig, Validator};
//!
//! let validator = Validator::new("./site", LintConfig::default()).unwrap();
//! let mut editor = LineEditor::new(validator);
//!
//! editor.load("index.html").unwrap();
//! editor.insert(0, "<!DOCTYPE html>").unwrap();
//! editor.save().unwrap();
//!
//! // `test` checks the file as saved on disk.
//! let diagnostics = editor.test().unwrap();
//! ```

pub mod buffer;
pub mod command;
pub mod editor;
pub mod error;
pub mod session;

pub use buffer::TextBuffer;
pub use command::{help_text, EditorCommand, COMMAND_HELP};
pub use editor::{EditorState, LineEditor};
pub use error::{CommandError, EditorError, EditorResult};
pub use session::{start_editing_session, EditorSession, SessionOutcome};
