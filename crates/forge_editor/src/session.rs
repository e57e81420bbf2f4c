//! Interactive command loop over an input and output stream.

use std::io::{self, BufRead, Write};

use forge_lint::Validator;
use tracing::{debug, info};

use crate::command::{help_text, EditorCommand};
use crate::editor::LineEditor;
use crate::error::EditorResult;

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The user typed `exit`
    Exited,
    /// Input ended; unsaved edits were dropped
    Interrupted,
    /// The project had no diagnostics and no file was requested
    NothingToEdit,
    /// No file could be selected or loaded
    NoFileLoaded,
}

enum Flow {
    Continue,
    Exit,
    Interrupted,
}

/// REPL driving a [`LineEditor`].
///
/// Each command, including any nested prompt, completes before the next one
/// is read. Input errors are printed and never end the loop.
pub struct EditorSession<R, W> {
    editor: LineEditor,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> EditorSession<R, W> {
    pub fn new(editor: LineEditor, input: R, output: W) -> Self {
        Self {
            editor,
            input,
            output,
        }
    }

    pub fn editor(&self) -> &LineEditor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut LineEditor {
        &mut self.editor
    }

    pub fn into_editor(self) -> LineEditor {
        self.editor
    }

    /// Show the loaded file and the command list, then run the loop.
    pub fn start(&mut self) -> EditorResult<SessionOutcome> {
        match self.editor.display() {
            Ok(shown) => write!(self.output, "{}", shown)?,
            Err(e) => {
                writeln!(self.output, "{}", e)?;
                return Ok(SessionOutcome::NoFileLoaded);
            }
        }

        writeln!(self.output, "\n🎯 Interactive Code Editor")?;
        writeln!(self.output, "Commands:")?;
        write!(self.output, "{}", help_text())?;

        self.run()
    }

    /// Read and execute commands until `exit` or end of input.
    pub fn run(&mut self) -> EditorResult<SessionOutcome> {
        loop {
            let Some(line) = self.prompt("\n📝 > ")? else {
                writeln!(self.output, "\n\n👋 Exiting editor...")?;
                return Ok(SessionOutcome::Interrupted);
            };

            let command = match EditorCommand::parse(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(e) => {
                    writeln!(self.output, "❌ {}", e)?;
                    continue;
                }
            };

            debug!("Editor command: {:?}", command);
            match self.dispatch(command) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => return Ok(SessionOutcome::Exited),
                Ok(Flow::Interrupted) => {
                    writeln!(self.output, "\n\n👋 Exiting editor...")?;
                    return Ok(SessionOutcome::Interrupted);
                }
                Err(e) => writeln!(self.output, "❌ {}", e)?,
            }
        }
    }

    fn dispatch(&mut self, command: EditorCommand) -> EditorResult<Flow> {
        match command {
            EditorCommand::Exit => return Ok(Flow::Exit),
            EditorCommand::Help => self.show_help()?,
            EditorCommand::Show => {
                let shown = self.editor.display()?;
                write!(self.output, "{}", shown)?;
            }
            EditorCommand::Save => {
                self.editor.save()?;
                let name = self.editor.file_name().unwrap_or_default().to_string();
                writeln!(self.output, "✅ File saved: {}", name)?;
            }
            EditorCommand::Test => self.test_current_file()?,
            EditorCommand::Edit(n) => {
                let current = self.editor.line(n)?.to_string();
                writeln!(self.output, "\nCurrent line {}: {}", n, current)?;
                let Some(text) = self.prompt(&format!("New content for line {}: ", n))? else {
                    return Ok(Flow::Interrupted);
                };
                self.editor.edit(n, text)?;
                writeln!(self.output, "✅ Line {} updated!", n)?;
            }
            EditorCommand::Insert(n) => {
                self.editor.check_insert(n)?;
                let Some(text) = self.prompt(&format!("Content for new line after {}: ", n))? else {
                    return Ok(Flow::Interrupted);
                };
                self.editor.insert(n, text)?;
                writeln!(self.output, "✅ New line inserted after line {}!", n)?;
            }
            EditorCommand::Delete(n) => {
                let current = self.editor.line(n)?.to_string();
                writeln!(self.output, "Deleting line {}: {}", n, current)?;
                let Some(answer) = self.prompt("Are you sure? (y/n): ")? else {
                    return Ok(Flow::Interrupted);
                };
                if answer.trim().eq_ignore_ascii_case("y") {
                    self.editor.delete(n)?;
                    writeln!(self.output, "✅ Line {} deleted!", n)?;
                } else {
                    writeln!(self.output, "❌ Deletion cancelled.")?;
                }
            }
            EditorCommand::Replace { start, end } => {
                let current = self.editor.lines(start, end)?.to_vec();
                writeln!(self.output, "\nReplacing lines {}-{}:", start, end)?;
                for (offset, line) in current.iter().enumerate() {
                    writeln!(self.output, "  {}: {}", start + offset, line)?;
                }
                writeln!(self.output, "\nEnter new content (press Enter twice to finish):")?;

                let Some(new_lines) = self.read_block()? else {
                    return Ok(Flow::Interrupted);
                };
                let count = new_lines.len();
                self.editor.replace(start, end, new_lines)?;
                writeln!(
                    self.output,
                    "✅ Lines {}-{} replaced with {} new lines!",
                    start, end, count
                )?;
            }
        }

        Ok(Flow::Continue)
    }

    fn show_help(&mut self) -> EditorResult<()> {
        writeln!(self.output, "\n🎯 Interactive Code Editor Help")?;
        writeln!(self.output, "{}", "=".repeat(50))?;
        write!(self.output, "{}", help_text())?;
        writeln!(self.output, "\n💡 Tips:")?;
        writeln!(self.output, "- Lines with errors are marked with ❌")?;
        writeln!(self.output, "- Line numbers start from 1")?;
        writeln!(self.output, "- 'test' checks the saved file, so save first")?;
        writeln!(self.output, "- Close input (Ctrl+D) to leave without saving")?;
        Ok(())
    }

    fn test_current_file(&mut self) -> EditorResult<()> {
        writeln!(self.output, "🔍 Testing for errors...")?;

        match self.editor.test()? {
            None => {
                let extension = self
                    .editor
                    .path()
                    .and_then(|p| p.extension())
                    .map(|e| format!(".{}", e.to_string_lossy()))
                    .unwrap_or_default();
                writeln!(self.output, "⚠️ No validation available for {} files", extension)?;
            }
            Some(diagnostics) if diagnostics.is_empty() => {
                writeln!(self.output, "✅ No errors found!")?;
            }
            Some(diagnostics) => {
                writeln!(self.output, "❌ Found {} error(s):", diagnostics.len())?;
                for diagnostic in diagnostics {
                    writeln!(self.output, "   Line {}: {}", diagnostic.line, diagnostic.message)?;
                }
            }
        }
        Ok(())
    }

    /// Collect lines until two consecutive empty ones; the final empty line
    /// is dropped. `None` when input ends first.
    fn read_block(&mut self) -> io::Result<Option<Vec<String>>> {
        let mut lines: Vec<String> = Vec::new();
        loop {
            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            if line.is_empty() && lines.last().map_or(false, |l| l.is_empty()) {
                lines.pop();
                return Ok(Some(lines));
            }
            lines.push(line);
        }
    }

    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;
        self.read_line()
    }

    /// Next input line without its terminator. Invalid UTF-8 is replaced
    /// rather than rejected.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut bytes = Vec::new();
        if self.input.read_until(b'\n', &mut bytes)? == 0 {
            return Ok(None);
        }
        let mut line = String::from_utf8_lossy(&bytes).into_owned();
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(Some(line))
    }
}

/// Scan the project, pick a file and run an editing session on it.
///
/// With `file` given, that file is edited even when the project is clean.
/// Otherwise the only file with diagnostics is loaded, or the user picks one
/// from a numbered list.
pub fn start_editing_session<R: BufRead, W: Write>(
    validator: Validator,
    file: Option<&str>,
    input: R,
    output: W,
) -> EditorResult<SessionOutcome> {
    let mut session = EditorSession::new(LineEditor::new(validator), input, output);

    writeln!(session.output, "🔍 Detecting errors in project...")?;
    let report = session.editor.detect();

    if report.is_clean() {
        writeln!(session.output, "✅ No errors detected in the project!")?;
        match file {
            Some(file) => writeln!(session.output, "🎯 Starting editor for {} anyway...", file)?,
            None => return Ok(SessionOutcome::NothingToEdit),
        }
    } else {
        write!(session.output, "\n{}", report.render())?;
        writeln!(
            session.output,
            "\n🎯 Starting interactive editor to fix {} error(s)...",
            report.len()
        )?;
    }

    let target = match file {
        Some(file) => file.to_string(),
        None => {
            let files = report.files();
            if files.len() == 1 {
                files[0].to_string()
            } else {
                writeln!(session.output, "\nSelect file to edit:")?;
                for (i, name) in files.iter().enumerate() {
                    let count = report.for_file(name).count();
                    writeln!(session.output, "{}. {} ({} errors)", i + 1, name, count)?;
                }

                let Some(answer) = session.prompt("\nEnter file number: ")? else {
                    return Ok(SessionOutcome::Interrupted);
                };
                match answer.trim().parse::<usize>() {
                    Ok(choice) if (1..=files.len()).contains(&choice) => files[choice - 1].to_string(),
                    Ok(_) => {
                        writeln!(session.output, "Invalid choice!")?;
                        return Ok(SessionOutcome::NoFileLoaded);
                    }
                    Err(_) => {
                        writeln!(session.output, "Invalid input!")?;
                        return Ok(SessionOutcome::NoFileLoaded);
                    }
                }
            }
        }
    };

    if let Err(e) = session.editor.load(&target) {
        writeln!(session.output, "❌ {}", e)?;
        return Ok(SessionOutcome::NoFileLoaded);
    }
    writeln!(session.output, "\n📝 Loaded: {}", target)?;
    info!("Editing session started on {}", target);

    session.start()
}

#[cfg(test)]
mod tests {
    use super::*;
    use forge_lint::LintConfig;
    use std::fs;
    use std::io::Cursor;
    use std::path::Path;
    use tempfile::tempdir;

    fn loaded_session(root: &Path, file: &str, script: &str) -> EditorSession<Cursor<Vec<u8>>, Vec<u8>> {
        let validator = Validator::new(root, LintConfig::new().without_js_engine()).unwrap();
        let mut editor = LineEditor::new(validator);
        editor.load(file).unwrap();
        EditorSession::new(editor, Cursor::new(script.as_bytes().to_vec()), Vec::new())
    }

    fn output(session: &EditorSession<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8_lossy(&session.output).to_string()
    }

    #[test]
    fn test_invalid_utf8_input_keeps_loop_running() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("a.css"), "a {}").unwrap();

        let validator = Validator::new(temp.path(), LintConfig::new().without_js_engine()).unwrap();
        let mut editor = LineEditor::new(validator);
        editor.load("a.css").unwrap();
        let script = b"edit \xff\xfe\n\xff\nedit 1\nb \xfe{}\nexit\n".to_vec();
        let mut session = EditorSession::new(editor, Cursor::new(script), Vec::new());

        let outcome = session.run().unwrap();
        let out = output(&session);

        assert_eq!(outcome, SessionOutcome::Exited);
        assert!(out.contains("❌ Invalid line number!\n"));
        assert!(out.contains("Invalid command. Type 'help'"));
        assert!(out.contains("✅ Line 1 updated!"));
        assert_eq!(session.editor().buffer().lines(), &["b \u{fffd}{}"]);
    }

    #[test]
    fn test_bad_input_keeps_loop_running() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("a.css"), "a {}\nb {}").unwrap();

        let mut session = loaded_session(
            temp.path(),
            "a.css",
            "bogus\nedit\nedit x\nedit 9\ninsert 3\nreplace 2 1\n\nexit\n",
        );
        let outcome = session.run().unwrap();
        let out = output(&session);

        assert_eq!(outcome, SessionOutcome::Exited);
        assert_eq!(out.matches("Invalid command. Type 'help'").count(), 2);
        assert!(out.contains("❌ Invalid line number!\n"));
        assert!(out.contains("Invalid line number! Valid range: 1-2"));
        assert!(out.contains("Invalid line number! Valid range: 0-2"));
        assert!(out.contains("Invalid line range! Valid range: 1-2"));
        assert_eq!(session.editor().buffer().lines(), &["a {}", "b {}"]);
    }

    #[test]
    fn test_end_of_input_interrupts_without_saving() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("a.css");
        fs::write(&path, "a {}").unwrap();

        let mut session = loaded_session(temp.path(), "a.css", "edit 1\nb {}\n");
        assert_eq!(session.run().unwrap(), SessionOutcome::Interrupted);
        assert_eq!(session.editor().buffer().lines(), &["b {}"]);
        assert_eq!(fs::read_to_string(&path).unwrap(), "a {}");
    }

    #[test]
    fn test_interrupt_inside_prompt() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("a.css"), "a {}").unwrap();

        let mut session = loaded_session(temp.path(), "a.css", "insert 1\n");
        assert_eq!(session.run().unwrap(), SessionOutcome::Interrupted);
        assert_eq!(session.editor().buffer().len(), 1);
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("a.css"), "one\ntwo\nthree").unwrap();

        let mut session = loaded_session(temp.path(), "a.css", "delete 2\nn\ndelete 2\ny\nexit\n");
        session.run().unwrap();
        let out = output(&session);

        assert!(out.contains("Deletion cancelled."));
        assert!(out.contains("✅ Line 2 deleted!"));
        assert_eq!(session.editor().buffer().lines(), &["one", "three"]);
    }

    #[test]
    fn test_replace_collects_until_double_blank() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("a.css"), "1\n2\n3\n4").unwrap();

        let mut session = loaded_session(temp.path(), "a.css", "replace 2 3\nx\n\ny\n\n\nexit\n");
        session.run().unwrap();

        assert_eq!(session.editor().buffer().lines(), &["1", "x", "", "y", "4"]);
        assert!(output(&session).contains("replaced with 3 new lines!"));
    }

    #[test]
    fn test_replace_with_nothing() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("a.css"), "1\n2\n3").unwrap();

        let mut session = loaded_session(temp.path(), "a.css", "replace 1 2\n\n\nexit\n");
        session.run().unwrap();

        assert_eq!(session.editor().buffer().lines(), &["3"]);
    }

    #[test]
    fn test_show_save_and_test() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("a.css");
        fs::write(&path, "a {\n").unwrap();

        let mut session = loaded_session(temp.path(), "a.css", "test\nedit 2\n}\nsave\ntest\nshow\nexit\n");
        session.run().unwrap();
        let out = output(&session);

        assert!(out.contains("❌ Found 1 error(s):"));
        assert!(out.contains("   Line 2: 1 unclosed braces"));
        assert!(out.contains("✅ File saved: a.css"));
        assert!(out.contains("✅ No errors found!"));
        assert!(out.contains("  2: }"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "a {\n}");
    }

    #[test]
    fn test_start_session_without_errors() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("a.css"), "a {}").unwrap();
        let validator = Validator::new(temp.path(), LintConfig::new().without_js_engine()).unwrap();

        let mut out = Vec::new();
        let outcome = start_editing_session(validator, None, Cursor::new(Vec::new()), &mut out).unwrap();

        assert_eq!(outcome, SessionOutcome::NothingToEdit);
        assert!(String::from_utf8_lossy(&out).contains("No errors detected in the project!"));
    }

    #[test]
    fn test_start_session_prompts_for_file() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("a.css"), "}").unwrap();
        fs::write(temp.path().join("b.html"), "<div>").unwrap();
        let validator = Validator::new(temp.path(), LintConfig::new().without_js_engine()).unwrap();

        let mut out = Vec::new();
        let input = Cursor::new(b"2\nexit\n".to_vec());
        let outcome = start_editing_session(validator, None, input, &mut out).unwrap();
        let text = String::from_utf8_lossy(&out);

        assert_eq!(outcome, SessionOutcome::Exited);
        assert!(text.contains("Select file to edit:"));
        assert!(text.contains("1. b.html (1 errors)"));
        assert!(text.contains("2. a.css (1 errors)"));
        assert!(text.contains("📝 Loaded: a.css"));
        assert!(text.contains("❌   1: }"));
    }

    #[test]
    fn test_start_session_invalid_choice() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("a.css"), "}").unwrap();
        fs::write(temp.path().join("b.html"), "<div>").unwrap();
        let validator = Validator::new(temp.path(), LintConfig::new().without_js_engine()).unwrap();

        let mut out = Vec::new();
        let outcome =
            start_editing_session(validator, None, Cursor::new(b"7\n".to_vec()), &mut out).unwrap();

        assert_eq!(outcome, SessionOutcome::NoFileLoaded);
        assert!(String::from_utf8_lossy(&out).contains("Invalid choice!"));
    }
}
