//! Editor command parsing.

use std::str::FromStr;

use crate::error::CommandError;

/// One command of the interactive protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorCommand {
    Edit(usize),
    Insert(usize),
    Delete(usize),
    Replace { start: usize, end: usize },
    Show,
    Save,
    Test,
    Exit,
    Help,
}

/// Command reference printed by `help` and when a session starts.
pub const COMMAND_HELP: &[(&str, &str)] = &[
    ("edit <line>", "Edit specific line"),
    ("insert <line>", "Insert line after specified line"),
    ("delete <line>", "Delete specific line"),
    ("replace <start> <end>", "Replace lines from start to end"),
    ("show", "Show file again"),
    ("save", "Save changes"),
    ("test", "Test for errors"),
    ("exit", "Exit editor"),
    ("help", "Show this help"),
];

impl EditorCommand {
    /// Parse one input line. Blank input yields `Ok(None)`.
    ///
    /// The command word is case-insensitive. Commands without arguments
    /// ignore anything after the word.
    pub fn parse(input: &str) -> Result<Option<Self>, CommandError> {
        let words: Vec<&str> = input.split_whitespace().collect();
        let Some(first) = words.first() else {
            return Ok(None);
        };

        let command = match (first.to_lowercase().as_str(), words.len()) {
            ("exit", _) => Self::Exit,
            ("help", _) => Self::Help,
            ("show", _) => Self::Show,
            ("save", _) => Self::Save,
            ("test", _) => Self::Test,
            ("edit", 2) => Self::Edit(line_number(words[1])?),
            ("insert", 2) => Self::Insert(line_number(words[1])?),
            ("delete", 2) => Self::Delete(line_number(words[1])?),
            ("replace", 3) => Self::Replace {
                start: line_number(words[1])?,
                end: line_number(words[2])?,
            },
            _ => return Err(CommandError::Unknown(input.trim().to_string())),
        };

        Ok(Some(command))
    }
}

impl FromStr for EditorCommand {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)?.ok_or_else(|| CommandError::Unknown(String::new()))
    }
}

fn line_number(word: &str) -> Result<usize, CommandError> {
    word.parse()
        .map_err(|_| CommandError::InvalidNumber(word.to_string()))
}

/// Render the command reference.
pub fn help_text() -> String {
    let width = COMMAND_HELP.iter().map(|(usage, _)| usage.len()).max().unwrap_or(0);
    COMMAND_HELP
        .iter()
        .map(|(usage, description)| format!("  {:<width$} - {}\n", usage, description, width = width))
        .collect()
}
