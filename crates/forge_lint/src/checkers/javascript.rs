//! JavaScript syntax checking.
//!
//! The configured engine is run in parse-only mode against a temporary copy
//! of the file. When the engine is disabled, missing, or does not finish in
//! time, a bracket-counting heuristic is used instead.

use std::io::{Read, Seek, SeekFrom, Write};
use std::process::{Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use crate::config::{JsEngine, LintConfig};
use crate::diagnostic::{Category, Diagnostic};

static LINE_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r":(\d+):").expect("valid regex"));

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Outcome of running the external engine.
#[derive(Debug)]
pub enum EngineOutcome {
    /// The engine exited; stderr is only kept for non-zero exits
    Finished { status: ExitStatus, stderr: String },
    /// The engine could not be spawned or waited on
    Unavailable(String),
    /// The engine did not exit before the timeout and was killed
    TimedOut,
}

/// Check a JavaScript file.
///
/// I/O errors while preparing the engine's input are returned so the caller
/// can report them as a file error.
pub fn check(file: &str, content: &str, config: &LintConfig) -> std::io::Result<Vec<Diagnostic>> {
    let Some(engine) = &config.js_engine else {
        debug!("No JavaScript engine configured, using heuristic for {}", file);
        return Ok(check_brackets(file, content));
    };

    match run_engine(engine, content, config.js_timeout_duration())? {
        EngineOutcome::Finished { status, stderr } => {
            if status.success() {
                Ok(Vec::new())
            } else {
                Ok(parse_engine_output(file, &stderr))
            }
        }
        EngineOutcome::Unavailable(reason) => {
            warn!("JavaScript engine '{}' unavailable ({}), using heuristic", engine.command, reason);
            Ok(check_brackets(file, content))
        }
        EngineOutcome::TimedOut => {
            warn!(
                "JavaScript engine '{}' timed out on {}, using heuristic",
                engine.command, file
            );
            Ok(check_brackets(file, content))
        }
    }
}

/// Run the engine in syntax-check mode against a temporary copy of `content`.
///
/// The temporary file is removed when this returns, whatever the outcome.
pub fn run_engine(engine: &JsEngine, content: &str, timeout: Duration) -> std::io::Result<EngineOutcome> {
    let mut source = tempfile::Builder::new()
        .prefix("forge-check-")
        .suffix(".js")
        .tempfile()?;
    source.write_all(content.as_bytes())?;
    source.flush()?;

    // stderr is captured through a file, not a pipe
    let mut stderr_file = tempfile::tempfile()?;

    let mut child = match Command::new(&engine.command)
        .args(&engine.args)
        .arg(source.path())
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::from(stderr_file.try_clone()?))
        .spawn()
    {
        Ok(child) => child,
        Err(e) => return Ok(EngineOutcome::Unavailable(e.to_string())),
    };

    let start = Instant::now();
    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) => {
                if start.elapsed() > timeout {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Ok(EngineOutcome::TimedOut);
                }
                thread::sleep(POLL_INTERVAL);
            }
            Err(e) => {
                let _ = child.kill();
                return Ok(EngineOutcome::Unavailable(e.to_string()));
            }
        }
    };

    let mut stderr = String::new();
    if !status.success() {
        let mut bytes = Vec::new();
        stderr_file.seek(SeekFrom::Start(0))?;
        stderr_file.read_to_end(&mut bytes)?;
        stderr = String::from_utf8_lossy(&bytes).into_owned();
    }

    debug!("JavaScript engine exited with {} after {:?}", status, start.elapsed());
    Ok(EngineOutcome::Finished { status, stderr })
}

/// Turn each non-empty stderr line into a diagnostic.
pub fn parse_engine_output(file: &str, stderr: &str) -> Vec<Diagnostic> {
    stderr
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            let line_no = LINE_NUMBER
                .captures(line)
                .and_then(|caps| caps[1].parse::<usize>().ok())
                .unwrap_or(1);
            Diagnostic::new(file, line_no, Category::JavaScript, line)
        })
        .collect()
}

/// Bracket-counting fallback.
///
/// Reports each line after which a running counter is negative. Counters
/// still open at the end of the file are not reported.
pub fn check_brackets(file: &str, content: &str) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    let mut parens: i64 = 0;
    let mut braces: i64 = 0;
    let mut brackets: i64 = 0;

    for (index, line) in content.split('\n').enumerate() {
        let line_no = index + 1;
        parens += balance(line, '(', ')');
        braces += balance(line, '{', '}');
        brackets += balance(line, '[', ']');

        for (count, message) in [
            (parens, "Unexpected closing parenthesis )"),
            (braces, "Unexpected closing brace }"),
            (brackets, "Unexpected closing bracket ]"),
        ] {
            if count < 0 {
                diagnostics.push(Diagnostic::new(file, line_no, Category::JavaScript, message));
            }
        }
    }

    diagnostics
}

fn balance(line: &str, open: char, close: char) -> i64 {
    line.matches(open).count() as i64 - line.matches(close).count() as i64
}
