//! Run loops
//!
//! - [`StringRunner`]: one statement from the command line
//! - [`InteractiveRunner`]: line editor on a terminal
//! - [`PipedRunner`]: lines from a non-terminal stdin
//!
//! Errors from individual lines are printed and never end an interactive
//! or piped session; only I/O failures of the runner itself do.

use std::io::BufRead;
use std::path::PathBuf;

use rustyline::error::ReadlineError;
use rustyline::{Config as EditorConfig, DefaultEditor};

use crate::observability::Logger;
use crate::shell::{Shell, StatementExecuter, TransactionHandler};

use super::errors::{CliError, CliResult};
use super::io::read_lines;

/// Prompt outside a transaction
pub const PROMPT: &str = "graphsh> ";

/// Prompt while a transaction is open
pub const TX_PROMPT: &str = "graphsh# ";

/// A way of feeding lines to the shell. Returns the process exit code.
pub trait ShellRunner {
    fn run(&mut self, shell: &mut Shell) -> CliResult<i32>;
}

/// Which runner to use
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunnerKind {
    String(String),
    Interactive,
    Piped,
}

/// A statement argument wins; otherwise interactive on a terminal, piped
/// when not.
pub fn select_runner(statement: Option<&str>, stdin_is_terminal: bool) -> RunnerKind {
    match statement {
        Some(statement) => RunnerKind::String(statement.to_string()),
        None if stdin_is_terminal => RunnerKind::Interactive,
        None => RunnerKind::Piped,
    }
}

/// Executes one line and exits
#[derive(Debug, Clone)]
pub struct StringRunner {
    statement: String,
}

impl StringRunner {
    pub fn new(statement: impl Into<String>) -> Self {
        Self {
            statement: statement.into(),
        }
    }
}

impl ShellRunner for StringRunner {
    fn run(&mut self, shell: &mut Shell) -> CliResult<i32> {
        match shell.execute(&self.statement) {
            Ok(()) => Ok(0),
            Err(e) => {
                shell.print_error(&e);
                Ok(1)
            }
        }
    }
}

/// Executes every line of a reader, carrying on past failures
pub struct PipedRunner<R> {
    input: R,
}

impl<R: BufRead> PipedRunner<R> {
    pub fn new(input: R) -> Self {
        Self { input }
    }
}

impl<R: BufRead> ShellRunner for PipedRunner<R> {
    /// Exit code 1 if any line failed
    fn run(&mut self, shell: &mut Shell) -> CliResult<i32> {
        let mut failed = false;

        for line in read_lines(&mut self.input) {
            let line = line?;
            shell.record_history(&line);
            if let Err(e) = shell.execute(&line) {
                shell.print_error(&e);
                failed = true;
            }
            if shell.exit_requested() {
                break;
            }
        }

        Ok(if failed { 1 } else { 0 })
    }
}

/// Line editor with a persistent history file
pub struct InteractiveRunner {
    history_path: Option<PathBuf>,
    history_size: usize,
    logger: Logger,
}

impl InteractiveRunner {
    pub fn new(history_path: Option<PathBuf>, history_size: usize, logger: Logger) -> Self {
        Self {
            history_path,
            history_size,
            logger,
        }
    }

    fn editor(&self) -> CliResult<DefaultEditor> {
        let config = EditorConfig::builder()
            .max_history_size(self.history_size)
            .map_err(readline_error)?
            .auto_add_history(false)
            .build();
        DefaultEditor::with_config(config).map_err(readline_error)
    }
}

impl ShellRunner for InteractiveRunner {
    fn run(&mut self, shell: &mut Shell) -> CliResult<i32> {
        let mut editor = self.editor()?;

        if let Some(path) = &self.history_path {
            // A missing file on first start is normal
            if editor.load_history(path).is_ok() {
                for entry in editor.history().iter() {
                    shell.record_history(entry);
                }
            }
        }

        while !shell.exit_requested() {
            let prompt = if shell.in_transaction() { TX_PROMPT } else { PROMPT };

            match editor.readline(prompt) {
                Ok(line) => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    let added = editor.add_history_entry(line.as_str());
                    warn_on_history_error(&self.logger, "HISTORY_ADD_FAILED", "", added);
                    shell.record_history(&line);
                    if let Err(e) = shell.execute(&line) {
                        shell.print_error(&e);
                    }
                }
                // Ctrl-C drops the current line only
                Err(ReadlineError::Interrupted) => continue,
                Err(ReadlineError::Eof) => break,
                Err(e) => return Err(readline_error(e)),
            }
        }

        if let Some(path) = &self.history_path {
            let saved = editor.save_history(path);
            let path = path.display().to_string();
            warn_on_history_error(&self.logger, "HISTORY_SAVE_FAILED", &path, saved);
        }

        Ok(0)
    }
}

/// History problems never end the session; they are logged at WARN.
fn warn_on_history_error<T>(
    logger: &Logger,
    event: &str,
    path: &str,
    outcome: Result<T, ReadlineError>,
) {
    if let Err(e) = outcome {
        let reason = e.to_string();
        if path.is_empty() {
            logger.warn(event, &[("reason", reason.as_str())]);
        } else {
            logger.warn(event, &[("path", path), ("reason", reason.as_str())]);
        }
    }
}

fn readline_error(e: ReadlineError) -> CliError {
    CliError::io_error(format!("Line editor error: {}", e))
}
