//! Line I/O for the CLI
//!
//! - Input: UTF-8 lines from stdin (or any reader in tests)
//! - Output goes through the shell's `Output`, not through here

use std::io::{self, BufRead, IsTerminal};

use super::errors::{CliError, CliResult};

/// Whether stdin is attached to a terminal
pub fn stdin_is_terminal() -> bool {
    io::stdin().is_terminal()
}

/// Lines of `reader`, without their line endings
pub fn read_lines<R: BufRead>(reader: R) -> impl Iterator<Item = CliResult<String>> {
    reader.lines().map(|line| line.map_err(CliError::from))
}
