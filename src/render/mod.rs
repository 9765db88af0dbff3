//! Rendering subsystem
//!
//! - [`Renderer`]: turns a statement result into displayable text
//! - [`Output`]: where the shell writes that text and its error lines

mod output;
mod pretty;

pub use output::{BufferOutput, StdOutput};
pub use pretty::{Format, PrettyPrinter};

use crate::client::StatementResult;

/// Formats one statement result for display
pub trait Renderer {
    /// Text for `result`. Empty means there is nothing to show.
    fn format(&self, result: &StatementResult) -> String;
}

/// Line-oriented sink for shell output
pub trait Output {
    /// Regular output (results, command output)
    fn print_out(&mut self, text: &str);

    /// Error output
    fn print_err(&mut self, text: &str);
}
