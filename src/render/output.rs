//! Output sinks.

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use super::Output;

/// Writes to the process's stdout and stderr
#[derive(Debug, Default, Clone, Copy)]
pub struct StdOutput;

impl Output for StdOutput {
    fn print_out(&mut self, text: &str) {
        let mut stdout = io::stdout().lock();
        let _ = writeln!(stdout, "{}", text);
        let _ = stdout.flush();
    }

    fn print_err(&mut self, text: &str) {
        let mut stderr = io::stderr().lock();
        let _ = writeln!(stderr, "{}", text);
        let _ = stderr.flush();
    }
}

/// Keeps every line in shared buffers; clones see the same lines
#[derive(Debug, Default, Clone)]
pub struct BufferOutput {
    out: Rc<RefCell<Vec<String>>>,
    err: Rc<RefCell<Vec<String>>>,
}

impl BufferOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines written with `print_out`
    pub fn out_lines(&self) -> Vec<String> {
        self.out.borrow().clone()
    }

    /// Lines written with `print_err`
    pub fn err_lines(&self) -> Vec<String> {
        self.err.borrow().clone()
    }

    /// All regular output joined with newlines
    pub fn out_text(&self) -> String {
        self.out.borrow().join("\n")
    }

    pub fn clear(&self) {
        self.out.borrow_mut().clear();
        self.err.borrow_mut().clear();
    }
}

impl Output for BufferOutput {
    fn print_out(&mut self, text: &str) {
        self.out.borrow_mut().push(text.to_string());
    }

    fn print_err(&mut self, text: &str) {
        self.err.borrow_mut().push(text.to_string());
    }
}
