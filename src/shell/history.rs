//! Input history exposed to the `:history` command.

use std::collections::VecDeque;

/// Source of previously entered lines
pub trait Historian {
    /// Remember one line of input
    fn record(&mut self, line: &str);

    /// Entries, oldest first
    fn entries(&self) -> Vec<String>;
}

/// Bounded in-memory history
#[derive(Debug, Clone)]
pub struct MemoryHistorian {
    lines: VecDeque<String>,
    capacity: usize,
}

impl MemoryHistorian {
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }
}

impl Default for MemoryHistorian {
    fn default() -> Self {
        Self::new(1000)
    }
}

impl Historian for MemoryHistorian {
    fn record(&mut self, line: &str) {
        let line = line.trim();
        if line.is_empty() || self.lines.back().map(String::as_str) == Some(line) {
            return;
        }
        if self.lines.len() == self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line.to_string());
    }

    fn entries(&self) -> Vec<String> {
        self.lines.iter().cloned().collect()
    }
}
