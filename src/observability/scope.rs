//! ObservationScope for automatic begin/complete logging
//!
//! - Logs BEGIN event on creation
//! - Logs COMPLETE event (with elapsed time) on success
//! - Logs FAILED on explicit failure, INCOMPLETE on early drop

use std::cell::Cell;
use std::time::Instant;

use super::logger::Logger;

/// A scope that automatically logs begin and complete events
///
/// # Usage
///
/// ```ignore
/// let scope = ObservationScope::new(&logger, "CONNECT");
/// // ... do work ...
/// scope.complete(); // logs CONNECT_COMPLETE
/// ```
///
/// # Behavior
///
/// - Logs `{name}_BEGIN` on creation (at TRACE level)
/// - Logs `{name}_COMPLETE` when `complete()` is called (at INFO level)
/// - Logs `{name}_FAILED` when `fail()` is called (at ERROR level)
/// - Logs `{name}_INCOMPLETE` on drop if neither happened (at WARN level)
pub struct ObservationScope<'a> {
    logger: &'a Logger,
    name: &'a str,
    completed: Cell<bool>,
    fields: Vec<(&'a str, String)>,
    timer: Timer,
}

impl<'a> ObservationScope<'a> {
    /// Create a new observation scope
    pub fn new(logger: &'a Logger, name: &'a str) -> Self {
        Self::with_fields(logger, name, &[])
    }

    /// Create a new observation scope with fields repeated on every line
    pub fn with_fields(logger: &'a Logger, name: &'a str, fields: &[(&'a str, &str)]) -> Self {
        let event = format!("{}_BEGIN", name);
        logger.trace(&event, fields);

        Self {
            logger,
            name,
            completed: Cell::new(false),
            fields: fields.iter().map(|(k, v)| (*k, v.to_string())).collect(),
            timer: Timer::new(),
        }
    }

    fn field_refs(&self) -> Vec<(&str, &str)> {
        self.fields.iter().map(|(k, v)| (*k, v.as_str())).collect()
    }

    /// Mark the scope as successfully completed
    pub fn complete(self) {
        self.complete_with_fields(&[]);
    }

    /// Mark the scope as successfully completed with additional fields
    pub fn complete_with_fields(self, extra_fields: &[(&str, &str)]) {
        self.completed.set(true);
        let event = format!("{}_COMPLETE", self.name);
        let elapsed = self.timer.elapsed_ms();

        let mut all_fields = self.field_refs();
        all_fields.extend(extra_fields.iter().copied());
        all_fields.push(("elapsed_ms", elapsed.as_str()));

        self.logger.info(&event, &all_fields);
    }

    /// Mark the scope as failed with a reason
    pub fn fail(self, reason: &str) {
        self.completed.set(true);
        let event = format!("{}_FAILED", self.name);

        let mut all_fields = self.field_refs();
        all_fields.push(("reason", reason));

        self.logger.error(&event, &all_fields);
    }

    /// Check if the scope has been completed
    pub fn is_completed(&self) -> bool {
        self.completed.get()
    }
}

impl Drop for ObservationScope<'_> {
    fn drop(&mut self) {
        if !self.completed.get() {
            let event = format!("{}_INCOMPLETE", self.name);
            self.logger
                .warn(&event, &[("reason", "scope dropped without completion")]);
        }
    }
}

/// A simple duration timer for logging elapsed time
pub struct Timer {
    start: Instant,
}

impl Timer {
    /// Create a new timer
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Get elapsed milliseconds as a string
    pub fn elapsed_ms(&self) -> String {
        self.start.elapsed().as_millis().to_string()
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observability::Severity;

    #[test]
    fn test_scope_begin_and_complete() {
        let (logger, lines) = Logger::memory(Severity::Trace);
        let scope = ObservationScope::new(&logger, "CONNECT");
        assert!(!scope.is_completed());
        scope.complete();

        let lines = lines.borrow();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("CONNECT_BEGIN"));
        assert!(lines[1].contains("CONNECT_COMPLETE"));
        assert!(lines[1].contains("elapsed_ms"));
    }

    #[test]
    fn test_scope_fields_repeat_on_complete() {
        let (logger, lines) = Logger::memory(Severity::Info);
        let scope = ObservationScope::with_fields(&logger, "STATEMENT", &[("tx", "false")]);
        scope.complete_with_fields(&[("rows", "3")]);

        let lines = lines.borrow();
        let parsed: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(parsed["event"], "STATEMENT_COMPLETE");
        assert_eq!(parsed["tx"], "false");
        assert_eq!(parsed["rows"], "3");
    }

    #[test]
    fn test_scope_fail() {
        let (logger, lines) = Logger::memory(Severity::Trace);
        let scope = ObservationScope::new(&logger, "CONNECT");
        scope.fail("connection refused");

        let lines = lines.borrow();
        assert!(lines[1].contains("CONNECT_FAILED"));
        assert!(lines[1].contains("connection refused"));
    }

    #[test]
    fn test_scope_drop_without_complete() {
        let (logger, lines) = Logger::memory(Severity::Warn);
        let scope = ObservationScope::new(&logger, "STATEMENT");
        drop(scope);

        let lines = lines.borrow();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("STATEMENT_INCOMPLETE"));
    }

    #[test]
    fn test_timer() {
        let timer = Timer::new();
        std::thread::sleep(std::time::Duration::from_millis(10));
        let ms: u64 = timer.elapsed_ms().parse().unwrap();
        assert!(ms >= 10);
    }
}
