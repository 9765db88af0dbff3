//! Structured JSON logger for graphsh
//!
//! - Structured logs (JSON)
//! - Deterministic key ordering
//! - Explicit severity levels
//! - One log line = one event
//! - Synchronous, no buffering
//!
//! The logger is a plain value handed to the components that log. There is
//! no process-wide instance.

use std::cell::RefCell;
use std::fmt;
use std::io::{self, Write};
use std::rc::Rc;

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Debug-level detail
    Trace = 0,
    /// Normal operations
    Info = 1,
    /// Recoverable issues
    Warn = 2,
    /// Operation failures
    Error = 3,
    /// Unrecoverable, process exits
    Fatal = 4,
}

impl Severity {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
        }
    }

    /// Threshold for a `-v` count on the command line
    pub fn from_verbosity(count: u8) -> Self {
        match count {
            0 => Severity::Warn,
            1 => Severity::Info,
            _ => Severity::Trace,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where log lines go
#[derive(Clone, Default)]
pub enum LogSink {
    /// Standard error
    #[default]
    Stderr,
    /// Dropped
    Discard,
    /// Kept in memory, one entry per line (used by tests and embedders)
    Memory(Rc<RefCell<Vec<String>>>),
}

/// A structured logger that outputs JSON logs
#[derive(Clone)]
pub struct Logger {
    threshold: Severity,
    sink: LogSink,
}

impl Logger {
    /// Logger writing to stderr at or above `threshold`
    pub fn new(threshold: Severity) -> Self {
        Self {
            threshold,
            sink: LogSink::Stderr,
        }
    }

    /// Logger that drops everything
    pub fn discard() -> Self {
        Self {
            threshold: Severity::Fatal,
            sink: LogSink::Discard,
        }
    }

    /// Logger that keeps every line in memory, returning the shared buffer
    pub fn memory(threshold: Severity) -> (Self, Rc<RefCell<Vec<String>>>) {
        let lines = Rc::new(RefCell::new(Vec::new()));
        let logger = Self {
            threshold,
            sink: LogSink::Memory(Rc::clone(&lines)),
        };
        (logger, lines)
    }

    /// Current threshold
    pub fn threshold(&self) -> Severity {
        self.threshold
    }

    /// Log an event with the given severity and fields
    ///
    /// Fields are output in deterministic order (alphabetical by key)
    pub fn log(&self, severity: Severity, event: &str, fields: &[(&str, &str)]) {
        if severity < self.threshold {
            return;
        }
        match &self.sink {
            LogSink::Stderr => Self::log_to_writer(severity, event, fields, &mut io::stderr()),
            LogSink::Discard => {}
            LogSink::Memory(lines) => {
                let mut buffer = Vec::new();
                Self::log_to_writer(severity, event, fields, &mut buffer);
                lines
                    .borrow_mut()
                    .push(String::from_utf8_lossy(&buffer).trim_end().to_string());
            }
        }
    }

    fn log_to_writer<W: Write>(
        severity: Severity,
        event: &str,
        fields: &[(&str, &str)],
        writer: &mut W,
    ) {
        let mut output = String::with_capacity(256);

        output.push('{');

        // Always output event first
        output.push_str("\"event\":\"");
        Self::escape_json_string(&mut output, event);
        output.push('"');

        output.push_str(",\"severity\":\"");
        output.push_str(severity.as_str());
        output.push('"');

        let mut sorted_fields: Vec<_> = fields.iter().collect();
        sorted_fields.sort_by_key(|(k, _)| *k);

        for (key, value) in sorted_fields {
            output.push_str(",\"");
            Self::escape_json_string(&mut output, key);
            output.push_str("\":\"");
            Self::escape_json_string(&mut output, value);
            output.push('"');
        }

        output.push('}');
        output.push('\n');

        // Write atomically (one syscall)
        let _ = writer.write_all(output.as_bytes());
        let _ = writer.flush();
    }

    fn escape_json_string(output: &mut String, s: &str) {
        for c in s.chars() {
            match c {
                '"' => output.push_str("\\\""),
                '\\' => output.push_str("\\\\"),
                '\n' => output.push_str("\\n"),
                '\r' => output.push_str("\\r"),
                '\t' => output.push_str("\\t"),
                c if c.is_control() => {
                    output.push_str(&format!("\\u{:04x}", c as u32));
                }
                c => output.push(c),
            }
        }
    }

    /// Log at TRACE level
    pub fn trace(&self, event: &str, fields: &[(&str, &str)]) {
        self.log(Severity::Trace, event, fields);
    }

    /// Log at INFO level
    pub fn info(&self, event: &str, fields: &[(&str, &str)]) {
        self.log(Severity::Info, event, fields);
    }

    /// Log at WARN level
    pub fn warn(&self, event: &str, fields: &[(&str, &str)]) {
        self.log(Severity::Warn, event, fields);
    }

    /// Log at ERROR level
    pub fn error(&self, event: &str, fields: &[(&str, &str)]) {
        self.log(Severity::Error, event, fields);
    }

    /// Log at FATAL level
    pub fn fatal(&self, event: &str, fields: &[(&str, &str)]) {
        self.log(Severity::Fatal, event, fields);
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(Severity::Warn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capture(severity: Severity, event: &str, fields: &[(&str, &str)]) -> String {
        let (logger, lines) = Logger::memory(Severity::Trace);
        logger.log(severity, event, fields);
        let lines = lines.borrow();
        lines.first().cloned().unwrap_or_default()
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Trace < Severity::Info);
        assert!(Severity::Info < Severity::Warn);
        assert!(Severity::Warn < Severity::Error);
        assert!(Severity::Error < Severity::Fatal);
    }

    #[test]
    fn test_severity_from_verbosity() {
        assert_eq!(Severity::from_verbosity(0), Severity::Warn);
        assert_eq!(Severity::from_verbosity(1), Severity::Info);
        assert_eq!(Severity::from_verbosity(5), Severity::Trace);
    }

    #[test]
    fn test_log_json_format() {
        let output = capture(Severity::Info, "TEST_EVENT", &[]);

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["event"], "TEST_EVENT");
        assert_eq!(parsed["severity"], "INFO");
    }

    #[test]
    fn test_log_deterministic_ordering() {
        let output1 = capture(
            Severity::Info,
            "TEST",
            &[("zebra", "1"), ("apple", "2"), ("mango", "3")],
        );
        let output2 = capture(
            Severity::Info,
            "TEST",
            &[("apple", "2"), ("mango", "3"), ("zebra", "1")],
        );
        assert_eq!(output1, output2);

        let apple_pos = output1.find("apple").unwrap();
        let zebra_pos = output1.find("zebra").unwrap();
        assert!(apple_pos < zebra_pos);
    }

    #[test]
    fn test_log_escapes_special_chars() {
        let output = capture(
            Severity::Info,
            "TEST",
            &[("statement", "RETURN \"a\"\nLIMIT 1")],
        );

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["statement"], "RETURN \"a\"\nLIMIT 1");
    }

    #[test]
    fn test_below_threshold_is_dropped() {
        let (logger, lines) = Logger::memory(Severity::Warn);
        logger.info("QUIET", &[]);
        logger.warn("LOUD", &[]);

        let lines = lines.borrow();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("LOUD"));
    }

    #[test]
    fn test_discard_logger_keeps_nothing() {
        let logger = Logger::discard();
        logger.fatal("ANYTHING", &[]);
        assert_eq!(logger.threshold(), Severity::Fatal);
    }
}
