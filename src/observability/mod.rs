//! Observability subsystem for graphsh
//!
//! This module provides:
//! - Structured logging (JSON lines)
//! - Typed lifecycle events
//! - Scope-based begin/complete tracing
//!
//! # Principles
//!
//! 1. Observability is read-only
//! 2. No side effects on execution
//! 3. No async or background threads
//! 4. Deterministic output
//!
//! # Usage
//!
//! ```ignore
//! use graphsh::observability::{Event, Logger, ObservationScope, Severity};
//!
//! let logger = Logger::new(Severity::Info);
//! logger.event(Event::TxBegin, &[]);
//!
//! let scope = ObservationScope::new(&logger, "CONNECT");
//! // ... do work ...
//! scope.complete();
//! ```

mod events;
mod logger;
mod scope;

pub use events::Event;
pub use logger::{LogSink, Logger, Severity};
pub use scope::{ObservationScope, Timer};

impl Logger {
    /// Log a typed lifecycle event at INFO level
    pub fn event(&self, event: Event, fields: &[(&str, &str)]) {
        self.info(event.as_str(), fields);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_event() {
        let (logger, lines) = Logger::memory(Severity::Info);
        logger.event(Event::TxBegin, &[]);
        logger.event(Event::ParamSet, &[("name", "bob")]);

        let lines = lines.borrow();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("TX_BEGIN"));
        assert!(lines[1].contains("\"name\":\"bob\""));
    }

    #[test]
    fn test_event_respects_threshold() {
        let (logger, lines) = Logger::memory(Severity::Warn);
        logger.event(Event::ShellStart, &[]);
        assert!(lines.borrow().is_empty());
    }
}
