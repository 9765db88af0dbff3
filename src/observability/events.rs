//! Observability events for graphsh
//!
//! Every lifecycle step of the shell that is worth a log line has a typed
//! event here. Events are explicit and typed.

use std::fmt;

/// Observable events in a shell session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Lifecycle
    /// Shell process starting
    ShellStart,
    /// Shell process leaving its run loop
    ShellExit,
    /// Configuration loaded
    ConfigLoaded,

    // Connection
    /// Session closed
    Disconnected,

    // Transactions
    /// Explicit transaction opened
    TxBegin,
    /// Explicit transaction committed
    TxCommit,
    /// Explicit transaction rolled back
    TxRollback,
    /// Session forced back to `Connected`
    SessionReset,

    // Parameters
    /// Parameter stored
    ParamSet,
    /// Parameter removed
    ParamUnset,

    // Commands
    /// Built-in command dispatched
    CommandInvoked,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ShellStart => "SHELL_START",
            Event::ShellExit => "SHELL_EXIT",
            Event::ConfigLoaded => "CONFIG_LOADED",

            Event::Disconnected => "DISCONNECTED",

            Event::TxBegin => "TX_BEGIN",
            Event::TxCommit => "TX_COMMIT",
            Event::TxRollback => "TX_ROLLBACK",
            Event::SessionReset => "SESSION_RESET",

            Event::ParamSet => "PARAM_SET",
            Event::ParamUnset => "PARAM_UNSET",

            Event::CommandInvoked => "COMMAND_INVOKED",
        }
    }

    /// Returns true if this event changes the transaction state
    pub fn is_transactional(&self) -> bool {
        matches!(
            self,
            Event::TxBegin | Event::TxCommit | Event::TxRollback | Event::SessionReset
        )
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_events_have_string_representation() {
        let events = [
            Event::ShellStart,
            Event::ShellExit,
            Event::ConfigLoaded,
            Event::Disconnected,
            Event::TxBegin,
            Event::TxCommit,
            Event::TxRollback,
            Event::SessionReset,
            Event::ParamSet,
            Event::ParamUnset,
            Event::CommandInvoked,
        ];

        for event in events {
            let s = event.as_str();
            assert!(!s.is_empty());
            assert!(s.chars().all(|c| c.is_uppercase() || c == '_'));
        }
    }

    #[test]
    fn test_transactional_events() {
        assert!(Event::TxBegin.is_transactional());
        assert!(Event::SessionReset.is_transactional());
        assert!(!Event::ParamSet.is_transactional());
    }
}
