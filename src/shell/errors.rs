//! # Shell Errors
//!
//! Every failure the shell core can raise. Errors are raised where they are
//! detected and travel unchanged to the run loop.

use thiserror::Error;

use crate::client::ClientError;

/// Result type for shell operations
pub type ShellResult<T> = Result<T, ShellError>;

/// Shell core errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShellError {
    // ==================
    // Connection Errors
    // ==================
    /// Backend unreachable or credentials rejected
    #[error("Unable to connect: {0}")]
    Connection(String),

    /// Operation needs a live session
    #[error("Not connected to a database")]
    NotConnected,

    /// `connect` while a session is already open
    #[error("Already connected")]
    AlreadyConnected,

    // ==================
    // State Errors
    // ==================
    /// Transaction or connection state does not allow the operation
    #[error("{0}")]
    State(String),

    // ==================
    // Command Errors
    // ==================
    /// Command invoked with the wrong number of arguments
    #[error("Incorrect number of arguments for {command} (expected {expected}, got {actual})\nusage: {usage}")]
    ArgumentCount {
        command: String,
        expected: String,
        actual: usize,
        usage: String,
    },

    /// Command prefix that matches no registered command
    #[error("Could not find command {0}, use :help to see available commands")]
    UnknownCommand(String),

    /// Second registration of a command name
    #[error("Command {0} is already registered")]
    DuplicateCommand(String),

    // ==================
    // Execution Errors
    // ==================
    /// Backend rejected a statement; message passed through verbatim
    #[error("{message}")]
    Statement { code: String, message: String },

    /// Parameter literal failed to evaluate
    #[error("Failed to set value of parameter {name}: {reason}")]
    Parameter { name: String, reason: String },
}

impl ShellError {
    /// State error
    pub fn state(msg: impl Into<String>) -> Self {
        Self::State(msg.into())
    }

    /// Parameter error
    pub fn parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Parameter {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Stable error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::Connection(_) => "SHELL_CONNECTION_FAILED",
            Self::NotConnected => "SHELL_NOT_CONNECTED",
            Self::AlreadyConnected => "SHELL_ALREADY_CONNECTED",
            Self::State(_) => "SHELL_STATE_VIOLATION",
            Self::ArgumentCount { .. } => "SHELL_ARGUMENT_COUNT",
            Self::UnknownCommand(_) => "SHELL_UNKNOWN_COMMAND",
            Self::DuplicateCommand(_) => "SHELL_DUPLICATE_COMMAND",
            Self::Statement { .. } => "SHELL_STATEMENT_FAILED",
            Self::Parameter { .. } => "SHELL_PARAMETER_FAILED",
        }
    }

    /// Whether the error reports a violated connection/transaction state
    pub fn is_state_error(&self) -> bool {
        matches!(self, Self::State(_) | Self::AlreadyConnected)
    }
}

impl From<ClientError> for ShellError {
    fn from(e: ClientError) -> Self {
        match e {
            ClientError::Connection(msg) => Self::Connection(msg),
            ClientError::Statement { code, message } => Self::Statement { code, message },
            ClientError::Protocol(msg) => Self::Statement {
                code: "Protocol".to_string(),
                message: msg,
            },
        }
    }
}
