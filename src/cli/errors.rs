//! CLI-specific error types
//!
//! CLI errors end the process. Errors raised by individual shell lines do
//! not pass through here; the runners print those and carry on.

use std::fmt;
use std::io;

use crate::shell::ShellError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file or flag error
    ConfigError,
    /// I/O error (stdin/stdout, history file)
    IoError,
    /// Initial connection failed
    ConnectFailed,
    /// Shell could not be set up
    StartupFailed,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "GRAPHSH_CLI_CONFIG_ERROR",
            Self::IoError => "GRAPHSH_CLI_IO_ERROR",
            Self::ConnectFailed => "GRAPHSH_CLI_CONNECT_FAILED",
            Self::StartupFailed => "GRAPHSH_CLI_STARTUP_FAILED",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// Connect failed
    pub fn connect_failed(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConnectFailed, msg)
    }

    /// Startup failed
    pub fn startup_failed(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::StartupFailed, msg)
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::config_error(format!("JSON error: {}", e))
    }
}

impl From<ShellError> for CliError {
    fn from(e: ShellError) -> Self {
        match e {
            ShellError::Connection(_) | ShellError::AlreadyConnected => {
                Self::connect_failed(e.to_string())
            }
            other => Self::startup_failed(other.to_string()),
        }
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
