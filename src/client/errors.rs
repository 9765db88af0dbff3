//! # Client Errors
//!
//! Error types raised by a [`SessionClient`](super::SessionClient).

use thiserror::Error;

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Failures reported by the session client
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// Backend unreachable or credentials rejected
    #[error("{0}")]
    Connection(String),

    /// Backend rejected a statement; message is the remote one, untouched
    #[error("{message}")]
    Statement { code: String, message: String },

    /// Unexpected reply from the backend
    #[error("Protocol error: {0}")]
    Protocol(String),
}

impl ClientError {
    /// Connection error
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Statement error
    pub fn statement(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Statement {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Protocol error
    pub fn protocol(msg: impl Into<String>) -> Self {
        Self::Protocol(msg.into())
    }

    /// Whether the failure means the session itself is unusable
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            Self::Connection(e.to_string())
        } else {
            Self::Protocol(e.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        Self::Protocol(format!("JSON error: {}", e))
    }
}
