//! Capability traits the shell exposes to commands and to the run loop.
//!
//! Commands only ever see the narrower [`CommandContext`](crate::commands::CommandContext);
//! the run loop sees the full set.

use serde_json::Value;

use crate::client::{ConnectionConfig, ParamMap};

use super::errors::ShellResult;

/// Opening and closing the backend session
pub trait Connectable {
    fn connect(&mut self, config: &ConnectionConfig) -> ShellResult<()>;
    fn disconnect(&mut self) -> ShellResult<()>;
    fn is_connected(&self) -> bool;
}

/// Explicit transaction control
pub trait TransactionHandler {
    fn begin_transaction(&mut self) -> ShellResult<()>;
    fn commit_transaction(&mut self) -> ShellResult<()>;
    fn rollback_transaction(&mut self) -> ShellResult<()>;
    /// Back to `Connected`, dropping any open transaction and all parameters
    fn reset(&mut self) -> ShellResult<()>;
    fn in_transaction(&self) -> bool;
}

/// Named parameters bound into statements
pub trait VariableHolder {
    /// Evaluate `literal` and store it under `name`
    fn set(&mut self, name: &str, literal: &str) -> ShellResult<Value>;
    /// Remove `name`, returning the previous value if there was one
    fn unset(&mut self, name: &str) -> ShellResult<Option<Value>>;
    fn query_params(&self) -> &ParamMap;
}

/// Executes one line of input
pub trait StatementExecuter {
    fn execute(&mut self, line: &str) -> ShellResult<()>;
}
