//! Session client subsystem
//!
//! The shell never speaks a wire protocol itself. Everything that reaches
//! the backend goes through [`SessionClient`]:
//! - connect / disconnect
//! - begin / commit / rollback of an explicit transaction
//! - run a statement with bound parameters
//!
//! [`HttpClient`] is the implementation used by the binary.

mod config;
mod errors;
mod http;
mod result;

#[cfg(test)]
pub(crate) mod fake;

pub use config::{ConnectionConfig, DEFAULT_DATABASE, DEFAULT_SCHEME};
pub use errors::{ClientError, ClientResult};
pub use http::HttpClient;
pub use result::{Notification, ParamMap, Record, StatementResult, Summary};

/// Narrow interface onto the backend session
///
/// Calls block for their full round trip. Implementations do not track the
/// shell's connection state; the session handler owns that.
pub trait SessionClient {
    /// Open the underlying session
    fn connect(&mut self, config: &ConnectionConfig) -> ClientResult<()>;

    /// Drop the underlying session. Never fails.
    fn disconnect(&mut self);

    /// Open an explicit transaction
    fn begin(&mut self) -> ClientResult<()>;

    /// Commit the open transaction
    fn commit(&mut self) -> ClientResult<()>;

    /// Roll back the open transaction
    fn rollback(&mut self) -> ClientResult<()>;

    /// Run one statement, inside the open transaction if there is one.
    ///
    /// `Ok(None)` means the statement produced no result at all.
    fn run(&mut self, statement: &str, params: &ParamMap) -> ClientResult<Option<StatementResult>>;
}
