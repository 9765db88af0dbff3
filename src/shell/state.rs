//! # Session Handler
//!
//! Owns the connection/transaction state machine and proxies statement
//! execution to the [`SessionClient`].
//!
//! ```text
//! Disconnected --connect--> Connected
//! Connected --begin--> ConnectedInTransaction
//! ConnectedInTransaction --commit/rollback/reset--> Connected
//! Connected/ConnectedInTransaction --disconnect--> Disconnected
//! ```
//!
//! Every check-then-transition happens inside one `&mut self` call, so a
//! transition is observed atomically by whoever owns the handler.

use std::fmt;

use crate::client::{ConnectionConfig, ParamMap, SessionClient, StatementResult};
use crate::observability::{Event, Logger, ObservationScope};

use super::errors::{ShellError, ShellResult};

/// Connection and transaction status of the shell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Disconnected,
    Connected,
    ConnectedInTransaction,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Disconnected => "disconnected",
            Self::Connected => "connected",
            Self::ConnectedInTransaction => "in_transaction",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// State machine in front of the session client
pub struct SessionHandler {
    client: Box<dyn SessionClient>,
    state: SessionState,
    logger: Logger,
}

impl SessionHandler {
    /// Wrap a client. The handler starts `Disconnected`.
    pub fn new(client: Box<dyn SessionClient>, logger: Logger) -> Self {
        Self {
            client,
            state: SessionState::Disconnected,
            logger,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// True iff the state is not `Disconnected`
    pub fn is_connected(&self) -> bool {
        self.state != SessionState::Disconnected
    }

    pub fn in_transaction(&self) -> bool {
        self.state == SessionState::ConnectedInTransaction
    }

    /// Open the session.
    ///
    /// Fails with `AlreadyConnected` when a session is open; the state is
    /// left untouched in that case.
    pub fn connect(&mut self, config: &ConnectionConfig) -> ShellResult<()> {
        if self.is_connected() {
            return Err(ShellError::AlreadyConnected);
        }

        let address = config.base_url();
        let scope = ObservationScope::with_fields(
            &self.logger,
            "CONNECT",
            &[("address", address.as_str()), ("database", config.database())],
        );

        match self.client.connect(config) {
            Ok(()) => {
                self.state = SessionState::Connected;
                scope.complete();
                Ok(())
            }
            Err(e) => {
                scope.fail(&e.to_string());
                Err(ShellError::Connection(e.to_string()))
            }
        }
    }

    /// Close the session, rolling back an open transaction first.
    pub fn disconnect(&mut self) -> ShellResult<()> {
        self.require_connected()?;

        if self.in_transaction() {
            if let Err(e) = self.client.rollback() {
                self.logger
                    .warn("DISCONNECT_ROLLBACK_FAILED", &[("reason", e.to_string().as_str())]);
            }
        }
        self.client.disconnect();
        self.state = SessionState::Disconnected;
        self.logger.event(Event::Disconnected, &[]);
        Ok(())
    }

    /// Open an explicit transaction. Only legal from `Connected`.
    pub fn begin_transaction(&mut self) -> ShellResult<()> {
        match self.state {
            SessionState::Disconnected => return Err(ShellError::NotConnected),
            SessionState::ConnectedInTransaction => {
                return Err(ShellError::state("There is already an open transaction"))
            }
            SessionState::Connected => {}
        }

        self.client.begin()?;
        self.state = SessionState::ConnectedInTransaction;
        self.logger.event(Event::TxBegin, &[]);
        Ok(())
    }

    /// Commit the open transaction.
    ///
    /// The transaction is closed even when the backend rejects the commit.
    pub fn commit_transaction(&mut self) -> ShellResult<()> {
        self.require_transaction("commit")?;

        let outcome = self.client.commit();
        self.state = SessionState::Connected;
        outcome?;
        self.logger.event(Event::TxCommit, &[]);
        Ok(())
    }

    /// Roll back the open transaction, discarding its statements.
    pub fn rollback_transaction(&mut self) -> ShellResult<()> {
        self.require_transaction("rollback")?;

        let outcome = self.client.rollback();
        self.state = SessionState::Connected;
        outcome?;
        self.logger.event(Event::TxRollback, &[]);
        Ok(())
    }

    /// Force the session back to `Connected`, discarding an open transaction.
    pub fn reset(&mut self) -> ShellResult<()> {
        self.require_connected()?;

        if self.in_transaction() {
            if let Err(e) = self.client.rollback() {
                self.logger
                    .warn("RESET_ROLLBACK_FAILED", &[("reason", e.to_string().as_str())]);
            }
        }
        self.state = SessionState::Connected;
        self.logger.event(Event::SessionReset, &[]);
        Ok(())
    }

    /// Execute one statement with bound parameters.
    pub fn run_statement(
        &mut self,
        text: &str,
        params: &ParamMap,
    ) -> ShellResult<Option<StatementResult>> {
        self.require_connected()?;

        let in_tx = if self.in_transaction() { "true" } else { "false" };
        let scope = ObservationScope::with_fields(&self.logger, "STATEMENT", &[("tx", in_tx)]);
        self.logger.trace("STATEMENT_TEXT", &[("statement", text)]);

        match self.client.run(text, params) {
            Ok(result) => {
                let rows = result
                    .as_ref()
                    .map(|r| r.records().len())
                    .unwrap_or(0)
                    .to_string();
                scope.complete_with_fields(&[("rows", rows.as_str())]);
                Ok(result)
            }
            Err(e) => {
                scope.fail(&e.to_string());
                Err(e.into())
            }
        }
    }

    fn require_connected(&self) -> ShellResult<()> {
        if self.is_connected() {
            Ok(())
        } else {
            Err(ShellError::NotConnected)
        }
    }

    fn require_transaction(&self, action: &str) -> ShellResult<()> {
        match self.state {
            SessionState::Disconnected => Err(ShellError::NotConnected),
            SessionState::Connected => Err(ShellError::state(format!(
                "There is no open transaction to {}",
                action
            ))),
            SessionState::ConnectedInTransaction => Ok(()),
        }
    }
}
