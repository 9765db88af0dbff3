//! Shared helpers for integration tests
//!
//! `ScriptedClient` stands in for the database: it answers `run` calls from
//! a queue and records every call so tests can assert on them.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use graphsh::client::{
    ClientError, ClientResult, ConnectionConfig, ParamMap, SessionClient, StatementResult, Summary,
};
use graphsh::observability::Logger;
use graphsh::render::{BufferOutput, Format, PrettyPrinter};
use graphsh::shell::{Connectable, Shell};
use serde_json::Value;

/// Everything the client was asked to do
#[derive(Debug, Default)]
pub struct Journal {
    pub connects: usize,
    pub disconnects: usize,
    pub begins: usize,
    pub commits: usize,
    pub rollbacks: usize,
    pub statements: Vec<(String, ParamMap)>,
}

pub struct ScriptedClient {
    journal: Rc<RefCell<Journal>>,
    replies: VecDeque<ClientResult<Option<StatementResult>>>,
    refuse_connect: bool,
    fail_commit: bool,
}

impl ScriptedClient {
    pub fn new() -> (Self, Rc<RefCell<Journal>>) {
        let journal = Rc::new(RefCell::new(Journal::default()));
        let client = Self {
            journal: Rc::clone(&journal),
            replies: VecDeque::new(),
            refuse_connect: false,
            fail_commit: false,
        };
        (client, journal)
    }

    /// Queue a one-column, one-row result
    pub fn returns(mut self, column: &str, value: Value) -> Self {
        self.replies.push_back(Ok(Some(StatementResult::new(
            vec![column.to_string()],
            vec![vec![value]],
            Summary::default(),
        ))));
        self
    }

    /// Queue a remote statement failure
    pub fn rejects(mut self, code: &str, message: &str) -> Self {
        self.replies
            .push_back(Err(ClientError::statement(code, message)));
        self
    }

    pub fn refusing_connections(mut self) -> Self {
        self.refuse_connect = true;
        self
    }

    pub fn failing_commit(mut self) -> Self {
        self.fail_commit = true;
        self
    }
}

impl SessionClient for ScriptedClient {
    fn connect(&mut self, _config: &ConnectionConfig) -> ClientResult<()> {
        self.journal.borrow_mut().connects += 1;
        if self.refuse_connect {
            return Err(ClientError::connection("Connection refused"));
        }
        Ok(())
    }

    fn disconnect(&mut self) {
        self.journal.borrow_mut().disconnects += 1;
    }

    fn begin(&mut self) -> ClientResult<()> {
        self.journal.borrow_mut().begins += 1;
        Ok(())
    }

    fn commit(&mut self) -> ClientResult<()> {
        self.journal.borrow_mut().commits += 1;
        if self.fail_commit {
            return Err(ClientError::statement(
                "Neo.TransientError.Transaction.Terminated",
                "The transaction has been terminated",
            ));
        }
        Ok(())
    }

    fn rollback(&mut self) -> ClientResult<()> {
        self.journal.borrow_mut().rollbacks += 1;
        Ok(())
    }

    fn run(&mut self, statement: &str, params: &ParamMap) -> ClientResult<Option<StatementResult>> {
        self.journal
            .borrow_mut()
            .statements
            .push((statement.to_string(), params.clone()));
        self.replies.pop_front().unwrap_or(Ok(None))
    }
}

pub fn local_config() -> ConnectionConfig {
    ConnectionConfig::new("localhost", 7474, "neo4j", "secret")
}

/// Disconnected shell over `client`, rendering verbose tables into a buffer
pub fn offline_shell(client: ScriptedClient) -> (Shell, BufferOutput) {
    let output = BufferOutput::new();
    let shell = Shell::new(
        Box::new(client),
        Box::new(PrettyPrinter::new(Format::Verbose)),
        Box::new(output.clone()),
        Logger::discard(),
    );
    (shell, output)
}

/// Connected shell over `client`
pub fn online_shell(client: ScriptedClient) -> (Shell, BufferOutput) {
    let (mut shell, output) = offline_shell(client);
    shell.connect(&local_config()).unwrap();
    (shell, output)
}
