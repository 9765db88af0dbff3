//! Scripted in-process client for unit tests.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use super::{ClientError, ClientResult, ConnectionConfig, ParamMap, SessionClient, StatementResult};

/// Everything the fake saw, shared with the test body
#[derive(Debug, Default)]
pub(crate) struct Calls {
    pub connects: usize,
    pub disconnects: usize,
    pub begins: usize,
    pub commits: usize,
    pub rollbacks: usize,
    pub statements: Vec<(String, ParamMap)>,
}

pub(crate) struct FakeClient {
    pub calls: Rc<RefCell<Calls>>,
    pub replies: VecDeque<ClientResult<Option<StatementResult>>>,
    pub connect_error: Option<ClientError>,
    pub begin_error: Option<ClientError>,
    pub commit_error: Option<ClientError>,
}

impl FakeClient {
    pub fn new() -> (Self, Rc<RefCell<Calls>>) {
        let calls = Rc::new(RefCell::new(Calls::default()));
        let client = Self {
            calls: Rc::clone(&calls),
            replies: VecDeque::new(),
            connect_error: None,
            begin_error: None,
            commit_error: None,
        };
        (client, calls)
    }

    pub fn reply(mut self, reply: ClientResult<Option<StatementResult>>) -> Self {
        self.replies.push_back(reply);
        self
    }
}

impl SessionClient for FakeClient {
    fn connect(&mut self, _config: &ConnectionConfig) -> ClientResult<()> {
        self.calls.borrow_mut().connects += 1;
        match self.connect_error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn disconnect(&mut self) {
        self.calls.borrow_mut().disconnects += 1;
    }

    fn begin(&mut self) -> ClientResult<()> {
        self.calls.borrow_mut().begins += 1;
        match self.begin_error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn commit(&mut self) -> ClientResult<()> {
        self.calls.borrow_mut().commits += 1;
        match self.commit_error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn rollback(&mut self) -> ClientResult<()> {
        self.calls.borrow_mut().rollbacks += 1;
        Ok(())
    }

    fn run(&mut self, statement: &str, params: &ParamMap) -> ClientResult<Option<StatementResult>> {
        self.calls
            .borrow_mut()
            .statements
            .push((statement.to_string(), params.clone()));
        self.replies.pop_front().unwrap_or(Ok(None))
    }
}
