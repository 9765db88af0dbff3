//! # Shell Coordinator
//!
//! Single entry point for the run loop. Owns the session handler, the
//! parameter store and the command registry, and hands itself to commands
//! through the narrower [`CommandContext`].

use serde_json::Value;

use crate::client::{ConnectionConfig, ParamMap, SessionClient};
use crate::commands::{split_command, CommandContext, CommandRegistry, CommandSpec};
use crate::observability::{Event, Logger};
use crate::render::{Output, Renderer};

use super::capabilities::{Connectable, StatementExecuter, TransactionHandler, VariableHolder};
use super::errors::{ShellError, ShellResult};
use super::history::{Historian, MemoryHistorian};
use super::params::ParameterStore;
use super::state::{SessionHandler, SessionState};

/// The shell
pub struct Shell {
    session: SessionHandler,
    params: ParameterStore,
    registry: CommandRegistry,
    renderer: Box<dyn Renderer>,
    output: Box<dyn Output>,
    historian: Box<dyn Historian>,
    logger: Logger,
    exit_requested: bool,
}

impl Shell {
    /// Build a disconnected shell with the built-in commands and an
    /// in-memory history.
    pub fn new(
        client: Box<dyn SessionClient>,
        renderer: Box<dyn Renderer>,
        output: Box<dyn Output>,
        logger: Logger,
    ) -> Self {
        Self {
            session: SessionHandler::new(client, logger.clone()),
            params: ParameterStore::new(),
            registry: CommandRegistry::with_builtins(),
            renderer,
            output,
            historian: Box::new(MemoryHistorian::default()),
            logger,
            exit_requested: false,
        }
    }

    /// Use `historian` as the source for `:history`
    pub fn with_historian(mut self, historian: Box<dyn Historian>) -> Self {
        self.historian = historian;
        self
    }

    pub fn state(&self) -> SessionState {
        self.session.state()
    }

    /// Names of every registered command, sorted
    pub fn get_command_names(&self) -> Vec<&'static str> {
        self.registry.names()
    }

    /// Remember a line for `:history`
    pub fn record_history(&mut self, line: &str) {
        self.historian.record(line);
    }

    /// Set by `:exit`; the run loop stops once it sees this
    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    /// Print an error the way the run loop shows it
    pub fn print_error(&mut self, error: &ShellError) {
        self.output.print_err(&error.to_string());
    }

    fn run_statement(&mut self, statement: &str) -> ShellResult<()> {
        let result = self.session.run_statement(statement, self.params.get_all())?;

        if let Some(result) = result {
            let text = self.renderer.format(&result);
            if !text.is_empty() {
                self.output.print_out(&text);
            }
        }
        Ok(())
    }

    fn require_connected(&self) -> ShellResult<()> {
        if self.session.is_connected() {
            Ok(())
        } else {
            Err(ShellError::NotConnected)
        }
    }
}

impl StatementExecuter for Shell {
    /// Run one line: a built-in command or a statement.
    ///
    /// Blank lines do nothing. A line starting with the command marker that
    /// names no command fails with `UnknownCommand`; it is never sent to the
    /// backend.
    fn execute(&mut self, line: &str) -> ShellResult<()> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(());
        }

        if let Some((name, _)) = split_command(line) {
            let invocation = self
                .registry
                .resolve(line)
                .ok_or_else(|| ShellError::UnknownCommand(name.to_string()))?;
            self.logger
                .event(Event::CommandInvoked, &[("command", invocation.spec.name)]);
            return invocation.invoke(self);
        }

        self.run_statement(line)
    }
}

impl Connectable for Shell {
    fn connect(&mut self, config: &ConnectionConfig) -> ShellResult<()> {
        self.session.connect(config)
    }

    /// Close the session and forget every parameter
    fn disconnect(&mut self) -> ShellResult<()> {
        self.session.disconnect()?;
        self.params.clear();
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.session.is_connected()
    }
}

impl TransactionHandler for Shell {
    fn begin_transaction(&mut self) -> ShellResult<()> {
        self.session.begin_transaction()
    }

    fn commit_transaction(&mut self) -> ShellResult<()> {
        self.session.commit_transaction()
    }

    fn rollback_transaction(&mut self) -> ShellResult<()> {
        self.session.rollback_transaction()
    }

    fn reset(&mut self) -> ShellResult<()> {
        self.session.reset()?;
        self.params.clear();
        Ok(())
    }

    fn in_transaction(&self) -> bool {
        self.session.in_transaction()
    }
}

impl VariableHolder for Shell {
    fn set(&mut self, name: &str, literal: &str) -> ShellResult<Value> {
        self.require_connected()?;
        let value = self.params.set(&mut self.session, name, literal)?;
        self.logger.event(Event::ParamSet, &[("name", name)]);
        Ok(value)
    }

    fn unset(&mut self, name: &str) -> ShellResult<Option<Value>> {
        self.require_connected()?;
        let previous = self.params.unset(name);
        if previous.is_some() {
            self.logger.event(Event::ParamUnset, &[("name", name)]);
        }
        Ok(previous)
    }

    fn query_params(&self) -> &ParamMap {
        self.params.get_all()
    }
}

impl CommandContext for Shell {
    fn print(&mut self, text: &str) {
        self.output.print_out(text);
    }

    fn commands(&self) -> Vec<CommandSpec> {
        self.registry.specs()
    }

    fn history(&self) -> Vec<String> {
        self.historian.entries()
    }

    fn request_exit(&mut self) {
        self.exit_requested = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fake::{Calls, FakeClient};
    use crate::client::{ClientError, StatementResult, Summary};
    use crate::render::{BufferOutput, Format, PrettyPrinter};
    use serde_json::json;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn single(column: &str, value: Value) -> StatementResult {
        StatementResult::new(vec![column.to_string()], vec![vec![value]], Summary::default())
    }

    fn shell(client: FakeClient) -> (Shell, BufferOutput) {
        let output = BufferOutput::new();
        let shell = Shell::new(
            Box::new(client),
            Box::new(PrettyPrinter::new(Format::Verbose)),
            Box::new(output.clone()),
            Logger::discard(),
        );
        (shell, output)
    }

    fn connected(client: FakeClient) -> (Shell, BufferOutput) {
        let (mut shell, output) = shell(client);
        shell
            .connect(&ConnectionConfig::new("localhost", 7474, "", ""))
            .unwrap();
        (shell, output)
    }

    fn calls_of(calls: &Rc<RefCell<Calls>>) -> Vec<String> {
        calls.borrow().statements.iter().map(|(s, _)| s.clone()).collect()
    }

    #[test]
    fn test_set_and_unset_parameters() {
        let (client, _) = FakeClient::new();
        let (mut shell, _) = connected(client.reply(Ok(Some(single("bob", json!(99))))));

        shell.execute(":set bob 99").unwrap();
        assert_eq!(shell.query_params().get("bob"), Some(&json!(99)));
        assert_eq!(shell.query_params().len(), 1);

        shell.execute(":unset bob").unwrap();
        assert!(shell.query_params().is_empty());
    }

    #[test]
    fn test_set_expression_with_spaces() {
        let (client, calls) = FakeClient::new();
        let client = client
            .reply(Ok(Some(single("a", json!(1)))))
            .reply(Ok(Some(single("b", json!(2)))));
        let (mut shell, _) = connected(client);

        shell.execute(":set a 1").unwrap();
        shell.execute(":set b $a + 1").unwrap();

        assert_eq!(calls_of(&calls)[1], "RETURN $a + 1 AS `b`");
        assert_eq!(shell.query_params().get("b"), Some(&json!(2)));
    }

    #[test]
    fn test_history_capacity_comes_from_historian() {
        let (client, _) = FakeClient::new();
        let (shell, output) = shell(client);
        let mut shell = shell.with_historian(Box::new(MemoryHistorian::new(2)));

        shell.record_history("RETURN 1");
        shell.record_history("RETURN 2");
        shell.record_history(":history");
        shell.execute(":history").unwrap();
        assert_eq!(output.out_lines(), vec![" 1  RETURN 2", " 2  :history"]);
    }

    #[test]
    fn test_statement_is_rendered() {
        let (client, calls) = FakeClient::new();
        let (mut shell, output) = connected(client.reply(Ok(Some(single("999", json!(999))))));

        shell.execute("RETURN 999").unwrap();
        assert_eq!(calls_of(&calls), vec!["RETURN 999"]);
        assert!(output.out_text().contains("999"));
    }

    #[test]
    fn test_statement_binds_parameters() {
        let (client, calls) = FakeClient::new();
        let (mut shell, _) = connected(client.reply(Ok(Some(single("x", json!(5))))));

        shell.execute(":set x 5").unwrap();
        shell.execute("RETURN $x").unwrap();

        let calls = calls.borrow();
        assert_eq!(calls.statements[1].1.get("x"), Some(&json!(5)));
    }

    #[test]
    fn test_statement_without_result_prints_nothing() {
        let (client, _) = FakeClient::new();
        let (mut shell, output) = connected(client);

        shell.execute("CREATE INDEX FOR (n:Person) ON (n.name)").unwrap();
        assert!(output.out_lines().is_empty());
    }

    #[test]
    fn test_statement_error_passes_through() {
        let (client, _) = FakeClient::new();
        let (mut shell, _) = connected(client.reply(Err(ClientError::statement(
            "Neo.ClientError.Statement.SyntaxError",
            "Invalid input 'RETRN'",
        ))));

        let err = shell.execute("RETRN 1").unwrap_err();
        assert_eq!(err.to_string(), "Invalid input 'RETRN'");
    }

    #[test]
    fn test_statement_while_disconnected() {
        let (client, calls) = FakeClient::new();
        let (mut shell, _) = shell(client);

        assert_eq!(shell.execute("RETURN 1").unwrap_err(), ShellError::NotConnected);
        assert!(calls.borrow().statements.is_empty());
    }

    #[test]
    fn test_set_while_disconnected() {
        let (client, calls) = FakeClient::new();
        let (mut shell, _) = shell(client);

        let err = shell.execute(":set bob 99").unwrap_err();
        assert!(err.to_string().to_lowercase().contains("not connected"));
        assert!(calls.borrow().statements.is_empty());
    }

    #[test]
    fn test_unset_while_disconnected() {
        let (client, _) = FakeClient::new();
        let (mut shell, _) = shell(client);
        assert_eq!(shell.unset("bob").unwrap_err(), ShellError::NotConnected);
    }

    #[test]
    fn test_unknown_command_is_not_sent() {
        let (client, calls) = FakeClient::new();
        let (mut shell, _) = connected(client);

        let err = shell.execute("   :aklxjde   arg1 arg2 ").unwrap_err();
        assert_eq!(err, ShellError::UnknownCommand(":aklxjde".to_string()));
        assert!(calls.borrow().statements.is_empty());
    }

    #[test]
    fn test_arity_checked_before_side_effects() {
        let (client, _) = FakeClient::new();
        let (mut shell, output) = connected(client);
        shell.execute(":begin").unwrap();

        let err = shell.execute(":help extra1 extra2").unwrap_err();
        assert!(matches!(err, ShellError::ArgumentCount { .. }));
        assert_eq!(shell.state(), SessionState::ConnectedInTransaction);
        assert!(output.out_lines().is_empty());
    }

    #[test]
    fn test_blank_line_is_noop() {
        let (client, calls) = FakeClient::new();
        let (mut shell, _) = shell(client);
        shell.execute("   ").unwrap();
        assert!(calls.borrow().statements.is_empty());
    }

    #[test]
    fn test_transactions_through_commands() {
        let (client, calls) = FakeClient::new();
        let (mut shell, _) = connected(client);

        shell.execute(":begin").unwrap();
        assert!(shell.in_transaction());
        assert!(shell.execute(":begin").unwrap_err().is_state_error());
        shell.execute(":commit").unwrap();
        assert_eq!(shell.state(), SessionState::Connected);

        shell.execute(":begin").unwrap();
        shell.execute(":rollback").unwrap();
        assert!(!shell.in_transaction());

        let calls = calls.borrow();
        assert_eq!((calls.begins, calls.commits, calls.rollbacks), (2, 1, 1));
    }

    #[test]
    fn test_reset_clears_parameters_and_transaction() {
        let (client, _) = FakeClient::new();
        let (mut shell, _) = connected(client.reply(Ok(Some(single("a", json!(1))))));

        shell.execute(":set a 1").unwrap();
        shell.execute(":begin").unwrap();
        shell.execute(":reset").unwrap();

        assert!(shell.query_params().is_empty());
        assert_eq!(shell.state(), SessionState::Connected);
        assert!(shell.execute(":commit").unwrap_err().is_state_error());
    }

    #[test]
    fn test_reset_while_disconnected() {
        let (client, _) = FakeClient::new();
        let (mut shell, _) = shell(client);
        assert_eq!(shell.execute(":reset").unwrap_err(), ShellError::NotConnected);
    }

    #[test]
    fn test_disconnect_clears_parameters() {
        let (client, calls) = FakeClient::new();
        let (mut shell, _) = connected(client.reply(Ok(Some(single("a", json!(1))))));

        shell.execute(":set a 1").unwrap();
        shell.disconnect().unwrap();

        assert!(!shell.is_connected());
        assert!(shell.query_params().is_empty());
        assert_eq!(calls.borrow().disconnects, 1);
    }

    #[test]
    fn test_help_output() {
        let (client, _) = FakeClient::new();
        let (mut shell, output) = shell(client);

        shell.execute(":help :set").unwrap();
        assert_eq!(output.out_lines()[0], "usage: :set <name> <literal>");
    }

    #[test]
    fn test_history_command() {
        let (client, _) = FakeClient::new();
        let (mut shell, output) = shell(client);

        shell.record_history("RETURN 1");
        shell.record_history(":history");
        shell.execute(":history").unwrap();
        assert_eq!(output.out_lines(), vec![" 1  RETURN 1", " 2  :history"]);
    }

    #[test]
    fn test_exit_command() {
        let (client, _) = FakeClient::new();
        let (mut shell, _) = shell(client);

        assert!(!shell.exit_requested());
        shell.execute(":exit").unwrap();
        assert!(shell.exit_requested());
    }

    #[test]
    fn test_command_names() {
        let (client, _) = FakeClient::new();
        let (shell, _) = shell(client);
        let names = shell.get_command_names();
        assert!(names.contains(&":help"));
        assert!(names.contains(&":set"));
    }

    #[test]
    fn test_logs_command_events() {
        let (client, _) = FakeClient::new();
        let (logger, lines) = Logger::memory(crate::observability::Severity::Info);
        let mut shell = Shell::new(
            Box::new(client),
            Box::new(PrettyPrinter::default()),
            Box::new(BufferOutput::new()),
            logger,
        );

        shell.execute(":help").unwrap();
        assert!(lines
            .borrow()
            .iter()
            .any(|l| l.contains("COMMAND_INVOKED") && l.contains(":help")));
    }
}
