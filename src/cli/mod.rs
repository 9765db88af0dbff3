//! CLI module for graphsh
//!
//! Startup sequence:
//! 1. Parse flags, load and validate configuration
//! 2. Build the shell around an HTTP session client
//! 3. Connect (failure ends the process with exit code 1)
//! 4. Run one of the runners until it finishes
//! 5. Disconnect

mod args;
mod config;
mod errors;
mod io;
mod runner;

use std::io::stdin;

pub use args::{Cli, FormatArg};
pub use config::{Config, HISTORY_FILE_NAME};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_lines, stdin_is_terminal};
pub use runner::{
    select_runner, InteractiveRunner, PipedRunner, RunnerKind, ShellRunner, StringRunner,
    PROMPT, TX_PROMPT,
};

use crate::client::{HttpClient, SessionClient};
use crate::commands::CommandContext;
use crate::observability::{Event, Logger};
use crate::render::{Output, PrettyPrinter, StdOutput};
use crate::shell::{Connectable, MemoryHistorian, Shell};

/// Parse the process arguments and run. Returns the exit code.
pub fn run() -> CliResult<i32> {
    run_with(Cli::parse_args())
}

/// Run with already-parsed arguments
pub fn run_with(cli: Cli) -> CliResult<i32> {
    let logger = cli.logger();
    logger.event(Event::ShellStart, &[("version", env!("CARGO_PKG_VERSION"))]);

    let config = Config::resolve(&cli)?;
    let source = cli
        .config
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "defaults".to_string());
    logger.event(Event::ConfigLoaded, &[("source", source.as_str())]);

    let terminal = stdin_is_terminal();
    let kind = select_runner(cli.statement.as_deref(), terminal);

    let client = HttpClient::new(config.request_timeout())
        .map_err(|e| CliError::startup_failed(e.to_string()))?;
    let mut shell = build_shell(
        Box::new(client),
        &config,
        terminal,
        Box::new(StdOutput),
        logger.clone(),
    );

    let connection = config.connection_config();
    shell.connect(&connection)?;

    let outcome = match kind {
        RunnerKind::String(statement) => StringRunner::new(statement).run(&mut shell),
        RunnerKind::Interactive => {
            print_welcome(&mut shell, &config);
            InteractiveRunner::new(config.history_path(), config.history_size, logger.clone())
                .run(&mut shell)
        }
        RunnerKind::Piped => PipedRunner::new(stdin().lock()).run(&mut shell),
    };

    if shell.is_connected() {
        if let Err(e) = shell.disconnect() {
            logger.warn("DISCONNECT_FAILED", &[("reason", e.to_string().as_str())]);
        }
    }

    let code = outcome?;
    logger.event(Event::ShellExit, &[("code", code.to_string().as_str())]);
    Ok(code)
}

/// Disconnected shell wired from `config`. `auto` format follows whether
/// stdin is a terminal.
fn build_shell(
    client: Box<dyn SessionClient>,
    config: &Config,
    terminal: bool,
    output: Box<dyn Output>,
    logger: Logger,
) -> Shell {
    let format = config.format.resolve(terminal);
    Shell::new(client, Box::new(PrettyPrinter::new(format)), output, logger)
        .with_historian(Box::new(MemoryHistorian::new(config.history_size)))
}

fn print_welcome(shell: &mut Shell, config: &Config) {
    let connection = config.connection_config();
    let user = if config.username.is_empty() {
        String::new()
    } else {
        format!(" as user {}", config.username)
    };
    shell.print(&format!(
        "Connected to {} (database {}){}.",
        connection.base_url(),
        connection.database(),
        user
    ));
    shell.print("Type :help for a list of available commands or :exit to exit the shell.");
}
