//! CLI argument definitions using clap
//!
//! graphsh [--config <path>] [--host H] [--port N] [-u USER] [-p PASS]
//!         [-d DB] [--scheme S] [--format auto|verbose|plain] [-v...]
//!         [--quiet] [STATEMENT]

use clap::{ArgAction, Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::observability::{Logger, Severity};
use crate::render::Format;

/// graphsh - an interactive shell for graph databases
#[derive(Parser, Debug, Default)]
#[command(name = "graphsh")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to a JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Database host
    #[arg(long)]
    pub host: Option<String>,

    /// Database HTTP port
    #[arg(long)]
    pub port: Option<u16>,

    /// Username to connect as
    #[arg(short = 'u', long)]
    pub username: Option<String>,

    /// Password to connect with
    #[arg(short = 'p', long, env = "GRAPHSH_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Database to run statements against
    #[arg(short = 'd', long)]
    pub database: Option<String>,

    /// URL scheme, http or https
    #[arg(long)]
    pub scheme: Option<String>,

    /// Result format
    #[arg(long, value_enum)]
    pub format: Option<FormatArg>,

    /// More log output (-v info, -vv trace)
    #[arg(short = 'v', long, action = ArgAction::Count)]
    pub verbose: u8,

    /// No log output at all
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Run this single statement or command and exit
    pub statement: Option<String>,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// Logger for the verbosity flags
    pub fn logger(&self) -> Logger {
        if self.quiet {
            Logger::discard()
        } else {
            Logger::new(Severity::from_verbosity(self.verbose))
        }
    }
}

/// `--format` values. `auto` depends on whether stdin is a terminal.
#[derive(ValueEnum, Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FormatArg {
    #[default]
    Auto,
    Verbose,
    Plain,
}

impl FormatArg {
    pub fn resolve(self, interactive: bool) -> Format {
        match self {
            Self::Auto if interactive => Format::Verbose,
            Self::Auto => Format::Plain,
            Self::Verbose => Format::Verbose,
            Self::Plain => Format::Plain,
        }
    }
}
