//! Configuration file and flag merging
//!
//! Precedence, highest first: command-line flag, environment
//! (`GRAPHSH_PASSWORD`), config file, built-in default.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::client::{ConnectionConfig, DEFAULT_DATABASE, DEFAULT_SCHEME};

use super::args::{Cli, FormatArg};
use super::errors::{CliError, CliResult};

/// Name of the history file under the home directory
pub const HISTORY_FILE_NAME: &str = ".graphsh_history";

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Database host (default "localhost")
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP port (default 7474)
    #[serde(default = "default_port")]
    pub port: u16,

    /// "http" or "https"
    #[serde(default = "default_scheme")]
    pub scheme: String,

    /// Database name (default "neo4j")
    #[serde(default = "default_database")]
    pub database: String,

    /// Username; empty means no authentication
    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub password: String,

    #[serde(default)]
    pub format: FormatArg,

    /// History file (default ~/.graphsh_history)
    #[serde(default)]
    pub history_file: Option<PathBuf>,

    /// Max history entries kept (default 1000)
    #[serde(default = "default_history_size")]
    pub history_size: usize,

    /// Per-request timeout for the HTTP client (default 30)
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_host() -> String {
    "localhost".to_string()
}
fn default_port() -> u16 {
    7474
}
fn default_scheme() -> String {
    DEFAULT_SCHEME.to_string()
}
fn default_database() -> String {
    DEFAULT_DATABASE.to_string()
}
fn default_history_size() -> usize {
    1000
}
fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            scheme: default_scheme(),
            database: default_database(),
            username: String::new(),
            password: String::new(),
            format: FormatArg::default(),
            history_file: None,
            history_size: default_history_size(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// File (if `--config` was given) or defaults, overridden by flags
    pub fn resolve(cli: &Cli) -> CliResult<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply(cli);
        config.validate()?;
        Ok(config)
    }

    /// Overwrite every field the command line set
    pub fn apply(&mut self, cli: &Cli) {
        if let Some(host) = &cli.host {
            self.host = host.clone();
        }
        if let Some(port) = cli.port {
            self.port = port;
        }
        if let Some(scheme) = &cli.scheme {
            self.scheme = scheme.clone();
        }
        if let Some(database) = &cli.database {
            self.database = database.clone();
        }
        if let Some(username) = &cli.username {
            self.username = username.clone();
        }
        // clap already folded GRAPHSH_PASSWORD into this
        if let Some(password) = &cli.password {
            self.password = password.clone();
        }
        if let Some(format) = cli.format {
            self.format = format;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> CliResult<()> {
        if self.port == 0 {
            return Err(CliError::config_error("port must be > 0"));
        }

        if self.scheme != "http" && self.scheme != "https" {
            return Err(CliError::config_error(format!(
                "Invalid scheme: '{}'. Only 'http' and 'https' are allowed.",
                self.scheme
            )));
        }

        if self.database.trim().is_empty() {
            return Err(CliError::config_error("database must not be empty"));
        }

        if self.history_size == 0 {
            return Err(CliError::config_error("history_size must be > 0"));
        }

        if self.request_timeout_secs == 0 {
            return Err(CliError::config_error("request_timeout_secs must be > 0"));
        }

        Ok(())
    }

    pub fn connection_config(&self) -> ConnectionConfig {
        ConnectionConfig::new(&self.host, self.port, &self.username, &self.password)
            .with_scheme(&self.scheme)
            .with_database(&self.database)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Configured history file, else `~/.graphsh_history`; `None` without a
    /// home directory.
    pub fn history_path(&self) -> Option<PathBuf> {
        self.history_file
            .clone()
            .or_else(|| dirs::home_dir().map(|home| home.join(HISTORY_FILE_NAME)))
    }
}
