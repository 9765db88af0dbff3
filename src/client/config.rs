//! Connection parameters for a backend session.

use std::fmt;

/// Default URL scheme for the HTTP endpoint
pub const DEFAULT_SCHEME: &str = "http";

/// Default database name
pub const DEFAULT_DATABASE: &str = "neo4j";

/// Immutable connection record, created once at startup
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    host: String,
    port: u16,
    username: String,
    password: String,
    scheme: String,
    database: String,
}

impl ConnectionConfig {
    /// Create a config with the default scheme and database
    pub fn new(
        host: impl Into<String>,
        port: u16,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            username: username.into(),
            password: password.into(),
            scheme: DEFAULT_SCHEME.to_string(),
            database: DEFAULT_DATABASE.to_string(),
        }
    }

    /// Use another URL scheme (`http` or `https`)
    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    /// Use another database
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    /// `scheme://host:port`
    pub fn base_url(&self) -> String {
        format!("{}://{}:{}", self.scheme, self.host, self.port)
    }
}

// Password never appears in logs or panics.
impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("scheme", &self.scheme)
            .field("database", &self.database)
            .finish()
    }
}
