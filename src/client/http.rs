//! Blocking client for the graph database's HTTP transactional endpoint.
//!
//! Endpoints (all JSON):
//! - `POST {base}/db/{db}/tx/commit`: run in an autocommit transaction
//! - `POST {base}/db/{db}/tx`: open an explicit transaction
//! - `POST {tx}`: run inside the open transaction
//! - `POST {tx}/commit`, `DELETE {tx}`: finish it

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::{ACCEPT, LOCATION};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::config::ConnectionConfig;
use super::errors::{ClientError, ClientResult};
use super::result::{Notification, ParamMap, StatementResult, Summary};
use super::SessionClient;

#[derive(Serialize)]
struct TxRequest<'a> {
    statements: Vec<StatementRequest<'a>>,
}

impl TxRequest<'_> {
    fn empty() -> Self {
        Self {
            statements: Vec::new(),
        }
    }
}

#[derive(Serialize)]
struct StatementRequest<'a> {
    statement: &'a str,
    parameters: &'a ParamMap,
    #[serde(rename = "includeStats")]
    include_stats: bool,
}

#[derive(Debug, Default, Deserialize)]
struct TxResponse {
    #[serde(default)]
    results: Vec<ResultSet>,
    #[serde(default)]
    errors: Vec<RemoteError>,
    #[serde(default)]
    notifications: Vec<Notification>,
    commit: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResultSet {
    #[serde(default)]
    columns: Vec<String>,
    #[serde(default)]
    data: Vec<Row>,
    #[serde(default)]
    stats: BTreeMap<String, Value>,
}

#[derive(Debug, Deserialize)]
struct Row {
    #[serde(default)]
    row: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct RemoteError {
    code: String,
    message: String,
}

/// HTTP implementation of [`SessionClient`]
pub struct HttpClient {
    http: Client,
    config: Option<ConnectionConfig>,
    tx_url: Option<String>,
}

impl HttpClient {
    /// Create a client whose requests give up after `timeout`
    pub fn new(timeout: Duration) -> ClientResult<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("graphsh/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            config: None,
            tx_url: None,
        })
    }

    fn config(&self) -> ClientResult<&ConnectionConfig> {
        self.config
            .as_ref()
            .ok_or_else(|| ClientError::protocol("client has no open session"))
    }

    fn database_url(&self, suffix: &str) -> ClientResult<String> {
        let config = self.config()?;
        Ok(format!(
            "{}/db/{}/{}",
            config.base_url(),
            config.database(),
            suffix
        ))
    }

    fn authorize(&self, request: RequestBuilder) -> ClientResult<RequestBuilder> {
        let config = self.config()?;
        let request = request.header(ACCEPT, "application/json");
        if config.username().is_empty() {
            Ok(request)
        } else {
            Ok(request.basic_auth(config.username(), Some(config.password())))
        }
    }

    /// Send a transactional request, returning the decoded body and any
    /// `Location` header.
    fn send(&self, request: RequestBuilder) -> ClientResult<(TxResponse, Option<String>)> {
        let response = self.authorize(request)?.send()?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ClientError::connection(format!(
                "Authentication failed (HTTP {})",
                status.as_u16()
            )));
        }

        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let text = response.text()?;
        if !status.is_success() && text.trim().is_empty() {
            return Err(ClientError::protocol(format!("HTTP {}", status.as_u16())));
        }

        let body: TxResponse = if text.trim().is_empty() {
            TxResponse::default()
        } else {
            serde_json::from_str(&text)?
        };

        if let Some(err) = body.errors.first() {
            return Err(ClientError::statement(&err.code, &err.message));
        }

        Ok((body, location))
    }
}

impl SessionClient for HttpClient {
    fn connect(&mut self, config: &ConnectionConfig) -> ClientResult<()> {
        self.config = Some(config.clone());
        self.tx_url = None;

        let url = match self.database_url("tx/commit") {
            Ok(url) => url,
            Err(e) => {
                self.config = None;
                return Err(e);
            }
        };

        // An empty autocommit transaction proves reachability and credentials.
        let probe = self.send(self.http.post(&url).json(&TxRequest::empty()));
        if let Err(e) = probe {
            self.config = None;
            return Err(match e {
                ClientError::Connection(_) => e,
                other => ClientError::connection(format!(
                    "Unable to open session at {}: {}",
                    config.base_url(),
                    other
                )),
            });
        }

        Ok(())
    }

    fn disconnect(&mut self) {
        self.tx_url = None;
        self.config = None;
    }

    fn begin(&mut self) -> ClientResult<()> {
        let url = self.database_url("tx")?;
        let (body, location) = self.send(self.http.post(&url).json(&TxRequest::empty()))?;

        let tx_url = transaction_url(location, body.commit).ok_or_else(|| {
            ClientError::protocol("backend did not return a transaction location")
        })?;
        self.tx_url = Some(tx_url);
        Ok(())
    }

    fn commit(&mut self) -> ClientResult<()> {
        let tx_url = self
            .tx_url
            .take()
            .ok_or_else(|| ClientError::protocol("no open transaction to commit"))?;
        let url = format!("{}/commit", tx_url);
        self.send(self.http.post(&url).json(&TxRequest::empty()))?;
        Ok(())
    }

    fn rollback(&mut self) -> ClientResult<()> {
        let tx_url = self
            .tx_url
            .take()
            .ok_or_else(|| ClientError::protocol("no open transaction to roll back"))?;
        self.send(self.http.delete(&tx_url))?;
        Ok(())
    }

    fn run(&mut self, statement: &str, params: &ParamMap) -> ClientResult<Option<StatementResult>> {
        let url = match &self.tx_url {
            Some(tx_url) => tx_url.clone(),
            None => self.database_url("tx/commit")?,
        };

        let request = TxRequest {
            statements: vec![StatementRequest {
                statement,
                parameters: params,
                include_stats: true,
            }],
        };

        let started = Instant::now();
        let (body, _) = self.send(self.http.post(&url).json(&request))?;
        let elapsed = elapsed_millis(started.elapsed());

        Ok(into_statement_result(body, elapsed))
    }
}

/// Whole milliseconds, saturating at `u64::MAX`
fn elapsed_millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

/// Transaction URL from the `Location` header, falling back to the
/// `commit` link in the body.
fn transaction_url(location: Option<String>, commit: Option<String>) -> Option<String> {
    location.or_else(|| commit.map(|c| c.trim_end_matches("/commit").to_string()))
}

/// First result set of a response, or `None` when the statement produced
/// no result at all.
fn into_statement_result(body: TxResponse, elapsed_ms: u64) -> Option<StatementResult> {
    let TxResponse {
        results,
        notifications,
        ..
    } = body;
    let set = results.into_iter().next()?;

    let mut summary = Summary {
        result_available_after_ms: Some(elapsed_ms),
        notifications,
        ..Summary::default()
    };
    for (key, value) in set.stats {
        match value {
            Value::Bool(flag) if key == "contains_updates" => summary.contains_updates = flag,
            Value::Number(n) => {
                if let Some(count) = n.as_i64().filter(|c| *c != 0) {
                    summary.counters.insert(key, count);
                }
            }
            _ => {}
        }
    }

    let rows = set.data.into_iter().map(|r| r.row).collect();
    Some(StatementResult::new(set.columns, rows, summary))
}
