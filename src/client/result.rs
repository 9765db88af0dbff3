//! Statement results returned by the backend.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Named values bound into a statement
pub type ParamMap = BTreeMap<String, Value>;

/// One row of a statement result, keyed by column name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    keys: Vec<String>,
    values: Vec<Value>,
}

impl Record {
    /// Build a record. Missing trailing values are filled with `null`.
    pub fn new(keys: Vec<String>, mut values: Vec<Value>) -> Self {
        values.resize(keys.len(), Value::Null);
        Self { keys, values }
    }

    /// Value for a column
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.keys
            .iter()
            .position(|k| k == key)
            .map(|idx| &self.values[idx])
    }

    /// Column names, in result order
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Values, in column order
    pub fn values(&self) -> &[Value] {
        &self.values
    }
}

/// Warning or hint attached to a statement by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub code: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// Execution metadata for one statement
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// True when the statement changed data or schema
    pub contains_updates: bool,

    /// Non-zero update counters, e.g. `nodes_created -> 2`
    pub counters: BTreeMap<String, i64>,

    /// Wall-clock time until the result was available, as seen by the client
    pub result_available_after_ms: Option<u64>,

    pub notifications: Vec<Notification>,
}

/// Result of one statement: ordered records plus summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementResult {
    columns: Vec<String>,
    records: Vec<Record>,
    summary: Summary,
}

impl StatementResult {
    /// Build a result from column names and raw rows
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>, summary: Summary) -> Self {
        let records = rows
            .into_iter()
            .map(|row| Record::new(columns.clone(), row))
            .collect();
        Self {
            columns,
            records,
            summary,
        }
    }

    /// Column names
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Records, in the order the backend returned them
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Execution metadata
    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    /// First record, if any
    pub fn first(&self) -> Option<&Record> {
        self.records.first()
    }
}
