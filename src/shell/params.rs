//! # Parameter Store
//!
//! Named values bound into every outgoing statement.
//!
//! Literals are evaluated by the backend itself (`RETURN <literal> AS name`)
//! so stored values get exactly the query language's own type coercion.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use crate::client::ParamMap;

use super::errors::{ShellError, ShellResult};
use super::state::SessionHandler;

fn name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?:[\p{L}_][\p{L}0-9_]*|`[^`]+`)$").expect("parameter name pattern is valid")
    })
}

/// Normalise a parameter name: identifiers pass through, backtick-quoted
/// names lose their backticks.
pub fn parse_name(raw: &str) -> ShellResult<String> {
    let raw = raw.trim();
    if !name_pattern().is_match(raw) {
        return Err(ShellError::parameter(raw, "invalid parameter name"));
    }
    Ok(raw.trim_matches('`').to_string())
}

/// name → value mapping, last write wins
#[derive(Debug, Default, Clone)]
pub struct ParameterStore {
    values: ParamMap,
}

impl ParameterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate `literal` through `session` and store the value under `name`.
    ///
    /// The current parameters are bound during evaluation, so a literal may
    /// refer to previously set ones.
    pub fn set(
        &mut self,
        session: &mut SessionHandler,
        name: &str,
        literal: &str,
    ) -> ShellResult<Value> {
        let name = parse_name(name)?;
        let literal = literal.trim();
        if literal.is_empty() {
            return Err(ShellError::parameter(name, "missing value"));
        }

        let statement = format!("RETURN {} AS `{}`", literal, name);
        let result = session
            .run_statement(&statement, &self.values)
            .map_err(|e| match e {
                ShellError::NotConnected => ShellError::parameter(&name, "not connected"),
                other => ShellError::parameter(&name, other.to_string()),
            })?;

        let value = result
            .as_ref()
            .and_then(|r| r.first())
            .and_then(|record| record.get(&name).or_else(|| record.values().first()))
            .cloned()
            .ok_or_else(|| ShellError::parameter(&name, "no value returned"))?;

        self.values.insert(name, value.clone());
        Ok(value)
    }

    /// Remove `name`, returning its previous value if it had one
    pub fn unset(&mut self, name: &str) -> Option<Value> {
        let name = name.trim().trim_matches('`');
        self.values.remove(name)
    }

    /// Current value of `name`
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Snapshot of every parameter
    pub fn get_all(&self) -> &ParamMap {
        &self.values
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
