//! Table and plain-text rendering of statement results.

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::client::{StatementResult, Summary};

use super::Renderer;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// ASCII table plus summary
    #[default]
    Verbose,
    /// Comma separated rows, no summary
    Plain,
}

impl Format {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Verbose => "verbose",
            Self::Plain => "plain",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "verbose" => Ok(Self::Verbose),
            "plain" => Ok(Self::Plain),
            other => Err(format!("Unknown format '{}'", other)),
        }
    }
}

/// Default [`Renderer`]
#[derive(Debug, Clone, Copy, Default)]
pub struct PrettyPrinter {
    format: Format,
}

impl PrettyPrinter {
    pub fn new(format: Format) -> Self {
        Self { format }
    }

    pub fn format_kind(&self) -> Format {
        self.format
    }

    fn render_value(&self, value: &Value) -> String {
        match value {
            Value::Null => "NULL".to_string(),
            Value::String(s) if self.format == Format::Plain => s.clone(),
            other => other.to_string(),
        }
    }

    fn verbose(&self, result: &StatementResult) -> String {
        let mut out = String::new();

        if !result.columns().is_empty() {
            let rows: Vec<Vec<String>> = result
                .records()
                .iter()
                .map(|r| r.values().iter().map(|v| self.render_value(v)).collect())
                .collect();
            out.push_str(&table(result.columns(), &rows));
        }

        let summary = summary_lines(result.records().len(), result.summary());
        if !summary.is_empty() {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(&summary);
        }

        out
    }

    fn plain(&self, result: &StatementResult) -> String {
        if result.columns().is_empty() {
            return String::new();
        }

        let mut lines = vec![result.columns().join(", ")];
        for record in result.records() {
            let cells: Vec<String> = record.values().iter().map(|v| self.render_value(v)).collect();
            lines.push(cells.join(", "));
        }
        lines.join("\n")
    }
}

impl Renderer for PrettyPrinter {
    fn format(&self, result: &StatementResult) -> String {
        match self.format {
            Format::Verbose => self.verbose(result),
            Format::Plain => self.plain(result),
        }
    }
}

fn table(columns: &[String], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = columns.iter().map(|c| c.chars().count()).collect();
    for row in rows {
        for (idx, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(idx) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let border = {
        let segments: Vec<String> = widths.iter().map(|w| "-".repeat(w + 2)).collect();
        format!("+{}+", segments.join("+"))
    };
    let line = |cells: &[String]| {
        let padded: Vec<String> = cells
            .iter()
            .zip(widths.iter())
            .map(|(cell, w)| format!(" {}{} ", cell, " ".repeat(w - cell.chars().count())))
            .collect();
        format!("|{}|", padded.join("|"))
    };

    let mut lines = vec![border.clone(), line(columns), border.clone()];
    for row in rows {
        lines.push(line(row));
    }
    lines.push(border);
    lines.join("\n")
}

fn summary_lines(rows: usize, summary: &Summary) -> String {
    let mut lines = Vec::new();

    if rows > 0 || !summary.contains_updates {
        let noun = if rows == 1 { "row" } else { "rows" };
        match summary.result_available_after_ms {
            Some(ms) => lines.push(format!("{} {} available after {} ms", rows, noun, ms)),
            None => lines.push(format!("{} {}", rows, noun)),
        }
    }

    let counters: Vec<String> = summary
        .counters
        .iter()
        .map(|(key, count)| counter_label(key, *count))
        .collect();
    if !counters.is_empty() {
        lines.push(counters.join(", "));
    }

    for note in &summary.notifications {
        lines.push(format!("Warning: {} ({})", note.title, note.code));
    }

    lines.join("\n")
}

fn counter_label(key: &str, count: i64) -> String {
    match key {
        "nodes_created" => format!("Added {} nodes", count),
        "nodes_deleted" => format!("Deleted {} nodes", count),
        "relationships_created" => format!("Created {} relationships", count),
        "relationship_deleted" | "relationships_deleted" => {
            format!("Deleted {} relationships", count)
        }
        "properties_set" => format!("Set {} properties", count),
        "labels_added" => format!("Added {} labels", count),
        "labels_removed" => format!("Removed {} labels", count),
        "indexes_added" => format!("Added {} indexes", count),
        "indexes_removed" => format!("Removed {} indexes", count),
        "constraints_added" => format!("Added {} constraints", count),
        "constraints_removed" => format!("Removed {} constraints", count),
        other => format!("{}: {}", other, count),
    }
}
