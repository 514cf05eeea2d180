//! Per-column records handed to the external anomaly detector.

mod sink;

pub use sink::{AnomalySink, JsonLinesSink};

use crate::normalizer::LogData;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One (record, column) pair with its signal vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyInput {
    pub operation: String,
    pub table: String,
    pub column: String,
    pub timestamp: DateTime<Utc>,
    /// Raw before value of `column`, `None` when the record lacks it
    pub before_value: Option<Value>,
    pub after_value: Option<Value>,
    /// Same order as the generator registry that produced it
    pub signal_vector: Vec<f64>,
}

impl AnomalyInput {
    pub fn assemble(log: &LogData, column: &str, signal_vector: Vec<f64>) -> Self {
        Self {
            operation: log.operation.clone(),
            table: log.table.clone(),
            column: column.to_string(),
            timestamp: log.timestamp,
            before_value: log.before.get(column).cloned(),
            after_value: log.after.get(column).cloned(),
            signal_vector,
        }
    }

    /// `table:column:timestamp`
    pub fn identifier(&self) -> String {
        format!(
            "{}:{}:{}",
            self.table,
            self.column,
            self.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
        )
    }
}
