//! Dialect-aware remapping of raw change-log records into one canonical record.
//!
//! The normalizer only renames and type-checks keys; it never parses SQL or
//! binary log formats. Input is an already-decoded JSON mapping.

mod dialect;

pub use dialect::{Dialect, DialectKeys, OracleNormalizer, PostgresNormalizer};

use crate::error::NormalizeError;
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

/// Canonical, dialect-independent change record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogData {
    pub operation: String,
    pub table: String,
    /// Primary key or row id, whatever the dialect calls it
    pub row_identifier: String,
    /// Changed column names, in source order
    pub columns: Vec<String>,
    pub timestamp: DateTime<Utc>,
    pub before: Map<String, Value>,
    pub after: Map<String, Value>,
}

impl LogData {
    pub fn before_field(&self, column: &str) -> FieldAccess<&str> {
        FieldAccess::lookup(&self.before, column, Value::as_str)
    }

    pub fn after_field(&self, column: &str) -> FieldAccess<&str> {
        FieldAccess::lookup(&self.after, column, Value::as_str)
    }

    /// Before and after string values of `column`, if both are present strings.
    pub fn string_pair(&self, column: &str) -> Option<(&str, &str)> {
        match (self.before_field(column), self.after_field(column)) {
            (FieldAccess::Present(before), FieldAccess::Present(after)) => Some((before, after)),
            _ => None,
        }
    }
}

/// Result of looking up one key in a loosely typed mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldAccess<T> {
    Present(T),
    Mistyped,
    Absent,
}

impl<T> FieldAccess<T> {
    /// Look up `key` and try to read it as `T`. JSON `null` counts as absent.
    pub fn lookup<'a>(
        map: &'a Map<String, Value>,
        key: &str,
        extract: impl FnOnce(&'a Value) -> Option<T>,
    ) -> Self {
        match map.get(key) {
            None | Some(Value::Null) => FieldAccess::Absent,
            Some(v) => extract(v).map_or(FieldAccess::Mistyped, FieldAccess::Present),
        }
    }

    pub fn present(self) -> Option<T> {
        match self {
            FieldAccess::Present(v) => Some(v),
            _ => None,
        }
    }
}

/// How the normalizer treats absent or mistyped keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strictness {
    /// Substitute the field's zero value and keep going
    #[default]
    Lenient,
    /// Fail the record with `MissingField` / `MistypedField`
    Strict,
}

/// Parse one raw record of a particular dialect into `LogData`.
pub trait LogNormalizer: Send + Sync {
    fn dialect(&self) -> Dialect;

    fn normalize(&self, raw: &Value) -> Result<LogData, NormalizeError>;
}

pub(crate) fn remap(
    raw: &Value,
    keys: &DialectKeys,
    strictness: Strictness,
) -> Result<LogData, NormalizeError> {
    let map = raw.as_object().ok_or(NormalizeError::MalformedRecord {
        found: json_kind(raw),
    })?;
    let reader = FieldReader { map, strictness };

    Ok(LogData {
        operation: reader.read(keys.operation, "string", as_string)?,
        table: reader.read(keys.table, "string", as_string)?,
        row_identifier: reader.read(keys.row_identifier, "string", as_string)?,
        columns: reader.read(keys.columns, "array of strings", as_string_list)?,
        timestamp: reader.read(keys.timestamp, "RFC3339 string or epoch millis", as_timestamp)?,
        before: reader.read(keys.before, "object", as_mapping)?,
        after: reader.read(keys.after, "object", as_mapping)?,
    })
}

struct FieldReader<'a> {
    map: &'a Map<String, Value>,
    strictness: Strictness,
}

impl FieldReader<'_> {
    fn read<T: Default>(
        &self,
        key: &'static str,
        expected: &'static str,
        extract: impl FnOnce(&Value) -> Option<T>,
    ) -> Result<T, NormalizeError> {
        match (FieldAccess::lookup(self.map, key, extract), self.strictness) {
            (FieldAccess::Present(v), _) => Ok(v),
            (FieldAccess::Absent, Strictness::Strict) => Err(NormalizeError::MissingField { key }),
            (FieldAccess::Mistyped, Strictness::Strict) => {
                Err(NormalizeError::MistypedField { key, expected })
            }
            (FieldAccess::Absent, Strictness::Lenient) => {
                debug!(key, "absent field, substituting zero value");
                Ok(T::default())
            }
            (FieldAccess::Mistyped, Strictness::Lenient) => {
                debug!(key, expected, "mistyped field, substituting zero value");
                Ok(T::default())
            }
        }
    }
}

fn as_string(v: &Value) -> Option<String> {
    v.as_str().map(str::to_owned)
}

fn as_string_list(v: &Value) -> Option<Vec<String>> {
    v.as_array()?.iter().map(as_string).collect()
}

fn as_timestamp(v: &Value) -> Option<DateTime<Utc>> {
    match v {
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|t| t.with_timezone(&Utc)),
        Value::Number(n) => Utc.timestamp_millis_opt(n.as_i64()?).single(),
        _ => None,
    }
}

fn as_mapping(v: &Value) -> Option<Map<String, Value>> {
    v.as_object().cloned()
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
