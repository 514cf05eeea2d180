//! Oracle and Postgres key sets.

use super::{remap, LogData, LogNormalizer, Strictness};
use crate::error::NormalizeError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Raw key names a dialect uses for each canonical field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialectKeys {
    pub operation: &'static str,
    pub table: &'static str,
    pub row_identifier: &'static str,
    pub columns: &'static str,
    pub timestamp: &'static str,
    pub before: &'static str,
    pub after: &'static str,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dialect {
    Oracle,
    #[default]
    Postgres,
}

impl Dialect {
    pub const fn keys(self) -> &'static DialectKeys {
        match self {
            Dialect::Oracle => &ORACLE_KEYS,
            Dialect::Postgres => &POSTGRES_KEYS,
        }
    }

    pub fn normalizer(self, strictness: Strictness) -> Box<dyn LogNormalizer> {
        match self {
            Dialect::Oracle => Box::new(OracleNormalizer { strictness }),
            Dialect::Postgres => Box::new(PostgresNormalizer { strictness }),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Dialect::Oracle => "oracle",
            Dialect::Postgres => "postgres",
        }
    }
}

const ORACLE_KEYS: DialectKeys = DialectKeys {
    operation: "action",
    table: "table_name",
    row_identifier: "rowid",
    columns: "changed_columns",
    timestamp: "timestamp",
    before: "before_values",
    after: "after_values",
};

const POSTGRES_KEYS: DialectKeys = DialectKeys {
    operation: "operation",
    table: "table",
    row_identifier: "primary_key",
    columns: "changed_columns",
    timestamp: "timestamp",
    before: "old_values",
    after: "new_values",
};

/// Oracle LogMiner-style records (`action`, `table_name`, `rowid`, ...)
#[derive(Debug, Clone, Copy, Default)]
pub struct OracleNormalizer {
    pub strictness: Strictness,
}

impl LogNormalizer for OracleNormalizer {
    fn dialect(&self) -> Dialect {
        Dialect::Oracle
    }

    fn normalize(&self, raw: &Value) -> Result<LogData, NormalizeError> {
        remap(raw, &ORACLE_KEYS, self.strictness)
    }
}

/// Postgres logical-decoding-style records (`operation`, `table`, `primary_key`, ...)
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresNormalizer {
    pub strictness: Strictness,
}

impl LogNormalizer for PostgresNormalizer {
    fn dialect(&self) -> Dialect {
        Dialect::Postgres
    }

    fn normalize(&self, raw: &Value) -> Result<LogData, NormalizeError> {
        remap(raw, &POSTGRES_KEYS, self.strictness)
    }
}
