//! Run configuration, loaded from a JSON file.

use crate::cipher::EncryptionConfig;
use crate::error::ConfigError;
use crate::normalizer::{Dialect, Strictness};
use crate::signals::SignalKind;
use crate::simulator::{find_default_field, FieldConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Raw record shape to generate and parse
    pub dialect: Dialect,
    pub operation: String,
    pub table: String,
    /// Target columns; one signal processor each
    pub fields: Vec<String>,
    pub signals: Vec<SignalKind>,
    /// Synthetic records to generate
    pub row_count: usize,
    /// Fixes fake values and encryption decisions; key material stays random
    pub seed: Option<u64>,
    pub strictness: Strictness,
    pub encryption: EncryptionConfig,
    pub output: OutputConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// JSON-lines destination; stdout when unset
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub json: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dialect: Dialect::Postgres,
            operation: "UPDATE".to_string(),
            table: "users".to_string(),
            fields: ["bio", "email", "phone", "address"]
                .into_iter()
                .map(String::from)
                .collect(),
            signals: vec![SignalKind::All],
            row_count: 10,
            seed: None,
            strictness: Strictness::Lenient,
            encryption: EncryptionConfig::default(),
            output: OutputConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Load from JSON file if present; otherwise return default.
    /// A file that exists but does not parse or validate is an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.encryption.validate()?;
        self.field_sources().map(|_| ())
    }

    /// Synthetic value sources for every configured field, in order.
    pub fn field_sources(&self) -> Result<Vec<FieldConfig>, ConfigError> {
        if self.fields.is_empty() {
            return Err(ConfigError::NoFields);
        }
        self.fields
            .iter()
            .map(|name| find_default_field(name).ok_or_else(|| ConfigError::UnknownField(name.clone())))
            .collect()
    }
}
