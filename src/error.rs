//! Error types for normalization, configuration, cipher simulation, and sinks.

use thiserror::Error;

/// Failure to turn one raw record into `LogData`.
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// The raw record is not a key/value mapping at all.
    #[error("malformed record: expected a key/value mapping, got {found}")]
    MalformedRecord { found: &'static str },

    /// Strict mode only: an expected key is absent.
    #[error("missing field `{key}`")]
    MissingField { key: &'static str },

    /// Strict mode only: an expected key holds the wrong type.
    #[error("field `{key}` has wrong type: expected {expected}")]
    MistypedField {
        key: &'static str,
        expected: &'static str,
    },
}

/// Invalid encryption simulation settings, rejected before any record is processed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncryptionConfigError {
    #[error("unsupported encryption type: {0}")]
    UnsupportedType(String),

    #[error("unsupported AES mode: {0}")]
    UnsupportedAesMode(String),

    #[error("invalid AES key size {0}: must be 16, 24, or 32 bytes")]
    InvalidKeySize(u64),

    #[error("encryption percentage {0} outside 0..=100")]
    InvalidPercentage(i64),
}

/// Application configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid encryption config: {0}")]
    Encryption(#[from] EncryptionConfigError),

    #[error("no target fields configured")]
    NoFields,

    #[error("no synthetic value source for field `{0}`")]
    UnknownField(String),
}

/// Failure while producing one ciphertext.
#[derive(Debug, Error)]
pub enum CipherError {
    /// Secure randomness could not supply key, IV, or nonce material.
    #[error("secure randomness unavailable: {0}")]
    EntropyExhausted(#[from] rand::Error),

    #[error("invalid key or IV length")]
    InvalidLength,

    #[error("AEAD seal failed")]
    Seal,
}

/// Failure handing a record to an anomaly sink.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("sink write failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("sink serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}
