//! Change-log signals: database change records → fixed-order feature vectors.
//!
//! Modular structure:
//! - [`normalizer`] — Oracle/Postgres raw records → canonical [`LogData`]
//! - [`signals`] — Edit-distance and entropy-delta generators, ordered processor
//! - [`anomaly`] — Per-column [`AnomalyInput`] records and sinks
//! - [`pipeline`] — Run driver tying the above together
//! - [`cipher`] — Throwaway-key cipher strategies for synthetic tampering
//! - [`simulator`] — Synthetic raw records and probabilistic encryption
//! - [`logging`] — Structured logging

pub mod anomaly;
pub mod cipher;
pub mod config;
pub mod error;
pub mod logging;
pub mod normalizer;
pub mod pipeline;
pub mod signals;
pub mod simulator;

pub use anomaly::{AnomalyInput, AnomalySink, JsonLinesSink};
pub use cipher::{CipherStrategy, EncryptionConfig};
pub use config::AppConfig;
pub use error::{CipherError, ConfigError, EncryptionConfigError, NormalizeError, SinkError};
pub use logging::StructuredLogger;
pub use normalizer::{Dialect, LogData, LogNormalizer, Strictness};
pub use pipeline::{ChangeLogPipeline, PipelineStats};
pub use signals::{SignalGenerator, SignalProcessor};
pub use simulator::{EncryptionSimulator, LogSimulator};
