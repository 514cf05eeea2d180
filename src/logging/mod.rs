//! Structured logging via `tracing`.

mod format;

pub use format::{format_signals, log_anomaly, truncate_value, StructuredLogger, MAX_VALUE_LEN};
