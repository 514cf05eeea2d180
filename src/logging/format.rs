//! Subscriber setup and the compact one-line rendering of anomaly inputs.

use crate::anomaly::AnomalyInput;
use serde_json::Value;
use tracing::debug;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Longest before/after rendering in a log line before it is cut with `...`
pub const MAX_VALUE_LEN: usize = 30;

pub struct StructuredLogger;

impl StructuredLogger {
    /// Install global subscriber writing to stderr (stdout carries records).
    /// Level from RUST_LOG, else `default_level`.
    pub fn init(json: bool, default_level: &str) {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
        if json {
            let fmt = tracing_subscriber::fmt::layer()
                .json()
                .with_span_events(FmtSpan::NONE)
                .with_writer(std::io::stderr);
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt)
                .init();
        } else {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}

/// `Levenshtein(email)=3.0000, Entropy(email)=0.1250`. Positions beyond
/// `names` are labelled `unknown`.
pub fn format_signals(names: &[String], vector: &[f64]) -> String {
    vector
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let name = names.get(i).map(String::as_str).unwrap_or("unknown");
            format!("{name}={v:.4}")
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Render a raw value for display, cut to `max` characters.
pub fn truncate_value(value: Option<&Value>, max: usize) -> String {
    let rendered = match value {
        None | Some(Value::Null) => "<nil>".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    };
    if rendered.chars().count() > max {
        let cut: String = rendered.chars().take(max).collect();
        format!("{cut}...")
    } else {
        rendered
    }
}

/// Emit one debug line per anomaly input.
pub fn log_anomaly(input: &AnomalyInput, names: &[String]) {
    debug!(
        id = %input.identifier(),
        before = %truncate_value(input.before_value.as_ref(), MAX_VALUE_LEN),
        after = %truncate_value(input.after_value.as_ref(), MAX_VALUE_LEN),
        signals = %format_signals(names, &input.signal_vector),
        "{}",
        input.operation
    );
}
