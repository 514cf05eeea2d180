//! Run driver: raw records → normalizer → per-column signal vectors → sink.

use crate::anomaly::{AnomalyInput, AnomalySink};
use crate::config::AppConfig;
use crate::error::{NormalizeError, SinkError};
use crate::logging::log_anomaly;
use crate::normalizer::{LogData, LogNormalizer};
use crate::signals::SignalProcessor;
use serde_json::Value;
use tracing::warn;

/// A record that could not be normalized; the run continued without it.
#[derive(Debug)]
pub struct RecordFailure {
    pub index: usize,
    pub error: NormalizeError,
}

#[derive(Debug, Default)]
pub struct PipelineStats {
    pub records: usize,
    pub skipped: usize,
    pub emitted: usize,
    pub failures: Vec<RecordFailure>,
}

struct TrackedColumn {
    column: String,
    processor: SignalProcessor,
}

pub struct ChangeLogPipeline {
    normalizer: Box<dyn LogNormalizer>,
    columns: Vec<TrackedColumn>,
}

impl ChangeLogPipeline {
    pub fn new(normalizer: Box<dyn LogNormalizer>) -> Self {
        Self {
            normalizer,
            columns: Vec::new(),
        }
    }

    /// One processor per configured field, all with the configured signal set.
    pub fn from_config(config: &AppConfig) -> Self {
        let mut pipeline = Self::new(config.dialect.normalizer(config.strictness));
        for field in &config.fields {
            pipeline.track(field.clone(), SignalProcessor::for_field(field, &config.signals));
        }
        pipeline
    }

    pub fn track(&mut self, column: impl Into<String>, processor: SignalProcessor) {
        self.columns.push(TrackedColumn {
            column: column.into(),
            processor,
        });
    }

    pub fn normalizer(&self) -> &dyn LogNormalizer {
        self.normalizer.as_ref()
    }

    /// Signal names for `column`, parallel to its vectors.
    pub fn signal_names(&self, column: &str) -> Option<&[String]> {
        self.columns
            .iter()
            .find(|c| c.column == column)
            .map(|c| c.processor.names())
    }

    fn assemble(&self, log: &LogData) -> Vec<AnomalyInput> {
        self.columns
            .iter()
            .map(|c| AnomalyInput::assemble(log, &c.column, c.processor.generate_vector(log)))
            .collect()
    }

    /// Normalize one record and assemble one input per tracked column.
    pub fn process_record(&self, raw: &Value) -> Result<Vec<AnomalyInput>, NormalizeError> {
        let log = self.normalizer.normalize(raw)?;
        Ok(self.assemble(&log))
    }

    /// Feed every record through and hand the results to `sink`. Records that
    /// fail normalization are skipped and listed in the returned stats; only a
    /// sink failure stops the run.
    pub fn run<'a, I, S>(&self, records: I, sink: &mut S) -> Result<PipelineStats, SinkError>
    where
        I: IntoIterator<Item = &'a Value>,
        S: AnomalySink + ?Sized,
    {
        let mut stats = PipelineStats::default();
        for (index, raw) in records.into_iter().enumerate() {
            stats.records += 1;
            let log = match self.normalizer.normalize(raw) {
                Ok(log) => log,
                Err(error) => {
                    warn!(index, %error, "skipping record");
                    stats.skipped += 1;
                    stats.failures.push(RecordFailure { index, error });
                    continue;
                }
            };
            for (tracked, input) in self.columns.iter().zip(self.assemble(&log)) {
                log_anomaly(&input, tracked.processor.names());
                sink.accept(input)?;
                stats.emitted += 1;
            }
        }
        Ok(stats)
    }
}
