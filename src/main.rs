//! Entrypoint: generate synthetic change logs, optionally tamper with them,
//! and stream per-column signal vectors as JSON lines.

use changelog_signals::{
    anomaly::JsonLinesSink,
    config::AppConfig,
    logging::StructuredLogger,
    pipeline::{ChangeLogPipeline, PipelineStats},
    simulator::{EncryptionSimulator, LogSimulator},
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs::File;
use std::io::BufWriter;
use tracing::info;

/// Keeps the decision stream distinct from the fake-value stream under one seed.
const DECISION_SEED_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config_path = std::env::var("CLSIG_CONFIG_PATH")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| std::path::PathBuf::from("config.json"));
    let config = AppConfig::load(&config_path)?;

    StructuredLogger::init(config.log.json, &config.log.level);

    let encryption = EncryptionSimulator::new(
        &config.encryption,
        config.seed.map(|s| s ^ DECISION_SEED_SALT),
    )?;
    let fields = config.field_sources()?;
    info!(
        dialect = config.dialect.as_str(),
        table = %config.table,
        rows = config.row_count,
        fields = ?config.fields,
        encryption = %encryption.strategy().algorithm_tag(),
        percentage = encryption.percentage(),
        "change-log signals starting"
    );

    let values = match config.seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };
    let mut simulator = LogSimulator::new(values, encryption);
    let records = simulator.generate_logs(
        config.dialect,
        &config.operation,
        &config.table,
        config.row_count,
        &fields,
    );

    let pipeline = ChangeLogPipeline::from_config(&config);
    let stats: PipelineStats = match &config.output.path {
        Some(path) => {
            let mut sink = JsonLinesSink::new(BufWriter::new(File::create(path)?));
            let stats = pipeline.run(&records, &mut sink)?;
            sink.flush()?;
            stats
        }
        None => {
            let mut sink = JsonLinesSink::new(std::io::stdout().lock());
            let stats = pipeline.run(&records, &mut sink)?;
            sink.flush()?;
            stats
        }
    };

    info!(
        records = stats.records,
        skipped = stats.skipped,
        emitted = stats.emitted,
        "change-log signals complete"
    );
    Ok(())
}
