//! Signal benchmark: edit distance, entropy, and full record → vector pipeline.

use changelog_signals::anomaly::AnomalyInput;
use changelog_signals::cipher::EncryptionConfig;
use changelog_signals::config::AppConfig;
use changelog_signals::normalizer::{Dialect, LogNormalizer, Strictness};
use changelog_signals::pipeline::ChangeLogPipeline;
use changelog_signals::signals::{levenshtein, shannon_entropy, SignalKind, SignalProcessor};
use changelog_signals::simulator::{default_fields, EncryptionSimulator, LogSimulator};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn make_logs(n: usize) -> Vec<serde_json::Value> {
    let enc = EncryptionSimulator::new(&EncryptionConfig::none(), Some(1)).unwrap();
    let mut sim = LogSimulator::new(StdRng::seed_from_u64(1), enc);
    sim.generate_logs(Dialect::Postgres, "UPDATE", "users", n, &default_fields())
}

fn bench_primitives(c: &mut Criterion) {
    let before = "123 Maple Ave, Springfield";
    let after = "AES-256-GCM:q83vEjRWeJASNFZ4kBI0VniQEjRWeJA=";

    let mut g = c.benchmark_group("primitives");
    g.bench_function("levenshtein_address_vs_ciphertext", |b| {
        b.iter(|| levenshtein(black_box(before), black_box(after)))
    });
    g.bench_function("shannon_entropy_ciphertext", |b| {
        b.iter(|| shannon_entropy(black_box(after)))
    });
    g.finish();
}

fn bench_vector(c: &mut Criterion) {
    let logs = make_logs(1);
    let normalizer = Dialect::Postgres.normalizer(Strictness::Lenient);
    let log = normalizer.normalize(&logs[0]).unwrap();
    let processor = SignalProcessor::for_field("bio", &[SignalKind::All]);

    c.bench_function("generate_vector_bio", |b| {
        b.iter(|| black_box(processor.generate_vector(black_box(&log))))
    });
}

fn bench_full_pipeline(c: &mut Criterion) {
    let config = AppConfig::default();
    let pipeline = ChangeLogPipeline::from_config(&config);
    let logs = make_logs(100);

    c.bench_function("pipeline_100_records_4_fields", |b| {
        b.iter(|| {
            let mut sink: Vec<AnomalyInput> = Vec::with_capacity(400);
            black_box(pipeline.run(&logs, &mut sink).unwrap());
            sink
        })
    });
}

criterion_group!(benches, bench_primitives, bench_vector, bench_full_pipeline);
criterion_main!(benches);
