//! Encryption benchmark: per-strategy cost of one synthetic ciphertext.

use changelog_signals::cipher::{AesKeySize, CipherStrategy};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::OsRng;

fn bench_strategies(c: &mut Criterion) {
    let plaintext = "Amber quiet river copper lantern.";
    let strategies = [
        CipherStrategy::AesCbc(AesKeySize::Aes256),
        CipherStrategy::AesCtr(AesKeySize::Aes256),
        CipherStrategy::AesGcm(AesKeySize::Aes128),
        CipherStrategy::AesGcm(AesKeySize::Aes256),
        CipherStrategy::ChaCha20Poly1305,
    ];

    let mut g = c.benchmark_group("encrypt");
    for strategy in strategies {
        g.bench_function(strategy.algorithm_tag().as_str(), |b| {
            b.iter(|| strategy.encrypt(black_box(plaintext), &mut OsRng).unwrap())
        });
    }
    g.finish();
}

criterion_group!(benches, bench_strategies);
criterion_main!(benches);
