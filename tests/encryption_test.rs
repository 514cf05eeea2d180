//! Cipher strategies, config validation, and probabilistic transform.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use changelog_signals::cipher::{AesKeySize, AesMode, CipherStrategy, EncryptionConfig, EncryptionType};
use changelog_signals::simulator::EncryptionSimulator;
use changelog_signals::EncryptionConfigError;
use rand::rngs::{OsRng, StdRng};
use rand::{CryptoRng, RngCore, SeedableRng};

/// CSPRNG stand-in whose entropy source has run dry.
struct DryEntropy;

impl RngCore for DryEntropy {
    fn next_u32(&mut self) -> u32 {
        0
    }

    fn next_u64(&mut self) -> u64 {
        0
    }

    fn fill_bytes(&mut self, _dest: &mut [u8]) {}

    fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand::Error> {
        Err(rand::Error::new("entropy source exhausted"))
    }
}

impl CryptoRng for DryEntropy {}

fn all_strategies() -> Vec<CipherStrategy> {
    let mut out = Vec::new();
    for size in [AesKeySize::Aes128, AesKeySize::Aes192, AesKeySize::Aes256] {
        out.push(CipherStrategy::AesCbc(size));
        out.push(CipherStrategy::AesCtr(size));
        out.push(CipherStrategy::AesGcm(size));
    }
    out.push(CipherStrategy::ChaCha20Poly1305);
    out
}

fn all_configs(percentage: i64) -> Vec<EncryptionConfig> {
    let mut out = Vec::new();
    for size in [AesKeySize::Aes128, AesKeySize::Aes192, AesKeySize::Aes256] {
        for mode in [AesMode::Cbc, AesMode::Ctr, AesMode::Gcm] {
            out.push(EncryptionConfig::aes(mode, size, percentage));
        }
    }
    out.push(EncryptionConfig::chacha20(percentage));
    out
}

fn decode(strategy: CipherStrategy, ciphertext: &str) -> Vec<u8> {
    let prefix = format!("{}:", strategy.algorithm_tag());
    let body = ciphertext
        .strip_prefix(&prefix)
        .unwrap_or_else(|| panic!("{ciphertext} lacks prefix {prefix}"));
    BASE64.decode(body).unwrap()
}

#[test]
fn algorithm_tags() {
    assert_eq!(CipherStrategy::AesCbc(AesKeySize::Aes128).algorithm_tag(), "AES-128-CBC");
    assert_eq!(CipherStrategy::AesCtr(AesKeySize::Aes192).algorithm_tag(), "AES-192-CTR");
    assert_eq!(CipherStrategy::AesGcm(AesKeySize::Aes256).algorithm_tag(), "AES-256-GCM");
    assert_eq!(CipherStrategy::ChaCha20Poly1305.algorithm_tag(), "ChaCha20");
    assert_eq!(CipherStrategy::None.algorithm_tag(), "None");
}

#[test]
fn none_strategy_is_identity() {
    for value in ["", "hello", "AES-256-CBC:looks-encrypted"] {
        assert_eq!(CipherStrategy::None.encrypt(value, &mut OsRng).unwrap(), value);
    }
}

#[test]
fn cbc_output_is_iv_plus_whole_blocks() {
    for size in [AesKeySize::Aes128, AesKeySize::Aes192, AesKeySize::Aes256] {
        let strategy = CipherStrategy::AesCbc(size);
        for plaintext in ["", "a", "exactly sixteen!", "a somewhat longer plaintext value"] {
            let raw = decode(strategy, &strategy.encrypt(plaintext, &mut OsRng).unwrap());
            let body = raw.len() - 16;
            assert!(body > 0 && body % 16 == 0, "{plaintext:?} -> {} bytes", raw.len());
            assert!(body > plaintext.len());
        }
    }
}

#[test]
fn ctr_output_is_iv_plus_plaintext_length() {
    let strategy = CipherStrategy::AesCtr(AesKeySize::Aes256);
    let raw = decode(strategy, &strategy.encrypt("thirteen char", &mut OsRng).unwrap());
    assert_eq!(raw.len(), 16 + 13);
}

#[test]
fn aead_output_carries_nonce_and_tag() {
    for strategy in [
        CipherStrategy::AesGcm(AesKeySize::Aes128),
        CipherStrategy::AesGcm(AesKeySize::Aes192),
        CipherStrategy::ChaCha20Poly1305,
    ] {
        let raw = decode(strategy, &strategy.encrypt("secret", &mut OsRng).unwrap());
        assert_eq!(raw.len(), 12 + 6 + 16);
        let empty = decode(strategy, &strategy.encrypt("", &mut OsRng).unwrap());
        assert!(empty.len() > 12);
    }
}

#[test]
fn fresh_iv_and_key_per_call() {
    for strategy in all_strategies() {
        let a = strategy.encrypt("same plaintext", &mut OsRng).unwrap();
        let b = strategy.encrypt("same plaintext", &mut OsRng).unwrap();
        assert_ne!(a, b, "{}", strategy.algorithm_tag());
    }
}

#[test]
fn exhausted_entropy_is_an_error_for_every_strategy() {
    for strategy in all_strategies() {
        assert!(strategy.encrypt("value", &mut DryEntropy).is_err());
    }
}

#[test]
fn config_defaults_and_parsing() {
    let cfg: EncryptionConfig = serde_json::from_str(r#"{"Type":"AES","Percentage":50}"#).unwrap();
    assert_eq!(cfg.validate().unwrap(), (CipherStrategy::AesCbc(AesKeySize::Aes256), 50));

    let cfg: EncryptionConfig =
        serde_json::from_str(r#"{"Type":"AES","Percentage":5,"AESMode":"GCM","KeySize":24}"#).unwrap();
    assert_eq!(cfg.validate().unwrap(), (CipherStrategy::AesGcm(AesKeySize::Aes192), 5));

    let cfg: EncryptionConfig = serde_json::from_str(r#"{"Type":"ChaCha20","Percentage":100}"#).unwrap();
    assert_eq!(cfg.strategy().unwrap().encryption_type(), EncryptionType::ChaCha20);

    let cfg: EncryptionConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(cfg, EncryptionConfig::none());
    assert_eq!(cfg.validate().unwrap(), (CipherStrategy::None, 0));
}

#[test]
fn invalid_configs_are_rejected() {
    let mut cfg = EncryptionConfig::aes(AesMode::Cbc, AesKeySize::Aes128, 50);
    cfg.key_size = Some(20);
    assert_eq!(cfg.validate(), Err(EncryptionConfigError::InvalidKeySize(20)));

    let mut cfg = EncryptionConfig::aes(AesMode::Cbc, AesKeySize::Aes128, 50);
    cfg.aes_mode = Some("ECB".into());
    assert_eq!(
        cfg.validate(),
        Err(EncryptionConfigError::UnsupportedAesMode("ECB".into()))
    );

    let cfg = EncryptionConfig {
        kind: "Blowfish".into(),
        ..EncryptionConfig::default()
    };
    assert_eq!(
        cfg.validate(),
        Err(EncryptionConfigError::UnsupportedType("Blowfish".into()))
    );

    for bad in [-1, 101, 1000] {
        let cfg = EncryptionConfig::chacha20(bad);
        assert_eq!(cfg.validate(), Err(EncryptionConfigError::InvalidPercentage(bad)));
    }

    let cfg = EncryptionConfig::chacha20(50);
    assert!(EncryptionSimulator::new(&cfg, Some(1)).is_ok());
    let mut cfg = EncryptionConfig::aes(AesMode::Gcm, AesKeySize::Aes256, 50);
    cfg.key_size = Some(20);
    assert!(EncryptionSimulator::new(&cfg, Some(1)).is_err());
}

#[test]
fn type_none_never_transforms() {
    let cfg = EncryptionConfig {
        percentage: 100,
        ..EncryptionConfig::none()
    };
    let mut sim = EncryptionSimulator::new(&cfg, Some(7)).unwrap();
    for value in ["", "abc", "user@example.com"] {
        assert_eq!(sim.maybe_transform(value), value);
    }
}

#[test]
fn zero_percent_never_transforms() {
    for cfg in all_configs(0) {
        let mut sim = EncryptionSimulator::new(&cfg, Some(7)).unwrap();
        for _ in 0..50 {
            assert_eq!(sim.maybe_transform("plain"), "plain");
        }
    }
}

#[test]
fn hundred_percent_always_transforms() {
    for cfg in all_configs(100) {
        let mut sim = EncryptionSimulator::new(&cfg, None).unwrap();
        let prefix = format!("{}:", sim.strategy().algorithm_tag());
        for _ in 0..20 {
            let out = sim.maybe_transform("plain");
            assert_ne!(out, "plain");
            let body = out.strip_prefix(&prefix).unwrap();
            assert!(BASE64.decode(body).is_ok());
        }
    }
}

#[test]
fn partial_percentage_is_roughly_honoured_and_reproducible() {
    let cfg = EncryptionConfig::aes(AesMode::Ctr, AesKeySize::Aes128, 30);
    let run = |seed: u64| -> Vec<bool> {
        let mut sim = EncryptionSimulator::new(&cfg, Some(seed)).unwrap();
        (0..1000).map(|_| sim.maybe_transform("v") != "v").collect()
    };
    let first = run(42);
    let hits = first.iter().filter(|t| **t).count();
    assert!((200..=400).contains(&hits), "{hits} of 1000 transformed");
    assert_eq!(run(42), first);
}

#[test]
fn decision_and_key_sources_are_injectable() {
    let cfg = EncryptionConfig::chacha20(100);
    let mut sim = EncryptionSimulator::with_sources(&cfg, StdRng::seed_from_u64(3), OsRng).unwrap();
    assert!(sim.maybe_transform("x").starts_with("ChaCha20:"));
}

#[test]
fn entropy_exhaustion_returns_plaintext() {
    for cfg in all_configs(100) {
        let mut sim =
            EncryptionSimulator::with_sources(&cfg, StdRng::seed_from_u64(9), DryEntropy).unwrap();
        assert_eq!(sim.maybe_transform("keep me"), "keep me");
    }
}
