//! Probabilistic per-value encryption for synthetic fixtures.

use crate::cipher::{CipherStrategy, EncryptionConfig};
use crate::error::EncryptionConfigError;
use rand::rngs::{OsRng, StdRng};
use rand::{CryptoRng, Rng, RngCore, SeedableRng};
use tracing::warn;

/// Applies the configured cipher to a share of values.
///
/// `decisions` only picks *whether* to transform; key, IV, and nonce material
/// always comes from `key_source`, which must be a CSPRNG and is never seeded
/// from `decisions`.
pub struct EncryptionSimulator<R = StdRng, K = OsRng> {
    strategy: CipherStrategy,
    percentage: u32,
    decisions: R,
    key_source: K,
}

impl EncryptionSimulator<StdRng, OsRng> {
    /// Validate `config`; decisions are reproducible when `seed` is set.
    pub fn new(config: &EncryptionConfig, seed: Option<u64>) -> Result<Self, EncryptionConfigError> {
        let decisions = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        Self::with_sources(config, decisions, OsRng)
    }
}

impl<R, K> EncryptionSimulator<R, K>
where
    R: Rng,
    K: RngCore + CryptoRng,
{
    pub fn with_sources(
        config: &EncryptionConfig,
        decisions: R,
        key_source: K,
    ) -> Result<Self, EncryptionConfigError> {
        let (strategy, percentage) = config.validate()?;
        Ok(Self {
            strategy,
            percentage,
            decisions,
            key_source,
        })
    }

    pub fn strategy(&self) -> CipherStrategy {
        self.strategy
    }

    pub fn percentage(&self) -> u32 {
        self.percentage
    }

    /// Return `value` either unchanged or as a tagged base64 ciphertext.
    ///
    /// Never fails: if the key source cannot deliver randomness the transform
    /// is abandoned and the plaintext is returned.
    pub fn maybe_transform(&mut self, value: &str) -> String {
        if self.strategy == CipherStrategy::None || self.percentage == 0 {
            return value.to_string();
        }
        if self.percentage < 100 && self.decisions.gen_range(0..100) >= self.percentage {
            return value.to_string();
        }

        match self.strategy.encrypt(value, &mut self.key_source) {
            Ok(ciphertext) => ciphertext,
            Err(e) => {
                warn!(
                    algorithm = %self.strategy.algorithm_tag(),
                    error = %e,
                    "encryption abandoned, emitting plaintext"
                );
                value.to_string()
            }
        }
    }
}
