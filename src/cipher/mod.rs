//! Cipher strategies that make field values look tampered with.
//!
//! Output wire format: `{ALGO-TAG}:{base64(iv_or_nonce || ciphertext [|| tag])}`.
//! Every call draws a fresh key and IV/nonce from the caller's CSPRNG and drops
//! the key afterwards, so nothing produced here can be decrypted later.

mod aead;
mod block;
mod config;

pub use config::{AesKeySize, AesMode, EncryptionConfig, EncryptionType};

use crate::error::CipherError;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use rand::{CryptoRng, RngCore};

pub const AES_BLOCK_LEN: usize = 16;

/// Closed set of value mutators; adding a mode means extending this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CipherStrategy {
    None,
    AesCbc(AesKeySize),
    AesCtr(AesKeySize),
    AesGcm(AesKeySize),
    ChaCha20Poly1305,
}

impl CipherStrategy {
    pub fn encryption_type(&self) -> EncryptionType {
        match self {
            CipherStrategy::None => EncryptionType::None,
            CipherStrategy::AesCbc(_) | CipherStrategy::AesCtr(_) | CipherStrategy::AesGcm(_) => {
                EncryptionType::Aes
            }
            CipherStrategy::ChaCha20Poly1305 => EncryptionType::ChaCha20,
        }
    }

    /// Prefix written before the `:` in every ciphertext, e.g. `AES-128-GCM`
    pub fn algorithm_tag(&self) -> String {
        match self {
            CipherStrategy::None => "None".to_string(),
            CipherStrategy::AesCbc(size) => format!("AES-{size}-CBC"),
            CipherStrategy::AesCtr(size) => format!("AES-{size}-CTR"),
            CipherStrategy::AesGcm(size) => format!("AES-{size}-GCM"),
            CipherStrategy::ChaCha20Poly1305 => "ChaCha20".to_string(),
        }
    }

    /// Encrypt `plaintext` under a throwaway key. `None` is the identity.
    pub fn encrypt<R>(&self, plaintext: &str, rng: &mut R) -> Result<String, CipherError>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        let data = plaintext.as_bytes();
        let sealed = match *self {
            CipherStrategy::None => return Ok(plaintext.to_string()),
            CipherStrategy::AesCbc(size) => block::encrypt_cbc(size, data, rng)?,
            CipherStrategy::AesCtr(size) => block::encrypt_ctr(size, data, rng)?,
            CipherStrategy::AesGcm(size) => aead::encrypt_gcm(size, data, rng)?,
            CipherStrategy::ChaCha20Poly1305 => aead::encrypt_chacha20(data, rng)?,
        };
        Ok(format!("{}:{}", self.algorithm_tag(), BASE64.encode(sealed)))
    }
}

fn random_key<R>(len: usize, rng: &mut R) -> Result<Vec<u8>, CipherError>
where
    R: RngCore + CryptoRng + ?Sized,
{
    let mut key = vec![0u8; len];
    rng.try_fill_bytes(&mut key)?;
    Ok(key)
}

fn prepend(prefix: &[u8], body: Vec<u8>) -> Vec<u8> {
    let mut out = Vec::with_capacity(prefix.len() + body.len());
    out.extend_from_slice(prefix);
    out.extend(body);
    out
}
