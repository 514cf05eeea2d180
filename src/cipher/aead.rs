//! AEAD modes: AES-GCM and ChaCha20-Poly1305. Output is `nonce || ciphertext || tag`.

use super::{prepend, random_key, AesKeySize};
use crate::error::CipherError;
use aes::Aes192;
use aes_gcm::aead::{consts::U12, Aead, KeyInit, Nonce};
use aes_gcm::{Aes128Gcm, Aes256Gcm, AesGcm};
use chacha20poly1305::ChaCha20Poly1305;
use rand::{CryptoRng, RngCore};

type Aes192Gcm = AesGcm<Aes192, U12>;

const CHACHA20_KEY_LEN: usize = 32;

pub(super) fn encrypt_gcm<R>(size: AesKeySize, plaintext: &[u8], rng: &mut R) -> Result<Vec<u8>, CipherError>
where
    R: RngCore + CryptoRng + ?Sized,
{
    let key = random_key(size.bytes(), rng)?;
    match size {
        AesKeySize::Aes128 => seal::<Aes128Gcm, R>(&key, plaintext, rng),
        AesKeySize::Aes192 => seal::<Aes192Gcm, R>(&key, plaintext, rng),
        AesKeySize::Aes256 => seal::<Aes256Gcm, R>(&key, plaintext, rng),
    }
}

pub(super) fn encrypt_chacha20<R>(plaintext: &[u8], rng: &mut R) -> Result<Vec<u8>, CipherError>
where
    R: RngCore + CryptoRng + ?Sized,
{
    let key = random_key(CHACHA20_KEY_LEN, rng)?;
    seal::<ChaCha20Poly1305, R>(&key, plaintext, rng)
}

/// Nonce length comes from the construction (`A::NonceSize`).
fn seal<A, R>(key: &[u8], plaintext: &[u8], rng: &mut R) -> Result<Vec<u8>, CipherError>
where
    A: Aead + KeyInit,
    R: RngCore + CryptoRng + ?Sized,
{
    let cipher = A::new_from_slice(key).map_err(|_| CipherError::InvalidLength)?;
    let mut nonce = Nonce::<A>::default();
    rng.try_fill_bytes(&mut nonce)?;
    let sealed = cipher
        .encrypt(&nonce, plaintext)
        .map_err(|_| CipherError::Seal)?;
    Ok(prepend(&nonce, sealed))
}
