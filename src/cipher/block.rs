//! AES block modes: CBC with PKCS#7 padding and CTR as a keystream.

use super::{prepend, random_key, AesKeySize, AES_BLOCK_LEN};
use crate::error::CipherError;
use aes::{Aes128, Aes192, Aes256};
use cbc::cipher::{block_padding::NoPadding, BlockEncryptMut, KeyIvInit, StreamCipher};
use rand::{CryptoRng, RngCore};

type Aes128Ctr = ctr::Ctr128BE<Aes128>;
type Aes192Ctr = ctr::Ctr128BE<Aes192>;
type Aes256Ctr = ctr::Ctr128BE<Aes256>;

/// Pad to a multiple of `block_len`; always adds between 1 and `block_len` bytes.
pub(crate) fn pad_pkcs7(data: &[u8], block_len: usize) -> Vec<u8> {
    let pad = block_len - data.len() % block_len;
    let mut out = Vec::with_capacity(data.len() + pad);
    out.extend_from_slice(data);
    out.resize(data.len() + pad, pad as u8);
    out
}

/// Returns `iv || ciphertext`
pub(super) fn encrypt_cbc<R>(size: AesKeySize, plaintext: &[u8], rng: &mut R) -> Result<Vec<u8>, CipherError>
where
    R: RngCore + CryptoRng + ?Sized,
{
    let key = random_key(size.bytes(), rng)?;
    let mut iv = [0u8; AES_BLOCK_LEN];
    rng.try_fill_bytes(&mut iv)?;

    let padded = pad_pkcs7(plaintext, AES_BLOCK_LEN);
    let ciphertext = match size {
        AesKeySize::Aes128 => cbc::Encryptor::<Aes128>::new_from_slices(&key, &iv)
            .map_err(|_| CipherError::InvalidLength)?
            .encrypt_padded_vec_mut::<NoPadding>(&padded),
        AesKeySize::Aes192 => cbc::Encryptor::<Aes192>::new_from_slices(&key, &iv)
            .map_err(|_| CipherError::InvalidLength)?
            .encrypt_padded_vec_mut::<NoPadding>(&padded),
        AesKeySize::Aes256 => cbc::Encryptor::<Aes256>::new_from_slices(&key, &iv)
            .map_err(|_| CipherError::InvalidLength)?
            .encrypt_padded_vec_mut::<NoPadding>(&padded),
    };
    Ok(prepend(&iv, ciphertext))
}

/// Returns `iv || ciphertext`; ciphertext has the plaintext's length.
pub(super) fn encrypt_ctr<R>(size: AesKeySize, plaintext: &[u8], rng: &mut R) -> Result<Vec<u8>, CipherError>
where
    R: RngCore + CryptoRng + ?Sized,
{
    let key = random_key(size.bytes(), rng)?;
    let mut iv = [0u8; AES_BLOCK_LEN];
    rng.try_fill_bytes(&mut iv)?;

    let mut buf = plaintext.to_vec();
    match size {
        AesKeySize::Aes128 => Aes128Ctr::new_from_slices(&key, &iv)
            .map_err(|_| CipherError::InvalidLength)?
            .apply_keystream(&mut buf),
        AesKeySize::Aes192 => Aes192Ctr::new_from_slices(&key, &iv)
            .map_err(|_| CipherError::InvalidLength)?
            .apply_keystream(&mut buf),
        AesKeySize::Aes256 => Aes256Ctr::new_from_slices(&key, &iv)
            .map_err(|_| CipherError::InvalidLength)?
            .apply_keystream(&mut buf),
    }
    Ok(prepend(&iv, buf))
}
