//! AES encryption of serialized messages.
//!
//! CBC uses the IV; ECB never receives it. Both pad with PKCS#7 and the
//! result is standard base64, which is what the server's ciphertext field
//! expects.

use aes::cipher::block_padding::Pkcs7;
use aes::cipher::{BlockEncryptMut, KeyInit, KeyIvInit};
use aes::{Aes128, Aes192, Aes256};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use bark_core::EncryptionAlgorithm;
use bark_core::algorithm::{AES_BLOCK_LEN, BlockMode, KeySize};
use bark_core::errors::EncryptionError;

/// Encrypt `plaintext` and return the base64-encoded ciphertext.
///
/// `key` and `iv` are used as raw UTF-8 bytes. Lengths are expected to have
/// passed [`policy`](super::policy) already; a mismatch here still surfaces
/// as an [`EncryptionError`] rather than a panic.
pub fn encrypt(
    algorithm: EncryptionAlgorithm,
    key: &str,
    iv: &str,
    plaintext: &[u8],
) -> Result<String, EncryptionError> {
    let key_bytes = key.as_bytes();
    let iv_bytes = iv.as_bytes();

    let ciphertext = match (algorithm.key_size(), algorithm.mode()) {
        (KeySize::Aes128, BlockMode::Cbc) => cbc::Encryptor::<Aes128>::new_from_slices(key_bytes, iv_bytes)
            .map(|c| c.encrypt_padded_vec_mut::<Pkcs7>(plaintext)),
        (KeySize::Aes192, BlockMode::Cbc) => cbc::Encryptor::<Aes192>::new_from_slices(key_bytes, iv_bytes)
            .map(|c| c.encrypt_padded_vec_mut::<Pkcs7>(plaintext)),
        (KeySize::Aes256, BlockMode::Cbc) => cbc::Encryptor::<Aes256>::new_from_slices(key_bytes, iv_bytes)
            .map(|c| c.encrypt_padded_vec_mut::<Pkcs7>(plaintext)),
        (KeySize::Aes128, BlockMode::Ecb) => ecb::Encryptor::<Aes128>::new_from_slice(key_bytes)
            .map(|c| c.encrypt_padded_vec_mut::<Pkcs7>(plaintext)),
        (KeySize::Aes192, BlockMode::Ecb) => ecb::Encryptor::<Aes192>::new_from_slice(key_bytes)
            .map(|c| c.encrypt_padded_vec_mut::<Pkcs7>(plaintext)),
        (KeySize::Aes256, BlockMode::Ecb) => ecb::Encryptor::<Aes256>::new_from_slice(key_bytes)
            .map(|c| c.encrypt_padded_vec_mut::<Pkcs7>(plaintext)),
    }
    .map_err(|_| {
        if algorithm.mode().uses_iv() && iv_bytes.len() != AES_BLOCK_LEN {
            EncryptionError::iv_is_not_correct(AES_BLOCK_LEN)
        } else {
            EncryptionError::key_is_not_correct(algorithm.key_len_bytes())
        }
    })?;

    Ok(STANDARD.encode(ciphertext))
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
