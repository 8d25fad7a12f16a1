//! Authenticated encryption with AES-256-GCM

use crate::utils::error::{MetricsError, Result};
use aes_gcm::{
    Aes256Gcm, Key, Nonce,
    aead::{Aead, KeyInit},
};
use rand::RngCore;

/// AES-256-GCM nonce size (96 bits / 12 bytes as recommended by NIST)
pub const AES_GCM_NONCE_SIZE: usize = 12;

/// AES-256-GCM authentication tag size
const AES_GCM_TAG_SIZE: usize = 16;

/// AES-256 key size
pub const CONTENT_KEY_SIZE: usize = 32;

/// Generate a fresh random content key
pub fn generate_content_key() -> [u8; CONTENT_KEY_SIZE] {
    let mut key = [0u8; CONTENT_KEY_SIZE];
    rand::thread_rng().fill_bytes(&mut key);
    key
}

/// Encrypt data using AES-256-GCM.
///
/// The output format is: nonce || ciphertext || tag
/// - nonce: 12 bytes (randomly generated)
/// - ciphertext: variable length (same as plaintext)
/// - tag: 16 bytes (authentication tag)
pub fn encrypt_data(key: &[u8; CONTENT_KEY_SIZE], data: &[u8]) -> Result<Vec<u8>> {
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key));

    let mut nonce_bytes = [0u8; AES_GCM_NONCE_SIZE];
    rand::thread_rng().fill_bytes(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    let ciphertext = cipher
        .encrypt(nonce, data)
        .map_err(|e| MetricsError::Crypto(format!("Encryption failed: {}", e)))?;

    let mut output = Vec::with_capacity(AES_GCM_NONCE_SIZE + ciphertext.len());
    output.extend_from_slice(&nonce_bytes);
    output.extend_from_slice(&ciphertext);
    Ok(output)
}

/// Decrypt data produced by [`encrypt_data`].
///
/// Fails if the data has been tampered with or the key is wrong.
pub fn decrypt_data(key: &[u8; CONTENT_KEY_SIZE], encrypted: &[u8]) -> Result<Vec<u8>> {
    if encrypted.len() < AES_GCM_NONCE_SIZE + AES_GCM_TAG_SIZE {
        return Err(MetricsError::Crypto(
            "Encrypted data too short - possible corruption or tampering".to_string(),
        ));
    }

    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key));
    let (nonce, ciphertext) = encrypted.split_at(AES_GCM_NONCE_SIZE);

    cipher
        .decrypt(Nonce::from_slice(nonce), ciphertext)
        .map_err(|_| {
            MetricsError::Crypto(
                "Decryption failed - data may have been tampered with or wrong key".to_string(),
            )
        })
}
