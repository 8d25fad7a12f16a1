//! Sealed envelope: hybrid RSA-OAEP + AES-256-GCM encryption of a payload
//!
//! A fresh content key encrypts the payload; the content key itself is
//! wrapped with the recipient's RSA public key. Only the holder of the
//! matching private key can recover the payload.

use super::encryption::{CONTENT_KEY_SIZE, decrypt_data, encrypt_data, generate_content_key};
use crate::utils::error::{MetricsError, Result};
use base64::{Engine as _, engine::general_purpose};
use rsa::{Oaep, RsaPrivateKey, RsaPublicKey};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

/// Value of the encryption header announcing a sealed body
pub const ENCRYPTION_SCHEME: &str = "rsa-oaep-sha256+aes-256-gcm";

/// Wire form of a sealed payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SealedEnvelope {
    /// Content key wrapped with RSA-OAEP, base64
    pub key: String,
    /// nonce || ciphertext || tag, base64
    pub data: String,
}

impl SealedEnvelope {
    /// Seal `payload` for the owner of `public_key`
    pub fn seal(public_key: &RsaPublicKey, payload: &[u8]) -> Result<Self> {
        let content_key = generate_content_key();

        let wrapped_key = public_key
            .encrypt(
                &mut rand::thread_rng(),
                Oaep::new::<Sha256>(),
                &content_key,
            )
            .map_err(|e| MetricsError::Crypto(format!("Key wrapping failed: {}", e)))?;

        let data = encrypt_data(&content_key, payload)?;

        Ok(Self {
            key: general_purpose::STANDARD.encode(wrapped_key),
            data: general_purpose::STANDARD.encode(data),
        })
    }

    /// Recover the payload with the recipient's private key
    pub fn open(&self, private_key: &RsaPrivateKey) -> Result<Vec<u8>> {
        let wrapped_key = general_purpose::STANDARD
            .decode(&self.key)
            .map_err(|e| MetricsError::Crypto(format!("Failed to decode wrapped key: {}", e)))?;
        let data = general_purpose::STANDARD
            .decode(&self.data)
            .map_err(|e| MetricsError::Crypto(format!("Failed to decode sealed data: {}", e)))?;

        let content_key = private_key
            .decrypt(Oaep::new::<Sha256>(), &wrapped_key)
            .map_err(|_| MetricsError::Crypto("Key unwrapping failed".to_string()))?;
        let content_key: [u8; CONTENT_KEY_SIZE] = content_key
            .try_into()
            .map_err(|_| MetricsError::Crypto("Unexpected content key length".to_string()))?;

        decrypt_data(&content_key, &data)
    }

    /// Seal `payload` and serialize the envelope to a request body
    pub fn seal_to_bytes(public_key: &RsaPublicKey, payload: &[u8]) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(&Self::seal(public_key, payload)?)?)
    }

    /// Parse a request body and open the envelope
    pub fn open_bytes(private_key: &RsaPrivateKey, body: &[u8]) -> Result<Vec<u8>> {
        let envelope: Self = serde_json::from_slice(body)
            .map_err(|e| MetricsError::Crypto(format!("Malformed sealed envelope: {}", e)))?;
        envelope.open(private_key)
    }
}
