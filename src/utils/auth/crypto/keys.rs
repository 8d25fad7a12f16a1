//! RSA key material loading

use crate::utils::error::{MetricsError, Result};
use rsa::pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey};
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey};
use rsa::{RsaPrivateKey, RsaPublicKey};
use std::path::Path;
use tracing::debug;

/// Load an RSA public key from a PEM file (SPKI or PKCS#1)
pub fn load_public_key_pem<P: AsRef<Path>>(path: P) -> Result<RsaPublicKey> {
    let path = path.as_ref();
    let pem = read_pem(path)?;

    let key = RsaPublicKey::from_public_key_pem(&pem)
        .or_else(|_| RsaPublicKey::from_pkcs1_pem(&pem))
        .map_err(|e| {
            MetricsError::Crypto(format!("Invalid public key in {}: {}", path.display(), e))
        })?;

    debug!("Loaded public key from {}", path.display());
    Ok(key)
}

/// Load an RSA private key from a PEM file (PKCS#8 or PKCS#1)
pub fn load_private_key_pem<P: AsRef<Path>>(path: P) -> Result<RsaPrivateKey> {
    let path = path.as_ref();
    let pem = read_pem(path)?;

    let key = RsaPrivateKey::from_pkcs8_pem(&pem)
        .or_else(|_| RsaPrivateKey::from_pkcs1_pem(&pem))
        .map_err(|e| {
            MetricsError::Crypto(format!("Invalid private key in {}: {}", path.display(), e))
        })?;

    debug!("Loaded private key from {}", path.display());
    Ok(key)
}

fn read_pem(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| {
        MetricsError::Crypto(format!("Failed to read key file {}: {}", path.display(), e))
    })
}
