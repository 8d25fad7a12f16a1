//! Cryptographic utilities for the report envelope
//!
//! This module provides HMAC-SHA256 payload signing, AES-256-GCM authenticated
//! encryption and RSA key handling for the sealed envelope.

pub mod encryption;
pub mod envelope;
pub mod hmac;
pub mod keys;

pub use envelope::{ENCRYPTION_SCHEME, SealedEnvelope};
pub use hmac::{create_hmac_signature, verify_hmac_signature};
pub use keys::{load_private_key_pem, load_public_key_pem};
