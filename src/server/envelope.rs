//! Request and response envelope
//!
//! Inbound: open a sealed body, then verify the `HashSHA256` signature over
//! the plaintext. Outbound: sign JSON responses when a key is configured.

use crate::server::state::AppState;
use crate::utils::auth::{SealedEnvelope, create_hmac_signature, verify_hmac_signature};
use crate::utils::error::{MetricsError, Result};
use actix_web::{HttpRequest, HttpResponse};
use serde::Serialize;
use tracing::{debug, warn};

/// Header carrying the hex HMAC-SHA256 of the plaintext body
pub const SIGNATURE_HEADER: &str = "HashSHA256";

/// Header announcing a sealed body
pub const ENCRYPTION_HEADER: &str = "X-Encryption";

/// Recover and authenticate the plaintext payload of a request
///
/// A request without a signature header is accepted; a wrong signature is not.
pub fn open_request(state: &AppState, req: &HttpRequest, body: &[u8]) -> Result<Vec<u8>> {
    let sealed = req.headers().contains_key(ENCRYPTION_HEADER);

    let payload = match (&state.private_key, sealed) {
        (Some(private_key), true) => {
            SealedEnvelope::open_bytes(private_key, body).map_err(|e| {
                warn!("Failed to open sealed payload: {}", e);
                MetricsError::invalid_metric("payload could not be decrypted")
            })?
        }
        (None, true) => {
            return Err(MetricsError::invalid_metric(
                "sealed payload received but no private key is configured",
            ));
        }
        (_, false) => body.to_vec(),
    };

    if let (Some(key), Some(signature)) = (&state.key, req.headers().get(SIGNATURE_HEADER)) {
        let signature = signature
            .to_str()
            .map_err(|_| MetricsError::integrity_mismatch("signature header is not valid text"))?;

        if !verify_hmac_signature(key, &payload, signature)? {
            warn!("Rejecting payload with mismatched signature");
            return Err(MetricsError::integrity_mismatch("signature does not match payload"));
        }
        debug!("Payload signature verified");
    }

    Ok(payload)
}

/// Serialize `value` as the JSON response body, signing it when a key is set
pub fn json_response<T: Serialize>(state: &AppState, value: &T) -> Result<HttpResponse> {
    let body = serde_json::to_vec(value)?;
    let mut response = HttpResponse::Ok();
    response.content_type("application/json");

    if let Some(key) = &state.key {
        response.insert_header((SIGNATURE_HEADER, create_hmac_signature(key, &body)?));
    }

    Ok(response.body(body))
}
