//! Report transmission to the collector

use crate::server::envelope::{ENCRYPTION_HEADER, SIGNATURE_HEADER};
use crate::utils::auth::ENCRYPTION_SCHEME;
use crate::utils::error::{MetricsError, Result};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::debug;

/// A ready-to-send batch body
#[derive(Debug, Clone)]
pub struct Report {
    /// JSON batch, sealed when `sealed` is set
    pub body: Bytes,
    /// Hex HMAC-SHA256 over the plaintext batch
    pub signature: Option<String>,
    /// Whether `body` is a sealed envelope
    pub sealed: bool,
}

/// Delivers a report to the collector
///
/// Errors must say whether a retry can help (see [`MetricsError::is_retryable`]).
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, report: &Report) -> Result<()>;
}

/// HTTP transport posting to the collector's batch endpoint
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    url: String,
}

impl HttpTransport {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, report: &Report) -> Result<()> {
        let mut request = self
            .client
            .post(&self.url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(report.body.clone());

        if let Some(signature) = &report.signature {
            request = request.header(SIGNATURE_HEADER, signature);
        }
        if report.sealed {
            request = request.header(ENCRYPTION_HEADER, ENCRYPTION_SCHEME);
        }

        let response = request
            .send()
            .await
            .map_err(|e| MetricsError::transient(format!("request to {} failed: {}", self.url, e)))?;

        let status = response.status();
        debug!(status = status.as_u16(), "Collector responded");

        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        let message = format!("collector returned {}: {}", status, body.trim());
        if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
            Err(MetricsError::transient(message))
        } else {
            Err(MetricsError::rejected(message))
        }
    }
}
