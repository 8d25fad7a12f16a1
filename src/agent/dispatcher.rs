//! Report dispatch: encode, sign, seal, and hand off to the worker pool

use super::buffer::MetricBuffer;
use super::transport::{Report, Transport};
use crate::config::AgentConfig;
use crate::core::models::{Metrics, encode_batch};
use crate::utils::auth::{SealedEnvelope, create_hmac_signature, load_public_key_pem};
use crate::utils::error::{Bulkhead, MetricsError, Result, RetryConfig, RetryPolicy};
use bytes::Bytes;
use rsa::RsaPublicKey;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Drains the buffer and ships each batch through at most `rate_limit`
/// concurrent workers
#[derive(Clone)]
pub struct Dispatcher {
    buffer: Arc<MetricBuffer>,
    transport: Arc<dyn Transport>,
    key: Option<Arc<str>>,
    public_key: Option<Arc<RsaPublicKey>>,
    workers: Bulkhead,
    retry: RetryPolicy,
}

impl Dispatcher {
    pub fn new(buffer: Arc<MetricBuffer>, transport: Arc<dyn Transport>, rate_limit: usize) -> Self {
        Self {
            buffer,
            transport,
            key: None,
            public_key: None,
            workers: Bulkhead::new("report-workers", rate_limit),
            retry: RetryPolicy::new(RetryConfig::default()),
        }
    }

    /// Build from agent configuration, loading the public key if one is set
    pub fn from_config(
        config: &AgentConfig,
        buffer: Arc<MetricBuffer>,
        transport: Arc<dyn Transport>,
    ) -> Result<Self> {
        let mut dispatcher = Self::new(buffer, transport, config.rate_limit)
            .with_retry(RetryConfig::from(&config.retry));

        if let Some(key) = config.key.as_deref().filter(|k| !k.is_empty()) {
            dispatcher = dispatcher.with_key(key);
        }
        if let Some(path) = &config.crypto_key {
            dispatcher = dispatcher.with_public_key(load_public_key_pem(path)?);
        }
        Ok(dispatcher)
    }

    pub fn with_key(mut self, key: impl Into<Arc<str>>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn with_public_key(mut self, public_key: RsaPublicKey) -> Self {
        self.public_key = Some(Arc::new(public_key));
        self
    }

    pub fn with_retry(mut self, config: RetryConfig) -> Self {
        self.retry = RetryPolicy::new(config);
        self
    }

    /// Encode a batch; the signature always covers the plaintext
    pub fn prepare(&self, batch: &[Metrics]) -> Result<Report> {
        let plaintext = encode_batch(batch)?;

        let signature = self
            .key
            .as_deref()
            .map(|key| create_hmac_signature(key, &plaintext))
            .transpose()?;

        let (body, sealed) = match &self.public_key {
            Some(public_key) => (SealedEnvelope::seal_to_bytes(public_key, &plaintext)?, true),
            None => (plaintext, false),
        };

        Ok(Report {
            body: Bytes::from(body),
            signature,
            sealed,
        })
    }

    /// Drain the buffer and submit one report
    ///
    /// Returns once the report has been handed to a worker; waits for a free
    /// worker when all of them are busy. An empty buffer sends nothing.
    pub async fn report(&self) -> Result<()> {
        let batch: Vec<Metrics> = self.buffer.drain().iter().map(Metrics::from).collect();
        if batch.is_empty() {
            debug!("Nothing to report");
            return Ok(());
        }

        let report = self.prepare(&batch)?;
        let size = batch.len();
        let transport = self.transport.clone();
        let retry = self.retry.clone();

        self.workers
            .spawn(async move {
                let result = retry
                    .call_if(|| transport.send(&report), MetricsError::is_retryable)
                    .await;
                match result {
                    Ok(()) => info!(metrics = size, "Report delivered"),
                    Err(e) => error!(metrics = size, "Dropping report: {}", e),
                }
            })
            .await?;

        Ok(())
    }

    /// Wait for every in-flight report to finish
    pub async fn wait_idle(&self) -> Result<()> {
        self.workers.wait_idle().await
    }

    pub fn buffer(&self) -> &Arc<MetricBuffer> {
        &self.buffer
    }
}
