//! Application state shared across HTTP handlers

use crate::config::ServerConfig;
use crate::storage::MetricsStore;
use crate::utils::auth::load_private_key_pem;
use crate::utils::error::{Result, TimeoutWrapper};
use rsa::RsaPrivateKey;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// HTTP server state shared across handlers
///
/// Holds the explicitly owned storage handle; cloning shares it.
#[derive(Clone)]
pub struct AppState {
    /// Storage backend
    pub storage: Arc<dyn MetricsStore>,
    /// HMAC key for request verification and response signing
    pub key: Option<Arc<str>>,
    /// Private key for sealed request bodies
    pub private_key: Option<Arc<RsaPrivateKey>>,
    /// Deadline applied to every storage call
    timeout: TimeoutWrapper,
}

impl AppState {
    /// State with no key material and the default storage deadline
    pub fn new(storage: Arc<dyn MetricsStore>) -> Self {
        Self {
            storage,
            key: None,
            private_key: None,
            timeout: TimeoutWrapper::new(Duration::from_secs(crate::config::default_timeout())),
        }
    }

    /// Build state from configuration, loading the private key if one is configured
    pub fn from_config(config: &ServerConfig, storage: Arc<dyn MetricsStore>) -> Result<Self> {
        let mut state = Self::new(storage).with_timeout(config.request_timeout());

        if let Some(key) = &config.key {
            info!("Request signature verification enabled");
            state = state.with_key(key.clone());
        }

        if let Some(path) = &config.crypto_key {
            info!("Loading private key from {:?}", path);
            state = state.with_private_key(load_private_key_pem(path)?);
        }

        Ok(state)
    }

    pub fn with_key(mut self, key: impl Into<Arc<str>>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn with_private_key(mut self, private_key: RsaPrivateKey) -> Self {
        self.private_key = Some(Arc::new(private_key));
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = TimeoutWrapper::new(timeout);
        self
    }

    /// Run a storage operation under the request deadline
    ///
    /// An expired operation is dropped, which cancels it.
    pub async fn run<T, F>(&self, op: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        self.timeout.call(op).await?
    }
}
