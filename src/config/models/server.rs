//! Server configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Storage configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Relational backend settings; an empty URL keeps metrics in memory
    #[serde(default)]
    pub database: DatabaseConfig,
}

/// Collector server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address (host:port)
    #[serde(default = "default_address")]
    pub address: String,
    /// HMAC key for request verification and response signing
    #[serde(default)]
    pub key: Option<String>,
    /// Path to the PEM private key used to open sealed request bodies
    #[serde(default)]
    pub crypto_key: Option<PathBuf>,
    /// Storage call timeout in seconds
    #[serde(default = "default_timeout")]
    pub request_timeout: u64,
    /// Storage configuration
    #[serde(default)]
    pub storage: StorageConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            key: None,
            crypto_key: None,
            request_timeout: default_timeout(),
            storage: StorageConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Deadline applied to each storage call
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}
