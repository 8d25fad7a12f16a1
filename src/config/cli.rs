//! Command line arguments for both binaries
//!
//! Every flag can also be supplied through the environment variable named
//! next to it. Unset flags fall back to the YAML file, then to defaults.

use super::models::{AgentConfig, ServerConfig};
use super::{from_file, validate};
use crate::utils::error::Result;
use clap::Parser;
use std::path::PathBuf;

/// Metrics collector server
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "metrics-server", version, about)]
pub struct ServerArgs {
    /// Listen address (host:port)
    #[arg(short = 'a', long, env = "ADDRESS")]
    pub address: Option<String>,

    /// HMAC key for request verification
    #[arg(short = 'k', long, env = "KEY", hide_env_values = true)]
    pub key: Option<String>,

    /// Database connection string; metrics stay in memory when unset
    #[arg(short = 'd', long = "database-dsn", env = "DATABASE_DSN", hide_env_values = true)]
    pub database_dsn: Option<String>,

    /// Path to the PEM private key for sealed request bodies
    #[arg(long = "crypto-key", env = "CRYPTO_KEY")]
    pub crypto_key: Option<PathBuf>,

    /// Path to a YAML configuration file
    #[arg(short = 'c', long, env = "CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level or filter directive
    #[arg(long = "log-level", env = "LOG_LEVEL")]
    pub log_level: Option<String>,
}

impl ServerArgs {
    /// Override `config` with every flag that was given
    pub fn apply_overrides(&self, config: &mut ServerConfig) {
        if let Some(address) = &self.address {
            config.address = address.clone();
        }
        if let Some(key) = &self.key {
            config.key = Some(key.clone());
        }
        if let Some(dsn) = &self.database_dsn {
            config.storage.database.url = dsn.clone();
        }
        if let Some(path) = &self.crypto_key {
            config.crypto_key = Some(path.clone());
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
    }

    /// Resolve the final, validated server configuration
    pub async fn load(&self) -> Result<ServerConfig> {
        let mut config = match &self.config {
            Some(path) => from_file(path).await?,
            None => ServerConfig::default(),
        };
        self.apply_overrides(&mut config);
        validate("Server", &config)?;
        Ok(config)
    }
}

/// Metrics reporting agent
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "metrics-agent", version, about)]
pub struct AgentArgs {
    /// Collector address (host:port)
    #[arg(short = 'a', long, env = "ADDRESS")]
    pub address: Option<String>,

    /// Seconds between reports
    #[arg(short = 'r', long = "report-interval", env = "REPORT_INTERVAL")]
    pub report_interval: Option<u64>,

    /// Seconds between samples
    #[arg(short = 'p', long = "poll-interval", env = "POLL_INTERVAL")]
    pub poll_interval: Option<u64>,

    /// HMAC key for payload signing
    #[arg(short = 'k', long, env = "KEY", hide_env_values = true)]
    pub key: Option<String>,

    /// Maximum concurrent outbound reports
    #[arg(short = 'l', long = "rate-limit", env = "RATE_LIMIT")]
    pub rate_limit: Option<usize>,

    /// Path to the collector's PEM public key
    #[arg(long = "crypto-key", env = "CRYPTO_KEY")]
    pub crypto_key: Option<PathBuf>,

    /// Path to a YAML configuration file
    #[arg(short = 'c', long, env = "CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level or filter directive
    #[arg(long = "log-level", env = "LOG_LEVEL")]
    pub log_level: Option<String>,
}

impl AgentArgs {
    /// Override `config` with every flag that was given
    pub fn apply_overrides(&self, config: &mut AgentConfig) {
        if let Some(address) = &self.address {
            config.address = address.clone();
        }
        if let Some(interval) = self.report_interval {
            config.report_interval = interval;
        }
        if let Some(interval) = self.poll_interval {
            config.poll_interval = interval;
        }
        if let Some(key) = &self.key {
            config.key = Some(key.clone());
        }
        if let Some(limit) = self.rate_limit {
            config.rate_limit = limit;
        }
        if let Some(path) = &self.crypto_key {
            config.crypto_key = Some(path.clone());
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
    }

    /// Resolve the final, validated agent configuration
    pub async fn load(&self) -> Result<AgentConfig> {
        let mut config = match &self.config {
            Some(path) => from_file(path).await?,
            None => AgentConfig::default(),
        };
        self.apply_overrides(&mut config);
        validate("Agent", &config)?;
        Ok(config)
    }
}
