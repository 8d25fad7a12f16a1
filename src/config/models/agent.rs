//! Agent configuration

use super::*;
use crate::utils::error::{Backoff, RetryConfig};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Retry settings for report transmission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRetryConfig {
    /// Total attempts per report, including the first
    #[serde(default = "default_retry_attempts")]
    pub max_attempts: u32,
    /// Delay before the first retry in milliseconds
    #[serde(default = "default_retry_base_delay_ms")]
    pub base_delay_ms: u64,
    /// Upper bound for a single delay in milliseconds
    #[serde(default = "default_retry_max_delay_ms")]
    pub max_delay_ms: u64,
    /// Growth factor between delays
    #[serde(default = "default_retry_multiplier")]
    pub multiplier: f64,
}

fn default_retry_attempts() -> u32 {
    3
}

fn default_retry_base_delay_ms() -> u64 {
    1000
}

fn default_retry_max_delay_ms() -> u64 {
    5000
}

fn default_retry_multiplier() -> f64 {
    3.0
}

impl Default for ReportRetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_retry_attempts(),
            base_delay_ms: default_retry_base_delay_ms(),
            max_delay_ms: default_retry_max_delay_ms(),
            multiplier: default_retry_multiplier(),
        }
    }
}

impl From<&ReportRetryConfig> for RetryConfig {
    fn from(config: &ReportRetryConfig) -> Self {
        RetryConfig {
            max_attempts: config.max_attempts,
            backoff: Backoff::Exponential {
                base_delay: Duration::from_millis(config.base_delay_ms),
                max_delay: Duration::from_millis(config.max_delay_ms),
                multiplier: config.multiplier,
            },
            jitter: false,
        }
    }
}

/// Agent configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Collector address (host:port)
    #[serde(default = "default_address")]
    pub address: String,
    /// Seconds between reports
    #[serde(default = "default_report_interval")]
    pub report_interval: u64,
    /// Seconds between samples
    #[serde(default = "default_poll_interval")]
    pub poll_interval: u64,
    /// HMAC key for payload signing
    #[serde(default)]
    pub key: Option<String>,
    /// Maximum concurrent outbound reports
    #[serde(default = "default_rate_limit")]
    pub rate_limit: usize,
    /// Path to the collector's PEM public key
    #[serde(default)]
    pub crypto_key: Option<PathBuf>,
    /// HTTP request timeout in seconds
    #[serde(default = "default_timeout")]
    pub request_timeout: u64,
    /// Transmission retry settings
    #[serde(default)]
    pub retry: ReportRetryConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            report_interval: default_report_interval(),
            poll_interval: default_poll_interval(),
            key: None,
            rate_limit: default_rate_limit(),
            crypto_key: None,
            request_timeout: default_timeout(),
            retry: ReportRetryConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl AgentConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval)
    }

    pub fn report_interval(&self) -> Duration {
        Duration::from_secs(self.report_interval)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    /// Batch ingestion URL on the collector
    pub fn updates_url(&self) -> String {
        if self.address.starts_with("http://") || self.address.starts_with("https://") {
            format!("{}/updates/", self.address.trim_end_matches('/'))
        } else {
            format!("http://{}/updates/", self.address)
        }
    }
}
