//! Storage configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Database configuration
///
/// An empty `url` selects the in-memory backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database URL (`postgres://...` or `sqlite:...`)
    #[serde(default)]
    pub url: String,
    /// Maximum connections
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Connection timeout in seconds
    #[serde(default = "default_connection_timeout")]
    pub connection_timeout: u64,
    /// Delays in seconds between startup connection attempts
    #[serde(default = "default_reconnect_backoff")]
    pub reconnect_backoff: Vec<u64>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            connection_timeout: default_connection_timeout(),
            reconnect_backoff: default_reconnect_backoff(),
        }
    }
}

impl DatabaseConfig {
    /// Config pointing at the given URL with default pool settings
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Whether the relational backend is selected
    pub fn enabled(&self) -> bool {
        !self.url.is_empty()
    }

    /// Whether the URL points at PostgreSQL
    pub fn is_postgres(&self) -> bool {
        self.url.starts_with("postgres://") || self.url.starts_with("postgresql://")
    }

    /// Whether the URL points at SQLite
    pub fn is_sqlite(&self) -> bool {
        self.url.starts_with("sqlite:")
    }

    /// Startup reconnect schedule
    pub fn backoff_schedule(&self) -> Vec<Duration> {
        self.reconnect_backoff
            .iter()
            .map(|secs| Duration::from_secs(*secs))
            .collect()
    }
}
