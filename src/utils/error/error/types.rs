//! Error types for the metrics pipeline

use thiserror::Error;

/// Result type alias for the metrics pipeline
pub type Result<T> = std::result::Result<T, MetricsError>;

/// Main error type for the metrics pipeline
#[derive(Error, Debug)]
pub enum MetricsError {
    /// Unknown metric name on point lookup
    #[error("Not found: {0}")]
    NotFound(String),

    /// Malformed wire representation: bad kind, missing field, non-numeric value
    #[error("Invalid metric: {0}")]
    InvalidMetric(String),

    /// Storage backend could not be reached or refused the operation
    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),

    /// Database errors
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Transport-level send failure
    #[error("Transmission failed: {message}")]
    TransmissionFailed {
        message: String,
        /// Whether another attempt may succeed
        retryable: bool,
    },

    /// Payload signature did not match the recomputed one
    #[error("Integrity mismatch: {0}")]
    IntegrityMismatch(String),

    /// Bootstrap or connect-with-retry exhausted
    #[error("Startup failed: {0}")]
    Startup(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Crypto errors
    #[error("Crypto error: {0}")]
    Crypto(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP client errors
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Timeout errors
    #[error("Timeout error: {0}")]
    Timeout(String),

    /// Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}
