//! Helper functions for creating specific error types

use super::types::MetricsError;

/// Helper functions for creating specific errors
impl MetricsError {
    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound(message.into())
    }

    pub fn invalid_metric<S: Into<String>>(message: S) -> Self {
        Self::InvalidMetric(message.into())
    }

    pub fn backend_unavailable<S: Into<String>>(message: S) -> Self {
        Self::BackendUnavailable(message.into())
    }

    pub fn integrity_mismatch<S: Into<String>>(message: S) -> Self {
        Self::IntegrityMismatch(message.into())
    }

    pub fn startup<S: Into<String>>(message: S) -> Self {
        Self::Startup(message.into())
    }

    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn crypto<S: Into<String>>(message: S) -> Self {
        Self::Crypto(message.into())
    }

    pub fn timeout<S: Into<String>>(message: S) -> Self {
        Self::Timeout(message.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    /// A send failure that is worth another attempt (connection refused, 5xx)
    pub fn transient<S: Into<String>>(message: S) -> Self {
        Self::TransmissionFailed {
            message: message.into(),
            retryable: true,
        }
    }

    /// A send failure that will fail the same way again (4xx)
    pub fn rejected<S: Into<String>>(message: S) -> Self {
        Self::TransmissionFailed {
            message: message.into(),
            retryable: false,
        }
    }

    /// Whether retrying the operation that produced this error may succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::TransmissionFailed { retryable, .. } => *retryable,
            Self::HttpClient(e) => e.is_connect() || e.is_timeout() || e.is_request(),
            Self::BackendUnavailable(_) | Self::Timeout(_) | Self::Io(_) => true,
            Self::Database(sea_orm::DbErr::Conn(_))
            | Self::Database(sea_orm::DbErr::ConnectionAcquire(_)) => true,
            _ => false,
        }
    }
}
