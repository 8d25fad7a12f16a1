//! HTTP response handling for errors

use super::types::MetricsError;
use actix_web::{HttpResponse, ResponseError, http::StatusCode};

impl ResponseError for MetricsError {
    fn status_code(&self) -> StatusCode {
        match self {
            MetricsError::NotFound(_) => StatusCode::NOT_FOUND,
            MetricsError::InvalidMetric(_)
            | MetricsError::IntegrityMismatch(_)
            | MetricsError::Serialization(_) => StatusCode::BAD_REQUEST,
            MetricsError::BackendUnavailable(_) | MetricsError::Timeout(_) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let (error_code, message) = match self {
            MetricsError::NotFound(_) => ("NOT_FOUND", self.to_string()),
            MetricsError::InvalidMetric(_) => ("INVALID_METRIC", self.to_string()),
            MetricsError::Serialization(_) => {
                ("INVALID_METRIC", "Malformed metric payload".to_string())
            }
            MetricsError::IntegrityMismatch(_) => {
                ("INTEGRITY_MISMATCH", "Payload signature mismatch".to_string())
            }
            MetricsError::BackendUnavailable(_) => (
                "BACKEND_UNAVAILABLE",
                "Storage backend unavailable".to_string(),
            ),
            MetricsError::Timeout(_) => ("TIMEOUT", "Storage operation timed out".to_string()),
            MetricsError::Database(_) => {
                ("DATABASE_ERROR", "Database operation failed".to_string())
            }
            _ => ("INTERNAL_ERROR", "An internal error occurred".to_string()),
        };

        let error_response = ErrorResponse {
            error: ErrorDetail {
                code: error_code.to_string(),
                message,
                timestamp: chrono::Utc::now().timestamp(),
            },
        };

        HttpResponse::build(self.status_code()).json(error_response)
    }
}

/// Standard error response format
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail structure
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub timestamp: i64,
}
