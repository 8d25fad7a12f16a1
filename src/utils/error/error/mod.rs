//! Error handling for the metrics pipeline
//!
//! This module defines all error types used throughout the agent and server.

mod helpers;
mod response;
mod types;

pub use response::{ErrorDetail, ErrorResponse};
pub use types::{MetricsError, Result};
