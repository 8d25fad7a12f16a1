//! Utility modules for the metrics pipeline
//!
//! ## Module Organization
//!
//! - **auth**: Payload signing and envelope encryption
//! - **error**: Error handling and recovery (retry, timeout, bulkhead)
//! - **logging**: Tracing subscriber setup

pub mod auth; // Signing & encryption
pub mod error; // Error handling
pub mod logging; // Logging
