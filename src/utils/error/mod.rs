//! Error Handling utilities
//!
//! This module provides the crate error type and the recovery patterns
//! (retry, timeout, bulkhead) used by the agent and the server.

pub mod error;
pub mod recovery;

// Re-export commonly used types and functions
pub use error::*;
pub use recovery::*;
