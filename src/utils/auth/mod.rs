//! Security utilities
//!
//! This module provides the signing and encryption primitives of the report envelope.

pub mod crypto;

// Re-export commonly used types and functions
pub use crypto::*;
