//! Error recovery and resilience utilities
//!
//! This module provides retry with backoff, timeouts and bulkheads.

mod resilience;
mod retry;
mod types;

pub use resilience::{Bulkhead, TimeoutWrapper};
pub use retry::RetryPolicy;
pub use types::{Backoff, RetryConfig};
