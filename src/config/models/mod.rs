//! Configuration data models
//!
//! This module defines all configuration structures used by the agent and the server.

pub mod agent;
pub mod logging;
pub mod server;
pub mod storage;

// Re-export all configuration types
pub use agent::*;
pub use logging::*;
pub use server::*;
pub use storage::*;

/// Default collector address (host:port)
pub fn default_address() -> String {
    "localhost:8080".to_string()
}

/// Default report interval in seconds
pub fn default_report_interval() -> u64 {
    10
}

/// Default poll interval in seconds
pub fn default_poll_interval() -> u64 {
    2
}

/// Default number of concurrent outbound reports
pub fn default_rate_limit() -> usize {
    1
}

/// Default request timeout in seconds
pub fn default_timeout() -> u64 {
    10
}

/// Default database pool size
pub fn default_max_connections() -> u32 {
    10
}

/// Default database connection timeout in seconds
pub fn default_connection_timeout() -> u64 {
    5
}

/// Default startup reconnect schedule in seconds
pub fn default_reconnect_backoff() -> Vec<u64> {
    vec![1, 3, 5]
}

/// Default log level directive
pub fn default_log_level() -> String {
    "info".to_string()
}
