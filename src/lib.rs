//! # metrics-relay
//!
//! A telemetry pipeline: an agent samples runtime metrics and reports them to
//! a collector server, which stores them in memory or in a relational database.
//!
//! ## Features
//!
//! - **Two metric kinds**: counters accumulate, gauges keep the last value
//! - **Pluggable storage**: in-memory maps or PostgreSQL/SQLite via SeaORM
//! - **Resilient startup**: bounded connect retries with a fixed backoff
//! - **Integrity**: optional HMAC-SHA256 signatures on requests and responses
//! - **Confidentiality**: optional RSA-OAEP sealed report bodies
//! - **Bounded reporting**: a capped worker pool with retry on transient failures
//!
//! ## Collector
//!
//! ```rust,no_run
//! use metrics_relay::{HttpServer, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ServerConfig::default();
//!     let server = HttpServer::new(&config).await?;
//!     server.start().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Agent
//!
//! ```rust,no_run
//! use metrics_relay::{Agent, AgentConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let agent = Agent::new(AgentConfig::default())?;
//!     agent.run().await?;
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod agent;
pub mod config;
pub mod core;
pub mod server;
pub mod storage;
pub mod utils;

// Re-export main types
pub use agent::Agent;
pub use config::{AgentConfig, ServerConfig};
pub use core::models::{Metric, MetricKind, MetricValue, Metrics};
pub use server::HttpServer;
pub use storage::MetricsStore;
pub use utils::error::{MetricsError, Result};

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
