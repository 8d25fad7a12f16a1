//! Storage layer for the collector
//!
//! Every backend satisfies [`MetricsStore`]: counters accumulate, gauges
//! overwrite, lookups of unknown names fail with `NotFound`, and a batch is
//! applied all-or-nothing.
//!
//! Operations are plain futures; callers bound them with a deadline by
//! wrapping them in [`TimeoutWrapper`](crate::utils::error::TimeoutWrapper).
//! Dropping an in-flight future cancels the query and rolls back any open
//! transaction.

/// Relational backend (PostgreSQL, SQLite)
pub mod database;
/// In-memory backend
pub mod memory;

pub use database::Database;
pub use memory::MemoryStore;

use crate::config::StorageConfig;
use crate::core::models::{Metric, MetricKind, MetricValue, Metrics, MetricsSnapshot};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

/// Backend-agnostic metric storage
#[async_trait]
pub trait MetricsStore: Send + Sync + std::fmt::Debug {
    /// Add `delta` to the counter, creating it at `delta`; returns the new total
    async fn update_counter(&self, name: &str, delta: i64) -> Result<i64>;

    /// Replace the gauge value, creating it if absent; returns the stored value
    async fn update_gauge(&self, name: &str, value: f64) -> Result<f64>;

    async fn get_counter(&self, name: &str) -> Result<i64>;

    async fn get_gauge(&self, name: &str) -> Result<f64>;

    /// Every known metric; each key is read atomically
    async fn get_all_metrics(&self) -> Result<MetricsSnapshot>;

    /// Apply every item in order, or none of them
    async fn update_batch(&self, batch: &[Metrics]) -> Result<()>;

    /// Check that the backend is reachable
    async fn health_check(&self) -> Result<()>;

    /// Release backend resources
    async fn close(&self) -> Result<()>;

    /// Short backend name for logs
    fn backend_name(&self) -> &'static str;

    /// Apply a single typed update, returning the stored value
    async fn apply(&self, metric: &Metric) -> Result<MetricValue> {
        match metric.value {
            MetricValue::Counter(delta) => self
                .update_counter(&metric.name, delta)
                .await
                .map(MetricValue::Counter),
            MetricValue::Gauge(value) => self
                .update_gauge(&metric.name, value)
                .await
                .map(MetricValue::Gauge),
        }
    }

    /// Point lookup by kind
    async fn get(&self, kind: MetricKind, name: &str) -> Result<MetricValue> {
        match kind {
            MetricKind::Counter => self.get_counter(name).await.map(MetricValue::Counter),
            MetricKind::Gauge => self.get_gauge(name).await.map(MetricValue::Gauge),
        }
    }
}

/// Open the configured backend
///
/// With a database URL this connects with retry and bootstraps the schema;
/// both failures are fatal. Otherwise metrics are kept in memory.
pub async fn connect_storage(config: &StorageConfig) -> Result<Arc<dyn MetricsStore>> {
    if config.database.enabled() {
        let database = Database::connect(&config.database).await?;
        database.bootstrap().await?;
        info!(backend = database.backend_name(), "Storage ready");
        Ok(Arc::new(database))
    } else {
        info!("No database configured, keeping metrics in memory");
        Ok(Arc::new(MemoryStore::new()))
    }
}
