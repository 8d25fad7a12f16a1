// Module declarations
mod batch_ops;
mod connection;
mod metric_ops;
mod types;

// Re-export public types
pub use connection::connect_with_retry;
pub use types::{DatabaseBackendType, SeaOrmDatabase};

use crate::core::models::{Metrics, MetricsSnapshot};
use crate::storage::MetricsStore;
use crate::utils::error::Result;
use async_trait::async_trait;

#[async_trait]
impl MetricsStore for SeaOrmDatabase {
    async fn update_counter(&self, name: &str, delta: i64) -> Result<i64> {
        self.increment_counter(name, delta).await
    }

    async fn update_gauge(&self, name: &str, value: f64) -> Result<f64> {
        self.set_gauge(name, value).await
    }

    async fn get_counter(&self, name: &str) -> Result<i64> {
        self.find_counter(name).await
    }

    async fn get_gauge(&self, name: &str) -> Result<f64> {
        self.find_gauge(name).await
    }

    async fn get_all_metrics(&self) -> Result<MetricsSnapshot> {
        self.snapshot().await
    }

    async fn update_batch(&self, batch: &[Metrics]) -> Result<()> {
        self.apply_batch(batch).await
    }

    async fn health_check(&self) -> Result<()> {
        self.ping().await
    }

    async fn close(&self) -> Result<()> {
        self.close_pool().await
    }

    fn backend_name(&self) -> &'static str {
        self.backend_type.as_str()
    }
}
