use crate::core::models::{MetricValue, Metrics};
use crate::utils::error::Result;
use sea_orm::*;
use tracing::{debug, warn};

use super::metric_ops::{upsert_counter, upsert_gauge};
use super::types::SeaOrmDatabase;

impl SeaOrmDatabase {
    /// Apply a batch in one transaction
    ///
    /// The first invalid item or failed upsert rolls back everything applied so far.
    pub async fn apply_batch(&self, batch: &[Metrics]) -> Result<()> {
        debug!("Applying batch of {} metrics", batch.len());

        let txn = self.db.begin().await?;

        if let Err(e) = apply_items(&txn, batch).await {
            warn!("Batch rejected, rolling back: {}", e);
            if let Err(rollback) = txn.rollback().await {
                warn!("Batch rollback failed: {}", rollback);
            }
            return Err(e);
        }

        txn.commit().await?;
        debug!("Batch committed");
        Ok(())
    }
}

async fn apply_items(txn: &DatabaseTransaction, batch: &[Metrics]) -> Result<()> {
    for (index, item) in batch.iter().enumerate() {
        let metric = item.to_metric().inspect_err(|e| {
            debug!(index, "Invalid batch item: {}", e);
        })?;

        match metric.value {
            MetricValue::Counter(delta) => {
                upsert_counter(txn, &metric.name, delta).await?;
            }
            MetricValue::Gauge(value) => {
                upsert_gauge(txn, &metric.name, value).await?;
            }
        }
    }
    Ok(())
}
