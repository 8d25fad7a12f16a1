//! In-memory backend
//!
//! One mutex guards both maps; every read and write takes it.

use super::MetricsStore;
use crate::core::models::{MetricValue, Metrics, MetricsSnapshot};
use crate::utils::error::{MetricsError, Result};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Default)]
struct Maps {
    counters: HashMap<String, i64>,
    gauges: HashMap<String, f64>,
}

/// Mutex-guarded map storage
#[derive(Debug, Default)]
pub struct MemoryStore {
    maps: Mutex<Maps>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn add_delta(name: &str, current: i64, delta: i64) -> Result<i64> {
    current.checked_add(delta).ok_or_else(|| {
        MetricsError::invalid_metric(format!("counter '{}' would overflow", name))
    })
}

#[async_trait]
impl MetricsStore for MemoryStore {
    async fn update_counter(&self, name: &str, delta: i64) -> Result<i64> {
        let mut maps = self.maps.lock();
        let current = maps.counters.get(name).copied().unwrap_or(0);
        let total = add_delta(name, current, delta)?;
        maps.counters.insert(name.to_string(), total);
        Ok(total)
    }

    async fn update_gauge(&self, name: &str, value: f64) -> Result<f64> {
        self.maps.lock().gauges.insert(name.to_string(), value);
        Ok(value)
    }

    async fn get_counter(&self, name: &str) -> Result<i64> {
        self.maps
            .lock()
            .counters
            .get(name)
            .copied()
            .ok_or_else(|| MetricsError::not_found(format!("counter '{}'", name)))
    }

    async fn get_gauge(&self, name: &str) -> Result<f64> {
        self.maps
            .lock()
            .gauges
            .get(name)
            .copied()
            .ok_or_else(|| MetricsError::not_found(format!("gauge '{}'", name)))
    }

    async fn get_all_metrics(&self) -> Result<MetricsSnapshot> {
        let maps = self.maps.lock();
        Ok(MetricsSnapshot {
            counters: maps
                .counters
                .iter()
                .map(|(name, delta)| (name.clone(), *delta))
                .collect(),
            gauges: maps
                .gauges
                .iter()
                .map(|(name, value)| (name.clone(), *value))
                .collect(),
        })
    }

    async fn update_batch(&self, batch: &[Metrics]) -> Result<()> {
        let mut maps = self.maps.lock();

        // Writes are staged and only committed once every item has passed.
        let mut counters: HashMap<String, i64> = HashMap::new();
        let mut gauges: HashMap<String, f64> = HashMap::new();

        for item in batch {
            let metric = item.to_metric()?;
            match metric.value {
                MetricValue::Counter(delta) => {
                    let current = counters
                        .get(&metric.name)
                        .or_else(|| maps.counters.get(&metric.name))
                        .copied()
                        .unwrap_or(0);
                    let total = add_delta(&metric.name, current, delta)?;
                    counters.insert(metric.name, total);
                }
                MetricValue::Gauge(value) => {
                    gauges.insert(metric.name, value);
                }
            }
        }

        debug!(
            counters = counters.len(),
            gauges = gauges.len(),
            "Committing batch"
        );
        maps.counters.extend(counters);
        maps.gauges.extend(gauges);
        Ok(())
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        debug!("Memory store closed");
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
