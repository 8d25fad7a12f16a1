//! Shared batch buffer between the poll and report loops

use crate::core::models::{Metric, MetricKind, MetricValue};
use parking_lot::Mutex;
use std::collections::BTreeMap;

/// Pending metrics keyed by `(kind, name)`
///
/// Counters accumulate across polls; gauges keep the latest sample. Its
/// size is bounded by the number of distinct metric names.
#[derive(Debug, Default)]
pub struct MetricBuffer {
    entries: Mutex<BTreeMap<(MetricKind, String), MetricValue>>,
}

impl MetricBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one sample into the pending batch
    pub fn record(&self, metric: Metric) {
        let mut entries = self.entries.lock();
        let key = (metric.kind(), metric.name);
        let value = match (entries.get(&key), metric.value) {
            (Some(MetricValue::Counter(total)), MetricValue::Counter(delta)) => {
                MetricValue::Counter(total.saturating_add(delta))
            }
            (_, value) => value,
        };
        entries.insert(key, value);
    }

    /// Swap the pending batch out, leaving the buffer empty
    ///
    /// Counters come first, each kind ordered by name.
    pub fn drain(&self) -> Vec<Metric> {
        let entries = std::mem::take(&mut *self.entries.lock());
        entries
            .into_iter()
            .map(|((_, name), value)| Metric { name, value })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}
