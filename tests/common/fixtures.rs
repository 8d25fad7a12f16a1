//! Wire payload fixtures

use metrics_relay::core::models::{Metrics, encode_batch};
use metrics_relay::{Metric, MetricKind};

pub fn counter(id: &str, delta: i64) -> Metrics {
    Metrics::from(Metric::counter(id, delta))
}

pub fn gauge(id: &str, value: f64) -> Metrics {
    Metrics::from(Metric::gauge(id, value))
}

/// Wire item with a kind the server does not know
pub fn unknown_kind(id: &str) -> Metrics {
    Metrics {
        id: id.to_string(),
        mtype: "histogram".to_string(),
        delta: Some(1),
        value: None,
    }
}

/// Counter item missing its delta
pub fn counter_without_delta(id: &str) -> Metrics {
    Metrics {
        id: id.to_string(),
        mtype: MetricKind::Counter.to_string(),
        delta: None,
        value: None,
    }
}

pub fn batch_body(batch: &[Metrics]) -> Vec<u8> {
    encode_batch(batch).expect("batch encodes")
}
