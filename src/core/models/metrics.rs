//! Metric model and wire representation
//!
//! A metric is identified by `(name, kind)`. The same name may exist as a
//! counter and as a gauge at the same time.

use crate::utils::error::{MetricsError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Metric kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    /// Accumulating signed 64-bit integer
    Counter,
    /// Last-write-wins 64-bit float
    Gauge,
}

impl MetricKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKind::Counter => "counter",
            MetricKind::Gauge => "gauge",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricKind {
    type Err = MetricsError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "counter" => Ok(MetricKind::Counter),
            "gauge" => Ok(MetricKind::Gauge),
            other => Err(MetricsError::invalid_metric(format!(
                "unknown metric type '{}'",
                other
            ))),
        }
    }
}

/// Typed metric value
///
/// For updates a counter value is a delta; everywhere else it is the total.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    Counter(i64),
    Gauge(f64),
}

impl MetricValue {
    pub fn kind(&self) -> MetricKind {
        match self {
            MetricValue::Counter(_) => MetricKind::Counter,
            MetricValue::Gauge(_) => MetricKind::Gauge,
        }
    }

    /// Parse a textual value; the kind decides how, never the text
    pub fn parse(kind: MetricKind, raw: &str) -> Result<Self> {
        match kind {
            MetricKind::Counter => raw
                .parse::<i64>()
                .map(MetricValue::Counter)
                .map_err(|_| {
                    MetricsError::invalid_metric(format!("'{}' is not a counter value", raw))
                }),
            MetricKind::Gauge => {
                let value = raw.parse::<f64>().map_err(|_| {
                    MetricsError::invalid_metric(format!("'{}' is not a gauge value", raw))
                })?;
                if !value.is_finite() {
                    return Err(MetricsError::invalid_metric(format!(
                        "'{}' is not a finite gauge value",
                        raw
                    )));
                }
                Ok(MetricValue::Gauge(value))
            }
        }
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Counter(delta) => write!(f, "{}", delta),
            MetricValue::Gauge(value) => write!(f, "{}", value),
        }
    }
}

/// A named, typed metric value
#[derive(Debug, Clone, PartialEq)]
pub struct Metric {
    pub name: String,
    pub value: MetricValue,
}

impl Metric {
    pub fn counter(name: impl Into<String>, delta: i64) -> Self {
        Self {
            name: name.into(),
            value: MetricValue::Counter(delta),
        }
    }

    pub fn gauge(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value: MetricValue::Gauge(value),
        }
    }

    pub fn kind(&self) -> MetricKind {
        self.value.kind()
    }
}

/// Wire representation: `{"id", "type", "delta"?, "value"?}`
///
/// `delta` is present iff `type == "counter"`, `value` iff `type == "gauge"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub id: String,
    #[serde(rename = "type")]
    pub mtype: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delta: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

impl Metrics {
    /// Decode into a typed metric, enforcing the field rules
    pub fn to_metric(&self) -> Result<Metric> {
        if self.id.is_empty() {
            return Err(MetricsError::invalid_metric("metric id is empty"));
        }

        let value = match (self.mtype.parse::<MetricKind>()?, self.delta, self.value) {
            (MetricKind::Counter, Some(delta), None) => MetricValue::Counter(delta),
            (MetricKind::Gauge, None, Some(value)) if value.is_finite() => {
                MetricValue::Gauge(value)
            }
            (MetricKind::Gauge, None, Some(_)) => {
                return Err(MetricsError::invalid_metric(format!(
                    "gauge '{}' carries a non-finite value",
                    self.id
                )));
            }
            (kind, _, _) => {
                return Err(MetricsError::invalid_metric(format!(
                    "{} '{}' must carry exactly the {} field",
                    kind,
                    self.id,
                    match kind {
                        MetricKind::Counter => "delta",
                        MetricKind::Gauge => "value",
                    }
                )));
            }
        };

        Ok(Metric {
            name: self.id.clone(),
            value,
        })
    }
}

impl From<&Metric> for Metrics {
    fn from(metric: &Metric) -> Self {
        let (delta, value) = match metric.value {
            MetricValue::Counter(delta) => (Some(delta), None),
            MetricValue::Gauge(value) => (None, Some(value)),
        };
        Self {
            id: metric.name.clone(),
            mtype: metric.kind().as_str().to_string(),
            delta,
            value,
        }
    }
}

impl From<Metric> for Metrics {
    fn from(metric: Metric) -> Self {
        Self::from(&metric)
    }
}

impl TryFrom<Metrics> for Metric {
    type Error = MetricsError;

    fn try_from(metrics: Metrics) -> Result<Self> {
        metrics.to_metric()
    }
}

/// Lookup request: `{"id", "type"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricQuery {
    pub id: String,
    #[serde(rename = "type")]
    pub mtype: String,
}

/// Every known metric, one map per kind
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricsSnapshot {
    pub counters: BTreeMap<String, i64>,
    pub gauges: BTreeMap<String, f64>,
}

impl MetricsSnapshot {
    pub fn len(&self) -> usize {
        self.counters.len() + self.gauges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counters.is_empty() && self.gauges.is_empty()
    }

    /// Flatten into wire form, counters first, each kind ordered by name
    pub fn to_wire(&self) -> Vec<Metrics> {
        let counters = self
            .counters
            .iter()
            .map(|(name, delta)| Metrics::from(Metric::counter(name.clone(), *delta)));
        let gauges = self
            .gauges
            .iter()
            .map(|(name, value)| Metrics::from(Metric::gauge(name.clone(), *value)));
        counters.chain(gauges).collect()
    }
}

/// Encode a batch in list form
pub fn encode_batch(batch: &[Metrics]) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(batch)?)
}

/// Decode a list-form batch; per-item rules are checked when it is applied
pub fn decode_batch(body: &[u8]) -> Result<Vec<Metrics>> {
    serde_json::from_slice(body)
        .map_err(|e| MetricsError::invalid_metric(format!("malformed batch: {}", e)))
}
