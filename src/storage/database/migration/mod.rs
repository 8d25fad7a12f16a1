//! Schema bootstrap
//!
//! Run inside a single transaction by
//! [`SeaOrmDatabase::bootstrap`](super::seaorm_db::SeaOrmDatabase::bootstrap).
//! Every statement is idempotent.

mod m20240301_000001_create_metric_tables;

pub use m20240301_000001_create_metric_tables::Migration as CreateMetricTables;

/// Schema holding the metric tables on PostgreSQL
pub const METRICS_SCHEMA: &str = "metrics";
