use crate::core::models::MetricsSnapshot;
use crate::utils::error::{MetricsError, Result};
use sea_orm::sea_query::{Alias, Expr, OnConflict, Query};
use sea_orm::*;
use tracing::debug;

use super::super::entities::{self, counter, gauge};
use super::types::SeaOrmDatabase;

/// `INSERT ... ON CONFLICT (name) DO UPDATE SET delta = counters.delta + excluded.delta
/// WHERE <sum stays in i64> RETURNING delta`
///
/// An update that would overflow leaves the row untouched and fails with
/// `InvalidMetric`.
pub(super) async fn upsert_counter<C>(conn: &C, name: &str, delta: i64) -> Result<i64>
where
    C: ConnectionTrait,
{
    let current = || Expr::col((entities::Counter, counter::Column::Delta));
    let incoming = || Expr::col((Alias::new("excluded"), counter::Column::Delta));
    // bounds are shifted by the incoming delta so the check itself cannot overflow
    let in_range = Expr::case(
        incoming().gte(0),
        current().lte(Expr::val(i64::MAX).sub(incoming())),
    )
    .finally(current().gte(Expr::val(i64::MIN).sub(incoming())));

    let mut insert = Query::insert();
    insert
        .into_table(entities::Counter)
        .columns([counter::Column::Name, counter::Column::Delta])
        .values([name.into(), delta.into()])
        .map_err(|e| MetricsError::internal(format!("Failed to build counter upsert: {}", e)))?;
    insert
        .on_conflict(
            OnConflict::column(counter::Column::Name)
                .value(counter::Column::Delta, current().add(incoming()))
                .action_and_where(in_range.into())
                .to_owned(),
        )
        .returning_col(counter::Column::Delta);

    let statement = conn.get_database_backend().build(&insert);
    let row = conn
        .query_one(statement)
        .await?
        .ok_or_else(|| {
            MetricsError::invalid_metric(format!("counter '{}' would overflow", name))
        })?;

    Ok(row.try_get::<i64>("", "delta")?)
}

/// `INSERT ... ON CONFLICT (name) DO UPDATE SET value = excluded.value RETURNING value`
pub(super) async fn upsert_gauge<C>(conn: &C, name: &str, value: f64) -> Result<f64>
where
    C: ConnectionTrait,
{
    let mut insert = Query::insert();
    insert
        .into_table(entities::Gauge)
        .columns([gauge::Column::Name, gauge::Column::Value])
        .values([name.into(), value.into()])
        .map_err(|e| MetricsError::internal(format!("Failed to build gauge upsert: {}", e)))?;
    insert
        .on_conflict(
            OnConflict::column(gauge::Column::Name)
                .update_column(gauge::Column::Value)
                .to_owned(),
        )
        .returning_col(gauge::Column::Value);

    let statement = conn.get_database_backend().build(&insert);
    let row = conn
        .query_one(statement)
        .await?
        .ok_or_else(|| MetricsError::internal("Gauge upsert returned no row"))?;

    Ok(row.try_get::<f64>("", "value")?)
}

impl SeaOrmDatabase {
    /// Add to a counter, returning the committed total
    pub async fn increment_counter(&self, name: &str, delta: i64) -> Result<i64> {
        debug!(name, delta, "Upserting counter");
        upsert_counter(&self.db, name, delta).await
    }

    /// Overwrite a gauge, returning the committed value
    pub async fn set_gauge(&self, name: &str, value: f64) -> Result<f64> {
        debug!(name, value, "Upserting gauge");
        upsert_gauge(&self.db, name, value).await
    }

    /// Look up a counter total
    pub async fn find_counter(&self, name: &str) -> Result<i64> {
        entities::Counter::find()
            .select_only()
            .column(counter::Column::Delta)
            .filter(counter::Column::Name.eq(name))
            .into_tuple::<i64>()
            .one(&self.db)
            .await?
            .ok_or_else(|| MetricsError::not_found(format!("counter '{}'", name)))
    }

    /// Look up a gauge value
    pub async fn find_gauge(&self, name: &str) -> Result<f64> {
        entities::Gauge::find()
            .select_only()
            .column(gauge::Column::Value)
            .filter(gauge::Column::Name.eq(name))
            .into_tuple::<f64>()
            .one(&self.db)
            .await?
            .ok_or_else(|| MetricsError::not_found(format!("gauge '{}'", name)))
    }

    /// Read every counter and gauge
    pub async fn snapshot(&self) -> Result<MetricsSnapshot> {
        let counters = entities::Counter::find()
            .select_only()
            .columns([counter::Column::Name, counter::Column::Delta])
            .into_tuple::<(String, i64)>()
            .all(&self.db)
            .await?;

        let gauges = entities::Gauge::find()
            .select_only()
            .columns([gauge::Column::Name, gauge::Column::Value])
            .into_tuple::<(String, f64)>()
            .all(&self.db)
            .await?;

        Ok(MetricsSnapshot {
            counters: counters.into_iter().collect(),
            gauges: gauges.into_iter().collect(),
        })
    }
}
