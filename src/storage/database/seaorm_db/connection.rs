use crate::config::DatabaseConfig;
use crate::utils::error::{MetricsError, Result, RetryConfig, RetryPolicy};
use sea_orm::*;
use sea_orm_migration::{MigrationTrait, SchemaManager};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::super::migration::{CreateMetricTables, METRICS_SCHEMA};
use super::types::{DatabaseBackendType, SeaOrmDatabase};

/// Run `connect` until it succeeds, sleeping through `schedule` between attempts
///
/// One initial attempt plus one per scheduled delay. Once the schedule is
/// exhausted the last error is returned as a startup failure.
pub async fn connect_with_retry<F, Fut, T>(schedule: Vec<Duration>, mut connect: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let policy = RetryPolicy::new(RetryConfig::schedule(schedule));
    let max_attempts = policy.config().max_attempts;
    let mut attempt = 0u32;

    policy
        .call(|| {
            attempt += 1;
            let current = attempt;
            let pending = connect();
            async move {
                match pending.await {
                    Ok(connection) => {
                        info!(attempt = current, "Connected to database");
                        Ok(connection)
                    }
                    Err(e) => {
                        warn!(attempt = current, "Database not yet ready: {}", e);
                        Err(e)
                    }
                }
            }
        })
        .await
        .map_err(|e| {
            MetricsError::startup(format!(
                "giving up after {} attempts to connect to the database: {}",
                max_attempts, e
            ))
        })
}

impl SeaOrmDatabase {
    /// Connect with the configured reconnect schedule
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let backend_type = if config.is_sqlite() {
            DatabaseBackendType::SQLite
        } else {
            DatabaseBackendType::PostgreSQL
        };

        let db = connect_with_retry(config.backoff_schedule(), || Self::try_connect(config)).await?;

        info!("Database connection established ({:?})", backend_type);
        Ok(Self { db, backend_type })
    }

    /// Open the pool and ping it once
    async fn try_connect(config: &DatabaseConfig) -> Result<DatabaseConnection> {
        let timeout = Duration::from_secs(config.connection_timeout);
        let mut opt = ConnectOptions::new(config.url.clone());
        opt.connect_timeout(timeout)
            .acquire_timeout(timeout)
            .min_connections(1)
            .sqlx_logging(true)
            .sqlx_logging_level(log::LevelFilter::Debug);

        if config.is_sqlite() {
            // SQLite serializes writers; one connection also keeps `:memory:` alive.
            opt.max_connections(1);
        } else {
            opt.max_connections(config.max_connections)
                .idle_timeout(Duration::from_secs(600))
                .max_lifetime(Duration::from_secs(3600))
                .set_schema_search_path(METRICS_SCHEMA);
        }

        let db = Database::connect(opt).await?;
        db.ping().await?;
        Ok(db)
    }

    /// Idempotently create the schema objects inside one transaction
    ///
    /// Any failure rolls the transaction back and is returned as a startup failure.
    pub async fn bootstrap(&self) -> Result<()> {
        info!("Bootstrapping metric tables");

        let txn = self.db.begin().await?;
        let outcome = {
            let manager = SchemaManager::new(&txn);
            CreateMetricTables.up(&manager).await
        };

        if let Err(e) = outcome {
            warn!("Bootstrap failed: {}", e);
            if let Err(rollback) = txn.rollback().await {
                warn!("Bootstrap rollback failed: {}", rollback);
            }
            return Err(MetricsError::startup(format!("bootstrap failed: {}", e)));
        }

        txn.commit()
            .await
            .map_err(|e| MetricsError::startup(format!("bootstrap commit failed: {}", e)))?;

        debug!("Bootstrap completed");
        Ok(())
    }

    /// Get the current backend type
    pub fn backend_type(&self) -> DatabaseBackendType {
        self.backend_type
    }

    /// Get the underlying database connection
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Close the pool
    pub async fn close_pool(&self) -> Result<()> {
        self.db.clone().close().await?;
        info!("Database connection closed");
        Ok(())
    }

    /// Health check
    pub async fn ping(&self) -> Result<()> {
        debug!("Performing database health check");
        self.db.ping().await?;
        Ok(())
    }
}
