//! Relational backend tests
//!
//! Uses an in-memory SQLite database through SeaORM.

#[cfg(test)]
mod tests {
    use crate::common::TestDatabase;
    use crate::common::database::test_db_config;
    use crate::common::fixtures::{counter, counter_without_delta};
    use metrics_relay::MetricsError;
    use metrics_relay::config::{DatabaseConfig, StorageConfig};
    use metrics_relay::storage::{Database, connect_storage};
    use sea_orm::{ConnectionTrait, DbBackend, Statement};

    async fn count_objects(db: &Database, kind: &str) -> i64 {
        let row = db
            .connection()
            .query_one(Statement::from_sql_and_values(
                DbBackend::Sqlite,
                "SELECT COUNT(*) AS n FROM sqlite_master WHERE type = ?",
                [kind.into()],
            ))
            .await
            .unwrap()
            .unwrap();
        row.try_get::<i64>("", "n").unwrap()
    }

    #[tokio::test]
    async fn test_bootstrap_creates_schema() {
        let test_db = TestDatabase::new().await;

        // counters, gauges
        assert_eq!(count_objects(test_db.db(), "table").await, 2);
        // metric_idx, gauge_idx
        assert!(count_objects(test_db.db(), "index").await >= 2);
        assert_eq!(count_objects(test_db.db(), "trigger").await, 2);
    }

    #[tokio::test]
    async fn test_bootstrap_is_idempotent() {
        let test_db = TestDatabase::new().await;
        test_db.db().increment_counter("hits", 4).await.unwrap();

        test_db.db().bootstrap().await.unwrap();
        test_db.db().bootstrap().await.unwrap();

        assert_eq!(count_objects(test_db.db(), "table").await, 2);
        assert_eq!(count_objects(test_db.db(), "trigger").await, 2);
        assert_eq!(test_db.db().find_counter("hits").await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_failed_batch_rolls_back() {
        let test_db = TestDatabase::new().await;

        let result = test_db
            .db()
            .apply_batch(&[counter("first", 1), counter_without_delta("second")])
            .await;
        assert!(matches!(result, Err(MetricsError::InvalidMetric(_))));

        assert!(matches!(
            test_db.db().find_counter("first").await,
            Err(MetricsError::NotFound(_))
        ));
        // the connection is usable after rollback
        assert_eq!(test_db.db().increment_counter("first", 1).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_health_check() {
        let test_db = TestDatabase::new().await;
        test_db.store().health_check().await.unwrap();
        assert_eq!(test_db.store().backend_name(), "sqlite");
    }

    #[tokio::test]
    async fn test_connect_storage_selects_backend() {
        let memory = connect_storage(&StorageConfig::default()).await.unwrap();
        assert_eq!(memory.backend_name(), "memory");

        let sqlite = connect_storage(&StorageConfig {
            database: test_db_config(),
        })
        .await
        .unwrap();
        assert_eq!(sqlite.backend_name(), "sqlite");
        sqlite.update_counter("hits", 1).await.unwrap();
    }

    #[tokio::test]
    async fn test_unreachable_database_is_fatal() {
        let config = DatabaseConfig {
            reconnect_backoff: vec![0],
            ..DatabaseConfig::with_url("sqlite:///nonexistent-dir/metrics.db?mode=ro")
        };

        let result = Database::connect(&config).await;
        assert!(matches!(result, Err(MetricsError::Startup(_))));
    }
}
