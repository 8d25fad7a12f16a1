//! Test database utilities
//!
//! Each call opens a fresh in-memory SQLite database through SeaORM, so tests
//! never share state.

use metrics_relay::config::DatabaseConfig;
use metrics_relay::storage::{Database, MemoryStore, MetricsStore};
use std::sync::Arc;

/// In-memory SQLite store with the metric tables in place
#[derive(Debug, Clone)]
pub struct TestDatabase {
    inner: Arc<Database>,
}

impl TestDatabase {
    pub async fn new() -> Self {
        let db = Database::connect(&test_db_config())
            .await
            .expect("Failed to open in-memory test database");

        db.bootstrap()
            .await
            .expect("Failed to bootstrap test database");

        Self {
            inner: Arc::new(db),
        }
    }

    pub fn db(&self) -> &Database {
        &self.inner
    }

    pub fn store(&self) -> Arc<dyn MetricsStore> {
        self.inner.clone()
    }
}

/// Config for an isolated in-memory SQLite database
pub fn test_db_config() -> DatabaseConfig {
    DatabaseConfig {
        // the pool holds a single connection, queued callers need headroom
        connection_timeout: 30,
        ..DatabaseConfig::with_url("sqlite::memory:")
    }
}

/// One store per backend, for contract tests
pub async fn backends() -> Vec<Arc<dyn MetricsStore>> {
    vec![
        Arc::new(MemoryStore::new()),
        TestDatabase::new().await.store(),
    ]
}
