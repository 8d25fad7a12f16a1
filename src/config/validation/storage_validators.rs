//! Storage configuration validators

use super::trait_def::Validate;
use crate::config::models::*;
use tracing::debug;

impl Validate for StorageConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating storage configuration");
        self.database.validate()
    }
}

impl Validate for DatabaseConfig {
    fn validate(&self) -> Result<(), String> {
        // memory backend
        if !self.enabled() {
            return Ok(());
        }

        if !self.is_postgres() && !self.is_sqlite() {
            return Err(
                "Database URL must start with postgres://, postgresql:// or sqlite:".to_string(),
            );
        }

        if self.max_connections == 0 {
            return Err("Database max connections must be greater than 0".to_string());
        }

        if self.max_connections > 1000 {
            return Err("Database max connections should not exceed 1000".to_string());
        }

        if self.connection_timeout == 0 {
            return Err("Database connection timeout must be greater than 0".to_string());
        }

        if self.reconnect_backoff.is_empty() {
            return Err("Database reconnect backoff schedule cannot be empty".to_string());
        }

        Ok(())
    }
}
