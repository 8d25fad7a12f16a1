//! Configuration management for the agent and the collector server
//!
//! Values are resolved with the precedence CLI flag / environment variable,
//! then YAML config file, then built-in defaults.

pub mod cli;
pub mod models;
pub mod validation;

pub use cli::{AgentArgs, ServerArgs};
pub use models::*;
pub use validation::Validate;

use crate::utils::error::{MetricsError, Result};
use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::{debug, info};

/// Load a configuration section from a YAML file
pub async fn from_file<T, P>(path: P) -> Result<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    info!("Loading configuration from: {:?}", path);

    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| MetricsError::Config(format!("Failed to read config file: {}", e)))?;

    let config = serde_yaml::from_str(&content)
        .map_err(|e| MetricsError::Config(format!("Failed to parse config: {}", e)))?;

    debug!("Configuration file parsed");
    Ok(config)
}

/// Run a section's validator, wrapping failures as configuration errors
pub fn validate<T: Validate>(section: &str, config: &T) -> Result<()> {
    config
        .validate()
        .map_err(|e| MetricsError::Config(format!("{} config error: {}", section, e)))
}
