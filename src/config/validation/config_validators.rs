//! Server, agent and logging validators

use super::trait_def::Validate;
use crate::config::models::*;
use tracing::debug;

fn validate_address(address: &str) -> Result<(), String> {
    if address.trim().is_empty() {
        return Err("Address cannot be empty".to_string());
    }
    Ok(())
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating server configuration");

        validate_address(&self.address)?;

        if self.request_timeout == 0 {
            return Err("Request timeout must be greater than 0".to_string());
        }

        if matches!(&self.key, Some(key) if key.is_empty()) {
            return Err("HMAC key cannot be empty when set".to_string());
        }

        self.storage.validate()?;
        self.logging.validate()?;

        debug!("Server configuration validation completed");
        Ok(())
    }
}

impl Validate for AgentConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating agent configuration");

        validate_address(&self.address)?;

        if self.poll_interval == 0 {
            return Err("Poll interval must be greater than 0".to_string());
        }

        if self.report_interval == 0 {
            return Err("Report interval must be greater than 0".to_string());
        }

        if self.rate_limit == 0 {
            return Err("Rate limit must be greater than 0".to_string());
        }

        if self.request_timeout == 0 {
            return Err("Request timeout must be greater than 0".to_string());
        }

        if matches!(&self.key, Some(key) if key.is_empty()) {
            return Err("HMAC key cannot be empty when set".to_string());
        }

        self.retry.validate()?;
        self.logging.validate()?;

        debug!("Agent configuration validation completed");
        Ok(())
    }
}

impl Validate for ReportRetryConfig {
    fn validate(&self) -> Result<(), String> {
        if self.max_attempts == 0 {
            return Err("Retry max attempts must be greater than 0".to_string());
        }

        if self.multiplier < 1.0 {
            return Err("Retry multiplier must be at least 1.0".to_string());
        }

        if self.max_delay_ms < self.base_delay_ms {
            return Err("Retry max delay must not be below the base delay".to_string());
        }

        Ok(())
    }
}

impl Validate for LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        tracing_subscriber::EnvFilter::try_new(&self.level)
            .map(|_| ())
            .map_err(|e| format!("Invalid log level '{}': {}", self.level, e))
    }
}
