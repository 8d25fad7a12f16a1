//! Resilience patterns for resource isolation and timeout protection

use crate::utils::error::{MetricsError, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::debug;

/// Timeout wrapper for async operations
#[derive(Debug, Clone, Copy)]
pub struct TimeoutWrapper {
    timeout: Duration,
}

impl TimeoutWrapper {
    /// Create a new timeout wrapper
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Execute a function with timeout protection
    ///
    /// On expiry the inner future is dropped, cancelling whatever it was awaiting.
    pub async fn call<F, R>(&self, f: F) -> Result<R>
    where
        F: std::future::Future<Output = R>,
    {
        match tokio::time::timeout(self.timeout, f).await {
            Ok(result) => Ok(result),
            Err(_) => Err(MetricsError::Timeout(format!(
                "Operation timed out after {:?}",
                self.timeout
            ))),
        }
    }
}

/// Bulkhead pattern for resource isolation
///
/// Caps the number of concurrently running jobs. Submitting while every
/// permit is taken waits for one to be released.
#[derive(Debug, Clone)]
pub struct Bulkhead {
    semaphore: Arc<Semaphore>,
    name: String,
    max_concurrent: usize,
}

impl Bulkhead {
    /// Create a new bulkhead
    pub fn new(name: impl Into<String>, max_concurrent: usize) -> Self {
        let max_concurrent = max_concurrent.max(1);
        Self {
            semaphore: Arc::new(Semaphore::new(max_concurrent)),
            name: name.into(),
            max_concurrent,
        }
    }

    /// Run a job on its own task once a slot is free
    ///
    /// Returns after the job has been started, not after it finished.
    pub async fn spawn<F>(&self, job: F) -> Result<JoinHandle<F::Output>>
    where
        F: std::future::Future + Send + 'static,
        F::Output: Send + 'static,
    {
        let permit = self
            .semaphore
            .clone()
            .acquire_owned()
            .await
            .map_err(|e| MetricsError::Internal(format!("Bulkhead acquire failed: {}", e)))?;

        debug!("Bulkhead '{}' started job", self.name);

        Ok(tokio::spawn(async move {
            let output = job.await;
            drop(permit);
            output
        }))
    }

    /// Wait until every running job has released its slot
    pub async fn wait_idle(&self) -> Result<()> {
        let _all = self
            .semaphore
            .acquire_many(self.max_concurrent as u32)
            .await
            .map_err(|e| MetricsError::Internal(format!("Bulkhead drain failed: {}", e)))?;
        Ok(())
    }

    /// Get available permits
    pub fn available_permits(&self) -> usize {
        self.semaphore.available_permits()
    }

    /// Get maximum concurrent operations
    pub fn max_concurrent(&self) -> usize {
        self.max_concurrent
    }
}
