//! Agent lifecycle: poll loop, report loop, graceful shutdown

use super::buffer::MetricBuffer;
use super::collector::{Collector, Sampler, SystemSampler};
use super::dispatcher::Dispatcher;
use super::transport::{HttpTransport, Transport};
use crate::config::AgentConfig;
use crate::utils::error::{MetricsError, Result};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{Instant, MissedTickBehavior, interval, interval_at};
use tracing::{error, info};

/// Reporting agent
pub struct Agent {
    config: AgentConfig,
    collector: Collector,
    dispatcher: Dispatcher,
}

impl Agent {
    /// Agent sampling the local system and reporting over HTTP
    pub fn new(config: AgentConfig) -> Result<Self> {
        let transport = HttpTransport::new(config.updates_url(), config.request_timeout())?;
        Self::with_parts(config, Box::new(SystemSampler::new()), Arc::new(transport))
    }

    /// Agent with an explicit sampler and transport
    pub fn with_parts(
        config: AgentConfig,
        sampler: Box<dyn Sampler>,
        transport: Arc<dyn Transport>,
    ) -> Result<Self> {
        crate::config::validate("agent", &config)?;

        let buffer = Arc::new(MetricBuffer::new());
        let collector = Collector::new(sampler, buffer.clone());
        let dispatcher = Dispatcher::from_config(&config, buffer, transport)?;

        Ok(Self {
            config,
            collector,
            dispatcher,
        })
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Run both loops until `shutdown` resolves, then flush
    ///
    /// The final report carries whatever was polled since the last tick.
    /// Returns after every in-flight report has finished.
    pub async fn run_until<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        let Agent {
            config,
            collector,
            dispatcher,
        } = self;

        info!(
            url = %config.updates_url(),
            poll_interval = config.poll_interval,
            report_interval = config.report_interval,
            rate_limit = config.rate_limit,
            signed = config.key.is_some(),
            sealed = config.crypto_key.is_some(),
            "Agent started"
        );

        let (stop_tx, stop_rx) = watch::channel(false);
        let poll = tokio::spawn(poll_loop(collector, config.poll_interval(), stop_rx.clone()));
        let report = tokio::spawn(report_loop(
            dispatcher.clone(),
            config.report_interval(),
            stop_rx,
        ));

        shutdown.await;
        info!("Shutting down agent");

        // receivers still alive in both loops
        let _ = stop_tx.send(true);
        poll.await
            .map_err(|e| MetricsError::internal(format!("poll loop failed: {}", e)))?;
        report
            .await
            .map_err(|e| MetricsError::internal(format!("report loop failed: {}", e)))?;

        if let Err(e) = dispatcher.report().await {
            error!("Final report failed: {}", e);
        }
        dispatcher.wait_idle().await?;

        info!("Agent stopped");
        Ok(())
    }

    /// Run until SIGINT or SIGTERM
    pub async fn run(self) -> Result<()> {
        self.run_until(shutdown_signal()).await
    }
}

async fn poll_loop(mut collector: Collector, period: Duration, mut stop: watch::Receiver<bool>) {
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => collector.poll(),
            _ = stop.changed() => break,
        }
    }
}

async fn report_loop(dispatcher: Dispatcher, period: Duration, mut stop: watch::Receiver<bool>) {
    // first report one full period after start
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if let Err(e) = dispatcher.report().await {
                    error!("Report cycle failed: {}", e);
                }
            }
            _ = stop.changed() => break,
        }
    }
}

/// Resolves on Ctrl+C, or SIGTERM on unix
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
