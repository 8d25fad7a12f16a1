//! HTTP server core implementation

use crate::config::ServerConfig;
use crate::server::routes;
use crate::server::state::AppState;
use crate::storage::connect_storage;
use crate::utils::error::{MetricsError, Result};
use actix_web::{App, HttpServer as ActixHttpServer, web};
use tracing::{error, info};
use tracing_actix_web::TracingLogger;

/// Collector HTTP server
pub struct HttpServer {
    /// Server configuration
    config: ServerConfig,
    /// Application state
    state: AppState,
}

impl HttpServer {
    /// Open storage and load key material
    ///
    /// Fails when the database cannot be reached or bootstrapped.
    pub async fn new(config: &ServerConfig) -> Result<Self> {
        info!("Creating HTTP server");

        let storage = connect_storage(&config.storage).await?;
        let state = AppState::from_config(config, storage)?;

        Ok(Self {
            config: config.clone(),
            state,
        })
    }

    /// Server around existing state
    pub fn with_state(config: ServerConfig, state: AppState) -> Self {
        Self { config, state }
    }

    /// Create the Actix-web application
    pub fn create_app(
        state: web::Data<AppState>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(state)
            .wrap(TracingLogger::default())
            .configure(routes::configure_routes)
    }

    /// Serve until SIGINT/SIGTERM, then close storage
    pub async fn start(self) -> Result<()> {
        let bind_addr = self.config.address.clone();
        info!(
            backend = self.state.storage.backend_name(),
            "Starting HTTP server on {}", bind_addr
        );

        let state = web::Data::new(self.state.clone());

        let server = ActixHttpServer::new(move || Self::create_app(state.clone()))
            .bind(&bind_addr)
            .map_err(|e| MetricsError::startup(format!("Failed to bind {}: {}", bind_addr, e)))?
            .run();

        info!("HTTP server listening on {}", bind_addr);

        let served = server.await;
        info!("HTTP server stopped");

        self.shutdown().await;

        served.map_err(|e| MetricsError::internal(format!("Server error: {}", e)))
    }

    /// Release storage; called once after the server stops
    async fn shutdown(&self) {
        match self.state.storage.close().await {
            Ok(()) => info!("Storage closed"),
            Err(e) => error!("Failed to close storage: {}", e),
        }
    }

    /// Get server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Get application state
    pub fn state(&self) -> &AppState {
        &self.state
    }
}
