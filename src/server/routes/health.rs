//! Backend health endpoint

use crate::server::state::AppState;
use actix_web::{HttpResponse, web};
use tracing::{debug, error};

/// `GET /ping`: 200 when storage is reachable, 500 otherwise
pub async fn ping(state: web::Data<AppState>) -> HttpResponse {
    debug!("Health check requested");

    match state.run(state.storage.health_check()).await {
        Ok(()) => HttpResponse::Ok().finish(),
        Err(e) => {
            error!(backend = state.storage.backend_name(), "Health check failed: {}", e);
            HttpResponse::InternalServerError().finish()
        }
    }
}
