//! Metric ingestion endpoints

use super::text_response;
use crate::core::models::{Metric, MetricKind, MetricValue, Metrics, decode_batch};
use crate::server::envelope::{json_response, open_request};
use crate::server::state::AppState;
use crate::utils::error::{MetricsError, Result};
use actix_web::{HttpRequest, HttpResponse, web};
use serde::Serialize;
use tracing::{debug, info};

/// Summary returned for an applied batch
#[derive(Debug, Serialize)]
pub struct BatchSummary {
    pub applied: usize,
}

/// `POST /update/{kind}/{name}/{value}`
///
/// The kind decides how the value is parsed. Responds with the stored value.
pub async fn update_from_path(
    state: web::Data<AppState>,
    path: web::Path<(String, String, String)>,
) -> Result<HttpResponse> {
    let (kind, name, raw) = path.into_inner();

    if name.is_empty() {
        return Err(MetricsError::not_found("metric name is missing"));
    }

    let kind: MetricKind = kind.parse()?;
    let metric = Metric {
        name,
        value: MetricValue::parse(kind, &raw)?,
    };

    debug!(name = %metric.name, kind = %kind, "Updating metric from path");
    let stored = state.run(state.storage.apply(&metric)).await?;

    Ok(text_response(stored.to_string()))
}

/// Any other `/update/...` shape
pub async fn malformed_path(req: HttpRequest) -> Result<HttpResponse> {
    Err(MetricsError::invalid_metric(format!(
        "malformed update path '{}'",
        req.path()
    )))
}

/// `POST /update/` with a single JSON metric
///
/// Responds with the stored metric; a counter carries its new total.
pub async fn update_json(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Bytes,
) -> Result<HttpResponse> {
    let payload = open_request(&state, &req, &body)?;
    let wire: Metrics = serde_json::from_slice(&payload)
        .map_err(|e| MetricsError::invalid_metric(format!("malformed metric: {}", e)))?;
    let metric = wire.to_metric()?;

    let stored = state.run(state.storage.apply(&metric)).await?;

    json_response(
        &state,
        &Metrics::from(Metric {
            name: metric.name,
            value: stored,
        }),
    )
}

/// `POST /updates/` with a JSON list of metrics, applied all-or-nothing
pub async fn update_batch(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Bytes,
) -> Result<HttpResponse> {
    let payload = open_request(&state, &req, &body)?;
    let batch = decode_batch(&payload)?;

    state.run(state.storage.update_batch(&batch)).await?;
    info!(size = batch.len(), "Batch applied");

    json_response(
        &state,
        &BatchSummary {
            applied: batch.len(),
        },
    )
}
