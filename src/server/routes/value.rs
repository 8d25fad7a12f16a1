//! Metric lookup endpoints

use super::text_response;
use crate::core::models::{Metric, MetricKind, MetricQuery, Metrics};
use crate::server::envelope::{json_response, open_request};
use crate::server::state::AppState;
use crate::utils::error::{MetricsError, Result};
use actix_web::{HttpRequest, HttpResponse, web};

/// `GET /value/{kind}/{name}`: the current value as text
pub async fn value_from_path(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse> {
    let (kind, name) = path.into_inner();
    let kind: MetricKind = kind.parse()?;

    let value = state.run(state.storage.get(kind, &name)).await?;
    Ok(text_response(value.to_string()))
}

/// `POST /value/` with `{"id", "type"}`: the full metric as JSON
pub async fn value_json(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Bytes,
) -> Result<HttpResponse> {
    let payload = open_request(&state, &req, &body)?;
    let query: MetricQuery = serde_json::from_slice(&payload)
        .map_err(|e| MetricsError::invalid_metric(format!("malformed lookup: {}", e)))?;
    let kind: MetricKind = query.mtype.parse()?;

    let value = state.run(state.storage.get(kind, &query.id)).await?;
    json_response(
        &state,
        &Metrics::from(Metric {
            name: query.id,
            value,
        }),
    )
}
