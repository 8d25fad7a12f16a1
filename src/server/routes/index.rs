//! HTML listing of every metric

use crate::core::models::MetricsSnapshot;
use crate::server::state::AppState;
use crate::utils::error::Result;
use actix_web::{HttpResponse, web};
use std::fmt::Write;

/// `GET /`
pub async fn list_metrics(state: web::Data<AppState>) -> Result<HttpResponse> {
    let snapshot = state.run(state.storage.get_all_metrics()).await?;
    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(render(&snapshot)))
}

fn render(snapshot: &MetricsSnapshot) -> String {
    let mut html = String::from(
        "<!DOCTYPE html>\n<html>\n<head><title>Metrics</title></head>\n<body>\n<table>\n\
         <tr><th>Type</th><th>Name</th><th>Value</th></tr>\n",
    );

    for (name, delta) in &snapshot.counters {
        let _ = writeln!(
            html,
            "<tr><td>counter</td><td>{}</td><td>{}</td></tr>",
            escape(name),
            delta
        );
    }
    for (name, value) in &snapshot.gauges {
        let _ = writeln!(
            html,
            "<tr><td>gauge</td><td>{}</td><td>{}</td></tr>",
            escape(name),
            value
        );
    }

    html.push_str("</table>\n</body>\n</html>\n");
    html
}

fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
