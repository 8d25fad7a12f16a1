//! HTTP route modules
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | POST | `/update/{kind}/{name}/{value}` | [`update::update_from_path`] |
//! | POST | `/update/` | [`update::update_json`] |
//! | POST | `/updates/` | [`update::update_batch`] |
//! | GET | `/value/{kind}/{name}` | [`value::value_from_path`] |
//! | POST | `/value/` | [`value::value_json`] |
//! | GET | `/` | [`index::list_metrics`] |
//! | GET | `/ping` | [`health::ping`] |
//!
//! A known path hit with another method answers 405.

pub mod health;
pub mod index;
pub mod update;
pub mod value;

use actix_web::web;

/// Register every route
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/").route(web::get().to(index::list_metrics)))
        .service(web::resource("/ping").route(web::get().to(health::ping)))
        .service(web::resource("/update/").route(web::post().to(update::update_json)))
        .service(web::resource("/updates/").route(web::post().to(update::update_batch)))
        .service(
            web::resource("/update/{kind}/{name:[^/]*}/{value:[^/]*}")
                .route(web::post().to(update::update_from_path)),
        )
        .service(web::resource("/update/{tail:.*}").route(web::post().to(update::malformed_path)))
        .service(web::resource("/value/").route(web::post().to(value::value_json)))
        .service(web::resource("/value/{kind}/{name}").route(web::get().to(value::value_from_path)));
}

pub(crate) fn text_response(body: String) -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(body)
}
