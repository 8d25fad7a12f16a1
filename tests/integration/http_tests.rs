//! HTTP route tests
//!
//! Requests go through the full actix service, middleware included.

#[cfg(test)]
mod tests {
    use crate::common::TestDatabase;
    use crate::common::fixtures::{batch_body, counter, gauge, unknown_kind};
    use actix_web::http::StatusCode;
    use actix_web::{test, web};
    use metrics_relay::core::models::Metrics;
    use metrics_relay::server::AppState;
    use metrics_relay::server::envelope::{ENCRYPTION_HEADER, SIGNATURE_HEADER};
    use metrics_relay::storage::{MemoryStore, MetricsStore};
    use metrics_relay::utils::auth::{
        ENCRYPTION_SCHEME, SealedEnvelope, create_hmac_signature, verify_hmac_signature,
    };
    use metrics_relay::HttpServer;
    use rsa::RsaPrivateKey;
    use serde_json::{Value, json};
    use std::sync::Arc;

    fn memory_state() -> AppState {
        AppState::new(Arc::new(MemoryStore::new()))
    }

    macro_rules! app {
        ($state:expr) => {
            test::init_service(HttpServer::create_app(web::Data::new($state))).await
        };
    }

    macro_rules! post {
        ($app:expr, $uri:expr) => {
            test::call_service(&$app, test::TestRequest::post().uri($uri).to_request()).await
        };
    }

    macro_rules! get {
        ($app:expr, $uri:expr) => {
            test::call_service(&$app, test::TestRequest::get().uri($uri).to_request()).await
        };
    }

    #[actix_web::test]
    async fn test_counter_path_update_accumulates() {
        let app = app!(memory_state());

        let resp = post!(app, "/update/counter/hits/5");
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(test::read_body(resp).await, "5");

        let resp = post!(app, "/update/counter/hits/3");
        assert_eq!(test::read_body(resp).await, "8");

        let resp = get!(app, "/value/counter/hits");
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(test::read_body(resp).await, "8");
    }

    #[actix_web::test]
    async fn test_gauge_path_update_and_lookup() {
        let app = app!(memory_state());

        let resp = post!(app, "/update/gauge/temp/36.6");
        assert_eq!(resp.status(), StatusCode::OK);
        let resp = post!(app, "/update/gauge/temp/37.1");
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = get!(app, "/value/gauge/temp");
        assert_eq!(test::read_body(resp).await, "37.1");

        // kind decides the parse, so an integer is a valid gauge
        let resp = post!(app, "/update/gauge/temp/200");
        assert_eq!(resp.status(), StatusCode::OK);
        let resp = get!(app, "/value/gauge/temp");
        assert_eq!(test::read_body(resp).await, "200");
    }

    #[actix_web::test]
    async fn test_path_update_errors() {
        let app = app!(memory_state());

        assert_eq!(
            post!(app, "/update/counter/hits/notanumber").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            post!(app, "/update/gauge/x/notanumber").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            post!(app, "/update/counter/hits/1.5").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            post!(app, "/update/histogram/x/1").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            post!(app, "/update/counter//5").status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            post!(app, "/update/counter/hits").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get!(app, "/update/counter/hits/5").status(),
            StatusCode::METHOD_NOT_ALLOWED
        );
    }

    #[actix_web::test]
    async fn test_value_lookup_errors() {
        let app = app!(memory_state());

        assert_eq!(
            get!(app, "/value/counter/unknown").status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get!(app, "/value/histogram/x").status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[actix_web::test]
    async fn test_json_update_and_value() {
        let app = app!(memory_state());

        for _ in 0..2 {
            let req = test::TestRequest::post()
                .uri("/update/")
                .set_json(json!({"id": "hits", "type": "counter", "delta": 4}))
                .to_request();
            let _: Value = test::call_and_read_body_json(&app, req).await;
        }

        let req = test::TestRequest::post()
            .uri("/value/")
            .set_json(json!({"id": "hits", "type": "counter"}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, json!({"id": "hits", "type": "counter", "delta": 8}));

        let req = test::TestRequest::post()
            .uri("/update/")
            .set_json(json!({"id": "temp", "type": "gauge"}))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[actix_web::test]
    async fn test_batch_update() {
        let store = Arc::new(MemoryStore::new());
        let app = app!(AppState::new(store.clone()));

        let req = test::TestRequest::post()
            .uri("/updates/")
            .set_payload(batch_body(&[counter("PollCount", 2), gauge("Alloc", 1.5)]))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, json!({"applied": 2}));

        assert_eq!(store.get_counter("PollCount").await.unwrap(), 2);
        assert_eq!(store.get_gauge("Alloc").await.unwrap(), 1.5);
    }

    #[actix_web::test]
    async fn test_invalid_batch_changes_nothing() {
        let test_db = TestDatabase::new().await;
        let app = app!(AppState::new(test_db.store()));

        let req = test::TestRequest::post()
            .uri("/updates/")
            .set_payload(batch_body(&[counter("PollCount", 2), unknown_kind("x")]))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get!(app, "/value/counter/PollCount").status(),
            StatusCode::NOT_FOUND
        );

        let req = test::TestRequest::post()
            .uri("/updates/")
            .set_payload("not json")
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[actix_web::test]
    async fn test_signed_batch_and_signed_response() {
        let app = app!(memory_state().with_key("secret"));
        let body = batch_body(&[counter("hits", 1)]);

        let req = test::TestRequest::post()
            .uri("/updates/")
            .insert_header((SIGNATURE_HEADER, create_hmac_signature("secret", &body).unwrap()))
            .set_payload(body.clone())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let signature = resp
            .headers()
            .get(SIGNATURE_HEADER)
            .expect("response is signed")
            .to_str()
            .unwrap()
            .to_string();
        let response_body = test::read_body(resp).await;
        assert!(verify_hmac_signature("secret", &response_body, &signature).unwrap());

        let req = test::TestRequest::post()
            .uri("/updates/")
            .insert_header((SIGNATURE_HEADER, create_hmac_signature("wrong", &body).unwrap()))
            .set_payload(body)
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[actix_web::test]
    async fn test_sealed_batch() {
        let private_key = RsaPrivateKey::new(&mut rand::thread_rng(), 1024).unwrap();
        let public_key = private_key.to_public_key();
        let store = Arc::new(MemoryStore::new());
        let app = app!(
            AppState::new(store.clone())
                .with_key("secret")
                .with_private_key(private_key)
        );

        let plaintext = batch_body(&[gauge("Alloc", 9.5)]);
        let sealed = SealedEnvelope::seal_to_bytes(&public_key, &plaintext).unwrap();

        let req = test::TestRequest::post()
            .uri("/updates/")
            .insert_header((ENCRYPTION_HEADER, ENCRYPTION_SCHEME))
            .insert_header((
                SIGNATURE_HEADER,
                create_hmac_signature("secret", &plaintext).unwrap(),
            ))
            .set_payload(sealed)
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
        assert_eq!(store.get_gauge("Alloc").await.unwrap(), 9.5);

        // sealed bytes that do not open
        let req = test::TestRequest::post()
            .uri("/updates/")
            .insert_header((ENCRYPTION_HEADER, ENCRYPTION_SCHEME))
            .set_payload(plaintext)
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[actix_web::test]
    async fn test_ping_and_index() {
        let store = Arc::new(MemoryStore::new());
        store.update_counter("PollCount", 3).await.unwrap();
        store.update_gauge("<script>", 1.0).await.unwrap();
        let app = app!(AppState::new(store));

        assert_eq!(get!(app, "/ping").status(), StatusCode::OK);

        let resp = get!(app, "/");
        assert_eq!(resp.status(), StatusCode::OK);
        let html = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
        assert!(html.contains("PollCount"));
        assert!(!html.contains("<script>"));
    }

    #[actix_web::test]
    async fn test_ping_fails_when_backend_closed() {
        let test_db = TestDatabase::new().await;
        let store = test_db.store();
        let app = app!(AppState::new(store.clone()));

        store.close().await.unwrap();
        assert_eq!(
            get!(app, "/ping").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[actix_web::test]
    async fn test_wire_roundtrip_of_response() {
        let app = app!(memory_state());

        let req = test::TestRequest::post()
            .uri("/update/")
            .set_json(json!({"id": "temp", "type": "gauge", "value": 21.5}))
            .to_request();
        let body: Metrics = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, gauge("temp", 21.5));
    }
}
