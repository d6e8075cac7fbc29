// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Transport behavior against a fake backend: headers, error mapping,
//! empty bodies and connection failures.

use axum::{
    http::{header, HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use rideshare_client::error::AppError;
use rideshare_client::services::CarsApi;
use serde_json::{json, Value};

mod common;

use common::TestApp;

fn echo_headers(headers: HeaderMap) -> Json<Value> {
    let value = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    Json(json!({
        "authorization": value(header::AUTHORIZATION),
        "content_type": value(header::CONTENT_TYPE),
    }))
}

fn router() -> Router {
    Router::new()
        .route("/api/echo", get(|headers: HeaderMap| async move { echo_headers(headers) }))
        .route(
            "/api/rides/request",
            axum::routing::post(|| async {
                common::detail(StatusCode::BAD_REQUEST, "You have already requested this ride")
            }),
        )
        .route(
            "/api/broken",
            get(|| async { (StatusCode::BAD_GATEWAY, "<html>Bad Gateway</html>") }),
        )
        .route(
            "/api/structured",
            get(|| async {
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(json!({ "detail": [{ "loc": ["body", "car_id"], "msg": "field required" }] })),
                )
            }),
        )
        .route("/api/cars/my", get(|| async { StatusCode::OK }))
        .route(
            "/api/genai-chat/api/genai-chat",
            axum::routing::post(|Json(body): Json<Value>| async move {
                Json(json!({ "reply": format!("You asked: {}", body["message"].as_str().unwrap_or("")) }))
            }),
        )
        .route("/api/health", get(|| async { Json(json!({ "status": "healthy" })) }))
        .route("/", get(|| async { Json(json!({ "message": "Rideshare API" })) }))
}

#[tokio::test]
async fn test_bearer_token_and_content_type_sent() {
    let base = common::spawn_backend(router()).await;
    let test = TestApp::signed_in(&base);

    let echoed: Value = test.app.client.get("/echo").await.unwrap();
    assert_eq!(echoed["authorization"], "Bearer test-token");
    assert_eq!(echoed["content_type"], "application/json");
}

#[tokio::test]
async fn test_no_authorization_without_token() {
    let base = common::spawn_backend(router()).await;
    let test = TestApp::new(&base);

    let echoed: Value = test.app.client.get("/echo").await.unwrap();
    assert!(echoed["authorization"].is_null());
}

#[tokio::test]
async fn test_backend_detail_surfaced_verbatim() {
    let base = common::spawn_backend(router()).await;
    let test = TestApp::signed_in(&base);

    let err = test
        .app
        .rides
        .request_ride(1, None)
        .await
        .unwrap_err();

    assert_eq!(
        err,
        AppError::Api {
            status: 400,
            detail: "You have already requested this ride".to_string()
        }
    );
    assert_eq!(err.to_string(), "You have already requested this ride");

    let errors = test.errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message, "You have already requested this ride");
}

#[tokio::test]
async fn test_non_json_error_falls_back_to_status_message() {
    let base = common::spawn_backend(router()).await;
    let test = TestApp::new(&base);

    let err = test.app.client.get::<Value>("/broken").await.unwrap_err();
    assert_eq!(err.status(), Some(502));
    assert_eq!(err.to_string(), "HTTP error! status: 502");
}

#[tokio::test]
async fn test_structured_detail_rendered_as_json() {
    let base = common::spawn_backend(router()).await;
    let test = TestApp::new(&base);

    let err = test.app.client.get::<Value>("/structured").await.unwrap_err();
    assert_eq!(err.status(), Some(422));
    assert!(err.to_string().contains("field required"));
}

#[tokio::test]
async fn test_empty_list_body_is_empty_list() {
    let base = common::spawn_backend(router()).await;
    let test = TestApp::new(&base);

    let cars = CarsApi::new(test.app.client.clone()).mine().await.unwrap();
    assert!(cars.is_empty());
}

#[tokio::test]
async fn test_unknown_route_is_api_error() {
    let base = common::spawn_backend(router()).await;
    let test = TestApp::new(&base);

    let err = test.app.client.get::<Value>("/nope").await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert!(!err.is_network());
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    let base = common::unreachable_backend().await;
    let test = TestApp::new(&base);

    let err = test.app.client.health().await.unwrap_err();
    assert!(err.is_network(), "expected network error, got {:?}", err);
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn test_health_and_root() {
    let base = common::spawn_backend(router()).await;
    let test = TestApp::new(&base);

    let health = test.app.client.health().await.unwrap();
    assert_eq!(health["status"], "healthy");

    let root = test.app.client.ping_root().await.unwrap();
    assert_eq!(root["message"], "Rideshare API");
}

#[tokio::test]
async fn test_assistant_chat_returns_reply() {
    let base = common::spawn_backend(router()).await;
    let test = TestApp::new(&base);

    let reply = test.app.assistant.chat("Any rides to SFO?").await.unwrap();

    assert_eq!(reply, "You asked: Any rides to SFO?");
}

#[tokio::test]
async fn test_assistant_chat_propagates_network_error() {
    let base = common::unreachable_backend().await;
    let test = TestApp::new(&base);

    let err = test.app.assistant.chat("hello").await.unwrap_err();

    assert!(err.is_network());
}
