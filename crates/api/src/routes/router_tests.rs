//! Router tests for requests rejected before any database access.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use meridian_shared::{GeminiClient, GeminiConfig};
use sea_orm::DatabaseConnection;
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::{AppState, ExportSettings, create_router};

fn app() -> Router {
    create_router(AppState {
        db: Arc::new(DatabaseConnection::Disconnected),
        gemini: Arc::new(GeminiClient::new(GeminiConfig::default())),
        export: Arc::new(ExportSettings::default()),
    })
}

async fn send(request: Request<Body>) -> (StatusCode, Value) {
    let response = app().oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_unknown_issue_sort_is_rejected() {
    let (status, body) = send(get("/api/v1/issues?sort=newest")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_custom_schedule_without_start_is_rejected() {
    let (status, body) = send(get("/api/v1/quarterly-closing/schedule?mode=custom")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "start is required in custom mode");
}

#[tokio::test]
async fn test_inverted_custom_range_is_rejected() {
    let (status, body) = send(get(
        "/api/v1/quarterly-closing/schedule?mode=custom&start=2025-03-10&end=2025-03-01",
    ))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_malformed_month_is_rejected() {
    let (status, _) = send(get(
        "/api/v1/quarterly-closing/schedule?mode=quarter&year=2025&quarter=1&month=2025-13",
    ))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_resolve_rejects_quarter_out_of_range() {
    let (status, body) = send(json_request(
        "POST",
        "/api/v1/quarterly-closing/quarters/resolve",
        &json!({"year": 2025, "quarter": 5}),
    ))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_parse_requires_text() {
    let (status, body) = send(json_request(
        "POST",
        "/api/v1/issues/parse",
        &json!({"text": "   "}),
    ))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_issue_update_with_blank_title_is_rejected() {
    let (status, _) = send(json_request(
        "PATCH",
        "/api/v1/issues/0192f0c4-8f5e-7d4a-9b1e-2f3a4b5c6d7e",
        &json!({"title": ""}),
    ))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_model_listing_without_key_is_server_error() {
    let (status, body) = send(get("/api/v1/ai/models")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "INTERNAL_ERROR");
}
