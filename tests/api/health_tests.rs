//! Health endpoint tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use crate::common::{response_json, TestApp};

#[tokio::test]
async fn health_check_returns_ok() {
    let app = TestApp::new();

    let response = app.get("/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn liveness_returns_ok() {
    let app = TestApp::new();

    let response = app.get("/health/live").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["status"], "alive");
}
