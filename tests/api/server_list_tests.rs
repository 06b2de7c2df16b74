//! Server list endpoint tests
//!
//! Covers the request-side failures of `GET /api/v1/servers`: authentication
//! requirements and query parameter validation, all of which are rejected
//! before any query reaches the database.

use axum::http::StatusCode;
use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use pretty_assertions::assert_eq;
use tower::ServiceExt;

use chat_backend::presentation::middleware::Claims;

use crate::common::{response_json, TestApp, TEST_JWT_SECRET};

fn make_token(user_id: i64, secret: &str) -> String {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: user_id.to_string(),
        iat: now,
        exp: now + 3600,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

#[tokio::test]
async fn by_user_without_token_returns_unauthorized() {
    let app = TestApp::new();

    let response = app.get("/api/v1/servers?by_user=true").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = response_json(response).await;
    assert_eq!(body["code"], 10003);
    assert_eq!(
        body["message"],
        "You must be authenticated to use this feature."
    );
}

#[tokio::test]
async fn by_user_with_invalid_token_returns_unauthorized() {
    let app = TestApp::new();

    // Signed with the wrong secret, so optional auth treats it as anonymous
    let token = make_token(42, "wrong-secret-wrong-secret-wrong-secret");
    let response = app.get_auth("/api/v1/servers?by_user=true", &token).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = response_json(response).await;
    assert_eq!(body["code"], 10003);
}

#[tokio::test]
async fn non_numeric_qty_returns_validation_error() {
    let app = TestApp::new();

    let response = app.get("/api/v1/servers?qty=abc").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["code"], 10007);
    assert_eq!(body["message"], "Invalid qty value.");
}

#[tokio::test]
async fn negative_qty_returns_validation_error() {
    let app = TestApp::new();

    let response = app.get("/api/v1/servers?qty=-3").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["code"], 10007);
}

#[tokio::test]
async fn malformed_server_id_returns_validation_error() {
    let app = TestApp::new();

    let response = app.get("/api/v1/servers?by_serverid=abc").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["code"], 10007);
    assert_eq!(body["message"], "Invalid server id.");
}

#[tokio::test]
async fn server_id_error_takes_precedence_over_qty_error() {
    let app = TestApp::new();

    // Filters apply in a fixed order; by_serverid is checked before qty
    let response = app.get("/api/v1/servers?by_serverid=abc&qty=xyz").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["message"], "Invalid server id.");
}

#[tokio::test]
async fn auth_error_takes_precedence_over_qty_error() {
    let app = TestApp::new();

    let response = app.get("/api/v1/servers?by_user=true&qty=xyz").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = response_json(response).await;
    assert_eq!(
        body["message"],
        "You must be authenticated to use this feature."
    );
}

#[tokio::test]
async fn create_server_without_token_returns_unauthorized() {
    let app = TestApp::new();

    let response = app
        .post_json(
            "/api/v1/servers",
            r#"{"name":"Gaming","category_id":"1","description":null}"#,
        )
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = response_json(response).await;
    assert_eq!(body["code"], 10003);
    assert_eq!(body["message"], "Missing authorization header");
}

#[tokio::test]
async fn valid_token_is_accepted_by_protected_routes() {
    let app = TestApp::new();

    // Request body validation runs after auth, so a 400 here proves the
    // token itself was accepted.
    let token = make_token(7, TEST_JWT_SECRET);
    let response = app
        .router
        .clone()
        .oneshot(
            axum::http::Request::builder()
                .method("POST")
                .uri("/api/v1/servers")
                .header("Authorization", format!("Bearer {}", token))
                .header("Content-Type", "application/json")
                .body(axum::body::Body::from(
                    r#"{"name":"X","category_id":"1","description":null}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["code"], 10007);
}
