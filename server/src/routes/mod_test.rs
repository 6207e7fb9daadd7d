use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use super::*;
use crate::state::test_helpers::test_app_state;

fn json_post(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn healthz_is_ok() {
    let response = api_routes(test_app_state())
        .oneshot(Request::builder().uri("/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn me_without_cookie_is_unauthorized() {
    let response = api_routes(test_app_state())
        .oneshot(Request::builder().uri("/api/auth/me").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_without_cookie_is_unauthorized() {
    let response = api_routes(test_app_state())
        .oneshot(Request::builder().method("POST").uri("/api/auth/logout").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn request_code_rejects_malformed_email_before_touching_db() {
    let response = api_routes(test_app_state())
        .oneshot(json_post("/api/auth/email/request-code", serde_json::json!({ "email": "not-an-email" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = to_bytes(response.into_body(), 1024).await.unwrap();
    assert_eq!(&body[..], b"invalid email");
}

#[tokio::test]
async fn request_code_is_unavailable_without_delivery_or_echo() {
    let state = test_app_state();
    assert!(state.config.email.is_none() && !state.config.echo_codes);

    let response = api_routes(state)
        .oneshot(json_post("/api/auth/email/request-code", serde_json::json!({ "email": "user@example.com" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = to_bytes(response.into_body(), 1024).await.unwrap();
    assert_eq!(&body[..], b"email sign-in is not configured");
}

#[tokio::test]
async fn verify_code_rejects_malformed_code_before_touching_db() {
    let response = api_routes(test_app_state())
        .oneshot(json_post(
            "/api/auth/email/verify-code",
            serde_json::json!({ "email": "user@example.com", "code": "12" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn verify_code_requires_both_fields() {
    let response = api_routes(test_app_state())
        .oneshot(json_post("/api/auth/email/verify-code", serde_json::json!({ "email": "user@example.com" })))
        .await
        .unwrap();
    assert!(response.status().is_client_error());
}
