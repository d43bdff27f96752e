use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use rest_error_handler::api::{handlers::AppStateInner, routes::create_router};
use rest_error_handler::formatter::ErrorResponseFormatter;

fn create_test_app() -> axum::Router {
    let state = Arc::new(AppStateInner {
        formatter: ErrorResponseFormatter::default(),
    });
    create_router(state)
}

// Helper to send request and return status plus raw body
async fn send(request: Request<Body>) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
    let response = create_test_app().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, headers, body.to_vec())
}

async fn raise(error: Value) -> (StatusCode, Vec<u8>) {
    let request = Request::builder()
        .method("POST")
        .uri("/errors/raise")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&error).unwrap()))
        .unwrap();
    let (status, _, body) = send(request).await;
    (status, body)
}

fn parse(body: &[u8]) -> Value {
    serde_json::from_slice(body).unwrap_or(json!({}))
}

#[tokio::test]
async fn test_health_endpoint() {
    let request = Request::get("/health").body(Body::empty()).unwrap();
    let (status, headers, body) = send(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse(&body)["status"], "healthy");
    assert!(headers.contains_key("x-request-id"));
}

#[tokio::test]
async fn test_bad_request_is_formatted() {
    let (status, body) = raise(json!({"status": 400, "field": "email"})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        parse(&body),
        json!({
            "code": 400,
            "status": "Bad Request",
            "message": "Invalid request parameter.",
            "details": [{"field": "email", "message": "email is invalid"}]
        })
    );
}

#[tokio::test]
async fn test_bad_request_overrides() {
    let (status, body) = raise(json!({
        "status": 400,
        "field": "email",
        "fieldMessage": "format invalid",
        "message": "bad input",
        "statusMessage": "Bad Input"
    }))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body = parse(&body);
    assert_eq!(body["status"], "Bad Input");
    assert_eq!(body["message"], "bad input");
    assert_eq!(
        body["details"],
        json!([{"field": "email", "message": "format invalid"}])
    );
}

#[tokio::test]
async fn test_status_route_formats_known_codes() {
    let request = Request::get("/errors/401").body(Body::empty()).unwrap();
    let (status, headers, body) = send(request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(headers["content-type"], "application/json");
    assert_eq!(
        parse(&body),
        json!({"code": 401, "status": "Unauthorized", "message": "Invalid credentials"})
    );
}

#[tokio::test]
async fn test_unknown_status_is_owned() {
    let (status, body) = raise(json!({"status": 999, "message": "weird"})).await;

    assert_eq!(status.as_u16(), 999);
    assert_eq!(
        parse(&body),
        json!({"code": 999, "status": "", "message": "weird"})
    );
}

#[tokio::test]
async fn test_extra_fields_cannot_override_code_or_status() {
    let (status, body) = raise(json!({"status": 404, "extra": "foo", "code": 7})).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        parse(&body),
        json!({"code": 404, "status": "Not Found", "message": "Not Found", "extra": "foo"})
    );
}

#[tokio::test]
async fn test_unstructured_errors_keep_default_response() {
    for error in [json!("boom"), json!(null), json!({"status": "404"})] {
        let (status, body) = raise(error).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.is_empty());
    }
}

#[tokio::test]
async fn test_repeated_errors_are_byte_identical() {
    let error = json!({"status": 403, "scope": ["admin"], "message": "nope"});
    let (_, first) = raise(error.clone()).await;
    let (_, second) = raise(error).await;

    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_metrics_count_formatted_errors() {
    raise(json!({"status": 500})).await;

    let request = Request::get("/metrics").body(Body::empty()).unwrap();
    let (status, _, body) = send(request).await;

    assert_eq!(status, StatusCode::OK);
    let text = String::from_utf8(body).unwrap();
    assert!(text.contains("rest_errors_formatted_total"));
}

#[tokio::test]
async fn test_legacy_status_carries_reason_phrase() {
    let request = Request::builder()
        .method("POST")
        .uri("/errors/raise")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_vec(&json!({"status": 520, "statusMessage": "Datacenter Error"}))
                .unwrap(),
        ))
        .unwrap();
    let response = create_test_app().oneshot(request).await.unwrap();

    assert_eq!(response.status().as_u16(), 520);
    let reason = response
        .extensions()
        .get::<hyper::ext::ReasonPhrase>()
        .unwrap();
    assert_eq!(reason.as_bytes(), b"Datacenter Error");
}

#[tokio::test]
async fn test_bare_legacy_status_gets_default_reason_phrase() {
    let request = Request::get("/errors/520").body(Body::empty()).unwrap();
    let response = create_test_app().oneshot(request).await.unwrap();

    assert_eq!(response.status().as_u16(), 520);
    let reason = response
        .extensions()
        .get::<hyper::ext::ReasonPhrase>()
        .unwrap();
    assert_eq!(reason.as_bytes(), b"Datacenter Error");

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(
        parse(&body),
        json!({"code": 520, "status": "", "message": ""})
    );
}

#[tokio::test]
async fn test_float_status_is_formatted() {
    let request = Request::builder()
        .method("POST")
        .uri("/errors/raise")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"status": 400.0, "field": "email"}"#))
        .unwrap();
    let (status, _, body) = send(request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        parse(&body),
        json!({
            "code": 400,
            "status": "Bad Request",
            "message": "Invalid request parameter.",
            "details": [{"field": "email", "message": "email is invalid"}]
        })
    );
}
