//! Integration Tests for the local store API
//!
//! Tests full request/response cycles through the router.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tailoc_cache::{api::create_router, store::MemoryStore, AppState};
use tower::ServiceExt;

const TOKEN: &str = "test-token";

// == Helper Functions ==

fn create_test_app() -> Router {
    create_router(AppState::new(MemoryStore::new(), TOKEN))
}

fn command(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", format!("Bearer {TOKEN}"))
        .header("content-type", "application/json");

    match body {
        Some(body) => builder.body(Body::from(body.to_string())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    (status, body_to_json(response.into_body()).await)
}

// == PING ==

#[tokio::test]
async fn test_ping_returns_pong() {
    let app = create_test_app();
    let (status, json) = send(&app, command("POST", "/ping", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({"result": "PONG"}));
}

#[tokio::test]
async fn test_wrong_token_is_unauthorized() {
    let app = create_test_app();
    let request = Request::builder()
        .method("POST")
        .uri("/ping")
        .header("authorization", "Bearer nope")
        .body(Body::empty())
        .unwrap();

    let (status, json) = send(&app, request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(json.get("error").is_some());
}

// == SETEX / GET ==

#[tokio::test]
async fn test_setex_then_get() {
    let app = create_test_app();

    let (status, json) = send(
        &app,
        command(
            "POST",
            "/setex",
            Some(json!({"key": "app:abc", "ex": 60, "value": "{\"data\":1}"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({"result": "OK"}));

    // Colon percent-encoded the way the client sends it
    let (status, json) = send(&app, command("GET", "/get/app%3Aabc", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({"result": "{\"data\":1}"}));
}

#[tokio::test]
async fn test_get_missing_returns_null() {
    let app = create_test_app();
    let (status, json) = send(&app, command("GET", "/get/nothing", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({"result": null}));
}

#[tokio::test]
async fn test_setex_zero_expiry_rejected() {
    let app = create_test_app();
    let (status, _) = send(
        &app,
        command("POST", "/setex", Some(json!({"key": "k", "ex": 0, "value": "v"}))),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// == DEL ==

#[tokio::test]
async fn test_del_counts_removed_keys() {
    let app = create_test_app();
    for key in ["a", "b"] {
        send(
            &app,
            command("POST", "/setex", Some(json!({"key": key, "ex": 60, "value": "v"}))),
        )
        .await;
    }

    let (status, json) = send(
        &app,
        command("POST", "/del", Some(json!({"keys": ["a", "b", "c"]}))),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({"result": 2}));
}

// == SADD / SMEMBERS ==

#[tokio::test]
async fn test_sadd_then_smembers() {
    let app = create_test_app();

    let (_, json) = send(
        &app,
        command(
            "POST",
            "/sadd",
            Some(json!({"key": "tag:products", "members": ["app:2", "app:1"]})),
        ),
    )
    .await;
    assert_eq!(json, json!({"result": 2}));

    let (status, json) = send(&app, command("GET", "/smembers/tag%3Aproducts", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({"result": ["app:1", "app:2"]}));
}

#[tokio::test]
async fn test_wrong_type_is_bad_request() {
    let app = create_test_app();
    send(
        &app,
        command("POST", "/setex", Some(json!({"key": "s", "ex": 60, "value": "v"}))),
    )
    .await;

    let (status, json) = send(
        &app,
        command("POST", "/sadd", Some(json!({"key": "s", "members": ["m"]}))),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().starts_with("WRONGTYPE"));
}

// == STATS / HEALTH ==

#[tokio::test]
async fn test_stats_counts_value_kinds() {
    let app = create_test_app();
    send(
        &app,
        command("POST", "/setex", Some(json!({"key": "s", "ex": 60, "value": "v"}))),
    )
    .await;
    send(
        &app,
        command("POST", "/sadd", Some(json!({"key": "tag:t", "members": ["s"]}))),
    )
    .await;

    let request = Request::builder().uri("/stats").body(Body::empty()).unwrap();
    let (status, json) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["strings"], 1);
    assert_eq!(json["sets"], 1);
    assert_eq!(json["expired"], 0);
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app();
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, json) = send(&app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
}
