//! Integration tests for the room HTTP endpoints.
//!
//! Requests go through the fully assembled router, layers included.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use sibyl::adapters::{build_router, RoomRegistry};
use sibyl::config::{ServerConfig, SessionConfig};

// =============================================================================
// Test Infrastructure
// =============================================================================

fn app() -> (Router, Arc<RoomRegistry>) {
    let registry = Arc::new(RoomRegistry::default());
    let router = build_router(
        registry.clone(),
        &ServerConfig::default(),
        &SessionConfig::default(),
    );
    (router, registry)
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn create(body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/api/rooms")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

// =============================================================================
// POST /api/rooms
// =============================================================================

#[tokio::test]
async fn create_room_returns_room_and_token() {
    let (app, registry) = app();

    let (status, body) = send(app, create(json!({ "room": "Sprint 42" }))).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["room"], "Sprint 42");
    let game = registry.get("sprint 42").await.unwrap();
    assert_eq!(body["token"], game.token());
    assert_eq!(game.catalog().await.name(), "Modified Fibonacci");
}

#[tokio::test]
async fn create_room_twice_returns_the_same_token() {
    let (app, _registry) = app();

    let (_, first) = send(app.clone(), create(json!({ "room": "Alpha" }))).await;
    let (status, second) = send(app, create(json!({ "room": "ALPHA", "deck": "Hours" }))).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(first["token"], second["token"]);
    assert_eq!(second["room"], "Alpha");
}

#[tokio::test]
async fn create_room_honours_requested_deck() {
    let (app, registry) = app();

    send(app, create(json!({ "room": "Ops", "deck": "T-Shirt Sizes" }))).await;

    let game = registry.get("ops").await.unwrap();
    assert_eq!(game.catalog().await.name(), "T-Shirt Sizes");
}

#[tokio::test]
async fn create_room_rejects_invalid_names() {
    let (app, registry) = app();

    let (status, body) = send(app, create(json!({ "room": "no/slashes" }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_ROOM_NAME");
    assert!(body["message"].as_str().unwrap().contains("1-20 characters"));
    assert_eq!(registry.room_count().await, 0);
}

// =============================================================================
// GET /api/rooms/:room and /api/decks
// =============================================================================

#[tokio::test]
async fn get_room_returns_connection_details() {
    let (app, registry) = app();
    let game = registry.create_if_absent("Alpha", "Hours").await.unwrap();

    let (status, body) = send(app, get("/api/rooms/alpha")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["room"], "Alpha");
    assert_eq!(body["token"], game.token());
    assert_eq!(body["deck"], "Hours");
    assert_eq!(body["topicMaxLength"], 100);
    assert_eq!(body["usernameMaxLength"], 25);
    assert_eq!(body["decks"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn get_unknown_room_is_404() {
    let (app, _registry) = app();

    let (status, body) = send(app, get("/api/rooms/nowhere")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn list_decks_returns_every_catalog() {
    let (app, _registry) = app();

    let (status, body) = send(app, get("/api/decks")).await;

    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body["decks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|deck| deck["name"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        vec!["Fibonacci", "Hours", "Modified Fibonacci", "T-Shirt Sizes"]
    );
}
