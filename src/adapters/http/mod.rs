//! HTTP adapters - REST API and router assembly.
//!
//! - `rooms` - create and look up rooms, list decks
//! - [`build_router`] - mounts rooms, the WebSocket endpoint and health check
//!   behind tracing and CORS layers

pub mod rooms;

pub use rooms::{room_routes, RoomHandlers};

use std::sync::Arc;

use axum::{routing::get, Json, Router};
use http::HeaderValue;
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::adapters::registry::RoomRegistry;
use crate::adapters::websocket::{websocket_router, WebSocketState};
use crate::config::{ServerConfig, SessionConfig};

/// Builds the full application router.
pub fn build_router(
    registry: Arc<RoomRegistry>,
    server: &ServerConfig,
    session: &SessionConfig,
) -> Router {
    let rooms = RoomHandlers::new(registry.clone(), session.default_deck.clone());
    let websocket =
        WebSocketState::new(registry).with_outbound_capacity(session.outbound_queue_capacity);

    Router::new()
        .nest("/api", room_routes(rooms))
        .merge(websocket_router(websocket))
        .route("/health", get(health))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(&server.cors_origins_list())),
        )
}

/// Allows the configured origins, or any origin when none are configured.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "ignoring malformed CORS origin");
                None
            }
        })
        .collect();

    if allowed.is_empty() {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(allowed))
            .allow_methods(tower_http::cors::Any)
            .allow_headers(tower_http::cors::Any)
    }
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
