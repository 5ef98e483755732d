//! HTTP routes for room endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{create_room, get_room, list_decks, RoomHandlers};

/// Creates the room router, mounted under `/api`.
pub fn room_routes(handlers: RoomHandlers) -> Router {
    Router::new()
        .route("/rooms", post(create_room))
        .route("/rooms/:room", get(get_room))
        .route("/decks", get(list_decks))
        .with_state(handlers)
}
