//! HTTP handlers for room endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::registry::RoomRegistry;
use crate::domain::catalog::Catalog;
use crate::domain::foundation::{DISPLAY_NAME_MAX_LENGTH, ROOM_NAME_RULE, TOPIC_MAX_LENGTH};
use crate::domain::session::SessionError;

use super::dto::{
    CreateRoomRequest, CreateRoomResponse, DeckListResponse, ErrorResponse, RoomResponse,
};

/// State shared by room handlers.
#[derive(Clone)]
pub struct RoomHandlers {
    registry: Arc<RoomRegistry>,
    default_deck: String,
}

impl RoomHandlers {
    pub fn new(registry: Arc<RoomRegistry>, default_deck: impl Into<String>) -> Self {
        Self {
            registry,
            default_deck: default_deck.into(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/rooms - Create a room, or return the existing one
pub async fn create_room(
    State(handlers): State<RoomHandlers>,
    Json(request): Json<CreateRoomRequest>,
) -> Response {
    let deck = request.deck.as_deref().unwrap_or(&handlers.default_deck);

    match handlers.registry.create_if_absent(&request.room, deck).await {
        Ok(game) => {
            let response = CreateRoomResponse {
                room: game.room().to_string(),
                token: game.token().to_string(),
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => handle_session_error(e),
    }
}

/// GET /api/rooms/:room - Connection details for a live room
pub async fn get_room(
    State(handlers): State<RoomHandlers>,
    Path(room): Path<String>,
) -> Response {
    let Some(game) = handlers.registry.get(&room).await else {
        return (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Room", &room)),
        )
            .into_response();
    };

    let response = RoomResponse {
        room: game.room().to_string(),
        token: game.token().to_string(),
        deck: game.catalog().await.name(),
        topic_max_length: TOPIC_MAX_LENGTH,
        username_max_length: DISPLAY_NAME_MAX_LENGTH,
        decks: Catalog::all(),
    };
    (StatusCode::OK, Json(response)).into_response()
}

/// GET /api/decks - Every built-in catalog
pub async fn list_decks() -> Json<DeckListResponse> {
    Json(DeckListResponse {
        decks: Catalog::all(),
    })
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn handle_session_error(error: SessionError) -> Response {
    match error {
        SessionError::InvalidRoomName(_) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(error.code(), ROOM_NAME_RULE)),
        )
            .into_response(),
        SessionError::TokenGeneration(ref reason) => {
            tracing::error!("room creation failed: {}", reason);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal("could not create room")),
            )
                .into_response()
        }
    }
}
