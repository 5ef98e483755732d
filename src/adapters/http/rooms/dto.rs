//! Data Transfer Objects for room endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::catalog::Catalog;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to create (or join) a room.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRoomRequest {
    pub room: String,
    /// Catalog for a new room. Ignored when the room already exists.
    #[serde(default)]
    pub deck: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Where a client should connect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateRoomResponse {
    pub room: String,
    pub token: String,
}

/// Everything a client needs before opening the socket.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomResponse {
    pub room: String,
    pub token: String,
    pub deck: &'static str,
    pub topic_max_length: usize,
    pub username_max_length: usize,
    pub decks: &'static [&'static Catalog],
}

#[derive(Debug, Clone, Serialize)]
pub struct DeckListResponse {
    pub decks: &'static [&'static Catalog],
}

/// Error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn not_found(resource_type: &str, id: &str) -> Self {
        Self::new("NOT_FOUND", format!("{} not found: {}", resource_type, id))
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_room_request_deck_is_optional() {
        let request: CreateRoomRequest = serde_json::from_str(r#"{"room":"alpha"}"#).unwrap();
        assert_eq!(request.room, "alpha");
        assert!(request.deck.is_none());
    }

    #[test]
    fn room_response_uses_camel_case() {
        let response = RoomResponse {
            room: "alpha".to_string(),
            token: "t".to_string(),
            deck: "Hours",
            topic_max_length: 100,
            username_max_length: 25,
            decks: Catalog::all(),
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["topicMaxLength"], 100);
        assert_eq!(json["usernameMaxLength"], 25);
        assert_eq!(json["decks"][0]["name"], "Fibonacci");
    }

    #[test]
    fn error_response_not_found_creates_correctly() {
        let error = ErrorResponse::not_found("Room", "alpha");
        assert_eq!(error.code, "NOT_FOUND");
        assert!(error.message.contains("alpha"));
    }
}
