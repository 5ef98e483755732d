//! Session-specific error types.

use thiserror::Error;

use crate::domain::foundation::ValidationError;

/// Errors raised while creating a session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The requested room name breaks the naming rules.
    #[error("room name is invalid: {0}")]
    InvalidRoomName(#[from] ValidationError),

    /// The OS random source could not produce a token.
    #[error("could not generate session token: {0}")]
    TokenGeneration(String),
}

impl SessionError {
    pub fn token_generation(message: impl Into<String>) -> Self {
        SessionError::TokenGeneration(message.into())
    }

    /// Stable machine-readable code for API responses.
    pub fn code(&self) -> &'static str {
        match self {
            SessionError::InvalidRoomName(_) => "INVALID_ROOM_NAME",
            SessionError::TokenGeneration(_) => "INTERNAL_ERROR",
        }
    }
}
