//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, validation rules and error types
//! that form the vocabulary of the estimation domain.

mod errors;
mod ids;
pub mod text;

pub use errors::ValidationError;
pub use ids::ParticipantId;
pub use text::{
    room_name_is_valid, validate_display_name, validate_room_name, validate_topic,
    DISPLAY_NAME_MAX_LENGTH, ROOM_NAME_MAX_LENGTH, ROOM_NAME_RULE, TOPIC_MAX_LENGTH,
};
