//! HTTP adapter for room endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    CreateRoomRequest, CreateRoomResponse, DeckListResponse, ErrorResponse, RoomResponse,
};
pub use handlers::RoomHandlers;
pub use routes::room_routes;
