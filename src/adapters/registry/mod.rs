//! Room registry - the live set of rooms.
//!
//! - [`RoomRegistry`] - case-insensitive room lookup, creation and removal
//! - [`RoomSummary`] - per-room diagnostic row

mod room_registry;

pub use room_registry::{RoomRegistry, RoomSummary};
