//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the session engine to the outside world:
//! - `http` - REST endpoints and router assembly
//! - `websocket` - Live participant connections
//! - `registry` - Lookup of live rooms and their teardown
//! - `names` - Friendly generated display names
//! - `memory` - In-memory participants for tests

pub mod http;
pub mod memory;
pub mod names;
pub mod registry;
pub mod websocket;

pub use http::build_router;
pub use memory::InMemoryParticipant;
pub use registry::{RoomRegistry, RoomSummary};
pub use websocket::{Connection, WebSocketState};
