//! WebSocket transport for room participants.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────┐   ClientRequest    ┌─────────────┐   submit / reveal / ...   ┌──────┐
//! │   browser     │ ─────────────────▶ │  read_pump  │ ────────────────────────▶ │ Game │
//! │               │                    └─────────────┘                            └──────┘
//! │               │   SessionMessage   ┌─────────────┐   bounded queue (deliver)     │
//! │               │ ◀───────────────── │ write_pump  │ ◀─────────────────────────────┘
//! └───────────────┘   + pings          └─────────────┘
//! ```
//!
//! # Components
//!
//! - [`messages`] - Inbound request protocol
//! - [`connection`] - The [`Participant`](crate::ports::Participant) a socket registers as
//! - [`handler`] - Axum upgrade handler and the read/write pumps

pub mod connection;
pub mod handler;
pub mod messages;

pub use connection::{Connection, ConnectionError, DEFAULT_OUTBOUND_CAPACITY};
pub use handler::{
    authorize, dispatch_request, websocket_router, ws_handler, JoinParams, WebSocketState,
    PING_PERIOD, PONG_WAIT, READ_LIMIT, WRITE_WAIT,
};
pub use messages::{ClientAction, ClientRequest};
