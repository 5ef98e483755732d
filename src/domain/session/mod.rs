//! Session domain module.
//!
//! A session (room) tracks who is connected, what each of them picked for the
//! current round, whether picks are visible, the topic and the active catalog.
//! Every mutation ends in a broadcast of a fresh [`Snapshot`].
//!
//! Rooms that stay empty for a grace period hand themselves to the registry
//! through the completion channel.

mod broadcast;
mod errors;
mod game;
mod messages;
mod teardown;

pub use errors::SessionError;
pub use game::Game;
pub use messages::{ErrorNotice, SessionMessage, Snapshot, SubmissionView};
pub use teardown::DEFAULT_TEARDOWN_GRACE;
