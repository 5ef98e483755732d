//! Completion signal - how a room tells its registry it can be removed.
//!
//! The registry holds the single receiver. A room sends itself once it has
//! stayed empty for a full grace period.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::domain::session::Game;

/// Sending half handed to every room at creation.
pub type CompletionSender = mpsc::UnboundedSender<Arc<Game>>;

/// Receiving half owned by the registry.
pub type CompletionReceiver = mpsc::UnboundedReceiver<Arc<Game>>;

/// Creates a connected completion channel.
pub fn completion_channel() -> (CompletionSender, CompletionReceiver) {
    mpsc::unbounded_channel()
}
