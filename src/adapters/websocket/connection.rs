//! One participant's WebSocket connection.
//!
//! Rooms deliver to a connection through a bounded queue. A dedicated writer
//! task drains the queue onto the socket, so a slow client never blocks the
//! room that is broadcasting to it.

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use thiserror::Error;
use tokio::sync::mpsc::{self, error::TrySendError};

use crate::domain::foundation::{validate_display_name, ParticipantId, ValidationError};
use crate::domain::session::{Game, SessionMessage};
use crate::ports::Participant;

/// Default number of messages queued per connection before new ones are dropped.
pub const DEFAULT_OUTBOUND_CAPACITY: usize = 256;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConnectionError {
    #[error("invalid display name: {0}")]
    InvalidDisplayName(#[from] ValidationError),
}

/// A participant attached to one room through a WebSocket.
pub struct Connection {
    id: ParticipantId,
    name: RwLock<String>,
    remote_address: String,
    game: Arc<Game>,
    outbound: Mutex<Option<mpsc::Sender<SessionMessage>>>,
}

impl Connection {
    /// Creates a connection and the receiving end of its outbound queue.
    ///
    /// The receiver yields `None` once the room closes the connection.
    pub fn new(
        game: Arc<Game>,
        id: ParticipantId,
        name: impl Into<String>,
        remote_address: impl Into<String>,
        capacity: usize,
    ) -> (Self, mpsc::Receiver<SessionMessage>) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        let connection = Self {
            id,
            name: RwLock::new(name.into()),
            remote_address: remote_address.into(),
            game,
            outbound: Mutex::new(Some(sender)),
        };
        (connection, receiver)
    }

    /// The room this connection joined.
    pub fn game(&self) -> &Arc<Game> {
        &self.game
    }

    /// Renames the participant. The old name is kept if `name` is invalid.
    pub fn set_name(&self, name: &str) -> Result<(), ConnectionError> {
        validate_display_name(name)?;
        *self.name.write() = name.to_string();
        Ok(())
    }

    pub fn is_closed(&self) -> bool {
        self.outbound.lock().is_none()
    }
}

impl Participant for Connection {
    fn deliver(&self, message: SessionMessage) {
        let outbound = self.outbound.lock();
        let Some(sender) = outbound.as_ref() else {
            tracing::debug!(client = %self.remote_address, "dropping message for closed connection");
            return;
        };

        match sender.try_send(message) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                tracing::warn!(
                    client = %self.remote_address,
                    room = %self.game.room(),
                    "outbound queue full, dropping message"
                );
            }
            Err(TrySendError::Closed(_)) => {
                tracing::debug!(client = %self.remote_address, "writer already gone");
            }
        }
    }

    fn id(&self) -> ParticipantId {
        self.id
    }

    fn display_name(&self) -> String {
        self.name.read().clone()
    }

    fn remote_address(&self) -> String {
        self.remote_address.clone()
    }

    fn close_connection(&self) {
        if self.outbound.lock().take().is_some() {
            tracing::debug!(client = %self.remote_address, "closing outbound queue");
        }
    }
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("id", &self.id)
            .field("name", &*self.name.read())
            .field("remote_address", &self.remote_address)
            .field("room", &self.game.room())
            .finish()
    }
}
