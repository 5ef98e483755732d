//! Participant port - what a room needs from a connected participant.
//!
//! The room never sees sockets. The transport implements this trait for each
//! connection; tests implement it with an in-memory recorder.
//!
//! All methods are synchronous and must not block: the room calls
//! [`Participant::deliver`] while holding a read lock over its participant set.

use crate::domain::foundation::ParticipantId;
use crate::domain::session::SessionMessage;

/// Handle through which a room identifies, messages and disconnects one participant.
pub trait Participant: Send + Sync {
    /// Queue a message for delivery. Failures are the implementation's concern.
    fn deliver(&self, message: SessionMessage);

    /// Identifier assigned by the room at connect time.
    fn id(&self) -> ParticipantId;

    /// Current display name.
    fn display_name(&self) -> String;

    /// Remote address, for diagnostics only.
    fn remote_address(&self) -> String;

    /// Stop delivering and close the underlying connection.
    fn close_connection(&self);
}
