//! In-memory participant for testing.
//!
//! Records every message a room delivers so tests can assert on what each
//! participant saw, in order.

use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;

use crate::domain::foundation::ParticipantId;
use crate::domain::session::{SessionMessage, Snapshot};
use crate::ports::Participant;

/// Participant that keeps its messages instead of sending them anywhere.
///
/// # Example
///
/// ```ignore
/// let alice = Arc::new(InMemoryParticipant::named(1, "Alice"));
/// game.register_participant(alice.clone()).await;
///
/// assert_eq!(alice.updates().len(), 1);
/// ```
pub struct InMemoryParticipant {
    id: ParticipantId,
    name: Mutex<String>,
    received: Mutex<Vec<SessionMessage>>,
    closed: AtomicUsize,
}

impl InMemoryParticipant {
    /// Creates a participant with an empty display name.
    pub fn new(id: u64) -> Self {
        Self::named(id, "")
    }

    /// Creates a participant with the given display name.
    pub fn named(id: u64, name: impl Into<String>) -> Self {
        Self {
            id: ParticipantId::new(id),
            name: Mutex::new(name.into()),
            received: Mutex::new(Vec::new()),
            closed: AtomicUsize::new(0),
        }
    }

    pub fn set_name(&self, name: impl Into<String>) {
        *self.name.lock() = name.into();
    }

    // === Test Helpers ===

    /// Every message delivered so far.
    pub fn messages(&self) -> Vec<SessionMessage> {
        self.received.lock().clone()
    }

    /// Only the snapshots, in delivery order.
    pub fn updates(&self) -> Vec<Snapshot> {
        self.received
            .lock()
            .iter()
            .filter_map(|m| match m {
                SessionMessage::Update(snapshot) => Some(snapshot.clone()),
                SessionMessage::Error(_) => None,
            })
            .collect()
    }

    /// Only the error texts, in delivery order.
    pub fn errors(&self) -> Vec<String> {
        self.received
            .lock()
            .iter()
            .filter_map(|m| match m {
                SessionMessage::Error(notice) => Some(notice.error.clone()),
                SessionMessage::Update(_) => None,
            })
            .collect()
    }

    /// How many times the room closed this participant's connection.
    pub fn close_count(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }
}

impl Participant for InMemoryParticipant {
    fn deliver(&self, message: SessionMessage) {
        self.received.lock().push(message);
    }

    fn id(&self) -> ParticipantId {
        self.id
    }

    fn display_name(&self) -> String {
        self.name.lock().clone()
    }

    fn remote_address(&self) -> String {
        format!("1.2.3.4:{}", self.id)
    }

    fn close_connection(&self) {
        self.closed.fetch_add(1, Ordering::SeqCst);
    }
}
