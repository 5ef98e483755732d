//! The room engine: participants, their hidden submissions and the round state.
//!
//! # Locking
//!
//! State is split into groups, each behind its own lock:
//!
//! ```text
//! participants  RwLock<ParticipantSet>
//! round         RwLock<Round>          (catalog, submissions, revealed)
//! topic         RwLock<String>
//! teardown      AtomicU64 generation
//! ids           AtomicU64 counter
//! ```
//!
//! When more than one lock is needed they are always taken in the order
//! participants, round, topic. Messages are only ever queued while the
//! participant set is read-locked; [`Participant::deliver`] never blocks.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Utc};
use rand::rngs::OsRng;
use rand::TryRngCore;
use tokio::sync::RwLock;

use crate::domain::catalog::Catalog;
use crate::domain::foundation::{validate_room_name, validate_topic, ParticipantId};
use crate::ports::{CompletionSender, Participant};

use super::broadcast::{build_snapshot, dispatch, ParticipantSet};
use super::errors::SessionError;
use super::messages::{ErrorNotice, SessionMessage};
use super::teardown::{Teardown, DEFAULT_TEARDOWN_GRACE};

/// Number of random bytes behind a session token (40 base64 characters).
const TOKEN_BYTES: usize = 30;

/// Catalog plus the submissions made against it.
#[derive(Debug)]
pub(crate) struct Round {
    pub(crate) catalog: &'static Catalog,
    pub(crate) submissions: HashMap<ParticipantId, usize>,
    pub(crate) revealed: bool,
}

impl Round {
    pub(crate) fn new(catalog: &'static Catalog) -> Self {
        Self {
            catalog,
            submissions: HashMap::new(),
            revealed: false,
        }
    }

    fn clear(&mut self) {
        self.submissions.clear();
        self.revealed = false;
    }
}

enum Rejection {
    OutOfSync,
    InvalidValue,
}

/// One estimation room.
pub struct Game {
    room: String,
    token: String,
    created_at: DateTime<Utc>,

    participants: RwLock<ParticipantSet>,
    round: RwLock<Round>,
    topic: RwLock<String>,

    teardown: Teardown,
    last_participant_id: AtomicU64,
    completion: Option<CompletionSender>,
    me: Weak<Game>,
}

impl Game {
    /// Creates a room with the default teardown grace period.
    ///
    /// An unknown `default_catalog` silently falls back to the standard one.
    /// `completion` receives the room once it has stayed empty long enough;
    /// pass `None` when nothing needs to be told.
    pub fn new(
        room: &str,
        default_catalog: &str,
        completion: Option<CompletionSender>,
    ) -> Result<Arc<Game>, SessionError> {
        Self::with_teardown_grace(room, default_catalog, completion, DEFAULT_TEARDOWN_GRACE)
    }

    /// Creates a room with an explicit teardown grace period.
    pub fn with_teardown_grace(
        room: &str,
        default_catalog: &str,
        completion: Option<CompletionSender>,
        grace: Duration,
    ) -> Result<Arc<Game>, SessionError> {
        validate_room_name(room)?;
        let token = generate_token()?;
        let catalog = Catalog::resolve(default_catalog);

        Ok(Arc::new_cyclic(|me| Game {
            room: room.to_string(),
            token,
            created_at: Utc::now(),
            participants: RwLock::new(HashMap::new()),
            round: RwLock::new(Round::new(catalog)),
            topic: RwLock::new(format!("{} Estimation Session", room)),
            teardown: Teardown::new(grace),
            last_participant_id: AtomicU64::new(0),
            completion,
            me: me.clone(),
        }))
    }

    pub fn room(&self) -> &str {
        &self.room
    }

    /// Token a connection must present; a recreated room gets a new one.
    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the next participant identifier, starting at 1.
    pub fn next_participant_id(&self) -> ParticipantId {
        ParticipantId::new(self.last_participant_id.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Adds a participant and broadcasts the new state.
    pub async fn register_participant(&self, participant: Arc<dyn Participant>) {
        let id = participant.id();
        let address = participant.remote_address();
        self.participants.write().await.insert(id, participant);

        tracing::info!(room = %self.room, client = %address, participant = %id, "registered client");

        self.broadcast_update().await;
    }

    /// Removes a participant and closes its connection.
    ///
    /// If it held the only submission the round is reset. If the room is now
    /// empty, nothing is broadcast and the teardown check is armed instead.
    pub async fn unregister_participant(&self, participant: &dyn Participant) {
        let id = participant.id();
        let (remaining, should_reset) = {
            let mut participants = self.participants.write().await;
            let mut round = self.round.write().await;
            participants.remove(&id);
            let submitted_before = round.submissions.len();
            let found = round.submissions.remove(&id).is_some();
            let sole_submitter = found && submitted_before == 1;
            if participants.is_empty() || sole_submitter {
                round.clear();
            }
            (participants.len(), sole_submitter)
        };

        participant.close_connection();
        tracing::info!(
            room = %self.room,
            client = %participant.remote_address(),
            participant = %id,
            "unregistered client"
        );

        if remaining == 0 {
            self.schedule_teardown();
            return;
        }

        if should_reset {
            self.broadcast(true).await;
            return;
        }

        self.broadcast_update().await;
    }

    /// Records `participant`'s pick of `index` in the catalog named `catalog_name`.
    ///
    /// A stale catalog name or an out-of-range index is reported to the
    /// participant alone and changes nothing. Once every registered
    /// participant has submitted the round is revealed.
    pub async fn submit_value(&self, participant: &dyn Participant, index: usize, catalog_name: &str) {
        let id = participant.id();
        let outcome = {
            let participants = self.participants.read().await;
            if !participants.contains_key(&id) {
                tracing::debug!(room = %self.room, participant = %id, "ignoring submission from unregistered participant");
                return;
            }

            let mut round = self.round.write().await;
            if catalog_name != round.catalog.name() {
                tracing::warn!(
                    room = %self.room,
                    client = %participant.remote_address(),
                    "client is out of sync: got {}, expects {}",
                    catalog_name,
                    round.catalog.name()
                );
                Err(Rejection::OutOfSync)
            } else if !round.catalog.contains_index(index) {
                tracing::warn!(
                    room = %self.room,
                    client = %participant.remote_address(),
                    "client submitted an invalid card ({}) for deck \"{}\"",
                    index,
                    round.catalog.name()
                );
                Err(Rejection::InvalidValue)
            } else {
                round.submissions.insert(id, index);
                if round.submissions.len() == participants.len() {
                    round.revealed = true;
                }
                Ok(())
            }
        };

        match outcome {
            Ok(()) => self.broadcast_update().await,
            Err(Rejection::OutOfSync) => {
                participant.deliver(SessionMessage::Error(ErrorNotice::out_of_sync()))
            }
            Err(Rejection::InvalidValue) => {
                participant.deliver(SessionMessage::Error(ErrorNotice::invalid_value()))
            }
        }
    }

    /// Makes all submissions visible.
    pub async fn reveal(&self) {
        self.round.write().await.revealed = true;
        self.broadcast_update().await;
    }

    /// Starts a new round: clears submissions and hides them.
    pub async fn reset(&self) {
        self.round.write().await.clear();
        self.broadcast(true).await;
    }

    /// Changes the topic. Invalid or unchanged topics are ignored.
    pub async fn set_topic(&self, topic: &str) {
        if validate_topic(topic).is_err() {
            return;
        }

        let changed = {
            let mut current = self.topic.write().await;
            if *current == topic {
                false
            } else {
                *current = topic.to_string();
                true
            }
        };

        if changed {
            self.broadcast_update().await;
        }
    }

    /// Switches catalogs. Any switch resets the round.
    pub async fn set_catalog(&self, catalog: &'static Catalog) {
        {
            let mut round = self.round.write().await;
            if round.catalog.name() == catalog.name() {
                return;
            }
            round.catalog = catalog;
            round.clear();
        }

        tracing::info!(room = %self.room, deck = %catalog.name(), "deck changed");
        self.broadcast(true).await;
    }

    pub async fn topic(&self) -> String {
        self.topic.read().await.clone()
    }

    pub async fn catalog(&self) -> &'static Catalog {
        self.round.read().await.catalog
    }

    pub async fn is_revealed(&self) -> bool {
        self.round.read().await.revealed
    }

    /// Current submissions as participant id to value index.
    pub async fn submissions(&self) -> HashMap<ParticipantId, usize> {
        self.round.read().await.submissions.clone()
    }

    pub async fn participant_count(&self) -> usize {
        self.participants.read().await.len()
    }

    /// Sends every participant the current state.
    pub async fn broadcast_update(&self) {
        self.broadcast(false).await;
    }

    /// Sends the current state to `participant` alone.
    ///
    /// Used to put a client back in sync after one of its requests was
    /// rejected. Unregistered participants are ignored.
    pub async fn send_update_to(&self, participant: &dyn Participant) {
        let participants = self.participants.read().await;
        if !participants.contains_key(&participant.id()) {
            return;
        }
        let snapshot = {
            let round = self.round.read().await;
            let topic = self.topic.read().await.clone();
            build_snapshot(topic, &participants, &round, false)
        };
        participant.deliver(SessionMessage::Update(
            snapshot.for_recipient(participant.display_name()),
        ));
    }

    async fn broadcast(&self, is_reset: bool) {
        let participants = self.participants.read().await;
        let snapshot = {
            let round = self.round.read().await;
            let topic = self.topic.read().await.clone();
            build_snapshot(topic, &participants, &round, is_reset)
        };
        dispatch(&participants, &snapshot);
    }

    fn schedule_teardown(&self) {
        let generation = self.teardown.arm();
        let Some(game) = self.me.upgrade() else {
            return;
        };
        let grace = self.teardown.grace();

        tracing::debug!(room = %self.room, generation, ?grace, "room empty, teardown scheduled");

        tokio::spawn(async move {
            tokio::time::sleep(grace).await;
            game.complete_if_idle(generation).await;
        });
    }

    async fn complete_if_idle(self: Arc<Self>, generation: u64) {
        if !self.teardown.is_current(generation) {
            tracing::debug!(room = %self.room, generation, "stale teardown check");
            return;
        }

        let participants = self.participants.read().await;
        if !participants.is_empty() {
            return;
        }

        if let Some(completion) = &self.completion {
            if completion.send(self.clone()).is_err() {
                tracing::warn!(room = %self.room, "registry stopped listening for finished rooms");
            }
        }
    }
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("room", &self.room)
            .field("created_at", &self.created_at)
            .finish_non_exhaustive()
    }
}

fn generate_token() -> Result<String, SessionError> {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| SessionError::token_generation(e.to_string()))?;
    Ok(STANDARD.encode(bytes))
}
