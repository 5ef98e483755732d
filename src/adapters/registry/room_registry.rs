//! Case-insensitive lookup of live rooms.
//!
//! The registry creates rooms on request and removes them when they hand
//! themselves back through the completion channel.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::{Mutex, RwLock};

use crate::domain::foundation::validate_room_name;
use crate::domain::session::{Game, SessionError, DEFAULT_TEARDOWN_GRACE};
use crate::ports::{completion_channel, CompletionReceiver, CompletionSender};

/// Diagnostic view of one room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSummary {
    pub room: String,
    pub participants: usize,
    pub created_at: DateTime<Utc>,
}

/// Owns every live [`Game`] keyed by lower-cased room name.
///
/// # Thread Safety
///
/// Lookups vastly outnumber creations and removals, so the map sits behind a
/// `RwLock`. Creation happens under the write lock, so two requests for the
/// same new room always end up with the same game.
pub struct RoomRegistry {
    rooms: RwLock<HashMap<String, Arc<Game>>>,
    completion: CompletionSender,
    finished: Mutex<Option<CompletionReceiver>>,
    teardown_grace: Duration,
}

impl RoomRegistry {
    /// Create a registry whose rooms wait `teardown_grace` before removal.
    pub fn new(teardown_grace: Duration) -> Self {
        let (completion, finished) = completion_channel();
        Self {
            rooms: RwLock::new(HashMap::new()),
            completion,
            finished: Mutex::new(Some(finished)),
            teardown_grace,
        }
    }

    /// Create with the default grace period (10 seconds).
    pub fn with_default_grace() -> Self {
        Self::new(DEFAULT_TEARDOWN_GRACE)
    }

    fn room_key(room: &str) -> String {
        room.to_lowercase()
    }

    /// Returns the room, creating it with `default_catalog` if it does not exist.
    ///
    /// `default_catalog` is ignored when the room already exists.
    pub async fn create_if_absent(
        &self,
        room: &str,
        default_catalog: &str,
    ) -> Result<Arc<Game>, SessionError> {
        validate_room_name(room)?;

        let mut rooms = self.rooms.write().await;
        if let Some(game) = rooms.get(&Self::room_key(room)) {
            return Ok(game.clone());
        }

        let game = Game::with_teardown_grace(
            room,
            default_catalog,
            Some(self.completion.clone()),
            self.teardown_grace,
        )?;
        rooms.insert(Self::room_key(room), game.clone());

        tracing::info!(room = %game.room(), token = %game.token(), "room created");
        Ok(game)
    }

    /// Looks a room up, ignoring case.
    pub async fn get(&self, room: &str) -> Option<Arc<Game>> {
        self.rooms.read().await.get(&Self::room_key(room)).cloned()
    }

    pub async fn room_count(&self) -> usize {
        self.rooms.read().await.len()
    }

    /// Removes `game` if it is still the one registered under its name and
    /// nobody has joined it since it signalled.
    ///
    /// Returns whether the room was removed.
    pub async fn remove_finished(&self, game: &Arc<Game>) -> bool {
        let key = Self::room_key(game.room());
        let mut rooms = self.rooms.write().await;

        match rooms.get(&key) {
            Some(current) if Arc::ptr_eq(current, game) => {}
            _ => {
                tracing::debug!(room = %game.room(), "finished room already replaced");
                return false;
            }
        }

        if game.participant_count().await > 0 {
            tracing::debug!(room = %game.room(), "finished room was rejoined, keeping it");
            return false;
        }

        rooms.remove(&key);
        tracing::info!(room = %game.room(), token = %game.token(), "room destroyed");
        true
    }

    /// Removes rooms as they report themselves finished.
    ///
    /// Runs for the life of the registry. Only the first call listens; later
    /// calls return immediately.
    pub async fn run_teardown_listener(&self) {
        let Some(mut finished) = self.finished.lock().await.take() else {
            tracing::warn!("teardown listener already running");
            return;
        };

        while let Some(game) = finished.recv().await {
            self.remove_finished(&game).await;
        }
    }

    /// Every live room with its participant count, ordered by key.
    pub async fn active_rooms(&self) -> Vec<RoomSummary> {
        let mut games: Vec<(String, Arc<Game>)> = self
            .rooms
            .read()
            .await
            .iter()
            .map(|(key, game)| (key.clone(), game.clone()))
            .collect();
        games.sort_by(|a, b| a.0.cmp(&b.0));

        let mut summaries = Vec::with_capacity(games.len());
        for (_, game) in games {
            summaries.push(RoomSummary {
                room: game.room().to_string(),
                participants: game.participant_count().await,
                created_at: game.created_at(),
            });
        }
        summaries
    }

    /// Writes the active room listing to the log.
    pub async fn log_active_rooms(&self) {
        let rooms = self.active_rooms().await;
        if rooms.is_empty() {
            tracing::info!("no active rooms");
            return;
        }

        for (i, summary) in rooms.iter().enumerate() {
            tracing::info!(
                room = %summary.room,
                clients = summary.participants,
                created_at = %summary.created_at.to_rfc3339(),
                "room #{}",
                i + 1
            );
        }
    }
}

impl Default for RoomRegistry {
    fn default() -> Self {
        Self::with_default_grace()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryParticipant;

    #[tokio::test]
    async fn create_if_absent_is_case_insensitive() {
        let registry = RoomRegistry::default();

        let first = registry.create_if_absent("Team Room", "").await.unwrap();
        let second = registry.create_if_absent("team room", "Hours").await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.room(), "Team Room");
        assert_eq!(second.catalog().await.name(), "Modified Fibonacci");
        assert_eq!(registry.room_count().await, 1);
    }

    #[tokio::test]
    async fn create_if_absent_rejects_invalid_names() {
        let registry = RoomRegistry::default();

        let result = registry.create_if_absent("Room name is too long", "").await;

        assert!(matches!(result, Err(SessionError::InvalidRoomName(_))));
        assert_eq!(registry.room_count().await, 0);
    }

    #[tokio::test]
    async fn get_finds_rooms_ignoring_case() {
        let registry = RoomRegistry::default();
        registry.create_if_absent("Alpha", "").await.unwrap();

        assert!(registry.get("ALPHA").await.is_some());
        assert!(registry.get("beta").await.is_none());
    }

    #[tokio::test]
    async fn remove_finished_ignores_replaced_room() {
        let registry = RoomRegistry::default();
        let current = registry.create_if_absent("Alpha", "").await.unwrap();
        let impostor = Game::new("alpha", "", None).unwrap();

        assert!(!registry.remove_finished(&impostor).await);
        assert!(registry.get("alpha").await.is_some());

        assert!(registry.remove_finished(&current).await);
        assert!(registry.get("alpha").await.is_none());
    }

    #[tokio::test]
    async fn remove_finished_keeps_rejoined_room() {
        let registry = RoomRegistry::default();
        let game = registry.create_if_absent("Alpha", "").await.unwrap();
        game.register_participant(Arc::new(InMemoryParticipant::new(1)))
            .await;

        assert!(!registry.remove_finished(&game).await);
        assert_eq!(registry.room_count().await, 1);
    }

    #[tokio::test]
    async fn active_rooms_are_sorted_with_counts() {
        let registry = RoomRegistry::default();
        let beta = registry.create_if_absent("beta", "").await.unwrap();
        registry.create_if_absent("Alpha", "").await.unwrap();
        beta.register_participant(Arc::new(InMemoryParticipant::new(1)))
            .await;

        let rooms = registry.active_rooms().await;

        assert_eq!(rooms.len(), 2);
        assert_eq!(rooms[0].room, "Alpha");
        assert_eq!(rooms[0].participants, 0);
        assert_eq!(rooms[1].room, "beta");
        assert_eq!(rooms[1].participants, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn teardown_listener_removes_empty_rooms() {
        let registry = Arc::new(RoomRegistry::new(Duration::from_millis(10)));
        let listener = {
            let registry = registry.clone();
            tokio::spawn(async move { registry.run_teardown_listener().await })
        };

        let game = registry.create_if_absent("Alpha", "").await.unwrap();
        let participant = Arc::new(InMemoryParticipant::new(1));
        game.register_participant(participant.clone()).await;
        game.unregister_participant(participant.as_ref()).await;

        tokio::time::sleep(Duration::from_millis(5)).await;
        assert_eq!(registry.room_count().await, 1);

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(registry.room_count().await, 0);

        listener.abort();
    }
}
