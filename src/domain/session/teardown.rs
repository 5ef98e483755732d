//! Deferred removal of an empty room.
//!
//! Each time a room empties, the generation is bumped and a check is
//! scheduled with the new value. When the check fires it compares the value it
//! captured against the current one; any later emptying makes the earlier
//! check stale, so there is nothing to cancel.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Grace period between a room emptying and its removal.
pub const DEFAULT_TEARDOWN_GRACE: Duration = Duration::from_secs(10);

/// Fencing counter plus grace period.
#[derive(Debug)]
pub(crate) struct Teardown {
    generation: AtomicU64,
    grace: Duration,
}

impl Teardown {
    pub(crate) fn new(grace: Duration) -> Self {
        Self {
            generation: AtomicU64::new(0),
            grace,
        }
    }

    /// Starts a new generation and returns it.
    pub(crate) fn arm(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Whether `generation` is still the latest armed one.
    pub(crate) fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    pub(crate) fn grace(&self) -> Duration {
        self.grace
    }
}
