//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a participant within one room.
///
/// Assigned by the room itself, strictly increasing and never reused while
/// the room lives. Two rooms may hand out the same value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(u64);

impl ParticipantId {
    /// Wraps a raw identifier value.
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw identifier value.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ParticipantId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn participant_ids_order_by_value() {
        assert!(ParticipantId::new(1) < ParticipantId::new(2));
        assert_eq!(ParticipantId::from(7).value(), 7);
    }

    #[test]
    fn participant_id_serializes_as_plain_number() {
        let json = serde_json::to_string(&ParticipantId::new(42)).unwrap();
        assert_eq!(json, "42");
    }
}
