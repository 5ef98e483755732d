//! Messages a room sends to its participants.
//!
//! - `Update` - full room snapshot, personalized with the recipient's name
//! - `Error` - sent only to the participant whose request was rejected

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::foundation::ParticipantId;

/// Anything the room hands to [`Participant::deliver`](crate::ports::Participant::deliver).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SessionMessage {
    Update(Snapshot),
    Error(ErrorNotice),
}

/// Immutable view of a room at one point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub topic: String,
    pub participants: BTreeMap<ParticipantId, String>,
    pub submissions: Vec<SubmissionView>,
    pub catalog_name: String,
    pub revealed: bool,
    /// Set when this snapshot starts a new round rather than updating one.
    pub is_reset: bool,
    pub recipient_display_name: String,
}

impl Snapshot {
    /// Returns a copy addressed to `display_name`.
    pub fn for_recipient(&self, display_name: impl Into<String>) -> Snapshot {
        Snapshot {
            recipient_display_name: display_name.into(),
            ..self.clone()
        }
    }
}

/// One participant's submission as seen by everyone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionView {
    pub value_index: usize,
    pub participant_id: ParticipantId,
    pub participant_name: String,
}

/// Error shown to a single participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorNotice {
    pub error: String,
}

impl ErrorNotice {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }

    /// The participant submitted against a catalog the room no longer uses.
    pub fn out_of_sync() -> Self {
        Self::new("Your game is out of sync. Please refresh your browser.")
    }

    /// The participant submitted an index outside the active catalog.
    pub fn invalid_value() -> Self {
        Self::new("Your game had an invalid card. Please refresh your browser.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> Snapshot {
        let mut participants = BTreeMap::new();
        participants.insert(ParticipantId::new(1), "Calm Otter".to_string());
        participants.insert(ParticipantId::new(2), "Swift Yak".to_string());
        Snapshot {
            topic: "Test Estimation Session".to_string(),
            participants,
            submissions: vec![SubmissionView {
                value_index: 3,
                participant_id: ParticipantId::new(2),
                participant_name: "Swift Yak".to_string(),
            }],
            catalog_name: "Modified Fibonacci".to_string(),
            revealed: false,
            is_reset: false,
            recipient_display_name: String::new(),
        }
    }

    #[test]
    fn update_serializes_with_camel_case_keys() {
        let json = serde_json::to_value(SessionMessage::Update(snapshot())).unwrap();

        assert_eq!(json["topic"], "Test Estimation Session");
        assert_eq!(json["participants"]["1"], "Calm Otter");
        assert_eq!(json["submissions"][0]["valueIndex"], 3);
        assert_eq!(json["submissions"][0]["participantId"], 2);
        assert_eq!(json["submissions"][0]["participantName"], "Swift Yak");
        assert_eq!(json["catalogName"], "Modified Fibonacci");
        assert_eq!(json["revealed"], false);
        assert_eq!(json["isReset"], false);
        assert_eq!(json["recipientDisplayName"], "");
    }

    #[test]
    fn error_serializes_as_single_field() {
        let json = serde_json::to_string(&SessionMessage::Error(ErrorNotice::out_of_sync())).unwrap();
        assert_eq!(
            json,
            r#"{"error":"Your game is out of sync. Please refresh your browser."}"#
        );
    }

    #[test]
    fn for_recipient_only_changes_the_name() {
        let base = snapshot();
        let personal = base.for_recipient("Calm Otter");

        assert_eq!(personal.recipient_display_name, "Calm Otter");
        assert_eq!(base.recipient_display_name, "");
        assert_eq!(personal.submissions, base.submissions);
        assert_eq!(personal.participants, base.participants);
    }
}
