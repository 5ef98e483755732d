//! Snapshot construction and fan-out.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::domain::foundation::ParticipantId;
use crate::ports::Participant;

use super::game::Round;
use super::messages::{SessionMessage, Snapshot, SubmissionView};

/// Connected participants keyed by identity.
pub(crate) type ParticipantSet = HashMap<ParticipantId, Arc<dyn Participant>>;

/// Builds the shared part of a snapshot. The recipient name is left empty.
pub(crate) fn build_snapshot(
    topic: String,
    participants: &ParticipantSet,
    round: &Round,
    is_reset: bool,
) -> Snapshot {
    let names: BTreeMap<ParticipantId, String> = participants
        .iter()
        .map(|(id, p)| (*id, p.display_name()))
        .collect();

    let mut submissions: Vec<SubmissionView> = round
        .submissions
        .iter()
        .map(|(id, index)| SubmissionView {
            value_index: *index,
            participant_id: *id,
            participant_name: names.get(id).cloned().unwrap_or_default(),
        })
        .collect();
    submissions.sort_by_key(|s| s.participant_id);

    Snapshot {
        topic,
        participants: names,
        submissions,
        catalog_name: round.catalog.name().to_string(),
        revealed: round.revealed,
        is_reset,
        recipient_display_name: String::new(),
    }
}

/// Hands every participant its own copy of `snapshot`.
pub(crate) fn dispatch(participants: &ParticipantSet, snapshot: &Snapshot) {
    for participant in participants.values() {
        let personal = snapshot.for_recipient(participant.display_name());
        participant.deliver(SessionMessage::Update(personal));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryParticipant;
    use crate::domain::catalog::Catalog;

    fn set_of(participants: &[Arc<InMemoryParticipant>]) -> ParticipantSet {
        participants
            .iter()
            .map(|p| (p.id(), p.clone() as Arc<dyn Participant>))
            .collect()
    }

    #[test]
    fn snapshot_lists_submissions_in_id_order() {
        let a = Arc::new(InMemoryParticipant::named(1, "Calm Otter"));
        let b = Arc::new(InMemoryParticipant::named(2, "Swift Yak"));
        let set = set_of(&[a, b]);

        let mut round = Round::new(Catalog::default_catalog());
        round.submissions.insert(ParticipantId::new(2), 4);
        round.submissions.insert(ParticipantId::new(1), 0);

        let snapshot = build_snapshot("Topic".to_string(), &set, &round, false);

        assert_eq!(snapshot.participants.len(), 2);
        assert_eq!(snapshot.submissions[0].participant_id, ParticipantId::new(1));
        assert_eq!(snapshot.submissions[0].participant_name, "Calm Otter");
        assert_eq!(snapshot.submissions[1].value_index, 4);
        assert_eq!(snapshot.catalog_name, "Modified Fibonacci");
    }

    #[test]
    fn dispatch_personalizes_each_copy() {
        let a = Arc::new(InMemoryParticipant::named(1, "Calm Otter"));
        let b = Arc::new(InMemoryParticipant::named(2, "Swift Yak"));
        let set = set_of(&[a.clone(), b.clone()]);
        let round = Round::new(Catalog::default_catalog());

        let snapshot = build_snapshot("Topic".to_string(), &set, &round, true);
        dispatch(&set, &snapshot);

        let to_a = a.updates();
        let to_b = b.updates();
        assert_eq!(to_a.len(), 1);
        assert_eq!(to_b.len(), 1);
        assert_eq!(to_a[0].recipient_display_name, "Calm Otter");
        assert_eq!(to_b[0].recipient_display_name, "Swift Yak");
        assert!(to_a[0].is_reset);
    }
}
