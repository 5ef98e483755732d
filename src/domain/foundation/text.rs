//! Unicode-aware rules for the free text users type into a room.
//!
//! Lengths are counted in characters, never bytes, so "ÉÉÉ" is three long.

use once_cell::sync::Lazy;
use regex::Regex;

use super::ValidationError;

/// Maximum number of characters in a room name.
pub const ROOM_NAME_MAX_LENGTH: usize = 20;

/// Maximum number of characters in a room topic.
pub const TOPIC_MAX_LENGTH: usize = 100;

/// Maximum number of characters in a participant display name.
pub const DISPLAY_NAME_MAX_LENGTH: usize = 25;

/// Human readable description of what a room name may contain.
pub const ROOM_NAME_RULE: &str = "A room name must contain 1-20 characters with at least one being a letter or number. All characters must be letters, numbers, spaces, underscores, or hyphens";

static ROOM_CHARSET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\p{L}\p{N} _\-]+\z").expect("room charset pattern"));

static PRINTABLE_CHARSET: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\p{L}\p{M}\p{S}\p{N}\p{P} ]+\z").expect("printable charset pattern")
});

static LETTER_OR_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\p{L}\p{N}]").expect("letter or number pattern"));

static LETTER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\p{L}").expect("letter pattern"));

fn check_length(field: &str, value: &str, max: usize) -> Result<(), ValidationError> {
    let length = value.chars().count();
    if length == 0 {
        return Err(ValidationError::empty_field(field));
    }
    if length > max {
        return Err(ValidationError::too_long(field, max, length));
    }
    Ok(())
}

/// Validates a room name.
pub fn validate_room_name(room: &str) -> Result<(), ValidationError> {
    check_length("room", room, ROOM_NAME_MAX_LENGTH)?;
    if !ROOM_CHARSET.is_match(room) {
        return Err(ValidationError::invalid_format(
            "room",
            "only letters, numbers, spaces, underscores and hyphens are allowed",
        ));
    }
    if !LETTER_OR_NUMBER.is_match(room) {
        return Err(ValidationError::invalid_format(
            "room",
            "must contain a letter or number",
        ));
    }
    Ok(())
}

/// Returns true when `room` is an acceptable room name.
pub fn room_name_is_valid(room: &str) -> bool {
    validate_room_name(room).is_ok()
}

/// Validates a room topic.
pub fn validate_topic(topic: &str) -> Result<(), ValidationError> {
    check_length("topic", topic, TOPIC_MAX_LENGTH)?;
    if !PRINTABLE_CHARSET.is_match(topic) {
        return Err(ValidationError::invalid_format(
            "topic",
            "contains non-printable characters",
        ));
    }
    if !LETTER_OR_NUMBER.is_match(topic) {
        return Err(ValidationError::invalid_format(
            "topic",
            "must contain a letter or number",
        ));
    }
    Ok(())
}

/// Validates a participant display name.
///
/// Unlike topics, a display name needs at least one letter; digits alone
/// are not enough.
pub fn validate_display_name(name: &str) -> Result<(), ValidationError> {
    check_length("username", name, DISPLAY_NAME_MAX_LENGTH)?;
    if !PRINTABLE_CHARSET.is_match(name) {
        return Err(ValidationError::invalid_format(
            "username",
            "contains non-printable characters",
        ));
    }
    if !LETTER.is_match(name) {
        return Err(ValidationError::invalid_format(
            "username",
            "must contain a letter",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn accepts_plain_and_accented_room_names() {
        assert!(room_name_is_valid("Test Room"));
        assert!(room_name_is_valid("team_alpha-2"));
        assert!(room_name_is_valid(&"É".repeat(20)));
    }

    #[test]
    fn rejects_room_names_over_twenty_characters() {
        assert!(!room_name_is_valid("Room name is too long"));
        assert_eq!(
            validate_room_name("Room name is too long"),
            Err(ValidationError::too_long("room", 20, 21))
        );
    }

    #[test]
    fn rejects_room_names_without_letters_or_digits() {
        assert!(!room_name_is_valid("   "));
        assert!(!room_name_is_valid("__--"));
        assert!(!room_name_is_valid(""));
    }

    #[test]
    fn rejects_room_names_with_punctuation() {
        assert!(!room_name_is_valid("room!"));
        assert!(!room_name_is_valid("a/b"));
    }

    #[test]
    fn topic_rejects_control_characters() {
        assert!(validate_topic("Should be invalid: \t").is_err());
    }

    #[test]
    fn topic_accepts_symbols_and_punctuation() {
        assert!(validate_topic("Sprint 42: login & sign-up ☕").is_ok());
    }

    #[test]
    fn topic_length_is_counted_in_characters() {
        assert!(validate_topic(&"É".repeat(100)).is_ok());
        assert!(validate_topic(&"É".repeat(101)).is_err());
    }

    #[test]
    fn display_name_needs_a_letter() {
        assert!(validate_display_name("Göod Name!").is_ok());
        assert!(validate_display_name("!!!").is_err());
        assert!(validate_display_name("123").is_err());
    }

    #[test]
    fn display_name_length_boundary() {
        assert!(validate_display_name(&"a".repeat(DISPLAY_NAME_MAX_LENGTH)).is_ok());
        assert!(validate_display_name(&"a".repeat(DISPLAY_NAME_MAX_LENGTH + 1)).is_err());
    }

    proptest! {
        #[test]
        fn alphanumeric_room_names_up_to_limit_are_valid(name in "[a-zA-Z0-9]{1,20}") {
            prop_assert!(room_name_is_valid(&name));
        }

        #[test]
        fn room_names_past_limit_are_invalid(name in "[a-zA-Z0-9]{21,40}") {
            prop_assert!(!room_name_is_valid(&name));
        }
    }
}
