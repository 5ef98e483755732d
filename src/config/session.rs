//! Room behaviour configuration

use serde::Deserialize;
use std::time::Duration;

use crate::domain::catalog::Catalog;

use super::error::ValidationError;

/// Settings applied to every room the server creates
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Catalog used when a room is created without choosing one
    #[serde(default = "default_deck")]
    pub default_deck: String,

    /// How long an empty room survives before removal, in milliseconds
    #[serde(default = "default_teardown_grace_ms")]
    pub teardown_grace_ms: u64,

    /// Messages buffered per connection before new ones are dropped
    #[serde(default = "default_outbound_queue_capacity")]
    pub outbound_queue_capacity: usize,
}

impl SessionConfig {
    pub fn teardown_grace(&self) -> Duration {
        Duration::from_millis(self.teardown_grace_ms)
    }

    /// Validate session configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.teardown_grace_ms == 0 {
            return Err(ValidationError::InvalidTeardownGrace);
        }
        if self.outbound_queue_capacity == 0 {
            return Err(ValidationError::InvalidQueueCapacity);
        }
        if Catalog::find(&self.default_deck).is_none() {
            return Err(ValidationError::UnknownDeck(self.default_deck.clone()));
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_deck: default_deck(),
            teardown_grace_ms: default_teardown_grace_ms(),
            outbound_queue_capacity: default_outbound_queue_capacity(),
        }
    }
}

fn default_deck() -> String {
    Catalog::default_catalog().name().to_string()
}

fn default_teardown_grace_ms() -> u64 {
    10_000
}

fn default_outbound_queue_capacity() -> usize {
    256
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_config_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.default_deck, "Modified Fibonacci");
        assert_eq!(config.teardown_grace(), Duration::from_secs(10));
        assert_eq!(config.outbound_queue_capacity, 256);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_zero_grace() {
        let config = SessionConfig {
            teardown_grace_ms: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidTeardownGrace));
    }

    #[test]
    fn test_validation_rejects_zero_capacity() {
        let config = SessionConfig {
            outbound_queue_capacity: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidQueueCapacity));
    }

    #[test]
    fn test_validation_rejects_unknown_deck() {
        let config = SessionConfig {
            default_deck: "Tarot".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::UnknownDeck("Tarot".to_string()))
        );
    }

    #[test]
    fn test_session_config_deserialization() {
        let json = r#"{ "default_deck": "Hours", "teardown_grace_ms": 250 }"#;
        let config: SessionConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.default_deck, "Hours");
        assert_eq!(config.teardown_grace(), Duration::from_millis(250));
        assert_eq!(config.outbound_queue_capacity, 256);
    }
}
