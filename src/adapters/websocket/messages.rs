//! WebSocket request types sent by clients.
//!
//! Every inbound frame is a single JSON object naming an `action`. The
//! remaining fields are optional and only read by the actions that need them.
//! Browsers send unused fields as `null`, which reads the same as a missing
//! field. Outbound frames are
//! [`SessionMessage`](crate::domain::session::SessionMessage)s.

use serde::{Deserialize, Deserializer};

/// What a client asks the room to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientAction {
    /// Submit the value at `card` from catalog `deck`.
    Select,
    /// Show every submission.
    Reveal,
    /// Start a new round.
    Reset,
    /// Switch the room to catalog `deck`.
    Deck,
    /// Replace the topic with `value`.
    Topic,
    /// Rename this participant to `value`.
    Username,
    /// Any action this server does not understand.
    #[serde(other)]
    Unknown,
}

/// A single client request.
///
/// `room` and `token` must match the room the connection joined, otherwise
/// the request is dropped. `card` is signed so a negative index reaches the
/// room and is answered like any other invalid card.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientRequest {
    pub action: ClientAction,
    #[serde(default, deserialize_with = "null_as_default")]
    pub card: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub deck: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub room: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub token: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub value: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
