//! Ports - Interfaces the session engine consumes.
//!
//! - `participant` - capability for messaging and disconnecting one participant
//! - `completion` - channel a room uses to hand itself back for removal

mod completion;
mod participant;

pub use completion::{completion_channel, CompletionReceiver, CompletionSender};
pub use participant::Participant;
