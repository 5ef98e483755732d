//! In-memory adapters for tests and local experiments.
//!
//! - `InMemoryParticipant` - records delivered messages instead of sending them

mod participant;

pub use participant::InMemoryParticipant;
