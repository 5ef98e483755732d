//! Sibyl - Real-time planning poker rooms
//!
//! Participants join a named room over a WebSocket, privately pick a value
//! from a shared catalog, and see every pick once the room reveals them.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
