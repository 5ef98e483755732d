//! Domain layer containing the estimation engine and its vocabulary.
//!
//! # Module Organization
//!
//! - `foundation` - Identifiers, validation rules and error types
//! - `catalog` - Built-in value catalogs participants pick from
//! - `session` - The room engine: participants, submissions, reveal and teardown

pub mod catalog;
pub mod foundation;
pub mod session;
