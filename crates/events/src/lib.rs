//! # New-Tab Events
//!
//! This crate defines the typed actions dispatched into the new-tab page store.
//!
//! Actions travel as `{ "type": ..., "payload": ... }` JSON, either one at a time or
//! as a recorded log that the engine's store can replay.

// Declare the modules that make up this crate.
pub mod error;
pub mod messages;

// Re-export the core types to provide a clean public API.
pub use error::EventsError;
pub use messages::{Action, parse_action_log};
