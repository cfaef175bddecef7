//! # Adapters Layer (Hexagonal Architecture)
//!
//! In-memory implementations of the outbound ports.

mod recording_node;
mod secret_registry;

pub use recording_node::{NodeAction, RecordingNode};
pub use secret_registry::InMemorySecretRegistry;
