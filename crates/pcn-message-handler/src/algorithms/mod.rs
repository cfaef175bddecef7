//! # Algorithms Module
//!
//! Pure decision and translation logic used by the dispatcher.

pub mod refund_policy;
pub mod replay_guard;
pub mod secret;
pub mod translation;

pub use refund_policy::{decide_refund, RefundRole};
pub use replay_guard::{decide_locked_transfer, LockedTransferDisposition};
pub use secret::{random_secret, sha256_secrethash};
