//! # Shared Types Crate
//!
//! Primitive aliases and value types used by every payment-channel crate.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: byte widths for addresses, hashes, secrets and
//!   signatures are defined once, here.
//! - **On-chain fidelity**: token amounts are `U256`, identifiers are the
//!   integer widths the contracts use.

pub mod entities;

pub use entities::*;
