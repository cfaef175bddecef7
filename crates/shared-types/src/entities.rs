//! # Core Primitives
//!
//! Primitive aliases and value types shared by every payment-channel crate.
//!
//! ## Clusters
//!
//! - **Identity**: `Address`, `Signature`
//! - **Hashing**: `Hash`, `SecretHash`, `Secret`, `Locksroot`
//! - **Accounting**: `TokenAmount`, `Nonce`, `ChannelId`
//! - **Chain view**: `BlockNumber`, `BlockIdentifier`

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, Bytes};

// Re-export U256 from primitive-types for use across all crates
pub use primitive_types::U256;

// =============================================================================
// CLUSTER A: IDENTITY
// =============================================================================

/// A 20-byte Ethereum-style address.
pub type Address = [u8; 20];

/// A 65-byte recoverable secp256k1 signature (`r || s || v`).
#[serde_as]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Signature(#[serde_as(as = "Bytes")] pub [u8; 65]);

impl Signature {
    /// Signature length in bytes.
    pub const LEN: usize = 65;

    /// Build a signature from its components.
    pub fn from_parts(r: &[u8; 32], s: &[u8; 32], v: u8) -> Self {
        let mut bytes = [0u8; 65];
        bytes[..32].copy_from_slice(r);
        bytes[32..64].copy_from_slice(s);
        bytes[64] = v;
        Self(bytes)
    }

    /// The 64-byte `r || s` part.
    pub fn rs(&self) -> &[u8] {
        &self.0[..64]
    }

    /// Recovery byte (0, 1, 27 or 28).
    pub fn v(&self) -> u8 {
        self.0[64]
    }
}

impl Default for Signature {
    fn default() -> Self {
        Self([0u8; 65])
    }
}

impl std::fmt::Debug for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Signature({}..)", pex(&self.0))
    }
}

// =============================================================================
// CLUSTER B: HASHING
// =============================================================================

/// A 32-byte hash (Keccak-256 or SHA-256).
pub type Hash = [u8; 32];

/// Hash of a payment secret; identifies a lock across every hop.
pub type SecretHash = Hash;

/// A 32-byte payment secret.
pub type Secret = [u8; 32];

/// Merkle root (or hash) over the pending locks of a channel side.
pub type Locksroot = Hash;

/// Locksroot of a channel side without pending locks.
pub const EMPTY_LOCKSROOT: Locksroot = [0u8; 32];

// =============================================================================
// CLUSTER C: ACCOUNTING
// =============================================================================

/// Token amounts are 256-bit, matching the on-chain representation.
pub type TokenAmount = U256;

/// Balance-proof nonce; strictly increasing per channel side.
pub type Nonce = u64;

/// On-chain channel identifier inside a token network.
pub type ChannelId = u64;

/// Chain identifier (EIP-155).
pub type ChainId = u64;

/// Transport-level message identifier.
pub type MessageId = u64;

/// Application-level payment identifier.
pub type PaymentId = u64;

// =============================================================================
// CLUSTER D: CHAIN VIEW
// =============================================================================

/// Block height.
pub type BlockNumber = u64;

/// Which chain view a query is evaluated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BlockIdentifier {
    /// The most recent block the node knows about, reorg-unsafe.
    #[default]
    Latest,
    /// A specific block height.
    Number(BlockNumber),
    /// A specific block hash.
    Hash(Hash),
}

impl std::fmt::Display for BlockIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BlockIdentifier::Latest => f.write_str("latest"),
            BlockIdentifier::Number(n) => write!(f, "{}", n),
            BlockIdentifier::Hash(h) => write!(f, "0x{}", hex::encode(h)),
        }
    }
}

/// Short hex rendering of an identifier for log lines (first 4 bytes).
pub fn pex(data: &[u8]) -> String {
    hex::encode(&data[..data.len().min(4)])
}
