//! # Domain Module
//!
//! Protocol messages, balance proofs, state-change records and keys.

pub mod balance_proof;
pub mod ecdsa;
pub mod errors;
pub mod keys;
pub mod messages;
pub mod state_changes;

pub use balance_proof::{
    hash_balance_data, pack_balance_proof, sign_balance_proof,
    BalanceProof, EMPTY_BALANCE_HASH, MSG_TYPE_BALANCE_PROOF,
};
pub use ecdsa::{address_from_pubkey, eth_sign_hash, keccak256, recover_address};
pub use errors::*;
pub use keys::PrivateKey;
pub use messages::*;
pub use state_changes::*;
