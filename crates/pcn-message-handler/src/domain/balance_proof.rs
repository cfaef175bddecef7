//! # Balance Proofs
//!
//! A [`BalanceProof`] is always derived from an [`Envelope`]: the accounting
//! fields are copied and the sender is recovered from the envelope signature.
//!
//! ## Packed Layout
//!
//! ```text
//! token_network_address (20)
//! chain_id              (32, big-endian)
//! msg_type = 1          (32, big-endian)
//! channel_identifier    (32, big-endian)
//! balance_hash          (32)
//! nonce                 (32, big-endian)
//! message_hash          (32)
//! ```
//!
//! The signature covers the Ethereum signed-message digest of that layout.

use super::ecdsa::{eth_sign_hash, keccak256, recover_address, sign_prehash};
use super::errors::MessageHandlerResult;
use super::keys::PrivateKey;
use super::messages::Envelope;
use primitive_types::U256;
use serde::{Deserialize, Serialize};
use shared_types::{
    Address, ChainId, ChannelId, Hash, Locksroot, Nonce, Signature, TokenAmount,
    EMPTY_LOCKSROOT,
};

/// Message type id of a balance proof in the packed layout.
pub const MSG_TYPE_BALANCE_PROOF: u8 = 1;

/// Balance hash of a channel side that has never transferred or locked.
pub const EMPTY_BALANCE_HASH: Hash = [0u8; 32];

/// Signed balance proof with its recovered sender.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceProof {
    /// Chain the token network lives on.
    pub chain_id: ChainId,
    /// Token network contract.
    pub token_network_address: Address,
    /// Channel inside the token network.
    pub channel_identifier: ChannelId,
    /// Balance-proof nonce.
    pub nonce: Nonce,
    /// Total amount transferred so far.
    pub transferred_amount: TokenAmount,
    /// Amount currently locked.
    pub locked_amount: TokenAmount,
    /// Root over the pending locks.
    pub locksroot: Locksroot,
    /// Hash over the three fields above.
    pub balance_hash: Hash,
    /// Hash of the enclosing message.
    pub message_hash: Hash,
    /// Signature over the packed data.
    pub signature: Signature,
    /// Address recovered from `signature`.
    pub sender: Address,
}

impl BalanceProof {
    /// Derive a balance proof from an envelope, recovering its signer.
    pub fn from_envelope(envelope: &Envelope) -> MessageHandlerResult<Self> {
        let sender = recover_address(&envelope.signing_digest(), &envelope.signature)?;
        Ok(Self {
            chain_id: envelope.chain_id,
            token_network_address: envelope.token_network_address,
            channel_identifier: envelope.channel_identifier,
            nonce: envelope.nonce,
            transferred_amount: envelope.transferred_amount,
            locked_amount: envelope.locked_amount,
            locksroot: envelope.locksroot,
            balance_hash: envelope.balance_hash(),
            message_hash: envelope.message_hash,
            signature: envelope.signature,
            sender,
        })
    }
}

/// Hash of the balance data.
///
/// Returns [`EMPTY_BALANCE_HASH`] when nothing was ever transferred or locked.
pub fn hash_balance_data(
    transferred_amount: TokenAmount,
    locked_amount: TokenAmount,
    locksroot: &Locksroot,
) -> Hash {
    if transferred_amount.is_zero() && locked_amount.is_zero() && *locksroot == EMPTY_LOCKSROOT {
        return EMPTY_BALANCE_HASH;
    }

    let mut data = Vec::with_capacity(96);
    data.extend_from_slice(&u256_word(transferred_amount));
    data.extend_from_slice(&u256_word(locked_amount));
    data.extend_from_slice(locksroot);
    keccak256(&data)
}

/// Pack the fields covered by a balance-proof signature.
pub fn pack_balance_proof(
    token_network_address: &Address,
    chain_id: ChainId,
    channel_identifier: ChannelId,
    balance_hash: &Hash,
    nonce: Nonce,
    message_hash: &Hash,
) -> Vec<u8> {
    let mut data = Vec::with_capacity(20 + 32 * 6);
    data.extend_from_slice(token_network_address);
    data.extend_from_slice(&u64_word(chain_id));
    data.extend_from_slice(&u64_word(u64::from(MSG_TYPE_BALANCE_PROOF)));
    data.extend_from_slice(&u64_word(channel_identifier));
    data.extend_from_slice(balance_hash);
    data.extend_from_slice(&u64_word(nonce));
    data.extend_from_slice(message_hash);
    data
}

/// Sign the balance data of an envelope.
///
/// The envelope's current `signature` field is ignored.
pub fn sign_balance_proof(
    envelope: &Envelope,
    private_key: &PrivateKey,
) -> MessageHandlerResult<Signature> {
    let signing_key = private_key.signing_key()?;
    sign_prehash(&envelope.signing_digest(), &signing_key)
}

impl Envelope {
    /// Balance hash over this envelope's accounting fields.
    pub fn balance_hash(&self) -> Hash {
        hash_balance_data(self.transferred_amount, self.locked_amount, &self.locksroot)
    }

    /// Packed balance-proof data.
    pub fn packed_balance_proof(&self) -> Vec<u8> {
        pack_balance_proof(
            &self.token_network_address,
            self.chain_id,
            self.channel_identifier,
            &self.balance_hash(),
            self.nonce,
            &self.message_hash,
        )
    }

    /// Digest the envelope signature is computed over.
    pub fn signing_digest(&self) -> Hash {
        eth_sign_hash(&self.packed_balance_proof())
    }

    /// Return a copy signed by `private_key`.
    pub fn signed_by(mut self, private_key: &PrivateKey) -> MessageHandlerResult<Self> {
        self.signature = sign_balance_proof(&self, private_key)?;
        Ok(self)
    }
}

fn u256_word(value: U256) -> [u8; 32] {
    let mut word = [0u8; 32];
    value.to_big_endian(&mut word);
    word
}

fn u64_word(value: u64) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[24..].copy_from_slice(&value.to_be_bytes());
    word
}
