//! # Protocol Messages
//!
//! Inbound protocol messages, as handed over by the wire/signature layer.
//!
//! ## Kind Tags
//!
//! Every message is one variant of the closed [`Message`] enum. The variant is
//! the message kind: it is fixed at construction and the dispatcher matches on
//! nothing else. `LockedTransfer` and `RefundTransfer` share the same body
//! ([`MediatedTransfer`]) and differ only in their tag, so a refund can never
//! be handled as a locked transfer or the other way round.
//!
//! | Kind | cmdid |
//! |------|-------|
//! | Processed | 0 |
//! | SecretRequest | 3 |
//! | Unlock | 4 |
//! | LockedTransfer | 7 |
//! | RefundTransfer | 8 |
//! | RevealSecret | 11 |
//! | Delivered | 12 |
//! | LockExpired | 13 |
//! | WithdrawRequest | 15 |

use serde::{Deserialize, Serialize};
use shared_types::{
    Address, BlockNumber, ChainId, ChannelId, Hash, Locksroot, MessageId, Nonce, PaymentId,
    Secret, SecretHash, Signature, TokenAmount,
};

/// Message kinds this handler understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum MessageKind {
    /// Processing acknowledgment.
    Processed = 0,
    /// Target asks the initiator for the secret.
    SecretRequest = 3,
    /// Off-chain unlock with a new balance proof.
    Unlock = 4,
    /// Mediated transfer with a hash time lock.
    LockedTransfer = 7,
    /// Transfer sent back to the payer after a mediator gave up.
    RefundTransfer = 8,
    /// Secret disclosure.
    RevealSecret = 11,
    /// Delivery acknowledgment.
    Delivered = 12,
    /// Lock removal after expiration.
    LockExpired = 13,
    /// Partner wants to withdraw from the channel.
    WithdrawRequest = 15,
}

impl MessageKind {
    /// Wire command id.
    pub fn cmdid(self) -> u8 {
        self as u8
    }

    /// Human-readable name for logs.
    pub fn name(self) -> &'static str {
        match self {
            MessageKind::Processed => "Processed",
            MessageKind::SecretRequest => "SecretRequest",
            MessageKind::Unlock => "Unlock",
            MessageKind::LockedTransfer => "LockedTransfer",
            MessageKind::RefundTransfer => "RefundTransfer",
            MessageKind::RevealSecret => "RevealSecret",
            MessageKind::Delivered => "Delivered",
            MessageKind::LockExpired => "LockExpired",
            MessageKind::WithdrawRequest => "WithdrawRequest",
        }
    }
}

impl std::fmt::Display for MessageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Signed balance data carried by balance-proof messages.
///
/// The balance proof (and its authoritative sender) is derived from this; see
/// [`crate::domain::BalanceProof::from_envelope`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
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
    /// Amount currently locked in pending locks.
    pub locked_amount: TokenAmount,
    /// Root over the pending locks.
    pub locksroot: Locksroot,
    /// Hash of the message fields outside the balance data.
    pub message_hash: Hash,
    /// Signature of the balance-proof signer.
    pub signature: Signature,
}

/// Hash time lock.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lock {
    /// Locked amount.
    pub amount: TokenAmount,
    /// Block after which the lock expires.
    pub expiration: BlockNumber,
    /// Hash of the secret that unlocks it.
    pub secrethash: SecretHash,
}

/// Processing acknowledgment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Processed {
    /// Identifier of the acknowledged message.
    pub message_identifier: MessageId,
    /// Authenticated transport sender.
    pub sender: Address,
}

/// Delivery acknowledgment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delivered {
    /// Identifier of the delivered message.
    pub delivered_message_identifier: MessageId,
    /// Authenticated transport sender.
    pub sender: Address,
}

/// Request for the secret of a pending payment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretRequest {
    /// Transport message id.
    pub message_identifier: MessageId,
    /// Payment the secret belongs to.
    pub payment_identifier: PaymentId,
    /// Amount the target expects.
    pub amount: TokenAmount,
    /// Lock expiration the target saw.
    pub expiration: BlockNumber,
    /// Hash of the requested secret.
    pub secrethash: SecretHash,
    /// Authenticated transport sender.
    pub sender: Address,
}

/// Secret disclosure.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealSecret {
    /// Transport message id.
    pub message_identifier: MessageId,
    /// The revealed secret.
    pub secret: Secret,
    /// Authenticated transport sender.
    pub sender: Address,
}

/// Off-chain unlock of a pending lock.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unlock {
    /// Transport message id.
    pub message_identifier: MessageId,
    /// Payment being settled.
    pub payment_identifier: PaymentId,
    /// Secret that unlocks the lock.
    pub secret: Secret,
    /// New balance data.
    pub envelope: Envelope,
    /// Authenticated transport sender.
    pub sender: Address,
}

/// Removal of an expired lock.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockExpired {
    /// Transport message id.
    pub message_identifier: MessageId,
    /// Partner the lock was sent to.
    pub recipient: Address,
    /// Hash of the expired lock.
    pub secrethash: SecretHash,
    /// New balance data.
    pub envelope: Envelope,
    /// Authenticated transport sender.
    pub sender: Address,
}

/// Withdraw request from the channel partner.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawRequest {
    /// Token network of the channel.
    pub token_network_address: Address,
    /// Channel to withdraw from.
    pub channel_identifier: ChannelId,
    /// Total amount to withdraw.
    pub amount: TokenAmount,
    /// Authenticated transport sender.
    pub sender: Address,
}

/// Body shared by `LockedTransfer` and `RefundTransfer`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediatedTransfer {
    /// Transport message id.
    pub message_identifier: MessageId,
    /// Payment being routed.
    pub payment_identifier: PaymentId,
    /// Token being transferred.
    pub token: Address,
    /// Next hop the transfer was sent to.
    pub recipient: Address,
    /// The hash time lock.
    pub lock: Lock,
    /// Final payee.
    pub target: Address,
    /// Payer that started the payment.
    pub initiator: Address,
    /// New balance data.
    pub envelope: Envelope,
    /// Authenticated transport sender.
    pub sender: Address,
}

/// A message whose kind this handler does not know.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnrecognizedMessage {
    /// Wire command id.
    pub cmdid: u8,
    /// Authenticated transport sender.
    pub sender: Address,
    /// Undecoded payload.
    pub payload: Vec<u8>,
}

/// Inbound protocol message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Message {
    /// See [`Processed`].
    Processed(Processed),
    /// See [`SecretRequest`].
    SecretRequest(SecretRequest),
    /// See [`Unlock`].
    Unlock(Unlock),
    /// Locked transfer towards us or through us.
    LockedTransfer(MediatedTransfer),
    /// Refund of a transfer we forwarded.
    RefundTransfer(MediatedTransfer),
    /// See [`RevealSecret`].
    RevealSecret(RevealSecret),
    /// See [`Delivered`].
    Delivered(Delivered),
    /// See [`LockExpired`].
    LockExpired(LockExpired),
    /// See [`WithdrawRequest`].
    WithdrawRequest(WithdrawRequest),
    /// Any kind not listed above. Dropped by the dispatcher even when its
    /// cmdid collides with a known kind.
    Unrecognized(UnrecognizedMessage),
}

impl Message {
    /// The message kind, `None` for unrecognized messages.
    pub fn kind(&self) -> Option<MessageKind> {
        match self {
            Message::Processed(_) => Some(MessageKind::Processed),
            Message::SecretRequest(_) => Some(MessageKind::SecretRequest),
            Message::Unlock(_) => Some(MessageKind::Unlock),
            Message::LockedTransfer(_) => Some(MessageKind::LockedTransfer),
            Message::RefundTransfer(_) => Some(MessageKind::RefundTransfer),
            Message::RevealSecret(_) => Some(MessageKind::RevealSecret),
            Message::Delivered(_) => Some(MessageKind::Delivered),
            Message::LockExpired(_) => Some(MessageKind::LockExpired),
            Message::WithdrawRequest(_) => Some(MessageKind::WithdrawRequest),
            Message::Unrecognized(_) => None,
        }
    }

    /// Wire command id.
    pub fn cmdid(&self) -> u8 {
        match self {
            Message::Unrecognized(raw) => raw.cmdid,
            other => other.kind().map(MessageKind::cmdid).unwrap_or_default(),
        }
    }

    /// Authenticated transport sender.
    pub fn sender(&self) -> Address {
        match self {
            Message::Processed(m) => m.sender,
            Message::SecretRequest(m) => m.sender,
            Message::Unlock(m) => m.sender,
            Message::LockedTransfer(m) | Message::RefundTransfer(m) => m.sender,
            Message::RevealSecret(m) => m.sender,
            Message::Delivered(m) => m.sender,
            Message::LockExpired(m) => m.sender,
            Message::WithdrawRequest(m) => m.sender,
            Message::Unrecognized(m) => m.sender,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transfer_body() -> MediatedTransfer {
        MediatedTransfer {
            message_identifier: 1,
            payment_identifier: 2,
            token: [3u8; 20],
            recipient: [4u8; 20],
            lock: Lock {
                amount: TokenAmount::from(10u64),
                expiration: 100,
                secrethash: [5u8; 32],
            },
            target: [6u8; 20],
            initiator: [7u8; 20],
            envelope: Envelope {
                chain_id: 1,
                token_network_address: [8u8; 20],
                channel_identifier: 9,
                nonce: 1,
                transferred_amount: TokenAmount::zero(),
                locked_amount: TokenAmount::from(10u64),
                locksroot: [0xAAu8; 32],
                message_hash: [0xBBu8; 32],
                signature: Signature::default(),
            },
            sender: [0xCCu8; 20],
        }
    }

    #[test]
    fn test_cmdids() {
        assert_eq!(MessageKind::Processed.cmdid(), 0);
        assert_eq!(MessageKind::LockedTransfer.cmdid(), 7);
        assert_eq!(MessageKind::RefundTransfer.cmdid(), 8);
        assert_eq!(MessageKind::Delivered.cmdid(), 12);
    }

    #[test]
    fn test_same_body_different_tags() {
        let body = transfer_body();
        let locked = Message::LockedTransfer(body.clone());
        let refund = Message::RefundTransfer(body);
        assert_eq!(locked.kind(), Some(MessageKind::LockedTransfer));
        assert_eq!(refund.kind(), Some(MessageKind::RefundTransfer));
        assert_ne!(locked, refund);
    }

    #[test]
    fn test_unrecognized_keeps_its_cmdid() {
        let msg = Message::Unrecognized(UnrecognizedMessage {
            cmdid: 12,
            sender: [1u8; 20],
            payload: vec![],
        });
        assert_eq!(msg.kind(), None);
        assert_eq!(msg.cmdid(), 12);
    }

    #[test]
    fn test_sender_accessor() {
        let msg = Message::Delivered(Delivered {
            delivered_message_identifier: 5,
            sender: [9u8; 20],
        });
        assert_eq!(msg.sender(), [9u8; 20]);
        assert_eq!(msg.cmdid(), 12);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(MessageKind::WithdrawRequest.to_string(), "WithdrawRequest");
    }
}
