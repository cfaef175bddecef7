//! # State Changes
//!
//! Records emitted towards the channel/transfer state machine. Each record is
//! built once, moved into the sink and never touched again by this crate.

use super::balance_proof::BalanceProof;
use super::errors::MessageHandlerResult;
use super::messages::{Lock, MediatedTransfer};
use serde::{Deserialize, Serialize};
use shared_types::{
    Address, BlockNumber, ChannelId, MessageId, PaymentId, Secret, SecretHash, TokenAmount,
};

/// Role of the local node in a payment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransferRole {
    /// We started the payment.
    Initiator,
    /// We forward the payment.
    Mediator,
    /// We receive the payment.
    Target,
}

/// Candidate path for a payment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteState {
    /// Addresses from us to the target, in order; we are the first entry.
    pub route: Vec<Address>,
    /// Channel towards the first hop.
    pub forward_channel_id: ChannelId,
}

/// A locked transfer together with its verified balance proof.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockedTransferSigned {
    /// Transport message id.
    pub message_identifier: MessageId,
    /// Payment identifier.
    pub payment_identifier: PaymentId,
    /// Token being transferred.
    pub token: Address,
    /// Hop the transfer was addressed to.
    pub recipient: Address,
    /// The hash time lock.
    pub lock: Lock,
    /// Payer.
    pub initiator: Address,
    /// Payee.
    pub target: Address,
    /// Balance proof derived from the envelope.
    pub balance_proof: BalanceProof,
}

impl LockedTransferSigned {
    /// Rebuild the signed transfer carried by a mediated-transfer message.
    pub fn from_message(message: &MediatedTransfer) -> MessageHandlerResult<Self> {
        let balance_proof = BalanceProof::from_envelope(&message.envelope)?;
        Ok(Self {
            message_identifier: message.message_identifier,
            payment_identifier: message.payment_identifier,
            token: message.token,
            recipient: message.recipient,
            lock: message.lock.clone(),
            initiator: message.initiator,
            target: message.target,
            balance_proof,
        })
    }
}

/// The target asked for the secret.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiveSecretRequest {
    /// Payment identifier.
    pub payment_identifier: PaymentId,
    /// Requested amount.
    pub amount: TokenAmount,
    /// Lock expiration.
    pub expiration: BlockNumber,
    /// SHA-256 of the secret.
    pub secrethash: SecretHash,
    /// Sender of the message.
    pub sender: Address,
}

/// A partner revealed a secret.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiveSecretReveal {
    /// The secret.
    pub secret: Secret,
    /// SHA-256 of the secret.
    pub secrethash: SecretHash,
    /// Sender of the message.
    pub sender: Address,
}

/// Off-chain unlock from a partner.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiveUnlock {
    /// Transport message id.
    pub message_identifier: MessageId,
    /// The secret.
    pub secret: Secret,
    /// SHA-256 of the secret.
    pub secrethash: SecretHash,
    /// Balance proof derived from the envelope.
    pub balance_proof: BalanceProof,
    /// Signer of the balance proof.
    pub sender: Address,
}

/// A partner removed an expired lock.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiveLockExpired {
    /// Transport message id.
    pub message_identifier: MessageId,
    /// SHA-256 of the secret.
    pub secrethash: SecretHash,
    /// Balance proof derived from the envelope.
    pub balance_proof: BalanceProof,
    /// Signer of the balance proof.
    pub sender: Address,
}

/// Refund received by a mediator; forwarded with fresh routes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiveTransferRefund {
    /// The refunded transfer.
    pub transfer: LockedTransferSigned,
    /// Balance proof derived from the envelope.
    pub balance_proof: BalanceProof,
    /// Sender of the message.
    pub sender: Address,
    /// Candidate routes.
    pub routes: Vec<RouteState>,
}

/// Refund received by the initiator; the current route is cancelled.
///
/// `routes` is empty whenever the initiator does not know the secret.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiveTransferRefundCancelRoute {
    /// Candidate routes.
    pub routes: Vec<RouteState>,
    /// The refunded transfer.
    pub transfer: LockedTransferSigned,
    /// Balance proof derived from the envelope.
    pub balance_proof: BalanceProof,
    /// Sender of the message.
    pub sender: Address,
    /// The secret.
    pub secret: Secret,
    /// SHA-256 of the secret.
    pub secrethash: SecretHash,
}

/// A partner wants to withdraw.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiveWithdrawRequest {
    /// Token network of the channel.
    pub token_network_address: Address,
    /// Channel to withdraw from.
    pub channel_identifier: ChannelId,
    /// Total amount to withdraw.
    pub total_withdraw: TokenAmount,
    /// Sender of the message.
    pub sender: Address,
}

/// Delivery acknowledgment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiveDelivered {
    /// Transport message id.
    pub message_identifier: MessageId,
    /// Sender of the message.
    pub sender: Address,
}

/// Processing acknowledgment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiveProcessed {
    /// Transport message id.
    pub message_identifier: MessageId,
    /// Sender of the message.
    pub sender: Address,
}

/// State change handed to the state machine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StateChange {
    /// See [`ReceiveSecretRequest`].
    SecretRequest(ReceiveSecretRequest),
    /// See [`ReceiveSecretReveal`].
    SecretReveal(ReceiveSecretReveal),
    /// See [`ReceiveUnlock`].
    Unlock(ReceiveUnlock),
    /// See [`ReceiveLockExpired`].
    LockExpired(ReceiveLockExpired),
    /// See [`ReceiveTransferRefund`].
    TransferRefund(ReceiveTransferRefund),
    /// See [`ReceiveTransferRefundCancelRoute`].
    TransferRefundCancelRoute(ReceiveTransferRefundCancelRoute),
    /// See [`ReceiveWithdrawRequest`].
    WithdrawRequest(ReceiveWithdrawRequest),
    /// See [`ReceiveDelivered`].
    Delivered(ReceiveDelivered),
    /// See [`ReceiveProcessed`].
    Processed(ReceiveProcessed),
}

impl StateChange {
    /// Record name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            StateChange::SecretRequest(_) => "ReceiveSecretRequest",
            StateChange::SecretReveal(_) => "ReceiveSecretReveal",
            StateChange::Unlock(_) => "ReceiveUnlock",
            StateChange::LockExpired(_) => "ReceiveLockExpired",
            StateChange::TransferRefund(_) => "ReceiveTransferRefund",
            StateChange::TransferRefundCancelRoute(_) => "ReceiveTransferRefundCancelRoute",
            StateChange::WithdrawRequest(_) => "ReceiveWithdrawRequest",
            StateChange::Delivered(_) => "ReceiveDelivered",
            StateChange::Processed(_) => "ReceiveProcessed",
        }
    }
}
