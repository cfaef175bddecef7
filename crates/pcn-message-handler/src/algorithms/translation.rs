//! # Direct Translation
//!
//! Field-for-field mapping of messages that need no policy decision.
//!
//! `Unlock` and `LockExpired` carry a balance proof; their state change
//! takes its `sender` from the recovered signer, not from the transport.

use super::secret::sha256_secrethash;
use crate::domain::{
    BalanceProof, Delivered, LockExpired, MessageHandlerResult, Processed, ReceiveDelivered,
    ReceiveLockExpired, ReceiveProcessed, ReceiveSecretRequest, ReceiveSecretReveal,
    ReceiveUnlock, ReceiveWithdrawRequest, RevealSecret, SecretRequest, StateChange, Unlock,
    WithdrawRequest,
};

/// `SecretRequest` to `ReceiveSecretRequest`.
pub fn secret_request(message: SecretRequest) -> StateChange {
    StateChange::SecretRequest(ReceiveSecretRequest {
        payment_identifier: message.payment_identifier,
        amount: message.amount,
        expiration: message.expiration,
        secrethash: message.secrethash,
        sender: message.sender,
    })
}

/// `RevealSecret` to `ReceiveSecretReveal`.
pub fn secret_reveal(message: RevealSecret) -> StateChange {
    StateChange::SecretReveal(ReceiveSecretReveal {
        secret: message.secret,
        secrethash: sha256_secrethash(&message.secret),
        sender: message.sender,
    })
}

/// `Unlock` to `ReceiveUnlock`.
pub fn unlock(message: Unlock) -> MessageHandlerResult<StateChange> {
    let balance_proof = BalanceProof::from_envelope(&message.envelope)?;
    Ok(StateChange::Unlock(ReceiveUnlock {
        message_identifier: message.message_identifier,
        secret: message.secret,
        secrethash: sha256_secrethash(&message.secret),
        sender: balance_proof.sender,
        balance_proof,
    }))
}

/// `LockExpired` to `ReceiveLockExpired`.
pub fn lock_expired(message: LockExpired) -> MessageHandlerResult<StateChange> {
    let balance_proof = BalanceProof::from_envelope(&message.envelope)?;
    Ok(StateChange::LockExpired(ReceiveLockExpired {
        message_identifier: message.message_identifier,
        secrethash: message.secrethash,
        sender: balance_proof.sender,
        balance_proof,
    }))
}

/// `WithdrawRequest` to `ReceiveWithdrawRequest`.
pub fn withdraw_request(message: WithdrawRequest) -> StateChange {
    StateChange::WithdrawRequest(ReceiveWithdrawRequest {
        token_network_address: message.token_network_address,
        channel_identifier: message.channel_identifier,
        total_withdraw: message.amount,
        sender: message.sender,
    })
}

/// `Delivered` to `ReceiveDelivered`.
pub fn delivered(message: Delivered) -> StateChange {
    StateChange::Delivered(ReceiveDelivered {
        message_identifier: message.delivered_message_identifier,
        sender: message.sender,
    })
}

/// `Processed` to `ReceiveProcessed`.
pub fn processed(message: Processed) -> StateChange {
    StateChange::Processed(ReceiveProcessed {
        message_identifier: message.message_identifier,
        sender: message.sender,
    })
}
