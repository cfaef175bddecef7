//! # Refund Policy
//!
//! Decides what a refund turns into once the routes have been looked up.
//!
//! ## Rules
//!
//! | Local role | Secret known | Record | Routes | Secret |
//! |------------|--------------|--------|--------|--------|
//! | Initiator | no | `ReceiveTransferRefundCancelRoute` | none | fresh |
//! | Initiator | yes (S) | `ReceiveTransferRefundCancelRoute` | as found | S |
//! | anything else | - | `ReceiveTransferRefund` | as found | - |
//!
//! An initiator without the secret never retries on another path.

use super::secret::sha256_secrethash;
use crate::domain::{
    LockedTransferSigned, ReceiveTransferRefund, ReceiveTransferRefundCancelRoute, RouteState,
    StateChange, TransferRole,
};
use shared_types::Secret;

/// Local role as seen by the refund policy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RefundRole {
    /// We started the payment.
    Initiator {
        /// Secret we hold for the payment, if any.
        known_secret: Option<Secret>,
    },
    /// Mediator, target, or unknown payment.
    Forwarder,
}

impl RefundRole {
    /// Whether a role lookup result counts as initiator.
    pub fn is_initiator(role: Option<TransferRole>) -> bool {
        matches!(role, Some(TransferRole::Initiator))
    }
}

/// Turn a refund into its state change.
///
/// `fresh_secret` is only called for an initiator without a known secret.
pub fn decide_refund<F>(
    role: RefundRole,
    routes: Vec<RouteState>,
    transfer: LockedTransferSigned,
    fresh_secret: F,
) -> StateChange
where
    F: FnOnce() -> Secret,
{
    let balance_proof = transfer.balance_proof.clone();
    let sender = balance_proof.sender;

    match role {
        RefundRole::Initiator { known_secret } => {
            let (routes, secret) = match known_secret {
                Some(secret) => (routes, secret),
                None => (Vec::new(), fresh_secret()),
            };
            StateChange::TransferRefundCancelRoute(ReceiveTransferRefundCancelRoute {
                routes,
                transfer,
                balance_proof,
                sender,
                secret,
                secrethash: sha256_secrethash(&secret),
            })
        }
        RefundRole::Forwarder => StateChange::TransferRefund(ReceiveTransferRefund {
            transfer,
            balance_proof,
            sender,
            routes,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BalanceProof, Lock};
    use shared_types::{Signature, TokenAmount};

    fn transfer() -> LockedTransferSigned {
        LockedTransferSigned {
            message_identifier: 1,
            payment_identifier: 2,
            token: [3u8; 20],
            recipient: [4u8; 20],
            lock: Lock {
                amount: TokenAmount::from(10u64),
                expiration: 50,
                secrethash: [5u8; 32],
            },
            initiator: [6u8; 20],
            target: [7u8; 20],
            balance_proof: BalanceProof {
                chain_id: 1,
                token_network_address: [8u8; 20],
                channel_identifier: 9,
                nonce: 2,
                transferred_amount: TokenAmount::zero(),
                locked_amount: TokenAmount::from(10u64),
                locksroot: [1u8; 32],
                balance_hash: [2u8; 32],
                message_hash: [3u8; 32],
                signature: Signature::default(),
                sender: [0xEEu8; 20],
            },
        }
    }

    fn routes(n: usize) -> Vec<RouteState> {
        (0..n)
            .map(|i| RouteState {
                route: vec![[0u8; 20], [i as u8 + 1; 20]],
                forward_channel_id: i as u64,
            })
            .collect()
    }

    #[test]
    fn test_initiator_without_secret_drops_routes() {
        let change = decide_refund(
            RefundRole::Initiator { known_secret: None },
            routes(3),
            transfer(),
            || [0x77u8; 32],
        );
        match change {
            StateChange::TransferRefundCancelRoute(record) => {
                assert!(record.routes.is_empty());
                assert_eq!(record.secret, [0x77u8; 32]);
                assert_eq!(record.secrethash, sha256_secrethash(&[0x77u8; 32]));
                assert_eq!(record.sender, [0xEEu8; 20]);
            }
            other => panic!("unexpected state change: {}", other.name()),
        }
    }

    #[test]
    fn test_initiator_with_secret_keeps_routes() {
        let known = [0x99u8; 32];
        let change = decide_refund(
            RefundRole::Initiator {
                known_secret: Some(known),
            },
            routes(4),
            transfer(),
            || panic!("fresh secret must not be generated"),
        );
        match change {
            StateChange::TransferRefundCancelRoute(record) => {
                assert_eq!(record.routes, routes(4));
                assert_eq!(record.secret, known);
            }
            other => panic!("unexpected state change: {}", other.name()),
        }
    }

    #[test]
    fn test_forwarder_keeps_routes() {
        let change = decide_refund(RefundRole::Forwarder, routes(2), transfer(), || {
            panic!("fresh secret must not be generated")
        });
        match change {
            StateChange::TransferRefund(record) => {
                assert_eq!(record.routes, routes(2));
                assert_eq!(record.sender, record.balance_proof.sender);
                assert_eq!(record.transfer, transfer());
            }
            other => panic!("unexpected state change: {}", other.name()),
        }
    }

    #[test]
    fn test_is_initiator() {
        assert!(RefundRole::is_initiator(Some(TransferRole::Initiator)));
        assert!(!RefundRole::is_initiator(Some(TransferRole::Mediator)));
        assert!(!RefundRole::is_initiator(Some(TransferRole::Target)));
        assert!(!RefundRole::is_initiator(None));
    }
}
