//! Shared fixtures for the message handler integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use pcn_message_handler::domain::{Delivered, Processed, RevealSecret, SecretRequest};
use pcn_message_handler::{
    Envelope, Lock, MediatedTransfer, MessageHandlerConfig, MockChainState, MockRouteFinder,
    MockSecretRegistry, NodeContext, PrivateKey, RecordingNode, RouteState,
};
use shared_types::{Address, SecretHash, Signature, TokenAmount};

pub const TOKEN_NETWORK: Address = [0x70u8; 20];
pub const ONE_TO_N: Address = [0x71u8; 20];
pub const SECRETHASH: SecretHash = [0x5Au8; 32];

// =============================================================================
// KEYS AND ENVELOPES
// =============================================================================

pub fn key(byte: u8) -> PrivateKey {
    PrivateKey::from_bytes([byte; 32]).expect("valid test key")
}

pub fn our_key() -> PrivateKey {
    key(0x01)
}

pub fn partner_key() -> PrivateKey {
    key(0x02)
}

pub fn signed_envelope(signer: &PrivateKey, nonce: u64) -> Envelope {
    Envelope {
        chain_id: 337,
        token_network_address: TOKEN_NETWORK,
        channel_identifier: 11,
        nonce,
        transferred_amount: TokenAmount::from(100u64),
        locked_amount: TokenAmount::from(25u64),
        locksroot: [0x3Cu8; 32],
        message_hash: [nonce as u8; 32],
        signature: Signature::default(),
    }
    .signed_by(signer)
    .expect("signing succeeds")
}

// =============================================================================
// MESSAGES
// =============================================================================

/// Mediated-transfer body signed by `signer` and sent by `sender`.
pub fn transfer_body(signer: &PrivateKey, sender: Address, target: Address) -> MediatedTransfer {
    MediatedTransfer {
        message_identifier: 1001,
        payment_identifier: 42,
        token: [0x7Au8; 20],
        recipient: [0x7Bu8; 20],
        lock: Lock {
            amount: TokenAmount::from(25u64),
            expiration: 5_000,
            secrethash: SECRETHASH,
        },
        target,
        initiator: [0x7Cu8; 20],
        envelope: signed_envelope(signer, 4),
        sender,
    }
}

pub fn secret_request(id: u64, sender: Address) -> SecretRequest {
    SecretRequest {
        message_identifier: id,
        payment_identifier: 42,
        amount: TokenAmount::from(25u64),
        expiration: 5_000,
        secrethash: SECRETHASH,
        sender,
    }
}

pub fn reveal_secret(id: u64, sender: Address) -> RevealSecret {
    RevealSecret {
        message_identifier: id,
        secret: [0x11u8; 32],
        sender,
    }
}

pub fn delivered(id: u64, sender: Address) -> Delivered {
    Delivered {
        delivered_message_identifier: id,
        sender,
    }
}

pub fn processed(id: u64, sender: Address) -> Processed {
    Processed {
        message_identifier: id,
        sender,
    }
}

pub fn routes(n: usize) -> Vec<RouteState> {
    (0..n)
        .map(|i| RouteState {
            route: vec![our_key().address(), [0x80 + i as u8; 20], [0x90u8; 20]],
            forward_channel_id: 100 + i as u64,
        })
        .collect()
}

// =============================================================================
// NODE HARNESS
// =============================================================================

/// Node context plus handles on every fake collaborator.
pub struct Harness {
    pub node: NodeContext,
    pub recorder: Arc<RecordingNode>,
    pub registry: MockSecretRegistry,
    pub route_finder: MockRouteFinder,
}

impl Harness {
    pub fn new() -> Self {
        Self::with(
            MockSecretRegistry::default(),
            MockChainState::default(),
            MockRouteFinder::default(),
        )
    }

    pub fn with(
        registry: MockSecretRegistry,
        chain_state: MockChainState,
        route_finder: MockRouteFinder,
    ) -> Self {
        let recorder = Arc::new(RecordingNode::new());
        let node = NodeContext::builder(our_key())
            .config(MessageHandlerConfig::for_testing())
            .one_to_n_address(ONE_TO_N)
            .secret_registry(Arc::new(registry.clone()))
            .chain_state(Arc::new(chain_state))
            .route_finder(Arc::new(route_finder.clone()))
            .state_changes(recorder.clone())
            .mediation(recorder.clone())
            .build()
            .expect("complete node context");

        Self {
            node,
            recorder,
            registry,
            route_finder,
        }
    }
}
