//! # Payment-Channel Message Handler
//!
//! Inbound message dispatch for a payment-channel network node.
//!
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! Classify each inbound protocol message by its exact kind, translate it into
//! a state-change record for the node's state machine, and apply the policy
//! that cannot be expressed as a plain translation:
//! - reject locked transfers whose secret is already registered on-chain
//! - on refund, cancel every alternative route when the initiator does not
//!   know the secret, or forward the refund with fresh routes as a mediator
//!
//! ## Safety Rules
//!
//! | Rule | Where |
//! |------|-------|
//! | Registered secret means the transfer is dropped | `algorithms::replay_guard` |
//! | Initiator without secret gets no routes | `algorithms::refund_policy` |
//! | Balance-proof sender comes from the signature | `domain::balance_proof` |
//! | Registry failure drops the transfer | `application::MessageDispatcher` |
//!
//! ## Module Structure
//!
//! ```text
//! pcn-message-handler/
//! ├── domain/          # Messages, balance proofs, state changes, keys
//! ├── algorithms/      # Replay guard, refund policy, translation, secrets
//! ├── ports/           # MessageHandlerApi, SecretRegistry, RouteFinder, ...
//! ├── application/     # NodeContext, MessageDispatcher, NodeInbox
//! ├── adapters/        # In-memory registry, recording node
//! ├── config.rs        # MessageHandlerConfig
//! └── telemetry.rs     # Log subscriber setup
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod algorithms;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;

// Re-exports
pub use adapters::{InMemorySecretRegistry, NodeAction, RecordingNode};
pub use algorithms::{
    decide_locked_transfer, decide_refund, random_secret, sha256_secrethash,
    LockedTransferDisposition, RefundRole,
};
pub use application::{InboxHandle, MessageDispatcher, NodeContext, NodeContextBuilder, NodeInbox};
pub use config::{LoggingConfig, MessageHandlerConfig, RoutingConfig};
pub use domain::{
    sign_balance_proof, BalanceProof, Envelope, Lock,
    LockedTransferSigned, MediatedTransfer, Message, MessageHandlerError, MessageHandlerResult,
    MessageKind, PrivateKey, RouteState, StateChange, TransferRole,
};
pub use ports::{
    ChainStateView, MediationEngine, MessageHandlerApi, MockChainState, MockRouteFinder,
    MockSecretRegistry, RouteFinder, RouteRequest, RouteSet, SecretRegistry, StateChangeSink,
};
pub use telemetry::init_logging;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
