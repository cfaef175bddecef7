//! # Outbound Ports
//!
//! Collaborators the message handler depends on: the on-chain secret
//! registry, route discovery, the read-only chain state, the state-change
//! sink and the mediation/target entry points.

use crate::config::RoutingConfig;
use crate::domain::{
    MediatedTransfer, MessageHandlerError, MessageHandlerResult, PrivateKey, RouteState,
    StateChange, TransferRole,
};
use async_trait::async_trait;
use parking_lot::Mutex;
use shared_types::{Address, BlockIdentifier, Secret, SecretHash, TokenAmount};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use uuid::Uuid;

/// On-chain secret registry - outbound port.
#[async_trait]
pub trait SecretRegistry: Send + Sync {
    /// Whether `secrethash` has a registered secret as of `block_identifier`.
    async fn is_secret_registered(
        &self,
        secrethash: SecretHash,
        block_identifier: BlockIdentifier,
    ) -> MessageHandlerResult<bool>;
}

/// Read-only view of the node's chain state.
pub trait ChainStateView: Send + Sync {
    /// Our role in the payment locked under `secrethash`, if we know it.
    fn transfer_role(&self, secrethash: &SecretHash) -> Option<TransferRole>;

    /// Secret we hold for `secrethash`, if any.
    fn transfer_secret(&self, secrethash: &SecretHash) -> Option<Secret>;
}

/// Parameters of a route lookup.
#[derive(Clone, Copy, Debug)]
pub struct RouteRequest<'a> {
    /// Token network to route in.
    pub token_network_address: Address,
    /// One-to-n contract used to pay the pathfinding service.
    pub one_to_n_address: Option<Address>,
    /// Route source (our address).
    pub from_address: Address,
    /// Route destination.
    pub to_address: Address,
    /// Amount to route.
    pub amount: TokenAmount,
    /// Hop to exclude as the next hop.
    pub previous_address: Option<Address>,
    /// Routing parameters.
    pub config: &'a RoutingConfig,
    /// Key used to sign pathfinding IOUs.
    pub private_key: &'a PrivateKey,
}

/// Result of a route lookup.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RouteSet {
    /// Candidate routes, best first.
    pub routes: Vec<RouteState>,
    /// Token for reporting route quality back to the pathfinding service.
    pub feedback_token: Option<Uuid>,
}

/// Route discovery - outbound port.
#[async_trait]
pub trait RouteFinder: Send + Sync {
    /// Find routes for a payment.
    async fn get_best_routes(
        &self,
        chain_state: &dyn ChainStateView,
        request: RouteRequest<'_>,
    ) -> MessageHandlerResult<RouteSet>;
}

/// State machine entry point - outbound port.
pub trait StateChangeSink: Send + Sync {
    /// Apply a state change and track it until its effects are persisted.
    fn handle_and_track(&self, state_change: StateChange);
}

/// Mediated-transfer entry points - outbound port.
pub trait MediationEngine: Send + Sync {
    /// Start receiving a transfer addressed to us.
    fn target_mediated_transfer(&self, transfer: MediatedTransfer);

    /// Start forwarding a transfer.
    fn mediate_mediated_transfer(&self, transfer: MediatedTransfer);
}

// =============================================================================
// Mock Implementations for Testing
// =============================================================================

/// Mock secret registry for testing.
#[derive(Clone, Default)]
pub struct MockSecretRegistry {
    /// Secret hashes reported as registered.
    pub registered: HashSet<SecretHash>,
    /// Should fail?
    pub should_fail: bool,
    /// Queries received, in order.
    pub queries: Arc<Mutex<Vec<(SecretHash, BlockIdentifier)>>>,
}

impl MockSecretRegistry {
    /// Registry reporting `secrethash` as registered.
    pub fn with_registered(secrethash: SecretHash) -> Self {
        let mut registry = Self::default();
        registry.registered.insert(secrethash);
        registry
    }
}

#[async_trait]
impl SecretRegistry for MockSecretRegistry {
    async fn is_secret_registered(
        &self,
        secrethash: SecretHash,
        block_identifier: BlockIdentifier,
    ) -> MessageHandlerResult<bool> {
        self.queries.lock().push((secrethash, block_identifier));
        if self.should_fail {
            return Err(MessageHandlerError::SecretRegistry(
                "Mock failure".to_string(),
            ));
        }
        Ok(self.registered.contains(&secrethash))
    }
}

/// Route request as observed by [`MockRouteFinder`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedRouteRequest {
    /// Token network.
    pub token_network_address: Address,
    /// One-to-n contract.
    pub one_to_n_address: Option<Address>,
    /// Route source.
    pub from_address: Address,
    /// Route destination.
    pub to_address: Address,
    /// Amount.
    pub amount: TokenAmount,
    /// Excluded hop.
    pub previous_address: Option<Address>,
    /// Routing parameters.
    pub config: RoutingConfig,
    /// Address of the key passed along.
    pub signer: Address,
}

/// Mock route finder for testing.
#[derive(Clone, Default)]
pub struct MockRouteFinder {
    /// Routes returned for every request.
    pub routes: Vec<RouteState>,
    /// Should fail?
    pub should_fail: bool,
    /// Requests received, in order.
    pub requests: Arc<Mutex<Vec<RecordedRouteRequest>>>,
}

impl MockRouteFinder {
    /// Route finder returning `routes`.
    pub fn with_routes(routes: Vec<RouteState>) -> Self {
        Self {
            routes,
            ..Self::default()
        }
    }

    /// Requests received so far.
    pub fn recorded(&self) -> Vec<RecordedRouteRequest> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl RouteFinder for MockRouteFinder {
    async fn get_best_routes(
        &self,
        _chain_state: &dyn ChainStateView,
        request: RouteRequest<'_>,
    ) -> MessageHandlerResult<RouteSet> {
        self.requests.lock().push(RecordedRouteRequest {
            token_network_address: request.token_network_address,
            one_to_n_address: request.one_to_n_address,
            from_address: request.from_address,
            to_address: request.to_address,
            amount: request.amount,
            previous_address: request.previous_address,
            config: request.config.clone(),
            signer: request.private_key.address(),
        });

        if self.should_fail {
            return Err(MessageHandlerError::Routing("Mock failure".to_string()));
        }

        Ok(RouteSet {
            routes: self.routes.clone(),
            feedback_token: Some(Uuid::new_v4()),
        })
    }
}

/// Mock chain state for testing.
#[derive(Clone, Default)]
pub struct MockChainState {
    /// Role per payment.
    pub roles: HashMap<SecretHash, TransferRole>,
    /// Known secrets per payment.
    pub secrets: HashMap<SecretHash, Secret>,
}

impl MockChainState {
    /// Record our role for a payment.
    pub fn with_role(mut self, secrethash: SecretHash, role: TransferRole) -> Self {
        self.roles.insert(secrethash, role);
        self
    }

    /// Record a secret we hold.
    pub fn with_secret(mut self, secrethash: SecretHash, secret: Secret) -> Self {
        self.secrets.insert(secrethash, secret);
        self
    }
}

impl ChainStateView for MockChainState {
    fn transfer_role(&self, secrethash: &SecretHash) -> Option<TransferRole> {
        self.roles.get(secrethash).copied()
    }

    fn transfer_secret(&self, secrethash: &SecretHash) -> Option<Secret> {
        self.secrets.get(secrethash).copied()
    }
}
