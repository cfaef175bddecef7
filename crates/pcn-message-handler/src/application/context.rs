//! # Node Context
//!
//! Everything the dispatcher needs to know about the local node, passed
//! explicitly to each call. Collaborators are shared trait objects so tests
//! can inject deterministic fakes.

use crate::config::MessageHandlerConfig;
use crate::domain::{MessageHandlerError, MessageHandlerResult, PrivateKey};
use crate::ports::{ChainStateView, MediationEngine, RouteFinder, SecretRegistry, StateChangeSink};
use shared_types::Address;
use std::sync::Arc;

/// Local node context.
#[derive(Clone)]
pub struct NodeContext {
    address: Address,
    private_key: PrivateKey,
    config: MessageHandlerConfig,
    one_to_n_address: Option<Address>,
    secret_registry: Arc<dyn SecretRegistry>,
    chain_state: Arc<dyn ChainStateView>,
    route_finder: Arc<dyn RouteFinder>,
    state_changes: Arc<dyn StateChangeSink>,
    mediation: Arc<dyn MediationEngine>,
}

impl NodeContext {
    /// Start building a context for the node owning `private_key`.
    pub fn builder(private_key: PrivateKey) -> NodeContextBuilder {
        NodeContextBuilder::new(private_key)
    }

    /// Our address, derived from the private key.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Our private key.
    pub fn private_key(&self) -> &PrivateKey {
        &self.private_key
    }

    /// Handler configuration.
    pub fn config(&self) -> &MessageHandlerConfig {
        &self.config
    }

    /// One-to-n contract, if the node pays a pathfinding service.
    pub fn one_to_n_address(&self) -> Option<Address> {
        self.one_to_n_address
    }

    /// On-chain secret registry.
    pub fn secret_registry(&self) -> &dyn SecretRegistry {
        self.secret_registry.as_ref()
    }

    /// Chain state view.
    pub fn chain_state(&self) -> &dyn ChainStateView {
        self.chain_state.as_ref()
    }

    /// Route finder.
    pub fn route_finder(&self) -> &dyn RouteFinder {
        self.route_finder.as_ref()
    }

    /// State machine entry point.
    pub fn state_changes(&self) -> &dyn StateChangeSink {
        self.state_changes.as_ref()
    }

    /// Mediated-transfer entry points.
    pub fn mediation(&self) -> &dyn MediationEngine {
        self.mediation.as_ref()
    }
}

impl std::fmt::Debug for NodeContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeContext")
            .field("address", &hex::encode(self.address))
            .field("one_to_n_address", &self.one_to_n_address.map(hex::encode))
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Builder for [`NodeContext`].
#[derive(Clone)]
pub struct NodeContextBuilder {
    private_key: PrivateKey,
    config: MessageHandlerConfig,
    one_to_n_address: Option<Address>,
    secret_registry: Option<Arc<dyn SecretRegistry>>,
    chain_state: Option<Arc<dyn ChainStateView>>,
    route_finder: Option<Arc<dyn RouteFinder>>,
    state_changes: Option<Arc<dyn StateChangeSink>>,
    mediation: Option<Arc<dyn MediationEngine>>,
}

impl NodeContextBuilder {
    /// Create a new builder with the node key and default config.
    pub fn new(private_key: PrivateKey) -> Self {
        Self {
            private_key,
            config: MessageHandlerConfig::default(),
            one_to_n_address: None,
            secret_registry: None,
            chain_state: None,
            route_finder: None,
            state_changes: None,
            mediation: None,
        }
    }

    /// Set configuration.
    pub fn config(mut self, config: MessageHandlerConfig) -> Self {
        self.config = config;
        self
    }

    /// Set one-to-n contract address.
    pub fn one_to_n_address(mut self, addr: Address) -> Self {
        self.one_to_n_address = Some(addr);
        self
    }

    /// Set secret registry.
    pub fn secret_registry(mut self, registry: Arc<dyn SecretRegistry>) -> Self {
        self.secret_registry = Some(registry);
        self
    }

    /// Set chain state view.
    pub fn chain_state(mut self, chain_state: Arc<dyn ChainStateView>) -> Self {
        self.chain_state = Some(chain_state);
        self
    }

    /// Set route finder.
    pub fn route_finder(mut self, route_finder: Arc<dyn RouteFinder>) -> Self {
        self.route_finder = Some(route_finder);
        self
    }

    /// Set state-change sink.
    pub fn state_changes(mut self, sink: Arc<dyn StateChangeSink>) -> Self {
        self.state_changes = Some(sink);
        self
    }

    /// Set mediation engine.
    pub fn mediation(mut self, mediation: Arc<dyn MediationEngine>) -> Self {
        self.mediation = Some(mediation);
        self
    }

    /// Build the context.
    ///
    /// Fails if a collaborator is missing or the config does not validate.
    pub fn build(self) -> MessageHandlerResult<NodeContext> {
        self.config.validate()?;

        Ok(NodeContext {
            address: self.private_key.address(),
            secret_registry: self
                .secret_registry
                .ok_or(MessageHandlerError::MissingCollaborator("secret_registry"))?,
            chain_state: self
                .chain_state
                .ok_or(MessageHandlerError::MissingCollaborator("chain_state"))?,
            route_finder: self
                .route_finder
                .ok_or(MessageHandlerError::MissingCollaborator("route_finder"))?,
            state_changes: self
                .state_changes
                .ok_or(MessageHandlerError::MissingCollaborator("state_changes"))?,
            mediation: self
                .mediation
                .ok_or(MessageHandlerError::MissingCollaborator("mediation"))?,
            private_key: self.private_key,
            config: self.config,
            one_to_n_address: self.one_to_n_address,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::RecordingNode;
    use crate::ports::{MockChainState, MockRouteFinder, MockSecretRegistry};

    fn full_builder() -> NodeContextBuilder {
        let recorder = Arc::new(RecordingNode::new());
        NodeContext::builder(PrivateKey::from_bytes([0x61u8; 32]).unwrap())
            .secret_registry(Arc::new(MockSecretRegistry::default()))
            .chain_state(Arc::new(MockChainState::default()))
            .route_finder(Arc::new(MockRouteFinder::default()))
            .state_changes(recorder.clone())
            .mediation(recorder)
    }

    #[test]
    fn test_build_derives_address() {
        let key = PrivateKey::from_bytes([0x61u8; 32]).unwrap();
        let node = full_builder().one_to_n_address([5u8; 20]).build().unwrap();
        assert_eq!(node.address(), key.address());
        assert_eq!(node.one_to_n_address(), Some([5u8; 20]));
    }

    #[test]
    fn test_build_missing_collaborator() {
        let result = NodeContext::builder(PrivateKey::from_bytes([0x61u8; 32]).unwrap())
            .secret_registry(Arc::new(MockSecretRegistry::default()))
            .build();
        assert!(matches!(
            result,
            Err(MessageHandlerError::MissingCollaborator("chain_state"))
        ));
    }

    #[test]
    fn test_build_rejects_invalid_config() {
        let mut config = MessageHandlerConfig::default();
        config.inbox_capacity = 0;
        assert!(matches!(
            full_builder().config(config).build(),
            Err(MessageHandlerError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_debug_hides_key() {
        let node = full_builder().build().unwrap();
        let debug_str = format!("{:?}", node);
        assert!(debug_str.contains("NodeContext"));
        assert!(!debug_str.contains(&"61".repeat(32)));
    }
}
