//! # Message Dispatcher
//!
//! Application service routing each inbound message by its exact kind.
//!
//! | Kind | Handling |
//! |------|----------|
//! | `LockedTransfer` | replay guard, then target or mediate entry point |
//! | `RefundTransfer` | route lookup, then refund policy |
//! | everything else known | direct translation |
//! | unrecognized | logged and dropped |
//!
//! Every known kind produces at most one outgoing action.

use async_trait::async_trait;
use shared_types::{pex, BlockIdentifier, Secret};
use tracing::{debug, error, info, warn};

use crate::algorithms::{
    decide_locked_transfer, decide_refund, random_secret, translation, LockedTransferDisposition,
    RefundRole,
};
use crate::application::NodeContext;
use crate::domain::{
    LockedTransferSigned, MediatedTransfer, Message, MessageHandlerResult, RouteState,
    StateChange, UnrecognizedMessage,
};
use crate::ports::{MessageHandlerApi, RouteRequest};

/// Message dispatcher - inbound message handling service.
///
/// Stateless: all node state comes from the [`NodeContext`] passed per call.
#[derive(Clone)]
pub struct MessageDispatcher {
    fresh_secret: fn() -> Secret,
}

impl Default for MessageDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageDispatcher {
    /// Create a dispatcher drawing cancel-route secrets from the thread RNG.
    pub fn new() -> Self {
        Self {
            fresh_secret: random_secret,
        }
    }

    /// Create a dispatcher with a custom secret source.
    pub fn with_secret_source(fresh_secret: fn() -> Secret) -> Self {
        Self { fresh_secret }
    }

    /// Dispatch one message. Errors are returned instead of logged.
    pub async fn dispatch(&self, node: &NodeContext, message: Message) -> MessageHandlerResult<()> {
        match message {
            Message::LockedTransfer(transfer) => self.handle_locked_transfer(node, transfer).await,
            Message::RefundTransfer(transfer) => self.handle_refund_transfer(node, transfer).await,
            Message::SecretRequest(m) => {
                emit(node, translation::secret_request(m));
                Ok(())
            }
            Message::RevealSecret(m) => {
                emit(node, translation::secret_reveal(m));
                Ok(())
            }
            Message::Unlock(m) => {
                emit(node, translation::unlock(m)?);
                Ok(())
            }
            Message::LockExpired(m) => {
                emit(node, translation::lock_expired(m)?);
                Ok(())
            }
            Message::WithdrawRequest(m) => {
                emit(node, translation::withdraw_request(m));
                Ok(())
            }
            Message::Delivered(m) => {
                emit(node, translation::delivered(m));
                Ok(())
            }
            Message::Processed(m) => {
                emit(node, translation::processed(m));
                Ok(())
            }
            Message::Unrecognized(raw) => {
                log_unrecognized(&raw);
                Ok(())
            }
        }
    }

    async fn handle_locked_transfer(
        &self,
        node: &NodeContext,
        transfer: MediatedTransfer,
    ) -> MessageHandlerResult<()> {
        let secrethash = transfer.lock.secrethash;
        let registered = node
            .secret_registry()
            .is_secret_registered(secrethash, BlockIdentifier::Latest)
            .await?;

        match decide_locked_transfer(registered, &node.address(), &transfer.target) {
            LockedTransferDisposition::Rejected => {
                warn!(
                    "[pcn-handler] Ignoring received transfer with secrethash {} since it is already registered in the secret registry",
                    pex(&secrethash)
                );
            }
            LockedTransferDisposition::Target => {
                info!(
                    "[pcn-handler] Receiving transfer {} as target",
                    pex(&secrethash)
                );
                node.mediation().target_mediated_transfer(transfer);
            }
            LockedTransferDisposition::Mediate => {
                info!(
                    "[pcn-handler] Mediating transfer {} towards {}",
                    pex(&secrethash),
                    pex(&transfer.target)
                );
                node.mediation().mediate_mediated_transfer(transfer);
            }
        }
        Ok(())
    }

    async fn handle_refund_transfer(
        &self,
        node: &NodeContext,
        message: MediatedTransfer,
    ) -> MessageHandlerResult<()> {
        let transfer = LockedTransferSigned::from_message(&message)?;
        let secrethash = transfer.lock.secrethash;

        let routes = self.find_routes(node, &message, &transfer).await;

        let role = if RefundRole::is_initiator(node.chain_state().transfer_role(&secrethash)) {
            RefundRole::Initiator {
                known_secret: node.chain_state().transfer_secret(&secrethash),
            }
        } else {
            RefundRole::Forwarder
        };

        if matches!(role, RefundRole::Initiator { known_secret: None }) {
            info!(
                "[pcn-handler] Refund for {} without known secret, cancelling all routes",
                pex(&secrethash)
            );
        }

        let state_change = decide_refund(role, routes, transfer, self.fresh_secret);
        emit(node, state_change);
        Ok(())
    }

    /// Routes from us to the transfer target, excluding the refunding hop.
    ///
    /// A routing failure yields no routes.
    async fn find_routes(
        &self,
        node: &NodeContext,
        message: &MediatedTransfer,
        transfer: &LockedTransferSigned,
    ) -> Vec<RouteState> {
        let request = RouteRequest {
            token_network_address: transfer.balance_proof.token_network_address,
            one_to_n_address: node.one_to_n_address(),
            from_address: node.address(),
            to_address: transfer.target,
            amount: transfer.lock.amount,
            previous_address: Some(message.sender),
            config: &node.config().routing,
            private_key: node.private_key(),
        };

        match node
            .route_finder()
            .get_best_routes(node.chain_state(), request)
            .await
        {
            Ok(route_set) => {
                debug!(
                    "[pcn-handler] Found {} routes for {}",
                    route_set.routes.len(),
                    pex(&transfer.lock.secrethash)
                );
                route_set.routes
            }
            Err(e) => {
                warn!(
                    "[pcn-handler] Route lookup for {} failed: {}",
                    pex(&transfer.lock.secrethash),
                    e
                );
                Vec::new()
            }
        }
    }
}

#[async_trait]
impl MessageHandlerApi for MessageDispatcher {
    async fn on_message(&self, node: &NodeContext, message: Message) {
        let kind = message.kind();
        debug!(
            "[pcn-handler] Dispatching cmdid {} from {}",
            message.cmdid(),
            pex(&message.sender())
        );

        if let Err(e) = self.dispatch(node, message).await {
            error!(
                "[pcn-handler] Dropping {} message: {}",
                kind.map(|k| k.name()).unwrap_or("unrecognized"),
                e
            );
        }
    }
}

fn emit(node: &NodeContext, state_change: StateChange) {
    debug!("[pcn-handler] Emitting {}", state_change.name());
    node.state_changes().handle_and_track(state_change);
}

fn log_unrecognized(raw: &UnrecognizedMessage) {
    error!(
        "[pcn-handler] Unknown message cmdid {} from {} ({} bytes), dropping",
        raw.cmdid,
        pex(&raw.sender),
        raw.payload.len()
    );
}
