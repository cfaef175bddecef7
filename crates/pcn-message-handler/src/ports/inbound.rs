//! # Inbound Ports
//!
//! API trait defining what the message handler offers the transport layer.

use crate::application::NodeContext;
use crate::domain::Message;
use async_trait::async_trait;

/// Message handler API - inbound port.
///
/// Handling never fails towards the caller: errors are logged and the message
/// is dropped.
#[async_trait]
pub trait MessageHandlerApi: Send + Sync {
    /// Handle one inbound message for `node`.
    async fn on_message(&self, node: &NodeContext, message: Message);
}
