//! # Application Layer
//!
//! Node context, message dispatcher and node inbox.

mod context;
mod inbox;
mod service;

pub use context::{NodeContext, NodeContextBuilder};
pub use inbox::{InboxHandle, NodeInbox};
pub use service::MessageDispatcher;
