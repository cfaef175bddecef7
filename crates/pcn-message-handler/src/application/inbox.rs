//! # Node Inbox
//!
//! Per-node FIFO in front of the dispatcher. One task owns the node context
//! and handles messages strictly one after another, so dispatches for the
//! same node never overlap even while a registry or routing call is pending.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::{mpsc, Notify};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::application::NodeContext;
use crate::domain::{Message, MessageHandlerError, MessageHandlerResult};
use crate::ports::MessageHandlerApi;

/// Spawner for node inbox tasks.
pub struct NodeInbox;

impl NodeInbox {
    /// Start the inbox task for `node`.
    ///
    /// The returned join handle resolves to the number of messages handled.
    pub fn spawn<H>(
        handler: Arc<H>,
        node: NodeContext,
        capacity: usize,
    ) -> (InboxHandle, JoinHandle<u64>)
    where
        H: MessageHandlerApi + ?Sized + 'static,
    {
        let (sender, mut receiver) = mpsc::channel::<Message>(capacity.max(1));
        let shutdown = Arc::new(Notify::new());
        let closed = Arc::new(AtomicBool::new(false));

        let handle = InboxHandle {
            sender,
            shutdown: shutdown.clone(),
            closed,
        };

        let task = tokio::spawn(async move {
            info!(
                "[pcn-handler] Inbox started for node {}",
                shared_types::pex(&node.address())
            );
            let mut processed = 0u64;
            let mut closing = false;

            loop {
                tokio::select! {
                    biased;

                    _ = shutdown.notified(), if !closing => {
                        // Refuse new messages, drain the queued ones
                        receiver.close();
                        closing = true;
                    }
                    next = receiver.recv() => match next {
                        Some(message) => {
                            handler.on_message(&node, message).await;
                            processed += 1;
                        }
                        None => break,
                    },
                }
            }

            debug!(
                "[pcn-handler] Inbox stopped after {} messages",
                processed
            );
            processed
        });

        (handle, task)
    }
}

/// Sending side of a node inbox.
#[derive(Clone)]
pub struct InboxHandle {
    sender: mpsc::Sender<Message>,
    shutdown: Arc<Notify>,
    closed: Arc<AtomicBool>,
}

impl InboxHandle {
    /// Queue a message, waiting for capacity.
    pub async fn deliver(&self, message: Message) -> MessageHandlerResult<()> {
        if self.closed.load(Ordering::Acquire) {
            return Err(MessageHandlerError::InboxClosed);
        }
        self.sender
            .send(message)
            .await
            .map_err(|_| MessageHandlerError::InboxClosed)
    }

    /// Stop accepting messages. Already queued messages are still handled.
    pub fn close(&self) {
        if !self.closed.swap(true, Ordering::AcqRel) {
            self.shutdown.notify_one();
        }
    }

    /// Whether the inbox stopped accepting messages.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire) || self.sender.is_closed()
    }
}
