//! In-memory secret registry
//!
//! Implements the `SecretRegistry` port over a map of registration blocks.

use crate::domain::MessageHandlerResult;
use crate::ports::outbound::SecretRegistry;
use async_trait::async_trait;
use parking_lot::RwLock;
use shared_types::{pex, BlockIdentifier, BlockNumber, Hash, SecretHash};
use std::collections::HashMap;
use tracing::debug;

/// In-memory secret registry for tests and local simulation.
pub struct InMemorySecretRegistry {
    /// secrethash -> block the secret was registered in.
    registrations: RwLock<HashMap<SecretHash, BlockNumber>>,
    /// Known block hashes, for `BlockIdentifier::Hash` queries.
    blocks: RwLock<HashMap<Hash, BlockNumber>>,
}

impl InMemorySecretRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            registrations: RwLock::new(HashMap::new()),
            blocks: RwLock::new(HashMap::new()),
        }
    }

    /// Register a secret hash at `block`. Earlier registrations win.
    pub fn register_secret(&self, secrethash: SecretHash, block: BlockNumber) {
        let mut registrations = self.registrations.write();
        let entry = registrations.entry(secrethash).or_insert(block);
        *entry = (*entry).min(block);
        debug!(
            "[pcn-handler] Secret {} registered at block {}",
            pex(&secrethash),
            *entry
        );
    }

    /// Make a block hash resolvable.
    pub fn add_block(&self, hash: Hash, number: BlockNumber) {
        self.blocks.write().insert(hash, number);
    }

    /// Number of registered secrets.
    pub fn len(&self) -> usize {
        self.registrations.read().len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.registrations.read().is_empty()
    }

    fn registered_at(&self, secrethash: &SecretHash) -> Option<BlockNumber> {
        self.registrations.read().get(secrethash).copied()
    }
}

impl Default for InMemorySecretRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SecretRegistry for InMemorySecretRegistry {
    async fn is_secret_registered(
        &self,
        secrethash: SecretHash,
        block_identifier: BlockIdentifier,
    ) -> MessageHandlerResult<bool> {
        let Some(registered_at) = self.registered_at(&secrethash) else {
            return Ok(false);
        };

        let visible = match block_identifier {
            BlockIdentifier::Latest => true,
            BlockIdentifier::Number(n) => registered_at <= n,
            BlockIdentifier::Hash(h) => self
                .blocks
                .read()
                .get(&h)
                .is_some_and(|n| registered_at <= *n),
        };
        Ok(visible)
    }
}
