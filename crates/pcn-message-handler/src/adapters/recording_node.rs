//! Recording node
//!
//! Implements `StateChangeSink` and `MediationEngine` by keeping an ordered
//! log of everything the dispatcher hands over.

use crate::domain::{MediatedTransfer, StateChange};
use crate::ports::outbound::{MediationEngine, StateChangeSink};
use parking_lot::RwLock;
use tracing::debug;

/// Action observed by a [`RecordingNode`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeAction {
    /// `handle_and_track` was called.
    StateChange(StateChange),
    /// `target_mediated_transfer` was called.
    Target(MediatedTransfer),
    /// `mediate_mediated_transfer` was called.
    Mediate(MediatedTransfer),
}

/// In-memory sink and mediation engine.
#[derive(Default)]
pub struct RecordingNode {
    actions: RwLock<Vec<NodeAction>>,
}

impl RecordingNode {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// All actions, in order.
    pub fn actions(&self) -> Vec<NodeAction> {
        self.actions.read().clone()
    }

    /// State changes only, in order.
    pub fn state_changes(&self) -> Vec<StateChange> {
        self.actions
            .read()
            .iter()
            .filter_map(|action| match action {
                NodeAction::StateChange(change) => Some(change.clone()),
                _ => None,
            })
            .collect()
    }

    /// Number of recorded actions.
    pub fn len(&self) -> usize {
        self.actions.read().len()
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.actions.read().is_empty()
    }

    /// Forget everything recorded so far.
    pub fn clear(&self) {
        self.actions.write().clear();
    }
}

impl StateChangeSink for RecordingNode {
    fn handle_and_track(&self, state_change: StateChange) {
        debug!("[pcn-handler] Recorded {}", state_change.name());
        self.actions.write().push(NodeAction::StateChange(state_change));
    }
}

impl MediationEngine for RecordingNode {
    fn target_mediated_transfer(&self, transfer: MediatedTransfer) {
        self.actions.write().push(NodeAction::Target(transfer));
    }

    fn mediate_mediated_transfer(&self, transfer: MediatedTransfer) {
        self.actions.write().push(NodeAction::Mediate(transfer));
    }
}
