//! # Replay Guard
//!
//! Acceptance decision for inbound locked transfers.
//!
//! A transfer whose secret is already registered on-chain is rejected: the
//! sender could claim the lock on-chain while we still forward it.

use shared_types::Address;

/// What to do with an inbound locked transfer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LockedTransferDisposition {
    /// Secret already registered; drop without side effects.
    Rejected,
    /// We are the payee.
    Target,
    /// Forward towards the payee.
    Mediate,
}

/// Decide the disposition of a locked transfer.
pub fn decide_locked_transfer(
    secret_registered: bool,
    our_address: &Address,
    target: &Address,
) -> LockedTransferDisposition {
    if secret_registered {
        LockedTransferDisposition::Rejected
    } else if target == our_address {
        LockedTransferDisposition::Target
    } else {
        LockedTransferDisposition::Mediate
    }
}
