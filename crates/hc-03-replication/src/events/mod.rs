//! Outcomes and error types for the replication subsystem.

use hc_01_ledger::LedgerError;
use hc_02_peer_registry::RegistryError;
use shared_types::{PeerId, WireError};
use thiserror::Error;

/// Replication errors.
///
/// Any error returned while handling a message from a link means that link
/// should be closed. Rejected blocks and chains are not errors; they are
/// reported as [`HandleOutcome::Rejected`].
#[derive(Debug, Error)]
pub enum ReplicationError {
    #[error("Ledger refused local data: {0}")]
    Ledger(#[from] LedgerError),

    #[error("Peer link failure: {0}")]
    Registry(#[from] RegistryError),

    #[error("Protocol violation: {0}")]
    Wire(#[from] WireError),

    #[error("Peer {0} is already registered")]
    DuplicateLink(PeerId),
}

/// What handling one inbound message did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandleOutcome {
    /// Answered a query on the same link.
    Replied { blocks: usize },
    /// Their tip was not ahead of ours.
    Ignored { ours: u64, theirs: u64 },
    /// Their tip extended ours and was appended.
    Appended { index: u64 },
    /// Asked the sender for its full chain.
    RequestedFullChain,
    /// Adopted their chain.
    Replaced { length: usize },
    /// Their block or chain failed validation or was not longer.
    Rejected(LedgerError),
}
