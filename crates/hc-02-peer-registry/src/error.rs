use shared_types::PeerId;
use thiserror::Error;

/// Peer registry errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("Unknown peer: {0}")]
    UnknownPeer(PeerId),

    #[error("Link to {0} is closed")]
    LinkClosed(PeerId),

    #[error("Outbound queue for {0} is full")]
    LinkCongested(PeerId),
}
