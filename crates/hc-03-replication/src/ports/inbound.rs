//! Inbound ports (API) for the replication subsystem.

use hc_02_peer_registry::PeerLink;
use shared_types::{Block, PeerId, PeerInfo, ProtocolMessage};

use crate::events::{HandleOutcome, ReplicationError};

/// Primary API of the replication protocol.
///
/// Called by the peer transport for link events and by the control surface
/// for local submissions. Object safe so both can hold an
/// `Arc<dyn ReplicationApi>`.
pub trait ReplicationApi: Send + Sync {
    /// A link opened (either direction). Registers it and asks for its tip.
    fn on_peer_connected(&self, link: PeerLink) -> Result<(), ReplicationError>;

    /// A link closed or failed. Safe to call more than once.
    fn on_peer_disconnected(&self, peer_id: PeerId);

    /// Handle one decoded message received on `from`.
    ///
    /// # Errors
    /// Any error means the link should be closed.
    fn handle_message(
        &self,
        from: PeerId,
        message: ProtocolMessage,
    ) -> Result<HandleOutcome, ReplicationError>;

    /// Append `data` locally and announce the new tip.
    fn submit_data(&self, data: String) -> Result<Block, ReplicationError>;

    /// Copy of the local chain.
    fn chain(&self) -> Vec<Block>;

    fn peers(&self) -> Vec<PeerInfo>;
}
