//! Outbound ports (SPI) for the replication subsystem.

use hc_02_peer_registry::{BroadcastReport, PeerLink, RegistryError};
use shared_types::{PeerId, PeerInfo, ProtocolMessage};

/// Set of live peer links as seen by the protocol.
///
/// Implemented for [`hc_02_peer_registry::PeerRegistry`] in
/// [`crate::adapters`].
pub trait PeerNetwork: Send + Sync {
    /// Start tracking a link. Returns false if its id is already tracked.
    fn register(&self, link: PeerLink) -> bool;

    /// Stop tracking a link. Returns false if it was already gone.
    fn deregister(&self, peer_id: PeerId) -> bool;

    /// Send to one peer. A failed send drops the link.
    fn send_to_peer(&self, peer_id: PeerId, message: ProtocolMessage) -> Result<(), RegistryError>;

    /// Send to every peer. Failed links are dropped.
    fn broadcast(&self, message: &ProtocolMessage) -> BroadcastReport;

    fn connected_peers(&self) -> Vec<PeerInfo>;
}
