//! [`PeerNetwork`] over the in-process peer registry.

use hc_02_peer_registry::{BroadcastReport, PeerLink, PeerRegistry, RegistryError};
use shared_types::{PeerId, PeerInfo, ProtocolMessage};

use crate::ports::outbound::PeerNetwork;

impl PeerNetwork for PeerRegistry {
    fn register(&self, link: PeerLink) -> bool {
        self.add(link)
    }

    fn deregister(&self, peer_id: PeerId) -> bool {
        self.remove(peer_id).is_some()
    }

    fn send_to_peer(&self, peer_id: PeerId, message: ProtocolMessage) -> Result<(), RegistryError> {
        self.send_to(peer_id, message)
    }

    fn broadcast(&self, message: &ProtocolMessage) -> BroadcastReport {
        PeerRegistry::broadcast(self, message)
    }

    fn connected_peers(&self) -> Vec<PeerInfo> {
        self.peers()
    }
}
