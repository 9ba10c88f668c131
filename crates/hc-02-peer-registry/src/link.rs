//! One live peer link.

use shared_types::{LinkDirection, PeerId, PeerInfo, ProtocolMessage};
use tokio::sync::mpsc;

use crate::error::RegistryError;

/// Outbound queue depth used when the caller has no preference.
pub const DEFAULT_LINK_QUEUE: usize = 256;

/// Handle to a connected peer: identity plus its outbound queue.
#[derive(Debug, Clone)]
pub struct PeerLink {
    peer_id: PeerId,
    address: String,
    direction: LinkDirection,
    outbox: mpsc::Sender<ProtocolMessage>,
}

impl PeerLink {
    /// Create a link and the receiving end its writer task drains.
    pub fn new(
        peer_id: PeerId,
        address: impl Into<String>,
        direction: LinkDirection,
        queue_depth: usize,
    ) -> (Self, mpsc::Receiver<ProtocolMessage>) {
        let (outbox, rx) = mpsc::channel(queue_depth.max(1));
        let link = Self {
            peer_id,
            address: address.into(),
            direction,
            outbox,
        };
        (link, rx)
    }

    pub fn peer_id(&self) -> PeerId {
        self.peer_id
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn direction(&self) -> LinkDirection {
        self.direction
    }

    pub fn info(&self) -> PeerInfo {
        PeerInfo {
            peer_id: self.peer_id,
            address: self.address.clone(),
            direction: self.direction,
        }
    }

    /// Queue `message` without waiting.
    pub fn send(&self, message: ProtocolMessage) -> Result<(), RegistryError> {
        self.outbox.try_send(message).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => RegistryError::LinkCongested(self.peer_id),
            mpsc::error::TrySendError::Closed(_) => RegistryError::LinkClosed(self.peer_id),
        })
    }
}
