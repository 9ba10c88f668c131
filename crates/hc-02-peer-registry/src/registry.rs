//! # Peer Registry
//!
//! ## Thread Safety
//!
//! Membership lives behind one `RwLock`. Broadcast takes a snapshot of the
//! membership, releases the lock and only then sends, so a link removed
//! concurrently (by its own reader task or by a failed send elsewhere) never
//! invalidates the iteration. Removal is idempotent: whichever path gets
//! there first removes the link, later attempts are no-ops.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use shared_types::{PeerId, PeerInfo, ProtocolMessage};
use tracing::{debug, info, warn};

use crate::error::RegistryError;
use crate::link::PeerLink;

/// Result of one broadcast.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    /// Links the message was queued on.
    pub delivered: Vec<PeerId>,
    /// Links that failed and were removed.
    pub dropped: Vec<PeerId>,
}

/// Set of currently connected peer links.
#[derive(Debug)]
pub struct PeerRegistry {
    links: RwLock<BTreeMap<PeerId, PeerLink>>,
    next_id: AtomicU64,
}

impl Default for PeerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PeerRegistry {
    pub fn new() -> Self {
        Self {
            links: RwLock::new(BTreeMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Fresh identifier for a link about to be registered.
    pub fn allocate_id(&self) -> PeerId {
        PeerId(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    /// Register `link`. Returns false if its id is already present.
    pub fn add(&self, link: PeerLink) -> bool {
        let peer_id = link.peer_id();
        let address = link.address().to_string();
        let mut links = self.links.write();
        if links.contains_key(&peer_id) {
            return false;
        }
        links.insert(peer_id, link);
        let count = links.len();
        drop(links);
        info!(peer = %peer_id, %address, count, "Peer link registered");
        true
    }

    /// Deregister a link. Returns `None` if it was already gone.
    pub fn remove(&self, peer_id: PeerId) -> Option<PeerLink> {
        let removed = self.links.write().remove(&peer_id);
        if let Some(link) = &removed {
            info!(peer = %peer_id, address = %link.address(), "Peer link removed");
        }
        removed
    }

    pub fn contains(&self, peer_id: PeerId) -> bool {
        self.links.read().contains_key(&peer_id)
    }

    pub fn len(&self) -> usize {
        self.links.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.read().is_empty()
    }

    /// Registered links, ordered by id.
    pub fn peers(&self) -> Vec<PeerInfo> {
        self.links.read().values().map(PeerLink::info).collect()
    }

    /// Queue `message` for one peer. A failed send removes the link.
    pub fn send_to(&self, peer_id: PeerId, message: ProtocolMessage) -> Result<(), RegistryError> {
        let link = self
            .links
            .read()
            .get(&peer_id)
            .cloned()
            .ok_or(RegistryError::UnknownPeer(peer_id))?;

        link.send(message).inspect_err(|e| {
            warn!(peer = %peer_id, error = %e, "Send failed, dropping peer link");
            self.remove(peer_id);
        })
    }

    /// Queue `message` for every registered link.
    ///
    /// A failure on one link removes that link and does not affect delivery
    /// to the others.
    pub fn broadcast(&self, message: &ProtocolMessage) -> BroadcastReport {
        let snapshot: Vec<PeerLink> = self.links.read().values().cloned().collect();
        let mut report = BroadcastReport::default();

        for link in snapshot {
            let peer_id = link.peer_id();
            match link.send(message.clone()) {
                Ok(()) => report.delivered.push(peer_id),
                Err(e) => {
                    warn!(peer = %peer_id, error = %e, "Broadcast failed, dropping peer link");
                    self.remove(peer_id);
                    report.dropped.push(peer_id);
                }
            }
        }

        debug!(
            message_type = ?message.message_type(),
            delivered = report.delivered.len(),
            dropped = report.dropped.len(),
            "Broadcast complete"
        );
        report
    }
}
