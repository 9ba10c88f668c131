//! # Replication Service
//!
//! Implements [`ReplicationApi`] over a ledger and a peer network.
//!
//! ## Thread Safety
//!
//! The service holds no state of its own. Every link task calls into the same
//! `Arc<ReplicationService>`; concurrent payloads from different links are
//! serialized by the ledger's lock, and each decision re-validates against
//! whatever tip the ledger holds at the moment of the write.

use std::sync::Arc;

use hc_01_ledger::LedgerApi;
use hc_02_peer_registry::{BroadcastReport, PeerLink};
use shared_types::{Block, PeerId, PeerInfo, ProtocolMessage, WireError};
use tracing::{debug, info, warn};

use crate::domain::{classify_chain_response, ChainResponseAction};
use crate::events::{HandleOutcome, ReplicationError};
use crate::ports::inbound::ReplicationApi;
use crate::ports::outbound::PeerNetwork;

/// Replication protocol engine.
///
/// ## Dependencies
///
/// - `L: LedgerApi` - the node's chain
/// - `N: PeerNetwork` - the set of live links
pub struct ReplicationService<L, N>
where
    L: LedgerApi,
    N: PeerNetwork,
{
    ledger: Arc<L>,
    network: Arc<N>,
}

impl<L, N> ReplicationService<L, N>
where
    L: LedgerApi,
    N: PeerNetwork,
{
    pub fn new(ledger: Arc<L>, network: Arc<N>) -> Self {
        Self { ledger, network }
    }

    pub fn ledger(&self) -> &Arc<L> {
        &self.ledger
    }

    pub fn network(&self) -> &Arc<N> {
        &self.network
    }

    /// Announce our current tip to every link.
    fn broadcast_latest(&self) -> BroadcastReport {
        let tip = self.ledger.latest();
        let index = tip.index;
        let report = self.network.broadcast(&ProtocolMessage::latest(tip));
        debug!(
            index,
            delivered = report.delivered.len(),
            dropped = report.dropped.len(),
            "Announced tip"
        );
        report
    }

    fn handle_chain_payload(
        &self,
        from: PeerId,
        received: Vec<Block>,
    ) -> Result<HandleOutcome, ReplicationError> {
        let ours = self.ledger.latest();
        let action =
            classify_chain_response(&ours, received).ok_or(WireError::EmptyChain)?;

        match action {
            ChainResponseAction::Ignore { ours, theirs } => {
                debug!(peer = %from, ours, theirs, "Peer is not ahead, ignoring");
                Ok(HandleOutcome::Ignored { ours, theirs })
            }
            ChainResponseAction::AppendTip(block) => {
                let index = block.index;
                match self.ledger.append(block) {
                    Ok(()) => {
                        info!(peer = %from, index, "Appended block from peer");
                        self.broadcast_latest();
                        Ok(HandleOutcome::Appended { index })
                    }
                    Err(e) => {
                        warn!(peer = %from, index, error = %e, "Rejected block from peer");
                        Ok(HandleOutcome::Rejected(e))
                    }
                }
            }
            ChainResponseAction::QueryAll => {
                debug!(peer = %from, ours = ours.index, "Lone block does not link, requesting full chain");
                self.network.send_to_peer(from, ProtocolMessage::QueryAll)?;
                Ok(HandleOutcome::RequestedFullChain)
            }
            ChainResponseAction::ReplaceChain(chain) => {
                let length = chain.len();
                match self.ledger.replace_with(chain) {
                    Ok(()) => {
                        info!(peer = %from, length, "Replaced chain with peer's chain");
                        self.broadcast_latest();
                        Ok(HandleOutcome::Replaced { length })
                    }
                    Err(e) => {
                        warn!(peer = %from, length, error = %e, "Rejected chain from peer");
                        Ok(HandleOutcome::Rejected(e))
                    }
                }
            }
        }
    }
}

impl<L, N> ReplicationApi for ReplicationService<L, N>
where
    L: LedgerApi,
    N: PeerNetwork,
{
    fn on_peer_connected(&self, link: PeerLink) -> Result<(), ReplicationError> {
        let peer_id = link.peer_id();
        if !self.network.register(link) {
            return Err(ReplicationError::DuplicateLink(peer_id));
        }
        self.network
            .send_to_peer(peer_id, ProtocolMessage::QueryLatest)?;
        Ok(())
    }

    fn on_peer_disconnected(&self, peer_id: PeerId) {
        if self.network.deregister(peer_id) {
            debug!(peer = %peer_id, "Link closed");
        }
    }

    fn handle_message(
        &self,
        from: PeerId,
        message: ProtocolMessage,
    ) -> Result<HandleOutcome, ReplicationError> {
        debug!(peer = %from, message_type = ?message.message_type(), "Received message");

        match message {
            ProtocolMessage::QueryLatest => {
                let tip = self.ledger.latest();
                self.network
                    .send_to_peer(from, ProtocolMessage::latest(tip))?;
                Ok(HandleOutcome::Replied { blocks: 1 })
            }
            ProtocolMessage::QueryAll => {
                let chain = self.ledger.snapshot();
                let blocks = chain.len();
                self.network
                    .send_to_peer(from, ProtocolMessage::ChainPayload(chain))?;
                Ok(HandleOutcome::Replied { blocks })
            }
            ProtocolMessage::ChainPayload(received) => self.handle_chain_payload(from, received),
        }
    }

    fn submit_data(&self, data: String) -> Result<Block, ReplicationError> {
        let block = self.ledger.append_data(data)?;
        self.broadcast_latest();
        Ok(block)
    }

    fn chain(&self) -> Vec<Block> {
        self.ledger.snapshot()
    }

    fn peers(&self) -> Vec<PeerInfo> {
        self.network.connected_peers()
    }
}
