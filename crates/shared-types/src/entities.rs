//! # Core Domain Entities
//!
//! - **Chain**: [`Block`], [`BlockHash`]
//! - **Networking**: [`PeerId`], [`PeerInfo`], [`LinkDirection`]

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// CLUSTER A: THE CHAIN
// =============================================================================

/// Lowercase hex SHA-256 digest, as carried on the wire.
pub type BlockHash = String;

/// `previous_hash` carried by the genesis block.
pub const GENESIS_PREVIOUS_HASH: &str = "0";

/// One immutable ledger entry.
///
/// Serialized with camelCase field names (`previousHash`) to stay compatible
/// with the peer wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    /// Position in the chain (genesis = 0).
    pub index: u64,
    /// Hash of the preceding block, `"0"` for genesis.
    pub previous_hash: BlockHash,
    /// Creation time in seconds since the Unix epoch (fractional allowed).
    pub timestamp: f64,
    /// Opaque payload.
    pub data: String,
    /// Content hash over the four fields above.
    pub hash: BlockHash,
}

impl Block {
    /// Creates a block from its five fields.
    ///
    /// No hash is computed here; use `hc_01_ledger::build_next_block` to
    /// obtain a correctly linked block.
    pub fn new(
        index: u64,
        previous_hash: impl Into<BlockHash>,
        timestamp: f64,
        data: impl Into<String>,
        hash: impl Into<BlockHash>,
    ) -> Self {
        Self {
            index,
            previous_hash: previous_hash.into(),
            timestamp,
            data: data.into(),
            hash: hash.into(),
        }
    }

    /// Returns true for the block at position 0.
    pub fn is_genesis(&self) -> bool {
        self.index == 0
    }

    /// Field-by-field identity, comparing `timestamp` by bit pattern.
    ///
    /// Stricter than `PartialEq` (which treats `0.0 == -0.0`); used for the
    /// genesis comparison where both sides must match exactly.
    pub fn is_bit_identical(&self, other: &Block) -> bool {
        self.index == other.index
            && self.previous_hash == other.previous_hash
            && self.timestamp.to_bits() == other.timestamp.to_bits()
            && self.data == other.data
            && self.hash == other.hash
    }
}

// =============================================================================
// CLUSTER B: NETWORKING
// =============================================================================

/// Handle identifying one live peer link.
///
/// Allocated by the peer registry when a connection is established and never
/// reused within a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PeerId(pub u64);

impl fmt::Display for PeerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "peer-{}", self.0)
    }
}

/// Which side opened a peer link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkDirection {
    /// Accepted by our listener.
    Inbound,
    /// Dialled by us.
    Outbound,
}

/// Read-only view of a registered peer link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerInfo {
    pub peer_id: PeerId,
    /// Remote socket address (inbound) or dialled URL (outbound).
    pub address: String,
    pub direction: LinkDirection,
}
