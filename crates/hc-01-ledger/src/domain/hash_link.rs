//! Block content hashing.

use sha2::{Digest, Sha256};
use shared_types::{Block, BlockHash};

/// Digest binding a block's position, predecessor, timestamp and payload.
pub trait HashLink: Send + Sync {
    fn compute_hash(&self, index: u64, previous_hash: &str, timestamp: f64, data: &str)
        -> BlockHash;

    /// Recompute the hash a block should carry.
    fn hash_block(&self, block: &Block) -> BlockHash {
        self.compute_hash(block.index, &block.previous_hash, block.timestamp, &block.data)
    }
}

/// SHA-256 over `index ‖ previousHash ‖ timestamp ‖ data`, hex encoded.
///
/// The fields are concatenated with no separator, so different tuples can
/// share a preimage (index `1` with previous hash `2a…` versus index `12` with
/// previous hash `a…`). Every peer computes exactly this preimage; a
/// disambiguated encoding must ship as another `HashLink` and a network-wide
/// upgrade, not as a change to this one.
///
/// `timestamp` renders in shortest round-trip form with no trailing `.0`
/// (`1465154705`, `1700000000.123`). That text matches JavaScript's
/// `Number#toString` only for magnitudes in `[1e-6, 1e21)` (and zero). Outside
/// that range JavaScript switches to exponent notation (`1e-7`, `1e+21`) while
/// this renders plain digits (`0.0000001`), so such timestamps hash
/// differently across implementations.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConcatSha256;

impl HashLink for ConcatSha256 {
    fn compute_hash(
        &self,
        index: u64,
        previous_hash: &str,
        timestamp: f64,
        data: &str,
    ) -> BlockHash {
        let preimage = format!("{index}{previous_hash}{timestamp}{data}");
        hex::encode(Sha256::digest(preimage.as_bytes()))
    }
}

/// [`ConcatSha256`] as a free function.
pub fn compute_hash(index: u64, previous_hash: &str, timestamp: f64, data: &str) -> BlockHash {
    ConcatSha256.compute_hash(index, previous_hash, timestamp, data)
}

/// Build the block that extends `previous`.
pub fn build_next_block(
    previous: &Block,
    timestamp: f64,
    data: impl Into<String>,
    hasher: &dyn HashLink,
) -> Block {
    let data = data.into();
    let index = previous.index + 1;
    let hash = hasher.compute_hash(index, &previous.hash, timestamp, &data);
    Block::new(index, previous.hash.clone(), timestamp, data, hash)
}
