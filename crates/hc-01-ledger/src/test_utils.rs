//! Chain fixtures shared by the workspace's tests.
//!
//! Blocks built here use deterministic timestamps (predecessor + 1s) so that
//! two chains built with the same tags are identical.

use parking_lot::Mutex;
use shared_types::Block;

use crate::domain::{build_next_block, ConcatSha256, GenesisConfig};
use crate::ports::outbound::TimeSource;

/// Default genesis block.
pub fn genesis() -> Block {
    GenesisConfig::default().build()
}

/// Valid successor of the last block of `chain`.
pub fn extend(chain: &[Block], data: &str) -> Block {
    let tip = &chain[chain.len() - 1];
    build_next_block(tip, tip.timestamp + 1.0, data, &ConcatSha256)
}

/// Valid chain of `len` blocks (genesis included) with payloads `"{tag}-{i}"`.
pub fn build_chain(len: usize, tag: &str) -> Vec<Block> {
    fork_from(&[genesis()], len.saturating_sub(1), tag)
}

/// `prefix` followed by `extra` new blocks with payloads `"{tag}-{i}"`.
pub fn fork_from(prefix: &[Block], extra: usize, tag: &str) -> Vec<Block> {
    let mut chain = prefix.to_vec();
    for _ in 0..extra {
        let data = format!("{tag}-{}", chain.len());
        let next = extend(&chain, &data);
        chain.push(next);
    }
    chain
}

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct ManualTimeSource {
    now: Mutex<f64>,
}

impl ManualTimeSource {
    pub fn new(start: f64) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    pub fn advance(&self, seconds: f64) {
        *self.now.lock() += seconds;
    }
}

impl TimeSource for ManualTimeSource {
    fn now(&self) -> f64 {
        *self.now.lock()
    }
}
