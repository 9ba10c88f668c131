//! # Ledger Service
//!
//! The node's one chain, shared across every peer link task via `Arc`.
//!
//! ## Thread Safety
//!
//! The whole chain sits behind a single `RwLock`. `append` and `replace_with`
//! take the write lock for their full check-and-mutate step, so concurrent
//! mutations from different links never interleave, and `latest` / `snapshot`
//! readers see either the old or the new chain, never a mix.

use std::sync::Arc;

use parking_lot::RwLock;
use shared_types::Block;
use tracing::{debug, info};

use crate::adapters::SystemTimeSource;
use crate::domain::{build_next_block, Chain, ChainValidator, GenesisConfig, LedgerError};
use crate::ports::inbound::LedgerApi;
use crate::ports::outbound::TimeSource;

/// Single-instance, lock-guarded ledger.
pub struct Ledger {
    chain: RwLock<Chain>,
    validator: ChainValidator,
    clock: Arc<dyn TimeSource>,
}

impl Ledger {
    /// Ledger holding only the configured genesis, stamped by the wall clock.
    pub fn new(genesis: &GenesisConfig) -> Self {
        Self::with_parts(
            ChainValidator::new(genesis.build()),
            Arc::new(SystemTimeSource::new()),
        )
    }

    pub fn with_parts(validator: ChainValidator, clock: Arc<dyn TimeSource>) -> Self {
        Self {
            chain: RwLock::new(Chain::new(validator.genesis().clone())),
            validator,
            clock,
        }
    }

    pub fn validator(&self) -> &ChainValidator {
        &self.validator
    }
}

impl LedgerApi for Ledger {
    fn append(&self, candidate: Block) -> Result<(), LedgerError> {
        let index = candidate.index;
        let mut chain = self.chain.write();
        match chain.append(candidate, &self.validator) {
            Ok(()) => {
                debug!(index, "Block appended");
                Ok(())
            }
            Err(e) => {
                debug!(index, error = %e, "Block rejected");
                Err(e)
            }
        }
    }

    fn replace_with(&self, candidate: Vec<Block>) -> Result<(), LedgerError> {
        let new_len = candidate.len();
        let mut chain = self.chain.write();
        let old_len = chain.len();
        match chain.replace_with(candidate, &self.validator) {
            Ok(()) => {
                debug!(old_len, new_len, "Replaced current chain with received chain");
                Ok(())
            }
            Err(e) => {
                debug!(old_len, new_len, error = %e, "Received chain rejected");
                Err(e)
            }
        }
    }

    fn latest(&self) -> Block {
        self.chain.read().latest().clone()
    }

    fn snapshot(&self) -> Vec<Block> {
        self.chain.read().blocks().to_vec()
    }

    fn len(&self) -> usize {
        self.chain.read().len()
    }

    fn genesis(&self) -> Block {
        self.validator.genesis().clone()
    }

    fn generate_next_block(&self, data: String) -> Block {
        let tip = self.latest();
        build_next_block(&tip, self.clock.now(), data, self.validator.hasher())
    }

    fn append_data(&self, data: String) -> Result<Block, LedgerError> {
        let mut chain = self.chain.write();
        let next = build_next_block(
            chain.latest(),
            self.clock.now(),
            data,
            self.validator.hasher(),
        );
        chain.append(next.clone(), &self.validator)?;
        info!(index = next.index, hash = %next.hash, "Block added");
        Ok(next)
    }

    fn is_valid_chain(&self, chain: &[Block]) -> bool {
        self.validator.is_valid_chain(chain)
    }
}
