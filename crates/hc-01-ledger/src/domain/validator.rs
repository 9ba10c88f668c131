//! Acceptance rules for successor blocks and whole chains.
//!
//! Both checks are pure and short-circuit on the first violated rule.

use std::sync::Arc;

use shared_types::Block;

use super::errors::ValidationError;
use super::hash_link::{ConcatSha256, HashLink};

/// Decides whether blocks and chains may enter the ledger.
///
/// Holds the node's genesis (chains must start with it) and the hashing
/// scheme used to recompute block hashes.
#[derive(Clone)]
pub struct ChainValidator {
    genesis: Block,
    hasher: Arc<dyn HashLink>,
}

impl std::fmt::Debug for ChainValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainValidator")
            .field("genesis", &self.genesis)
            .finish_non_exhaustive()
    }
}

impl ChainValidator {
    pub fn new(genesis: Block) -> Self {
        Self::with_hasher(genesis, Arc::new(ConcatSha256))
    }

    pub fn with_hasher(genesis: Block, hasher: Arc<dyn HashLink>) -> Self {
        Self { genesis, hasher }
    }

    pub fn genesis(&self) -> &Block {
        &self.genesis
    }

    pub fn hasher(&self) -> &dyn HashLink {
        self.hasher.as_ref()
    }

    /// Check, in order: index, predecessor link, content hash.
    pub fn check_successor(&self, candidate: &Block, reference: &Block) -> Result<(), ValidationError> {
        let expected = reference.index.checked_add(1);
        if expected != Some(candidate.index) {
            return Err(ValidationError::InvalidIndex {
                expected: reference.index.saturating_add(1),
                actual: candidate.index,
            });
        }

        if candidate.previous_hash != reference.hash {
            return Err(ValidationError::InvalidPreviousHash {
                index: candidate.index,
                expected: reference.hash.clone(),
                actual: candidate.previous_hash.clone(),
            });
        }

        let computed = self.hasher.hash_block(candidate);
        if computed != candidate.hash {
            return Err(ValidationError::InvalidHash {
                index: candidate.index,
                computed,
                carried: candidate.hash.clone(),
            });
        }

        Ok(())
    }

    pub fn is_valid_successor(&self, candidate: &Block, reference: &Block) -> bool {
        self.check_successor(candidate, reference).is_ok()
    }

    /// Check a whole chain: non-empty, starts with our genesis, every link valid.
    pub fn check_chain(&self, chain: &[Block]) -> Result<(), ValidationError> {
        let first = chain.first().ok_or(ValidationError::EmptyChain)?;
        if !first.is_bit_identical(&self.genesis) {
            return Err(ValidationError::GenesisMismatch);
        }

        for (position, pair) in chain.windows(2).enumerate() {
            self.check_successor(&pair[1], &pair[0])
                .map_err(|reason| ValidationError::BrokenLink {
                    position: position + 1,
                    reason: Box::new(reason),
                })?;
        }

        Ok(())
    }

    pub fn is_valid_chain(&self, chain: &[Block]) -> bool {
        self.check_chain(chain).is_ok()
    }
}
