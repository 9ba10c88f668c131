//! The ordered block sequence.

use shared_types::Block;

use super::errors::LedgerError;
use super::validator::ChainValidator;

/// Ordered blocks `0..N-1`, never empty.
///
/// Mutated only through [`Chain::append`] and [`Chain::replace_with`], both of
/// which leave the chain untouched when they return an error.
#[derive(Debug, Clone)]
pub struct Chain {
    blocks: Vec<Block>,
}

#[allow(clippy::len_without_is_empty)]
impl Chain {
    pub fn new(genesis: Block) -> Self {
        Self {
            blocks: vec![genesis],
        }
    }

    /// Current tip.
    pub fn latest(&self) -> &Block {
        // Non-empty: built with genesis, replaced only by validated chains.
        &self.blocks[self.blocks.len() - 1]
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Extend the tip with `candidate` if it is a valid successor.
    pub fn append(&mut self, candidate: Block, validator: &ChainValidator) -> Result<(), LedgerError> {
        validator.check_successor(&candidate, self.latest())?;
        self.blocks.push(candidate);
        Ok(())
    }

    /// Swap in `candidate` if it is valid and strictly longer.
    ///
    /// Equal-length forks are never adopted: the first chain seen at a given
    /// length stays.
    pub fn replace_with(
        &mut self,
        candidate: Vec<Block>,
        validator: &ChainValidator,
    ) -> Result<(), LedgerError> {
        validator.check_chain(&candidate)?;
        if candidate.len() <= self.blocks.len() {
            return Err(LedgerError::NotLonger {
                candidate: candidate.len(),
                current: self.blocks.len(),
            });
        }
        self.blocks = candidate;
        Ok(())
    }
}
