//! Inbound ports (API) for the ledger subsystem.

use shared_types::Block;

use crate::domain::LedgerError;

/// Primary API of the node's single ledger.
///
/// Every method is synchronous and in-memory. Mutations are serialized
/// internally; callers never hold a reference into the chain.
pub trait LedgerApi: Send + Sync {
    /// Extend the tip with `candidate` if it is a valid successor.
    fn append(&self, candidate: Block) -> Result<(), LedgerError>;

    /// Swap the whole chain for a valid, strictly longer one.
    fn replace_with(&self, candidate: Vec<Block>) -> Result<(), LedgerError>;

    /// Current tip. The ledger always holds at least genesis.
    fn latest(&self) -> Block;

    /// Copy of the whole chain.
    fn snapshot(&self) -> Vec<Block>;

    fn len(&self) -> usize;

    fn genesis(&self) -> Block;

    /// Block that would extend the current tip with `data` at the current time.
    fn generate_next_block(&self, data: String) -> Block;

    /// Build the next block and append it while holding the write lock.
    fn append_data(&self, data: String) -> Result<Block, LedgerError>;

    fn is_valid_chain(&self, chain: &[Block]) -> bool;
}
