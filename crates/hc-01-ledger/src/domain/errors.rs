//! Rejection reasons.
//!
//! Rejections are expected, frequent and non-fatal. They are values for
//! diagnostics, never panics.

use shared_types::BlockHash;
use thiserror::Error;

/// Why a block or chain failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid index: expected {expected}, got {actual}")]
    InvalidIndex { expected: u64, actual: u64 },

    #[error("Invalid previous hash at index {index}: expected {expected}, got {actual}")]
    InvalidPreviousHash {
        index: u64,
        expected: BlockHash,
        actual: BlockHash,
    },

    #[error("Invalid hash at index {index}: computed {computed}, carried {carried}")]
    InvalidHash {
        index: u64,
        computed: BlockHash,
        carried: BlockHash,
    },

    #[error("Chain is empty")]
    EmptyChain,

    #[error("First block does not match local genesis")]
    GenesisMismatch,

    #[error("Block at position {position} rejected: {reason}")]
    BrokenLink {
        position: usize,
        reason: Box<ValidationError>,
    },
}

/// Why the ledger refused a mutation. The chain is unchanged in every case.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("Block rejected: {0}")]
    Rejected(#[from] ValidationError),

    #[error("Candidate chain is not longer: {candidate} blocks, {current} held")]
    NotLonger { candidate: usize, current: usize },
}
