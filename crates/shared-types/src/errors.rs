//! # Error Types
//!
//! Errors raised while decoding peer frames.

use thiserror::Error;

/// Failure to turn a peer frame into a [`crate::ProtocolMessage`].
#[derive(Debug, Error)]
pub enum WireError {
    /// Frame or embedded chain is not valid JSON for its expected shape.
    #[error("Malformed frame: {0}")]
    Malformed(#[from] serde_json::Error),

    /// `type` is anything other than 0, 1 or 2.
    #[error("Unknown message type: {0}")]
    UnknownType(serde_json::Value),

    /// `type: 2` without a `data` field.
    #[error("Chain payload is missing its data field")]
    MissingData,

    /// `type: 2` whose chain holds no blocks (there is no tip to compare).
    #[error("Chain payload carries no blocks")]
    EmptyChain,
}

impl WireError {
    /// Whether the link that produced this frame must be dropped.
    ///
    /// Garbled frames have no recovery path within the protocol. An unknown
    /// message type in a well-formed frame is skipped instead.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, WireError::UnknownType(_))
    }
}
