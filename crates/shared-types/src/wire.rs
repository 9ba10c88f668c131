//! # Peer Wire Protocol
//!
//! One JSON object per transport frame:
//!
//! ```text
//! { "type": 0 }                          QueryLatest
//! { "type": 1 }                          QueryAll
//! { "type": 2, "data": "<json chain>" }  ChainPayload
//! ```
//!
//! The chain inside `data` is itself JSON-encoded into a string (a JSON array
//! of blocks), so a `ChainPayload` frame is double-encoded.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::entities::Block;
use crate::errors::WireError;

/// Numeric tags used in the `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum MessageType {
    /// Ask for the peer's tip.
    QueryLatest = 0,
    /// Ask for the peer's whole chain.
    QueryAll = 1,
    /// Carries one or more blocks.
    ResponseBlockchain = 2,
}

impl MessageType {
    fn from_tag(tag: &Value) -> Option<Self> {
        match tag.as_u64()? {
            0 => Some(Self::QueryLatest),
            1 => Some(Self::QueryAll),
            2 => Some(Self::ResponseBlockchain),
            _ => None,
        }
    }
}

/// Logical message exchanged over a peer link.
#[derive(Debug, Clone, PartialEq)]
pub enum ProtocolMessage {
    QueryLatest,
    QueryAll,
    /// Ordered blocks: either a lone tip or a full chain.
    ChainPayload(Vec<Block>),
}

/// Frame layout as it appears on the wire.
///
/// `type` stays untyped until dispatch so that a string or negative tag is
/// an unknown message rather than a malformed frame.
#[derive(Debug, Serialize, Deserialize)]
struct Frame {
    #[serde(rename = "type")]
    kind: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data: Option<String>,
}

impl ProtocolMessage {
    /// Single-block payload announcing a tip.
    pub fn latest(tip: Block) -> Self {
        Self::ChainPayload(vec![tip])
    }

    pub fn message_type(&self) -> MessageType {
        match self {
            Self::QueryLatest => MessageType::QueryLatest,
            Self::QueryAll => MessageType::QueryAll,
            Self::ChainPayload(_) => MessageType::ResponseBlockchain,
        }
    }

    /// Encode into one text frame.
    pub fn encode(&self) -> Result<String, WireError> {
        let data = match self {
            Self::ChainPayload(blocks) => Some(serde_json::to_string(blocks)?),
            Self::QueryLatest | Self::QueryAll => None,
        };
        let frame = Frame {
            kind: Value::from(self.message_type() as u8),
            data,
        };
        Ok(serde_json::to_string(&frame)?)
    }

    /// Decode one text frame.
    ///
    /// A `ChainPayload` with zero blocks is rejected here so that every
    /// decoded payload has a tip.
    pub fn decode(frame: &str) -> Result<Self, WireError> {
        let frame: Frame = serde_json::from_str(frame)?;
        match MessageType::from_tag(&frame.kind) {
            Some(MessageType::QueryLatest) => Ok(Self::QueryLatest),
            Some(MessageType::QueryAll) => Ok(Self::QueryAll),
            Some(MessageType::ResponseBlockchain) => {
                let data = frame.data.ok_or(WireError::MissingData)?;
                let blocks: Vec<Block> = serde_json::from_str(&data)?;
                if blocks.is_empty() {
                    return Err(WireError::EmptyChain);
                }
                Ok(Self::ChainPayload(blocks))
            }
            None => Err(WireError::UnknownType(frame.kind)),
        }
    }
}
