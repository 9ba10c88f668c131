use serde::{Deserialize, Serialize};

/// `POST /mineBlock` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MineBlockRequest {
    pub data: String,
}

/// `POST /addPeer` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddPeerRequest {
    /// WebSocket URL, e.g. `ws://10.0.0.2:6001`.
    pub peer: String,
}
