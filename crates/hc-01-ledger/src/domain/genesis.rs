//! The configured block 0.
//!
//! Every cooperating node must be started with bit-identical genesis
//! parameters; nodes with different ones can never synchronize.

use shared_types::{Block, BlockHash, GENESIS_PREVIOUS_HASH};

/// Genesis timestamp shipped by default.
pub const DEFAULT_GENESIS_TIMESTAMP: f64 = 1_465_154_705.0;

/// Genesis payload shipped by default.
pub const DEFAULT_GENESIS_DATA: &str = "my genesis block!!";

/// Genesis hash shipped by default (matches the default payload and timestamp).
pub const DEFAULT_GENESIS_HASH: &str =
    "816534932c2b7154836da6afc367695e6337db8a921823784c14378abed4f7d7";

/// Genesis block configuration.
///
/// The hash is taken as configured and never recomputed: genesis is
/// compared bit-for-bit, not validated.
#[derive(Debug, Clone, PartialEq)]
pub struct GenesisConfig {
    pub timestamp: f64,
    pub data: String,
    pub hash: BlockHash,
}

impl Default for GenesisConfig {
    fn default() -> Self {
        Self {
            timestamp: DEFAULT_GENESIS_TIMESTAMP,
            data: DEFAULT_GENESIS_DATA.to_string(),
            hash: DEFAULT_GENESIS_HASH.to_string(),
        }
    }
}

impl GenesisConfig {
    pub fn build(&self) -> Block {
        Block::new(
            0,
            GENESIS_PREVIOUS_HASH,
            self.timestamp,
            self.data.clone(),
            self.hash.clone(),
        )
    }
}
