//! # Node Configuration
//!
//! Every setting has a default and can be overridden through an `HC_*`
//! environment variable.
//!
//! | Variable               | Default              |
//! |------------------------|----------------------|
//! | `HC_HTTP_PORT`         | 3001                 |
//! | `HC_P2P_PORT`          | 6001                 |
//! | `HC_BIND_HOST`         | `0.0.0.0`            |
//! | `HC_PEERS`             | (none)               |
//! | `HC_GENESIS_DATA`      | `my genesis block!!` |
//! | `HC_GENESIS_HASH`      | `8165…f7d7`          |
//! | `HC_GENESIS_TIMESTAMP` | 1465154705           |
//! | `HC_MAX_FRAME_BYTES`   | 8 MiB                |
//! | `HC_LINK_QUEUE`        | 256                  |

use std::str::FromStr;

use hc_01_ledger::GenesisConfig;
use hc_02_peer_registry::DEFAULT_LINK_QUEUE;
use thiserror::Error;

use crate::transport::validate_peer_url;

/// Largest peer frame accepted by default.
pub const DEFAULT_MAX_FRAME_BYTES: usize = 8 * 1024 * 1024;

/// Complete node configuration.
#[derive(Debug, Clone, Default)]
pub struct NodeConfig {
    /// Network configuration.
    pub network: NetworkConfig,
    /// Genesis block parameters.
    pub genesis: GenesisConfig,
}

/// Network configuration.
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    /// Host both listeners bind to.
    pub bind_host: String,
    /// Control API port.
    pub http_port: u16,
    /// Peer WebSocket port.
    pub p2p_port: u16,
    /// Peers dialed at start-up.
    pub initial_peers: Vec<String>,
    /// Largest accepted peer frame, in bytes.
    pub max_frame_bytes: usize,
    /// Outbound queue depth per peer link.
    pub link_queue: usize,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            bind_host: "0.0.0.0".to_string(),
            http_port: 3001,
            p2p_port: 6001,
            initial_peers: Vec::new(),
            max_frame_bytes: DEFAULT_MAX_FRAME_BYTES,
            link_queue: DEFAULT_LINK_QUEUE,
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{key} has invalid value {value:?}")]
    InvalidValue { key: &'static str, value: String },

    #[error("{0} must not be zero")]
    Zero(&'static str),

    #[error("HTTP and P2P ports must differ (both are {0})")]
    PortClash(u16),

    #[error("Peer URL must start with ws:// : {0:?}")]
    InvalidPeerUrl(String),

    #[error("Genesis hash must be 64 hex characters: {0:?}")]
    InvalidGenesisHash(String),
}

impl NodeConfig {
    /// Load from the process environment and validate.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary variable source and validate.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = NodeConfig::default();
        let net = &mut config.network;

        if let Some(host) = lookup("HC_BIND_HOST") {
            net.bind_host = host;
        }
        parse_into(&lookup, "HC_HTTP_PORT", &mut net.http_port)?;
        parse_into(&lookup, "HC_P2P_PORT", &mut net.p2p_port)?;
        parse_into(&lookup, "HC_MAX_FRAME_BYTES", &mut net.max_frame_bytes)?;
        parse_into(&lookup, "HC_LINK_QUEUE", &mut net.link_queue)?;
        if let Some(peers) = lookup("HC_PEERS") {
            net.initial_peers = peers
                .split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string)
                .collect();
        }

        let genesis = &mut config.genesis;
        if let Some(data) = lookup("HC_GENESIS_DATA") {
            genesis.data = data;
        }
        if let Some(hash) = lookup("HC_GENESIS_HASH") {
            genesis.hash = hash;
        }
        parse_into(&lookup, "HC_GENESIS_TIMESTAMP", &mut genesis.timestamp)?;

        config.validate()?;
        Ok(config)
    }

    /// Reject settings the node cannot start with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let net = &self.network;
        if net.http_port == 0 {
            return Err(ConfigError::Zero("HC_HTTP_PORT"));
        }
        if net.p2p_port == 0 {
            return Err(ConfigError::Zero("HC_P2P_PORT"));
        }
        if net.http_port == net.p2p_port {
            return Err(ConfigError::PortClash(net.http_port));
        }
        if net.max_frame_bytes == 0 {
            return Err(ConfigError::Zero("HC_MAX_FRAME_BYTES"));
        }
        if net.link_queue == 0 {
            return Err(ConfigError::Zero("HC_LINK_QUEUE"));
        }
        if let Some(bad) = net
            .initial_peers
            .iter()
            .find(|p| validate_peer_url(p).is_err())
        {
            return Err(ConfigError::InvalidPeerUrl(bad.clone()));
        }

        let hash = &self.genesis.hash;
        if hash.len() != 64 || !hash.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ConfigError::InvalidGenesisHash(hash.clone()));
        }
        Ok(())
    }
}

fn parse_into<F, T>(lookup: &F, key: &'static str, slot: &mut T) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    if let Some(raw) = lookup(key) {
        *slot = raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value: raw })?;
    }
    Ok(())
}
