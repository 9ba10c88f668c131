//! # Node Runtime Library
//!
//! This library exposes the runtime's modules for testing.
//! The main entry point is the `main.rs` binary.
//!
//! - `config` - environment-driven `NodeConfig`
//! - `transport` - WebSocket peer links
//! - `runtime` - subsystem wiring and lifecycle

pub mod config;
pub mod runtime;
pub mod transport;

pub use config::{ConfigError, NetworkConfig, NodeConfig};
pub use runtime::{ListenAddrs, NodeReplication, NodeRuntime};
pub use transport::{process_frame, validate_peer_url, TransportConfig, TransportError, WsTransport};
