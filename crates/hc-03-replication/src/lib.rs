//! # Replication Subsystem (hc-03)
//!
//! Speaks the peer protocol on every link and resolves divergence with the
//! longest-valid-chain rule.
//!
//! ## Architecture Role
//!
//! ```text
//! [Transport] ──decoded ProtocolMessage──→ [Replication (3)] ──append / replace_with──→ [Ledger (1)]
//!                                                 │
//!                                                 ↓ send_to / broadcast
//!                                         [Peer Registry (2)]
//! ```
//!
//! ## Protocol
//!
//! - On connect: register the link and ask it for its tip (`QueryLatest`)
//! - `QueryLatest` / `QueryAll`: answer with our tip / our whole chain
//! - `ChainPayload`: ignore if not ahead of us, append a direct successor,
//!   ask for the full chain when a lone block does not link, otherwise try a
//!   wholesale replace
//!
//! Handling is stateless between messages. The ledger is the only shared
//! state, so the outcome of a message never depends on which link it came in on.

pub mod adapters;
pub mod domain;
pub mod events;
pub mod ports;
pub mod service;

pub use domain::*;
pub use events::{HandleOutcome, ReplicationError};
pub use ports::inbound::ReplicationApi;
pub use ports::outbound::PeerNetwork;
pub use service::ReplicationService;
