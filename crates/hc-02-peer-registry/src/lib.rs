//! # Peer Registry Subsystem (hc-02)
//!
//! Tracks the set of live peer links and fans messages out to them.
//!
//! ## Architecture Role
//!
//! ```text
//! [Transport] ──add / remove──→ [Peer Registry (2)] ←──send_to / broadcast── [Replication (3)]
//!                                        │
//!                                        ↓ per-link outbound queue
//!                                  [writer task] → socket
//! ```
//!
//! A link is just the sending half of its outbound queue. Removing a link
//! drops that sender, which ends the writer task and closes the connection,
//! so "deregistered" and "closed" are the same state.

pub mod error;
pub mod link;
pub mod registry;

pub use error::RegistryError;
pub use link::{PeerLink, DEFAULT_LINK_QUEUE};
pub use registry::{BroadcastReport, PeerRegistry};
