//! # Ledger Subsystem (hc-01)
//!
//! Owns the node's single hash-linked chain and every rule that decides
//! whether a block or a whole chain may enter it.
//!
//! ## Architecture Role
//!
//! ```text
//! [Control API (4)] ──append_data──→ [Ledger (1)] ←──append / replace_with── [Replication (3)]
//!                                         │
//!                                         ↓
//!                               HashLink + ChainValidator
//! ```
//!
//! ## Invariants
//!
//! - Block 0 is the configured genesis for the lifetime of the process
//! - Every block after genesis is a valid successor of its predecessor
//! - The chain is replaced only by a valid, strictly longer chain
//! - Readers never observe a partially applied mutation

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use adapters::SystemTimeSource;
pub use domain::*;
pub use ports::inbound::LedgerApi;
pub use ports::outbound::TimeSource;
pub use service::Ledger;
