//! # Shared Types Crate
//!
//! This crate contains the block entity and the peer wire protocol used by
//! every other crate in the workspace.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: `Block` and `ProtocolMessage` are defined here
//!   and nowhere else.
//! - **Wire Compatibility**: Field names and frame layout match the JSON
//!   format spoken by every cooperating node; changing them forks the network.
//! - **No Behaviour**: Hashing, validation and chain state live in
//!   `hc-01-ledger`. This crate only describes data.

pub mod entities;
pub mod errors;
pub mod wire;

pub use entities::*;
pub use errors::*;
pub use wire::*;
