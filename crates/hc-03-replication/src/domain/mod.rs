//! # Domain Layer for Replication
//!
//! The decision of what to do with a received chain, kept free of I/O so the
//! longest-chain rule can be tested without links or a ledger.

mod decision;

pub use decision::*;
