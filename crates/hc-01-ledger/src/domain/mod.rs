//! # Domain Layer for the Ledger
//!
//! Pure chain logic with no locking and no I/O.
//!
//! - **hash_link**: block content hash and next-block construction
//! - **validator**: successor and whole-chain acceptance rules
//! - **chain**: the ordered block sequence and its two mutations
//! - **genesis**: the configured block 0
//! - **errors**: rejection reasons

mod chain;
mod errors;
mod genesis;
mod hash_link;
mod validator;

pub use chain::*;
pub use errors::*;
pub use genesis::*;
pub use hash_link::*;
pub use validator::*;
