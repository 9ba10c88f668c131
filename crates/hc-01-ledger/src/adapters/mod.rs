//! Adapters for the ledger's outbound ports.

mod clock;

pub use clock::SystemTimeSource;
