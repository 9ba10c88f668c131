//! Hexagonal ports for the replication subsystem.

pub mod inbound;
pub mod outbound;
