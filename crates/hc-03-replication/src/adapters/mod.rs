//! Adapters binding the outbound ports to concrete subsystems.

mod registry;
