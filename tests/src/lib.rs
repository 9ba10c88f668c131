//! # Hash-Linked Chain Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── harness.rs        # In-memory multi-node network
//! │
//! └── integration/
//!     ├── replication_flows.rs   # Convergence scenarios over the harness
//!     └── websocket_e2e.rs       # Real nodes over localhost WebSockets
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p hc-tests
//!
//! # By category
//! cargo test -p hc-tests replication_flows::
//! cargo test -p hc-tests websocket_e2e::
//! ```

pub mod harness;
