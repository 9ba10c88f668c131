//! # Control API (hc-04)
//!
//! Operator-facing HTTP interface of a node.
//!
//! ## Architecture Role
//!
//! ```text
//! [Operator] ──HTTP/JSON──→ [Control API (4)] ──submit_data / chain / peers──→ [Replication (3)]
//!                                   │
//!                                   ↓ request_connection
//!                           [Peer transport]
//! ```
//!
//! ## Routes
//!
//! | Method | Path         | Body                  | Response          |
//! |--------|--------------|-----------------------|-------------------|
//! | GET    | `/blocks`    |                       | full chain        |
//! | POST   | `/mineBlock` | `{"data": "..."}`     | the new block     |
//! | GET    | `/peers`     |                       | peer addresses    |
//! | POST   | `/addPeer`   | `{"peer": "ws://..."}`| 202 Accepted      |
//! | GET    | `/health`    |                       | liveness          |

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::*;
pub use ports::outbound::PeerConnector;
pub use service::{AppState, ControlApiService};
