//! Outbound ports (SPI) for the control surface.

use crate::domain::ControlError;

/// Opens outbound peer links on request.
pub trait PeerConnector: Send + Sync {
    /// Start dialing `address` in the background.
    ///
    /// Returns once the address has been accepted for dialing; the outcome
    /// of the connection attempt itself is only logged.
    fn request_connection(&self, address: &str) -> Result<(), ControlError>;
}
