//! Outbound ports (SPI) for the ledger subsystem.

/// Clock used to timestamp new blocks.
pub trait TimeSource: Send + Sync {
    /// Seconds since the Unix epoch, fractional part allowed.
    fn now(&self) -> f64;
}
