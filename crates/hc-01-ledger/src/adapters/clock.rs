use std::time::{SystemTime, UNIX_EPOCH};

use crate::ports::outbound::TimeSource;

/// Wall clock with millisecond resolution.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl SystemTimeSource {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl TimeSource for SystemTimeSource {
    fn now(&self) -> f64 {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        millis as f64 / 1000.0
    }
}
