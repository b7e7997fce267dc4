//! Mock power amplifier for host-side testing
//!
//! Implements [`AmpMonitor`] without any hardware dependency. Reports a
//! settable [`FaultStatus`] and records reset changes.

use super::{AmpMonitor, FaultStatus};

/// Mock amplifier - records all calls for test assertions.
#[derive(Debug)]
pub struct MockAmp {
    /// Status returned by [`AmpMonitor::status`].
    pub fault: FaultStatus,
    /// Whether the amplifier is currently held in reset.
    pub in_reset: bool,
    /// Total number of times the reset was released.
    pub release_count: usize,
    /// Total number of status samples.
    pub status_count: usize,
}

impl MockAmp {
    /// Create a new mock amplifier. Starts held in reset, reporting normal.
    pub fn new() -> Self {
        Self {
            fault: FaultStatus::Normal,
            in_reset: true,
            release_count: 0,
            status_count: 0,
        }
    }
}

impl Default for MockAmp {
    fn default() -> Self {
        Self::new()
    }
}

impl AmpMonitor for MockAmp {
    type Error = core::convert::Infallible;

    async fn status(&mut self) -> Result<FaultStatus, Self::Error> {
        self.status_count = self.status_count.saturating_add(1);
        Ok(self.fault)
    }

    async fn set_reset(&mut self, asserted: bool) -> Result<(), Self::Error> {
        if !asserted {
            self.release_count = self.release_count.saturating_add(1);
        }
        self.in_reset = asserted;
        Ok(())
    }
}
