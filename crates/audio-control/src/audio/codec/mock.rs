//! Mock codec for host-side testing
//!
//! Implements [`CodecControl`] without any bus. Records every volume write
//! for assertion in tests.

use platform::VolumePercent;

use super::tad5212::CodecStatus;
use super::{Channel, CodecControl};
use crate::error::Error;

/// Capacity of [`MockCodec::volumes`]; further writes are counted but not stored.
pub const VOLUME_LOG_CAPACITY: usize = 32;

/// Mock codec - records all calls for test assertions.
#[derive(Debug, Default)]
pub struct MockCodec {
    /// Reported by [`CodecControl::is_ready`].
    pub ready: bool,
    /// Volume writes in call order (first [`VOLUME_LOG_CAPACITY`] only).
    pub volumes: heapless::Vec<(Channel, VolumePercent), VOLUME_LOG_CAPACITY>,
    /// Total number of volume writes.
    pub volume_count: usize,
    /// Snapshot returned by [`CodecControl::query_status`].
    pub status: CodecStatus,
    /// Total number of status queries.
    pub status_count: usize,
    /// Make volume writes fail with [`Error::Timeout`].
    pub fail_volume: bool,
    /// Make status queries fail with [`Error::Timeout`].
    pub fail_status: bool,
}

impl MockCodec {
    /// Create a ready mock codec.
    pub fn new() -> Self {
        Self {
            ready: true,
            ..Self::default()
        }
    }

    /// Most recent volume write.
    pub fn last_volume(&self) -> Option<(Channel, VolumePercent)> {
        self.volumes.last().copied()
    }
}

impl CodecControl for MockCodec {
    type Error = Error;

    async fn set_volume(
        &mut self,
        channel: Channel,
        volume: VolumePercent,
    ) -> Result<(), Self::Error> {
        self.volume_count = self.volume_count.saturating_add(1);
        if self.fail_volume {
            return Err(Error::Timeout);
        }
        // Full log: keep counting, stop storing
        let _ = self.volumes.push((channel, volume));
        Ok(())
    }

    async fn query_status(&mut self) -> Result<CodecStatus, Self::Error> {
        self.status_count = self.status_count.saturating_add(1);
        if self.fail_status {
            return Err(Error::Timeout);
        }
        Ok(self.status)
    }

    fn is_ready(&self) -> bool {
        self.ready
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_records_volume_writes() {
        let mut codec = MockCodec::new();
        codec
            .set_volume(Channel::Both, VolumePercent::new(40))
            .await
            .unwrap();
        assert_eq!(codec.volume_count, 1);
        assert_eq!(
            codec.last_volume(),
            Some((Channel::Both, VolumePercent::new(40)))
        );
    }

    #[tokio::test]
    async fn test_failure_injection() {
        let mut codec = MockCodec::new();
        codec.fail_status = true;
        assert_eq!(codec.query_status().await, Err(Error::Timeout));
        assert_eq!(codec.status_count, 1);
    }

    #[tokio::test]
    async fn test_default_is_not_ready() {
        assert!(!MockCodec::default().is_ready());
        assert!(MockCodec::new().is_ready());
    }
}
