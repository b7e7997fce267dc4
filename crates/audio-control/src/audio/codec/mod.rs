//! Codec driver abstractions
//!
//! - `tad5212` - TI TAD5212 hardware driver
//! - `mock` - In-process mock for host tests (always available)

#![allow(async_fn_in_trait)]

pub mod mock;
pub mod tad5212;

pub use mock::MockCodec;

use platform::VolumePercent;

use self::tad5212::CodecStatus;

/// DAC channel selector for volume writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Channel {
    /// DAC channel 1
    Left,
    /// DAC channel 2
    Right,
    /// Channel 1, then channel 2
    Both,
}

/// The codec operations the supervisor relies on.
pub trait CodecControl {
    /// Error type returned by codec operations.
    type Error: core::fmt::Debug;

    /// Set the digital volume of `channel`.
    async fn set_volume(
        &mut self,
        channel: Channel,
        volume: VolumePercent,
    ) -> Result<(), Self::Error>;

    /// Read a diagnostic status snapshot.
    async fn query_status(&mut self) -> Result<CodecStatus, Self::Error>;

    /// Returns `true` once the codec has been brought up.
    fn is_ready(&self) -> bool;
}
