//! Power amplifier driver abstractions
//!
//! - `tpa3255` - TI TPA3255 fault decoder and reset control
//! - `mock` - In-process mock for host tests (always available)

#![allow(async_fn_in_trait)]

pub mod mock;
pub mod tpa3255;

pub use mock::MockAmp;
pub use tpa3255::{FaultStatus, Tpa3255};

/// The amplifier operations the supervisor relies on.
///
/// The TPA3255 is controlled by one active-low `RESET` output and reports
/// through two active-low open-drain lines (`FAULT`, `CLIP_OTW`). This trait
/// abstracts that for both hardware and mock implementations.
pub trait AmpMonitor {
    /// Error type returned by amplifier operations.
    type Error: core::fmt::Debug;

    /// Sample the fault lines and decode them.
    async fn status(&mut self) -> Result<FaultStatus, Self::Error>;

    /// `true` holds the amplifier in reset, `false` releases it.
    async fn set_reset(&mut self, asserted: bool) -> Result<(), Self::Error>;
}
