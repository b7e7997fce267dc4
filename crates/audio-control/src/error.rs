//! Error types shared by the codec and amplifier drivers
//!
//! `E` is the bus error of the underlying [`embedded_hal_async::i2c::I2c`]
//! implementation. GPIO-only drivers use the default `E = Infallible`.

use core::convert::Infallible;

use thiserror_no_std::Error as ThisError;

/// An argument was outside the set the device supports.
///
/// Always raised before any bus access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ThisError)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InvalidArgument {
    /// Not one of the four TAD5212 strap addresses (0x50..=0x53).
    #[error("0x{0:02X} is not a TAD5212 I2C address")]
    Address(u8),
    /// Biquad filter id that is unknown or has no slot on this part.
    #[error("biquad filter {0} has no coefficient slot")]
    BiquadFilter(u8),
    /// Mixer id that is unknown or has no slot on this part.
    #[error("mixer {0} has no coefficient slot")]
    Mixer(u8),
    /// Value width does not match the page (1 byte below page 0x0F, 4 above).
    #[error("{width}-byte value written to page 0x{page:02X}")]
    ValueWidth {
        /// Target page
        page: u8,
        /// Width of the rejected value in bytes
        width: u8,
    },
}

/// The operation is not valid in the current lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ThisError)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InvalidState {
    /// `initialize` on a handle that is already Ready.
    #[error("device already initialized")]
    AlreadyInitialized,
    /// Operation requires an initialized device.
    #[error("device not initialized")]
    NotInitialized,
}

/// Audio control error
#[derive(Debug, Clone, Copy, PartialEq, Eq, ThisError)]
pub enum Error<E = Infallible> {
    /// Rejected argument (no bus traffic was generated).
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] InvalidArgument),
    /// Lifecycle precondition violated.
    #[error("invalid state: {0}")]
    InvalidState(#[from] InvalidState),
    /// The bus reported an error.
    #[error("bus transport error: {0:?}")]
    Transport(E),
    /// A bus transaction did not complete within its timeout.
    #[error("bus transaction timed out")]
    Timeout,
    /// A GPIO read or write failed.
    #[error("GPIO error: {0:?}")]
    Pin(embedded_hal::digital::ErrorKind),
}

impl<E> Error<E> {
    /// Returns `true` for bus-level failures (`Transport` or `Timeout`).
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Timeout)
    }
}

#[cfg(feature = "defmt")]
impl<E: defmt::Format> defmt::Format for Error<E> {
    fn format(&self, f: defmt::Formatter<'_>) {
        match self {
            Self::InvalidArgument(arg) => defmt::write!(f, "invalid argument: {}", arg),
            Self::InvalidState(state) => defmt::write!(f, "invalid state: {}", state),
            Self::Transport(e) => defmt::write!(f, "bus transport error: {}", e),
            Self::Timeout => defmt::write!(f, "bus transaction timed out"),
            Self::Pin(kind) => defmt::write!(f, "GPIO error: {}", defmt::Debug2Format(kind)),
        }
    }
}
