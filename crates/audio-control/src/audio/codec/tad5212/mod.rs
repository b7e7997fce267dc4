//! TAD5212 stereo codec driver (Texas Instruments)
//!
//! The TAD5212 is a stereo audio DAC with line / headphone drivers, a
//! programmable biquad chain and a digital mixer, configured over I²C through
//! a paged register map.
//!
//! # Signal Path
//!
//! ```text
//! A2DP sink → I²S (PASI) → mixer → biquads → DAC1/DAC2 → OUT1/OUT2 → TPA3255
//! ```
//!
//! # I²C Address
//!
//! Selected by the ADDR strap:
//!
//! | ADDR strap        | Address |
//! |-------------------|---------|
//! | Short to GND      | `0x50`  |
//! | 4.7 kΩ pull-down  | `0x51`  |
//! | 22 kΩ pull-up     | `0x52`  |
//! | 4.7 kΩ pull-up    | `0x53`  |

pub mod coefficients;
mod driver;
pub mod registers;
pub mod status;
pub mod transport;
pub mod volume;

pub use coefficients::{BiquadCoefficients, BiquadFilter, Mixer, MixerCoefficients};
pub use driver::{InitFailure, Profile, SharedTad5212, Tad5212, Tad5212Config};
pub use status::{ClockErrors, CodecStatus, DeviceMode};
pub use transport::{BusTimeouts, PagedTransport, Value};
pub use volume::DigitalVolume;

pub use super::Channel;

use crate::error::InvalidArgument;

/// 7-bit I²C address selected by the ADDR strap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Tad5212Address {
    /// ADDR shorted to ground
    Short = 0x50,
    /// 4.7 kΩ pull-down
    PullDown4k7 = 0x51,
    /// 22 kΩ pull-up
    PullUp22k = 0x52,
    /// 4.7 kΩ pull-up
    PullUp4k7 = 0x53,
}

impl Tad5212Address {
    /// Raw 7-bit address.
    pub const fn get(self) -> u8 {
        self as u8
    }
}

impl From<Tad5212Address> for u8 {
    fn from(address: Tad5212Address) -> Self {
        address.get()
    }
}

impl TryFrom<u8> for Tad5212Address {
    type Error = InvalidArgument;

    fn try_from(address: u8) -> Result<Self, Self::Error> {
        match address {
            0x50 => Ok(Self::Short),
            0x51 => Ok(Self::PullDown4k7),
            0x52 => Ok(Self::PullUp22k),
            0x53 => Ok(Self::PullUp4k7),
            other => Err(InvalidArgument::Address(other)),
        }
    }
}
