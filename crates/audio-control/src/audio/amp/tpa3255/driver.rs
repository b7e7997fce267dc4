//! TPA3255 GPIO driver
//!
//! Controls the amplifier via its `RESET` output pin and samples the `FAULT`
//! and `CLIP_OTW` input pins. Uses `embedded_hal::digital` (v1.0); pin
//! access is instantaneous so nothing here awaits the hardware.

use embedded_hal::digital::{Error as _, InputPin, OutputPin};

use super::FaultStatus;
use crate::audio::amp::AmpMonitor;
use crate::error::{Error, InvalidState};

/// TPA3255 amplifier driver.
///
/// Holds ownership of the three GPIO lines. Nothing is driven until
/// [`init`](Self::init).
pub struct Tpa3255<R, F, C> {
    reset: R,
    fault: F,
    clip: C,
    initialized: bool,
}

impl<R: OutputPin, F: InputPin, C: InputPin> Tpa3255<R, F, C> {
    /// Take the `RESET` output and the `FAULT` / `CLIP_OTW` inputs.
    pub fn new(reset: R, fault: F, clip: C) -> Self {
        Self {
            reset,
            fault,
            clip,
            initialized: false,
        }
    }

    /// Drive `RESET` low (amplifier held in reset) and mark the driver ready.
    pub fn init(&mut self) -> Result<(), Error> {
        self.reset.set_low().map_err(|e| Error::Pin(e.kind()))?;
        self.initialized = true;
        Ok(())
    }

    /// Returns `true` after a successful [`init`](Self::init).
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// `true` drives `RESET` low (hold), `false` drives it high (release).
    pub fn set_reset(&mut self, asserted: bool) -> Result<(), Error> {
        if !self.initialized {
            #[cfg(feature = "defmt")]
            defmt::error!("TPA3255 not initialized");
            return Err(InvalidState::NotInitialized.into());
        }
        let result = if asserted {
            self.reset.set_low()
        } else {
            self.reset.set_high()
        };
        result.map_err(|e| Error::Pin(e.kind()))
    }

    /// Sample `FAULT` then `CLIP_OTW` and decode them.
    ///
    /// An uninitialized driver samples nothing and reports
    /// [`FaultStatus::Normal`].
    pub fn status(&mut self) -> Result<FaultStatus, Error> {
        if !self.initialized {
            #[cfg(feature = "defmt")]
            defmt::error!("TPA3255 not initialized, status not sampled");
            return Ok(FaultStatus::Normal);
        }
        let fault = self.fault.is_high().map_err(|e| Error::Pin(e.kind()))?;
        let clip = self.clip.is_high().map_err(|e| Error::Pin(e.kind()))?;
        Ok(FaultStatus::decode(fault, clip))
    }
}

impl<R: OutputPin, F: InputPin, C: InputPin> AmpMonitor for Tpa3255<R, F, C> {
    type Error = Error;

    async fn status(&mut self) -> Result<FaultStatus, Self::Error> {
        Tpa3255::status(self)
    }

    async fn set_reset(&mut self, asserted: bool) -> Result<(), Self::Error> {
        Tpa3255::set_reset(self, asserted)
    }
}
