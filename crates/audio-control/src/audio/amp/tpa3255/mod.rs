//! TPA3255 class-D amplifier (Texas Instruments)
//!
//! The TPA3255 has no control bus. It is held in reset through an active-low
//! `RESET` pin and reports its condition on two active-low outputs:
//!
//! | `FAULT` | `CLIP_OTW` | Condition |
//! |---------|------------|-----------|
//! | low     | low        | over-temperature, overload or undervoltage shutdown |
//! | low     | high       | overload or undervoltage shutdown |
//! | high    | low        | over-temperature warning or clipping |
//! | high    | high       | normal operation |

mod driver;

pub use driver::Tpa3255;

/// Decoded amplifier condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FaultStatus {
    /// No fault reported
    #[default]
    Normal,
    /// Over-temperature warning or clipping; output still active
    OverTempWarning,
    /// Overload or undervoltage protection tripped
    OverLoadUnderVoltage,
    /// Over-temperature, overload or undervoltage protection tripped
    OverTempOverLoadUnderVoltage,
}

impl FaultStatus {
    /// Decode raw line levels (`true` = high). Both lines are active-low.
    pub const fn decode(fault_line: bool, clip_line: bool) -> Self {
        match (fault_line, clip_line) {
            (false, false) => Self::OverTempOverLoadUnderVoltage,
            (false, true) => Self::OverLoadUnderVoltage,
            (true, false) => Self::OverTempWarning,
            (true, true) => Self::Normal,
        }
    }

    /// `true` if a protection circuit has shut the output down.
    pub const fn is_fault(self) -> bool {
        matches!(
            self,
            Self::OverLoadUnderVoltage | Self::OverTempOverLoadUnderVoltage
        )
    }

    /// `true` for the over-temperature / clipping warning.
    pub const fn is_warning(self) -> bool {
        matches!(self, Self::OverTempWarning)
    }
}
