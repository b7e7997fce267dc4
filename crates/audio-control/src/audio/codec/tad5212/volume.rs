//! Percent to DAC digital-volume mapping
//!
//! The DAC volume register runs from 0 (mute) through 201 (0 dB) in 0.5 dB
//! steps. Percent 1..=100 is spread linearly over 81 (−60 dB) ..= 201, so
//! every non-zero percent stays audible and 0 % is a true mute.

use platform::VolumePercent;

/// Bottom of the audible range (−60 dB); 1 % maps one step above.
pub const MIN_VOLUME: u8 = 81;
/// Register value for 100 % (0 dB).
pub const MAX_VOLUME: u8 = 201;
/// Register value that mutes the channel.
pub const MUTE_VOLUME: u8 = 0;

/// Value for the DAC_CHxA_CFG0 digital volume register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DigitalVolume(u8);

impl DigitalVolume {
    /// Mute.
    pub const MUTE: Self = Self(MUTE_VOLUME);

    /// Map `percent`: 0 → mute, otherwise `81 + round(1.2 * percent)`.
    ///
    /// Rounds half up, so 100 % lands exactly on 0 dB.
    pub fn from_percent(percent: VolumePercent) -> Self {
        if percent.is_mute() {
            return Self::MUTE;
        }
        let span = u16::from(MAX_VOLUME.saturating_sub(MIN_VOLUME));
        // Max intermediate: 120 * 100 + 50 = 12 050 < u16::MAX
        let step = span
            .saturating_mul(u16::from(percent.get()))
            .saturating_add(50)
            .checked_div(100)
            .unwrap_or(span);
        let value = u16::from(MIN_VOLUME).saturating_add(step);
        Self(u8::try_from(value).unwrap_or(MAX_VOLUME).min(MAX_VOLUME))
    }

    /// Raw register value.
    pub fn get(self) -> u8 {
        self.0
    }
}

impl From<VolumePercent> for DigitalVolume {
    fn from(percent: VolumePercent) -> Self {
        Self::from_percent(percent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(p: u8) -> u8 {
        DigitalVolume::from_percent(VolumePercent::new(p)).get()
    }

    #[test]
    fn end_points() {
        assert_eq!(map(0), 0);
        assert_eq!(map(1), 82);
        assert_eq!(map(100), 201);
    }

    #[test]
    fn rounds_half_up() {
        // 1.2 * 50 = 60 exactly, 1.2 * 49 = 58.8 -> 59
        assert_eq!(map(50), 141);
        assert_eq!(map(49), 140);
    }

    #[test]
    fn clamped_input_maps_to_full_scale() {
        assert_eq!(map(250), MAX_VOLUME);
    }
}
