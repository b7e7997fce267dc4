//! Audio domain newtypes for compile-time safety.
//!
//! These zero-cost abstractions prevent common errors:
//! - `VolumePercent`: clamps 0–100, the unit every codec volume API takes
//! - `SourceVolume`: clamps 0–127, the AVRCP absolute volume scale of the
//!   upstream source, with the one sanctioned conversion to percent

// ── Error type ───────────────────────────────────────────────────────────────

/// Error returned when a value is out of the valid range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutOfRangeError {
    /// The value that was out of range.
    pub value: u32,
    /// The inclusive minimum allowed value.
    pub min: u32,
    /// The inclusive maximum allowed value.
    pub max: u32,
}

// ── VolumePercent ────────────────────────────────────────────────────────────

/// Volume as a percentage, clamped to 0–100.
///
/// Wraps a `u8` with the invariant `0 <= value <= 100`.
/// Construct with [`VolumePercent::new`] (clamping) or
/// [`VolumePercent::try_new`] (fallible, strict).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct VolumePercent(u8);

impl VolumePercent {
    /// Muted (0 %).
    pub const MUTE: Self = Self(0);

    /// Full scale (100 %).
    pub const MAX: Self = Self(100);

    /// Create a `VolumePercent`, clamping values above 100 to 100.
    #[must_use]
    pub fn new(value: u8) -> Self {
        Self(value.min(100))
    }

    /// Create a `VolumePercent`, returning an error if `value > 100`.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRangeError`] if `value > 100`.
    pub fn try_new(value: u8) -> Result<Self, OutOfRangeError> {
        if value > 100 {
            Err(OutOfRangeError {
                value: u32::from(value),
                min: 0,
                max: 100,
            })
        } else {
            Ok(Self(value))
        }
    }

    /// Return the inner volume value (0–100).
    #[must_use]
    pub fn get(self) -> u8 {
        self.0
    }

    /// Returns `true` for 0 %.
    #[must_use]
    pub fn is_mute(self) -> bool {
        self.0 == 0
    }
}

// ── SourceVolume ─────────────────────────────────────────────────────────────

/// Upstream volume on the AVRCP absolute scale, clamped to 0–127.
///
/// 0x00 is silence and 0x7F is full scale. Convert to the codec unit with
/// [`SourceVolume::to_percent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct SourceVolume(u8);

impl SourceVolume {
    /// Largest value on the AVRCP scale.
    pub const MAX_RAW: u8 = 0x7F;

    /// Create a `SourceVolume`, clamping values above 127 to 127.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        if value > Self::MAX_RAW {
            Self(Self::MAX_RAW)
        } else {
            Self(value)
        }
    }

    /// Create a `SourceVolume`, returning an error if `value > 127`.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRangeError`] if `value > 127`.
    pub fn try_new(value: u8) -> Result<Self, OutOfRangeError> {
        if value > Self::MAX_RAW {
            Err(OutOfRangeError {
                value: u32::from(value),
                min: 0,
                max: u32::from(Self::MAX_RAW),
            })
        } else {
            Ok(Self(value))
        }
    }

    /// Return the raw AVRCP value (0–127).
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Normalise to percent: `percent = volume * 100 / 127` (truncating).
    ///
    /// - 0   → 0 %
    /// - 63  → 49 %
    /// - 127 → 100 %
    #[must_use]
    pub fn to_percent(self) -> VolumePercent {
        // Max intermediate: 127 * 100 = 12 700 < u16::MAX
        let percent = u16::from(self.0)
            .saturating_mul(100)
            .checked_div(u16::from(Self::MAX_RAW))
            .unwrap_or(100);
        VolumePercent::new(u8::try_from(percent).unwrap_or(100))
    }
}

impl From<SourceVolume> for VolumePercent {
    fn from(volume: SourceVolume) -> Self {
        volume.to_percent()
    }
}
