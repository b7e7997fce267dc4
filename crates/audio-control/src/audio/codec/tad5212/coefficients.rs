//! Biquad and mixer coefficient sets
//!
//! Coefficients live on pages 15–17 as 32-bit big-endian words. A set is
//! always written as consecutive words at 4-byte strides from its slot base,
//! with no page change in between.

use crate::error::InvalidArgument;

use super::registers::RegisterId;

/// Biquad IIR coefficients in the device's fixed-point format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BiquadCoefficients {
    /// Numerator 0
    pub n0: u32,
    /// Numerator 1
    pub n1: u32,
    /// Numerator 2
    pub n2: u32,
    /// Denominator 1
    pub d1: u32,
    /// Denominator 2
    pub d2: u32,
}

impl BiquadCoefficients {
    /// 2nd-order low-pass at 150 Hz (subwoofer band).
    pub const LOWPASS_150_HZ: Self = Self {
        n0: 0x0003_B0BC,
        n1: 0x0003_B0BC,
        n2: 0x0003_B0BC,
        d1: 0x7E50_E7E4,
        d2: 0x834B_2D38,
    };

    /// 2nd-order high-pass at 150 Hz (satellite crossover).
    pub const HIGHPASS_150_HZ: Self = Self {
        n0: 0x7E1F_4D68,
        n1: 0x81E0_B298,
        n2: 0x7E1F_4D68,
        d1: 0x7E1B_2C9F,
        d2: 0x8395_C7A2,
    };

    /// 2nd-order low-pass at 16 kHz (satellite band limit).
    pub const LOWPASS_16_KHZ: Self = Self {
        n0: 0x40A9_C9E2,
        n1: 0x40A9_C9E2,
        n2: 0x40A9_C9E2,
        d1: 0xD2E4_1E84,
        d2: 0xD7DE_EB24,
    };

    /// Words in write order: N0, N1, N2, D1, D2.
    pub const fn words(&self) -> [u32; 5] {
        [self.n0, self.n1, self.n2, self.d1, self.d2]
    }

    /// Big-endian byte groups in write order.
    pub fn pack(&self) -> [[u8; 4]; 5] {
        self.words().map(u32::to_be_bytes)
    }
}

/// Mixer gains, one 16-bit coefficient per mixer input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MixerCoefficients {
    /// Input 1 gain
    pub a1: u16,
    /// Input 2 gain
    pub a2: u16,
    /// Input 3 gain
    pub a3: u16,
    /// Input 4 gain
    pub a4: u16,
}

impl MixerCoefficients {
    /// Input 1 at 0.5×, everything else muted.
    pub const LEFT_DAC_HALF: Self = Self {
        a1: 0x2000,
        a2: 0,
        a3: 0,
        a4: 0,
    };

    /// Input 2 at 0.5×, everything else muted.
    pub const RIGHT_DAC_HALF: Self = Self {
        a1: 0,
        a2: 0x2000,
        a3: 0,
        a4: 0,
    };

    /// Words in write order: `(a2 << 16) | a1`, then `(a4 << 16) | a3`.
    pub const fn words(&self) -> [u32; 2] {
        [
            (self.a2 as u32).wrapping_shl(16) | self.a1 as u32,
            (self.a4 as u32).wrapping_shl(16) | self.a3 as u32,
        ]
    }

    /// Big-endian byte groups in write order.
    pub fn pack(&self) -> [[u8; 4]; 2] {
        self.words().map(u32::to_be_bytes)
    }
}

/// Biquad filter stages, three per DAC channel.
///
/// Raw ids follow the device numbering: `1..=12`, DAC1 stage 1 first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[allow(missing_docs)]
pub enum BiquadFilter {
    Dac1Stage1 = 1,
    Dac2Stage1 = 2,
    Dac3Stage1 = 3,
    Dac4Stage1 = 4,
    Dac1Stage2 = 5,
    Dac2Stage2 = 6,
    Dac3Stage2 = 7,
    Dac4Stage2 = 8,
    Dac1Stage3 = 9,
    Dac2Stage3 = 10,
    Dac3Stage3 = 11,
    Dac4Stage3 = 12,
}

impl BiquadFilter {
    /// Raw device id.
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// Coefficient slot base, if this part has one for the filter.
    ///
    /// The TAD5212 only implements DAC channels 1 and 2.
    pub const fn slot(self) -> Option<RegisterId> {
        match self {
            Self::Dac1Stage1 => Some(RegisterId::new(0x0F, 0x08)),
            Self::Dac2Stage1 => Some(RegisterId::new(0x0F, 0x1C)),
            Self::Dac1Stage2 => Some(RegisterId::new(0x0F, 0x58)),
            Self::Dac2Stage2 => Some(RegisterId::new(0x0F, 0x6C)),
            Self::Dac1Stage3 => Some(RegisterId::new(0x10, 0x30)),
            Self::Dac2Stage3 => Some(RegisterId::new(0x10, 0x44)),
            _ => None,
        }
    }

    /// Slot base, or `InvalidArgument` for DAC3/DAC4 stages.
    pub fn require_slot(self) -> Result<RegisterId, InvalidArgument> {
        self.slot().ok_or(InvalidArgument::BiquadFilter(self.id()))
    }
}

impl TryFrom<u8> for BiquadFilter {
    type Error = InvalidArgument;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        Ok(match id {
            1 => Self::Dac1Stage1,
            2 => Self::Dac2Stage1,
            3 => Self::Dac3Stage1,
            4 => Self::Dac4Stage1,
            5 => Self::Dac1Stage2,
            6 => Self::Dac2Stage2,
            7 => Self::Dac3Stage2,
            8 => Self::Dac4Stage2,
            9 => Self::Dac1Stage3,
            10 => Self::Dac2Stage3,
            11 => Self::Dac3Stage3,
            12 => Self::Dac4Stage3,
            _ => return Err(InvalidArgument::BiquadFilter(id)),
        })
    }
}

/// DAC-ASI mixers, one per ASI input channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[allow(missing_docs)]
pub enum Mixer {
    AsiCh1 = 1,
    AsiCh2 = 2,
    AsiCh3 = 3,
    AsiCh4 = 4,
    AsiCh5 = 5,
    AsiCh6 = 6,
    AsiCh7 = 7,
    AsiCh8 = 8,
}

impl Mixer {
    /// Raw device id.
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// Coefficient slot base, if this part has one for the mixer.
    pub const fn slot(self) -> Option<RegisterId> {
        match self {
            Self::AsiCh1 => Some(RegisterId::new(0x11, 0x08)),
            Self::AsiCh2 => Some(RegisterId::new(0x11, 0x10)),
            _ => None,
        }
    }

    /// Slot base, or `InvalidArgument` for channels 3–8.
    pub fn require_slot(self) -> Result<RegisterId, InvalidArgument> {
        self.slot().ok_or(InvalidArgument::Mixer(self.id()))
    }
}

impl TryFrom<u8> for Mixer {
    type Error = InvalidArgument;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        Ok(match id {
            1 => Self::AsiCh1,
            2 => Self::AsiCh2,
            3 => Self::AsiCh3,
            4 => Self::AsiCh4,
            5 => Self::AsiCh5,
            6 => Self::AsiCh6,
            7 => Self::AsiCh7,
            8 => Self::AsiCh8,
            _ => return Err(InvalidArgument::Mixer(id)),
        })
    }
}
