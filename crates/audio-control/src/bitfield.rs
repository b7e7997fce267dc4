//! Bitfield register codec
//!
//! A [`Field`] names a contiguous bit range inside a register value.
//! Decoding extracts it, encoding replaces it while leaving every other bit
//! exactly as supplied. Field values wider than the field are truncated to
//! the field width.
//!
//! ```
//! use audio_control::bitfield::Field;
//!
//! const WLEN: Field = Field::new(4, 2);
//! assert_eq!(WLEN.set(0b1000_0001, 0b11), 0b1011_0001);
//! assert_eq!(WLEN.get(0b1011_0001), 0b11);
//! ```

/// A contiguous bit range: `width` bits starting at bit `offset` (LSB = 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Field {
    /// Position of the least significant bit of the field
    pub offset: u32,
    /// Number of bits
    pub width: u32,
}

impl Field {
    /// Describe a field. `offset + width` must not exceed 32.
    pub const fn new(offset: u32, width: u32) -> Self {
        Self { offset, width }
    }

    /// Single-bit flag at `offset`.
    pub const fn bit(offset: u32) -> Self {
        Self::new(offset, 1)
    }

    /// Mask of the field in place.
    pub const fn mask(self) -> u32 {
        let ones = if self.width >= 32 {
            u32::MAX
        } else {
            (1u32.wrapping_shl(self.width)).wrapping_sub(1)
        };
        ones.wrapping_shl(self.offset)
    }

    /// Decode the field from `value`.
    pub const fn get(self, value: u32) -> u32 {
        (value & self.mask()).wrapping_shr(self.offset)
    }

    /// Encode `field` into `value`, preserving all bits outside the field.
    pub const fn set(self, value: u32, field: u32) -> u32 {
        (value & !self.mask()) | (field.wrapping_shl(self.offset) & self.mask())
    }

    /// Invert every bit of the field.
    pub const fn toggle(self, value: u32) -> u32 {
        value ^ self.mask()
    }

    /// [`get`](Self::get) on a byte register.
    pub const fn get_u8(self, value: u8) -> u8 {
        // Truncation is exact: the field lies inside the low byte.
        #[allow(clippy::cast_possible_truncation)]
        let field = self.get(value as u32) as u8;
        field
    }

    /// [`set`](Self::set) on a byte register.
    pub const fn set_u8(self, value: u8, field: u8) -> u8 {
        #[allow(clippy::cast_possible_truncation)]
        let out = self.set(value as u32, field as u32) as u8;
        out
    }

    /// [`toggle`](Self::toggle) on a byte register.
    pub const fn toggle_u8(self, value: u8) -> u8 {
        #[allow(clippy::cast_possible_truncation)]
        let out = self.toggle(value as u32) as u8;
        out
    }

    /// Read a single-bit field as a flag.
    pub const fn is_set(self, value: u8) -> bool {
        self.get_u8(value) != 0
    }

    /// Mask of the field in a byte register.
    pub const fn mask_u8(self) -> u8 {
        #[allow(clippy::cast_possible_truncation)]
        let mask = self.mask() as u8;
        mask
    }
}
