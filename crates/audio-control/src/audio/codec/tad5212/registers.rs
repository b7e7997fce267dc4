//! TAD5212 register map
//!
//! Source: TI TAD5212 datasheet (SLASF23), register maps for pages 0, 1,
//! 15, 16 and 17.
//!
//! # Paging
//!
//! The register space is split into 256-byte pages. Register `0x00` on every
//! page is `PAGE_CFG`; writing a page number to it selects that page for all
//! subsequent accesses. Pages `0x00`–`0x0E` hold 1-byte registers. Pages
//! `0x0F` and up hold 32-bit coefficients, transferred MSB first as four
//! consecutive bytes starting at a 4-byte aligned address.
//!
//! # Typed registers
//!
//! Each configuration or status register with named bit fields is a plain
//! struct generated by [`register!`]. `decode` splits a raw byte into the
//! named fields and keeps every other bit in `reserved`; `encode` is the exact
//! inverse, so a decode/modify/encode cycle only touches the field changed.

use crate::bitfield::Field;

/// Register identity: `(page, address)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RegisterId {
    /// Page the register lives on
    pub page: u8,
    /// Address within the page
    pub addr: u8,
}

impl RegisterId {
    /// Register `addr` on `page`.
    pub const fn new(page: u8, addr: u8) -> Self {
        Self { page, addr }
    }

    /// `true` if the register lives on a 32-bit coefficient page.
    pub const fn is_coefficient(self) -> bool {
        is_coefficient_page(self.page)
    }
}

/// First page holding 32-bit coefficient registers.
pub const FIRST_COEFFICIENT_PAGE: u8 = 0x0F;

/// Pages at or above `0x0F` take 4-byte values.
pub const fn is_coefficient_page(page: u8) -> bool {
    page >= FIRST_COEFFICIENT_PAGE
}

// ---------------------------------------------------------------------------
// Register addresses
// ---------------------------------------------------------------------------

/// Page select (present on every page).
pub const PAGE_CFG: u8 = 0x00;

/// Software reset, bit 0 self-clearing
pub const SW_RESET: RegisterId = RegisterId::new(0x00, 0x01);
/// Sleep, supply mode and VREF quick-charge configuration
pub const DEV_MISC_CFG: RegisterId = RegisterId::new(0x00, 0x02);
/// Headphone driver de-pop configuration
pub const DAC_CFG_A0: RegisterId = RegisterId::new(0x00, 0x06);
/// DAC delayed power-up configuration
pub const MISC_CFG0: RegisterId = RegisterId::new(0x00, 0x07);
/// DOUT pin configuration
pub const INTF_CFG1: RegisterId = RegisterId::new(0x00, 0x10);
/// ASI data input / output pin configuration
pub const ASI_CFG1: RegisterId = RegisterId::new(0x00, 0x19);
/// Primary ASI protocol configuration
pub const PASI_CFG0: RegisterId = RegisterId::new(0x00, 0x1A);
/// Primary ASI input channel 1 slot assignment
pub const PASI_RX_CH1_CFG: RegisterId = RegisterId::new(0x00, 0x28);
/// Primary ASI input channel 2 slot assignment
pub const PASI_RX_CH2_CFG: RegisterId = RegisterId::new(0x00, 0x29);
/// Clock error flags 0
pub const CLK_ERR_STS0: RegisterId = RegisterId::new(0x00, 0x3C);
/// Clock error flags 1
pub const CLK_ERR_STS1: RegisterId = RegisterId::new(0x00, 0x3D);
/// Detected PLL mode and primary ASI sample rate
pub const CLK_DET_STS0: RegisterId = RegisterId::new(0x00, 0x3E);
/// FSYNC to clock source ratio, bits 13:8
pub const CLK_DET_STS2: RegisterId = RegisterId::new(0x00, 0x40);
/// FSYNC to clock source ratio, bits 7:0
pub const CLK_DET_STS3: RegisterId = RegisterId::new(0x00, 0x41);
/// OUT1x source and routing
pub const OUT1X_CFG0: RegisterId = RegisterId::new(0x00, 0x64);
/// OUT1P driver configuration
pub const OUT1X_CFG1: RegisterId = RegisterId::new(0x00, 0x65);
/// OUT1M driver configuration
pub const OUT1X_CFG2: RegisterId = RegisterId::new(0x00, 0x66);
/// DAC channel 1A digital volume
pub const DAC_CH1A_CFG0: RegisterId = RegisterId::new(0x00, 0x67);
/// OUT2x source and routing
pub const OUT2X_CFG0: RegisterId = RegisterId::new(0x00, 0x6B);
/// OUT2P driver configuration
pub const OUT2X_CFG1: RegisterId = RegisterId::new(0x00, 0x6C);
/// OUT2M driver configuration
pub const OUT2X_CFG2: RegisterId = RegisterId::new(0x00, 0x6D);
/// DAC channel 2A digital volume
pub const DAC_CH2A_CFG0: RegisterId = RegisterId::new(0x00, 0x6E);
/// Input / output channel enable
pub const CH_EN: RegisterId = RegisterId::new(0x00, 0x76);
/// Dynamic power-up and channel swap configuration
pub const DYN_PUPD_CFG: RegisterId = RegisterId::new(0x00, 0x77);
/// ADC / DAC / MICBIAS power configuration
pub const PWR_CFG: RegisterId = RegisterId::new(0x00, 0x78);
/// Channel power status
pub const DEV_STS0: RegisterId = RegisterId::new(0x00, 0x79);
/// Device mode, PLL and MICBIAS status
pub const DEV_STS1: RegisterId = RegisterId::new(0x00, 0x7A);
/// Digital mixer routing (page 1)
pub const MIXER_CFG0: RegisterId = RegisterId::new(0x01, 0x2C);

/// Delay required after writing [`SW_RESET`] or [`DEV_MISC_CFG`], in ms.
pub const SETTLE_MS: u32 = 10;

// ---------------------------------------------------------------------------
// Typed registers
// ---------------------------------------------------------------------------

/// A value stored in a register field.
pub trait FieldValue: Copy {
    /// Build from the right-aligned field bits.
    fn from_raw(raw: u8) -> Self;
    /// Right-aligned field bits.
    fn into_raw(self) -> u8;
}

impl FieldValue for bool {
    fn from_raw(raw: u8) -> Self {
        raw != 0
    }

    fn into_raw(self) -> u8 {
        u8::from(self)
    }
}

impl FieldValue for u8 {
    fn from_raw(raw: u8) -> Self {
        raw
    }

    fn into_raw(self) -> u8 {
        self
    }
}

/// Generate a byte register struct from `name: type = offset, width;` fields.
macro_rules! register {
    (
        $(#[$meta:meta])*
        $name:ident {
            $(
                $(#[$fmeta:meta])*
                $field:ident : $ty:ty = $offset:literal, $width:literal;
            )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
        #[cfg_attr(feature = "defmt", derive(defmt::Format))]
        pub struct $name {
            $(
                $(#[$fmeta])*
                pub $field: $ty,
            )+
            /// Bits outside the named fields, kept verbatim
            pub reserved: u8,
        }

        impl $name {
            const NAMED: u8 = 0 $( | Field::new($offset, $width).mask_u8() )+;

            /// Split a raw register value into its fields.
            pub fn decode(raw: u8) -> Self {
                Self {
                    $(
                        $field: <$ty as FieldValue>::from_raw(
                            Field::new($offset, $width).get_u8(raw),
                        ),
                    )+
                    reserved: raw & !Self::NAMED,
                }
            }

            /// Assemble the raw register value.
            pub fn encode(self) -> u8 {
                let mut raw = self.reserved & !Self::NAMED;
                $(
                    raw = Field::new($offset, $width).set_u8(raw, self.$field.into_raw());
                )+
                raw
            }
        }
    };
}

register! {
    /// SW_RESET (page 0, 0x01)
    SwReset {
        /// Software reset, self-clearing
        reset: bool = 0, 1;
    }
}

register! {
    /// DEV_MISC_CFG (page 0, 0x02)
    DevMiscCfg {
        /// `true` = active, `false` = sleep
        sleep_enz: bool = 0, 1;
        /// IOVDD 1.8 V / 3.3 V mode
        iovdd_io_mode: bool = 1, 1;
        /// AVDD mode
        avdd_mode: bool = 2, 1;
        /// Start VREF charging when leaving sleep
        sleep_exit_vref_en: bool = 3, 1;
        /// VREF quick-charge duration (0: 3.5 ms, 1: 10 ms, 2: 50 ms, 3: 100 ms)
        vref_qchg: u8 = 4, 2;
    }
}

register! {
    /// DAC_CFG_A0 (page 0, 0x06)
    DacCfgA0 {
        /// Headphone external cap charging time
        pwr_up_time: u8 = 0, 4;
        /// Series resistor, mid phase
        rseries_mid: u8 = 4, 2;
        /// Series resistor, initial phase
        rseries_int: u8 = 6, 2;
    }
}

register! {
    /// MISC_CFG0 (page 0, 0x07)
    MiscCfg0 {
        /// Hard reset when the selected clock stops for 2 ms
        hw_reset_on_clk_stop: bool = 4, 1;
        /// Delayed power-up time select
        delayed_pwrup_time: bool = 5, 1;
        /// Delay DAC power-up
        delayed_pwrup: bool = 6, 1;
        /// Start with DC-blocking capacitor discharge sequence
        st_w_cap_dis: bool = 7, 1;
    }
}

register! {
    /// INTF_CFG1 (page 0, 0x10)
    IntfCfg1 {
        /// DOUT drive configuration
        dout_drv: u8 = 0, 3;
        /// DOUT value when used as GPO
        dout_val: bool = 3, 1;
        /// DOUT function select
        dout_sel: bool = 4, 1;
    }
}

register! {
    /// ASI_CFG1 (page 0, 0x19)
    AsiCfg1 {
        /// Daisy-chain direction
        daisy_dir: bool = 3, 1;
        /// Data input pin configuration (1 = two data inputs)
        asi_din_cfg: u8 = 4, 2;
        /// Data output pin configuration
        asi_dout_cfg: u8 = 6, 2;
    }
}

register! {
    /// PASI_CFG0 (page 0, 0x1A)
    PasiCfg0 {
        /// Resume automatically after a bus error
        bus_err_rcov: bool = 0, 1;
        /// Bus error detection
        bus_err: bool = 1, 1;
        /// BCLK polarity
        bclk_pol: bool = 2, 1;
        /// FSYNC polarity
        fsync_pol: bool = 3, 1;
        /// Word length (0: 16, 1: 20, 2: 24, 3: 32 bits)
        wlen: u8 = 4, 2;
        /// Protocol (0: TDM, 1: I2S, 2: left-justified)
        format: u8 = 6, 2;
    }
}

register! {
    /// PASI_RX_CHx_CFG (page 0, 0x28 / 0x29)
    PasiRxChCfg {
        /// Slot assignment (0..=15 left, 16..=31 right)
        slot: u8 = 0, 5;
        /// Route to the matching DAC channel
        enable: bool = 5, 1;
    }
}

register! {
    /// OUTxX_CFG0 (page 0, 0x64 / 0x6B)
    OutxCfg0 {
        /// VCOM configuration
        vcom: bool = 1, 1;
        /// Output routing configuration
        routing: u8 = 2, 3;
        /// Output source (1 = DAC)
        source: u8 = 5, 3;
    }
}

register! {
    /// OUTxP_CFG1 (page 0, 0x65 / 0x6C)
    OutxCfg1 {
        /// Bandwidth mode
        bw_mode: bool = 0, 1;
        /// Analog bypass configuration
        bypass_cfg: bool = 1, 1;
        /// Analog bypass impedance
        bypass_imp: bool = 2, 1;
        /// Output level control (4 = 0 dB)
        level: u8 = 3, 3;
        /// Driver type (3 = headphone)
        drive: u8 = 6, 2;
    }
}

register! {
    /// OUTxM_CFG2 (page 0, 0x66 / 0x6D)
    OutxCfg2 {
        /// Common-mode tolerance
        cm_tol: bool = 0, 1;
        /// Analog bypass impedance
        bypass_imp: bool = 2, 1;
        /// Output level control (4 = 0 dB)
        level: u8 = 3, 3;
        /// Driver type (3 = headphone)
        drive: u8 = 6, 2;
    }
}

register! {
    /// DAC_CHxA_CFG0 (page 0, 0x67 / 0x6E)
    DacChCfg0 {
        /// Digital volume, 0 = mute, 201 = 0 dB, 0.5 dB steps
        volume: u8 = 0, 8;
    }
}

register! {
    /// CH_EN (page 0, 0x76)
    ChEn {
        /// Output channel 4 enable
        out_ch4: bool = 0, 1;
        /// Output channel 3 enable
        out_ch3: bool = 1, 1;
        /// Output channel 2 enable
        out_ch2: bool = 2, 1;
        /// Output channel 1 enable
        out_ch1: bool = 3, 1;
        /// Input channel 4 enable
        in_ch4: bool = 4, 1;
        /// Input channel 3 enable
        in_ch3: bool = 5, 1;
        /// Input channel 2 enable
        in_ch2: bool = 6, 1;
        /// Input channel 1 enable
        in_ch1: bool = 7, 1;
    }
}

register! {
    /// DYN_PUPD_CFG (page 0, 0x77)
    DynPupdCfg {
        /// Swap DAC channel 1 and 2 data
        dac_ch_swap: bool = 0, 1;
        /// Swap ADC channel 1 and 2 data
        adc_ch_swap: bool = 1, 1;
        /// PDM differential clock
        pdm_diff_clk: bool = 3, 1;
        /// DAC dynamic max channel
        dac_dyn_maxch: bool = 4, 1;
        /// DAC dynamic power-up
        dac_dyn_pupd_en: bool = 5, 1;
        /// ADC dynamic max channel
        adc_dyn_maxch: bool = 6, 1;
        /// ADC dynamic power-up
        adc_dyn_pupd_en: bool = 7, 1;
    }
}

register! {
    /// PWR_CFG (page 0, 0x78)
    PwrCfg {
        /// Ultrasound activity gating
        uag: bool = 1, 1;
        /// Voice activity detection
        vad: bool = 2, 1;
        /// Ultrasound activity detection
        uad: bool = 3, 1;
        /// MICBIAS powered
        micbias_pdz: bool = 5, 1;
        /// DAC channels powered
        dac_pdz: bool = 6, 1;
        /// ADC channels powered
        adc_pdz: bool = 7, 1;
    }
}

register! {
    /// DEV_STS0 (page 0, 0x79)
    DevSts0 {
        /// Output channel 4 powered
        out_ch4: bool = 0, 1;
        /// Output channel 3 powered
        out_ch3: bool = 1, 1;
        /// Output channel 2 powered
        out_ch2: bool = 2, 1;
        /// Output channel 1 powered
        out_ch1: bool = 3, 1;
        /// Input channel 4 powered
        in_ch4: bool = 4, 1;
        /// Input channel 3 powered
        in_ch3: bool = 5, 1;
        /// Input channel 2 powered
        in_ch2: bool = 6, 1;
        /// Input channel 1 powered
        in_ch1: bool = 7, 1;
    }
}

register! {
    /// DEV_STS1 (page 0, 0x7A)
    DevSts1 {
        /// MICBIAS powered
        micbias: bool = 3, 1;
        /// PLL locked
        pll: bool = 4, 1;
        /// Device mode (4: idle, 6: waiting for audio, 7: playing)
        mode: u8 = 5, 3;
    }
}

register! {
    /// CLK_ERR_STS0 (page 0, 0x3C)
    ClkErrSts0 {
        /// Audio clock stopped for at least 1 ms
        reset_on_clk_stop: bool = 1, 1;
        /// No valid PDM clock for this configuration
        pdm_clk: bool = 2, 1;
        /// No valid DEM rate for this configuration
        dem_rate: bool = 3, 1;
        /// Unsupported SRC ratio
        src_ratio: bool = 4, 1;
        /// FSYNC to clock source ratio error
        dsp_clk: bool = 7, 1;
    }
}

register! {
    /// CLK_ERR_STS1 (page 0, 0x3D)
    ClkErrSts1 {
        /// Secondary ASI FS rate change or halt
        sasi_fs: bool = 3, 1;
        /// Primary ASI FS rate change or halt
        pasi_fs: bool = 4, 1;
        /// CCLK to FSYNC ratio error
        cclk_fs_ratio: bool = 5, 1;
        /// Secondary ASI BCLK to FSYNC ratio error
        sasi_bclk_fs_ratio: bool = 6, 1;
        /// Primary ASI BCLK to FSYNC ratio error
        pasi_bclk_fs_ratio: bool = 7, 1;
    }
}

register! {
    /// CLK_DET_STS0 (page 0, 0x3E)
    ClkDetSts0 {
        /// PLL usage
        pll_mode: u8 = 0, 2;
        /// Detected primary ASI sample rate code
        pasi_samp_rate: u8 = 2, 6;
    }
}

register! {
    /// CLK_DET_STS2 (page 0, 0x40)
    ClkDetSts2 {
        /// FSYNC to clock source ratio, bits 13:8
        ratio_msb: u8 = 0, 6;
    }
}

register! {
    /// MIXER_CFG0 (page 1, 0x2C)
    MixerCfg0 {
        /// Loopback mixer
        loopback: bool = 4, 1;
        /// ADC channel mixer
        adc_channel: bool = 5, 1;
        /// Side-chain mixer
        side_chain: bool = 6, 1;
        /// DAC ASI mixer
        dac_asi: bool = 7, 1;
    }
}
