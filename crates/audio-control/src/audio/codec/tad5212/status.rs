//! Diagnostic status snapshot

use super::registers::{
    ClkDetSts0, ClkDetSts2, ClkErrSts0, ClkErrSts1, DevSts0, DevSts1,
};

/// Device operating mode reported in DEV_STS1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeviceMode {
    /// Powered, no channel active
    #[default]
    Idle,
    /// Channels enabled, waiting for clocks / audio
    WaitingForAudio,
    /// Audio is playing
    Playing,
    /// Any other mode code
    Unknown(u8),
}

impl DeviceMode {
    /// Decode the 3-bit mode field.
    pub fn from_code(code: u8) -> Self {
        match code {
            4 => Self::Idle,
            6 => Self::WaitingForAudio,
            7 => Self::Playing,
            other => Self::Unknown(other),
        }
    }
}

/// Latched clock error flags (CLK_ERR_STS0 / CLK_ERR_STS1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[allow(clippy::struct_excessive_bools)]
pub struct ClockErrors {
    /// Audio clock source stopped for at least 1 ms
    pub reset_on_clock_stop: bool,
    /// No valid PDM clock for the configuration
    pub pdm_clock: bool,
    /// No valid DEM rate for the configuration
    pub dem_rate: bool,
    /// Unsupported SRC ratio
    pub src_ratio: bool,
    /// FSYNC to clock source ratio error
    pub dsp_clock: bool,
    /// Secondary ASI FS rate change or halt
    pub sasi_fs: bool,
    /// Primary ASI FS rate change or halt
    pub pasi_fs: bool,
    /// CCLK to FSYNC ratio error
    pub cclk_fs_ratio: bool,
    /// Secondary ASI BCLK to FSYNC ratio error
    pub sasi_bclk_fs_ratio: bool,
    /// Primary ASI BCLK to FSYNC ratio error
    pub pasi_bclk_fs_ratio: bool,
}

impl ClockErrors {
    /// Combine both error registers.
    pub fn from_registers(sts0: ClkErrSts0, sts1: ClkErrSts1) -> Self {
        Self {
            reset_on_clock_stop: sts0.reset_on_clk_stop,
            pdm_clock: sts0.pdm_clk,
            dem_rate: sts0.dem_rate,
            src_ratio: sts0.src_ratio,
            dsp_clock: sts0.dsp_clk,
            sasi_fs: sts1.sasi_fs,
            pasi_fs: sts1.pasi_fs,
            cclk_fs_ratio: sts1.cclk_fs_ratio,
            sasi_bclk_fs_ratio: sts1.sasi_bclk_fs_ratio,
            pasi_bclk_fs_ratio: sts1.pasi_bclk_fs_ratio,
        }
    }

    /// `true` if any flag is set.
    pub fn any(&self) -> bool {
        self.reset_on_clock_stop
            || self.pdm_clock
            || self.dem_rate
            || self.src_ratio
            || self.dsp_clock
            || self.sasi_fs
            || self.pasi_fs
            || self.cclk_fs_ratio
            || self.sasi_bclk_fs_ratio
            || self.pasi_bclk_fs_ratio
    }
}

/// Raw bytes of the status registers, in read order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusRegisters {
    /// DEV_STS0
    pub dev_sts0: u8,
    /// DEV_STS1
    pub dev_sts1: u8,
    /// CLK_ERR_STS0
    pub clk_err_sts0: u8,
    /// CLK_ERR_STS1
    pub clk_err_sts1: u8,
    /// CLK_DET_STS0
    pub clk_det_sts0: u8,
    /// CLK_DET_STS2
    pub clk_det_sts2: u8,
    /// CLK_DET_STS3
    pub clk_det_sts3: u8,
}

/// Decoded status snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CodecStatus {
    /// OUT1 driver powered (DEV_STS0 bit 3)
    pub out1_powered: bool,
    /// OUT2 driver powered (DEV_STS0 bit 2)
    pub out2_powered: bool,
    /// Operating mode
    pub mode: DeviceMode,
    /// PLL locked
    pub pll_locked: bool,
    /// MICBIAS powered
    pub micbias_on: bool,
    /// Latched clock errors
    pub clock_errors: ClockErrors,
    /// Detected primary ASI sample rate code
    pub pasi_sample_rate: u8,
    /// PLL usage code
    pub pll_mode: u8,
    /// 14-bit FSYNC to clock source ratio
    pub clock_ratio: u16,
}

impl CodecStatus {
    /// Decode a snapshot from raw register bytes.
    pub fn decode(raw: &StatusRegisters) -> Self {
        let sts0 = DevSts0::decode(raw.dev_sts0);
        let sts1 = DevSts1::decode(raw.dev_sts1);
        let det0 = ClkDetSts0::decode(raw.clk_det_sts0);
        let ratio_msb = ClkDetSts2::decode(raw.clk_det_sts2).ratio_msb;

        Self {
            out1_powered: sts0.out_ch1,
            out2_powered: sts0.out_ch2,
            mode: DeviceMode::from_code(sts1.mode),
            pll_locked: sts1.pll,
            micbias_on: sts1.micbias,
            clock_errors: ClockErrors::from_registers(
                ClkErrSts0::decode(raw.clk_err_sts0),
                ClkErrSts1::decode(raw.clk_err_sts1),
            ),
            pasi_sample_rate: det0.pasi_samp_rate,
            pll_mode: det0.pll_mode,
            clock_ratio: u16::from_be_bytes([ratio_msb, raw.clk_det_sts3]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_bits_are_not_swapped() {
        let only_out1 = StatusRegisters {
            dev_sts0: 0b0000_1000,
            ..Default::default()
        };
        let status = CodecStatus::decode(&only_out1);
        assert!(status.out1_powered);
        assert!(!status.out2_powered);
    }

    #[test]
    fn mode_codes() {
        assert_eq!(DeviceMode::from_code(4), DeviceMode::Idle);
        assert_eq!(DeviceMode::from_code(6), DeviceMode::WaitingForAudio);
        assert_eq!(DeviceMode::from_code(7), DeviceMode::Playing);
        assert_eq!(DeviceMode::from_code(5), DeviceMode::Unknown(5));
    }

    #[test]
    fn clock_ratio_uses_six_msb_bits() {
        let raw = StatusRegisters {
            clk_det_sts2: 0xFF,
            clk_det_sts3: 0x34,
            ..Default::default()
        };
        assert_eq!(CodecStatus::decode(&raw).clock_ratio, 0x3F34);
    }

    #[test]
    fn clock_errors_any() {
        let raw = StatusRegisters {
            clk_err_sts1: 0b1000_0000,
            ..Default::default()
        };
        let errors = CodecStatus::decode(&raw).clock_errors;
        assert!(errors.pasi_bclk_fs_ratio);
        assert!(errors.any());
        assert!(!ClockErrors::default().any());
    }

    #[test]
    fn playing_with_pll_locked() {
        let raw = StatusRegisters {
            dev_sts1: 0b1111_0000,
            clk_det_sts0: 0b0001_0101,
            ..Default::default()
        };
        let status = CodecStatus::decode(&raw);
        assert_eq!(status.mode, DeviceMode::Playing);
        assert!(status.pll_locked);
        assert!(!status.micbias_on);
        assert_eq!(status.pll_mode, 0b01);
        assert_eq!(status.pasi_sample_rate, 0b000101);
    }
}
