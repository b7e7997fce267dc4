//! TAD5212 device configuration engine
//!
//! Owns the device lifecycle (`Uninitialized` → `Ready` → `Uninitialized`)
//! and every register sequence the product needs: bring-up for the
//! subwoofer and stereo profiles, volume, channel swap, coefficient loads and
//! the status snapshot.
//!
//! The bus is handed over in [`Tad5212::initialize`] and handed back by
//! [`Tad5212::deinitialize`], or by [`InitFailure::into_bus`] when bring-up
//! fails. All operations take `&mut self`, so one
//! handle can never interleave two register sequences. To share a handle
//! between tasks wrap it in [`SharedTad5212`] and hold the guard for the
//! whole operation.

use embassy_sync::mutex::Mutex;
use embassy_time::Duration;
use embedded_hal_async::{
    delay::DelayNs,
    i2c::{ErrorType, I2c},
};
use platform::VolumePercent;

use super::coefficients::{BiquadCoefficients, BiquadFilter, Mixer, MixerCoefficients};
use super::registers::{
    AsiCfg1, ChEn, DacCfgA0, DacChCfg0, DevMiscCfg, DynPupdCfg, IntfCfg1, MiscCfg0, MixerCfg0,
    OutxCfg0, OutxCfg1, OutxCfg2, PasiCfg0, PasiRxChCfg, PwrCfg, RegisterId, SwReset, ASI_CFG1,
    CH_EN, CLK_DET_STS0, CLK_DET_STS2, CLK_DET_STS3, CLK_ERR_STS0, CLK_ERR_STS1, DAC_CFG_A0,
    DAC_CH1A_CFG0, DAC_CH2A_CFG0, DEV_MISC_CFG, DEV_STS0, DEV_STS1, DYN_PUPD_CFG, INTF_CFG1,
    MISC_CFG0, MIXER_CFG0, OUT1X_CFG0, OUT1X_CFG1, OUT1X_CFG2, OUT2X_CFG0, OUT2X_CFG1,
    OUT2X_CFG2, PASI_CFG0, PASI_RX_CH1_CFG, PASI_RX_CH2_CFG, PWR_CFG, SETTLE_MS, SW_RESET,
};
use super::status::{CodecStatus, StatusRegisters};
use super::transport::{BusTimeouts, PagedTransport, Value};
use super::volume::{DigitalVolume, MIN_VOLUME};
use super::{Channel, Tad5212Address};
use crate::audio::codec::CodecControl;
use crate::error::{Error, InvalidState};

/// VREF quick-charge code for 50 ms.
const VREF_QCHG_50_MS: u8 = 2;
/// Headphone de-pop cap charging time code.
const DEPOP_PWR_UP_TIME: u8 = 6;
/// PASI protocol code for left-justified.
const PASI_FORMAT_LJ: u8 = 2;
/// PASI word length code for 16 bits.
const PASI_WLEN_16: u8 = 0;
/// ASI_DIN_CFG code for two data inputs.
const ASI_DIN_TWO_INPUTS: u8 = 1;
/// First right-channel slot on the PASI bus.
const PASI_RIGHT_SLOT: u8 = 0x10;
/// OUTx source code for the DAC.
const OUT_SOURCE_DAC: u8 = 1;
/// OUTx level code for 0 dB.
const OUT_LEVEL_0DB: u8 = 4;
/// OUTx driver code for headphone drive.
const OUT_DRIVE_HEADPHONE: u8 = 3;

/// Output configuration selected at bring-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Profile {
    /// L+R downmixed into DAC2 through a 150 Hz low-pass, OUT2 only
    Subwoofer,
    /// 150 Hz high-pass and 16 kHz low-pass on both channels, OUT1 + OUT2
    Stereo,
}

/// Driver timing configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tad5212Config {
    /// Per-transaction bus timeouts
    pub timeouts: BusTimeouts,
    /// Wait after SW_RESET and DEV_MISC_CFG writes
    pub settle: Duration,
}

impl Default for Tad5212Config {
    fn default() -> Self {
        Self {
            timeouts: BusTimeouts::default(),
            settle: Duration::from_millis(u64::from(SETTLE_MS)),
        }
    }
}

/// A TAD5212 handle shared between tasks.
///
/// ```ignore
/// let codec: SharedTad5212<NoopRawMutex, _, _> = Mutex::new(Tad5212::new(delay, config));
/// codec.lock().await.set_volume(Channel::Both, VolumePercent::new(40)).await?;
/// ```
pub type SharedTad5212<M, I, D> = Mutex<M, Tad5212<I, D>>;

/// A failed [`Tad5212::initialize`], carrying the bus back to the caller.
pub struct InitFailure<I: ErrorType> {
    error: Error<I::Error>,
    bus: I,
}

impl<I: ErrorType> InitFailure<I> {
    fn new(error: Error<I::Error>, bus: I) -> Self {
        Self { error, bus }
    }

    /// Why the bring-up failed.
    pub fn error(&self) -> &Error<I::Error> {
        &self.error
    }

    /// Recover the bus for another attempt.
    pub fn into_bus(self) -> I {
        self.bus
    }

    /// Split into the error and the bus.
    pub fn into_parts(self) -> (Error<I::Error>, I) {
        (self.error, self.bus)
    }
}

impl<I: ErrorType> core::fmt::Debug for InitFailure<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("InitFailure")
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

impl<I: ErrorType> From<InitFailure<I>> for Error<I::Error> {
    fn from(failure: InitFailure<I>) -> Self {
        failure.error
    }
}

enum State<I> {
    Uninitialized,
    Ready {
        transport: PagedTransport<I>,
        address: Tad5212Address,
        profile: Profile,
    },
}

/// TAD5212 codec driver
pub struct Tad5212<I, D> {
    delay: D,
    config: Tad5212Config,
    state: State<I>,
}

impl<I: I2c, D: DelayNs> Tad5212<I, D> {
    /// Create an uninitialized handle. No bus is attached yet.
    pub fn new(delay: D, config: Tad5212Config) -> Self {
        Self {
            delay,
            config,
            state: State::Uninitialized,
        }
    }

    /// `true` once [`initialize`](Self::initialize) has succeeded.
    pub fn is_ready(&self) -> bool {
        matches!(self.state, State::Ready { .. })
    }

    /// Address of the attached device.
    pub fn address(&self) -> Option<Tad5212Address> {
        match &self.state {
            State::Ready { address, .. } => Some(*address),
            State::Uninitialized => None,
        }
    }

    /// Profile the device was brought up with.
    pub fn profile(&self) -> Option<Profile> {
        match &self.state {
            State::Ready { profile, .. } => Some(*profile),
            State::Uninitialized => None,
        }
    }

    /// Page the driver believes the device has selected.
    pub fn current_page(&self) -> Option<u8> {
        match &self.state {
            State::Ready { transport, .. } => transport.current_page(),
            State::Uninitialized => None,
        }
    }

    /// Take ownership of `bus` and bring the device up.
    ///
    /// On failure the handle stays uninitialized and the bus comes back
    /// inside the [`InitFailure`], ready for another attempt.
    pub async fn initialize(
        &mut self,
        bus: I,
        address: u8,
        profile: Profile,
    ) -> Result<(), InitFailure<I>> {
        if self.is_ready() {
            return Err(InitFailure::new(InvalidState::AlreadyInitialized.into(), bus));
        }
        let address = match Tad5212Address::try_from(address) {
            Ok(address) => address,
            Err(e) => return Err(InitFailure::new(e.into(), bus)),
        };

        #[cfg(feature = "defmt")]
        defmt::info!("Initialising TAD5212 at {=u8:#04x} ({})", address.get(), profile);

        let mut transport = PagedTransport::new(bus, address.get(), self.config.timeouts);
        let outcome = Session {
            transport: &mut transport,
            delay: &mut self.delay,
            settle: self.config.settle,
        }
        .configure(profile)
        .await;
        if let Err(e) = outcome {
            #[cfg(feature = "defmt")]
            defmt::error!("TAD5212 {=u8:#04x} initialisation failed", address.get());
            return Err(InitFailure::new(e, transport.release()));
        }

        self.state = State::Ready {
            transport,
            address,
            profile,
        };

        #[cfg(feature = "defmt")]
        defmt::info!("TAD5212 {=u8:#04x} initialisation complete", address.get());
        Ok(())
    }

    /// Detach from the device and return the bus.
    pub fn deinitialize(&mut self) -> Result<I, Error<I::Error>> {
        match core::mem::replace(&mut self.state, State::Uninitialized) {
            State::Ready { transport, .. } => Ok(transport.release()),
            State::Uninitialized => Err(InvalidState::NotInitialized.into()),
        }
    }

    /// Set the digital volume of one or both DAC channels.
    pub async fn set_volume(
        &mut self,
        channel: Channel,
        volume: VolumePercent,
    ) -> Result<(), Error<I::Error>> {
        let value = DacChCfg0 {
            volume: DigitalVolume::from_percent(volume).get(),
            ..Default::default()
        }
        .encode();

        let mut s = self.session()?;
        if matches!(channel, Channel::Left | Channel::Both) {
            s.write(DAC_CH1A_CFG0, value).await?;
        }
        if matches!(channel, Channel::Right | Channel::Both) {
            s.write(DAC_CH2A_CFG0, value).await?;
        }
        Ok(())
    }

    /// Swap DAC channel 1 and 2 data (toggles DYN_PUPD_CFG bit 0 only).
    pub async fn swap_channels(&mut self) -> Result<(), Error<I::Error>> {
        let mut s = self.session()?;
        let mut reg = DynPupdCfg::decode(s.read(DYN_PUPD_CFG).await?);
        reg.dac_ch_swap = !reg.dac_ch_swap;
        s.write(DYN_PUPD_CFG, reg.encode()).await
    }

    /// Load one biquad stage.
    pub async fn set_biquad_coefficients(
        &mut self,
        filter: BiquadFilter,
        coefficients: &BiquadCoefficients,
    ) -> Result<(), Error<I::Error>> {
        let slot = filter.require_slot()?;
        self.session()?
            .write_words(slot, &coefficients.words())
            .await
    }

    /// Load one DAC-ASI mixer.
    pub async fn set_mixer_coefficients(
        &mut self,
        mixer: Mixer,
        coefficients: &MixerCoefficients,
    ) -> Result<(), Error<I::Error>> {
        let slot = mixer.require_slot()?;
        self.session()?
            .write_words(slot, &coefficients.words())
            .await
    }

    /// Read and decode the status registers. Any failed read aborts.
    pub async fn query_status(&mut self) -> Result<CodecStatus, Error<I::Error>> {
        let mut s = self.session()?;
        let raw = StatusRegisters {
            dev_sts0: s.read(DEV_STS0).await?,
            dev_sts1: s.read(DEV_STS1).await?,
            clk_err_sts0: s.read(CLK_ERR_STS0).await?,
            clk_err_sts1: s.read(CLK_ERR_STS1).await?,
            clk_det_sts0: s.read(CLK_DET_STS0).await?,
            clk_det_sts2: s.read(CLK_DET_STS2).await?,
            clk_det_sts3: s.read(CLK_DET_STS3).await?,
        };
        let status = CodecStatus::decode(&raw);

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "TAD5212 {=u8:#04x} status: {}",
            s.transport.address(),
            status
        );

        Ok(status)
    }

    fn session(&mut self) -> Result<Session<'_, I, D>, Error<I::Error>> {
        match &mut self.state {
            State::Ready { transport, .. } => Ok(Session {
                transport,
                delay: &mut self.delay,
                settle: self.config.settle,
            }),
            State::Uninitialized => {
                #[cfg(feature = "defmt")]
                defmt::error!("TAD5212 not initialized");
                Err(InvalidState::NotInitialized.into())
            }
        }
    }
}

/// Borrowed transport + delay for one register sequence.
struct Session<'a, I, D> {
    transport: &'a mut PagedTransport<I>,
    delay: &'a mut D,
    settle: Duration,
}

impl<I: I2c, D: DelayNs> Session<'_, I, D> {
    /// Write one byte register, then settle if the register requires it.
    async fn write(&mut self, reg: RegisterId, value: u8) -> Result<(), Error<I::Error>> {
        self.transport
            .write_register(reg, Value::Byte(value))
            .await?;
        if reg == SW_RESET || reg == DEV_MISC_CFG {
            let us = u32::try_from(self.settle.as_micros()).unwrap_or(u32::MAX);
            self.delay.delay_us(us).await;
        }
        Ok(())
    }

    async fn read(&mut self, reg: RegisterId) -> Result<u8, Error<I::Error>> {
        self.transport.read_register(reg).await
    }

    async fn write_words(&mut self, base: RegisterId, words: &[u32]) -> Result<(), Error<I::Error>> {
        self.transport.write_words(base, words).await
    }

    async fn biquad(
        &mut self,
        filter: BiquadFilter,
        coefficients: &BiquadCoefficients,
    ) -> Result<(), Error<I::Error>> {
        self.write_words(filter.require_slot()?, &coefficients.words())
            .await
    }

    async fn mixer(
        &mut self,
        mixer: Mixer,
        coefficients: &MixerCoefficients,
    ) -> Result<(), Error<I::Error>> {
        self.write_words(mixer.require_slot()?, &coefficients.words())
            .await
    }

    /// Full bring-up sequence.
    async fn configure(&mut self, profile: Profile) -> Result<(), Error<I::Error>> {
        // Reset, then leave sleep with a 50 ms VREF quick-charge
        let reset = SwReset {
            reset: true,
            ..Default::default()
        };
        self.write(SW_RESET, reset.encode()).await?;
        let wake = DevMiscCfg {
            sleep_enz: true,
            sleep_exit_vref_en: true,
            vref_qchg: VREF_QCHG_50_MS,
            ..Default::default()
        };
        self.write(DEV_MISC_CFG, wake.encode()).await?;

        // De-pop: charge the output caps, delay DAC power-up
        let depop = DacCfgA0 {
            pwr_up_time: DEPOP_PWR_UP_TIME,
            ..Default::default()
        };
        self.write(DAC_CFG_A0, depop.encode()).await?;
        let delayed = MiscCfg0 {
            delayed_pwrup: true,
            st_w_cap_dis: true,
            ..Default::default()
        };
        self.write(MISC_CFG0, delayed.encode()).await?;

        // Audio serial interface: DOUT off, two data inputs, 16-bit LJ
        self.write(INTF_CFG1, IntfCfg1::default().encode()).await?;
        let asi = AsiCfg1 {
            asi_din_cfg: ASI_DIN_TWO_INPUTS,
            ..Default::default()
        };
        self.write(ASI_CFG1, asi.encode()).await?;
        let pasi = PasiCfg0 {
            format: PASI_FORMAT_LJ,
            wlen: PASI_WLEN_16,
            ..Default::default()
        };
        self.write(PASI_CFG0, pasi.encode()).await?;
        let rx_left = PasiRxChCfg {
            slot: 0,
            enable: true,
            ..Default::default()
        };
        self.write(PASI_RX_CH1_CFG, rx_left.encode()).await?;
        let rx_right = PasiRxChCfg {
            slot: PASI_RIGHT_SLOT,
            enable: true,
            ..Default::default()
        };
        self.write(PASI_RX_CH2_CFG, rx_right.encode()).await?;

        // Output drivers, volume parked at the bottom of the audible range
        let source = OutxCfg0 {
            source: OUT_SOURCE_DAC,
            ..Default::default()
        }
        .encode();
        let positive = OutxCfg1 {
            level: OUT_LEVEL_0DB,
            drive: OUT_DRIVE_HEADPHONE,
            ..Default::default()
        }
        .encode();
        let negative = OutxCfg2 {
            level: OUT_LEVEL_0DB,
            drive: OUT_DRIVE_HEADPHONE,
            ..Default::default()
        }
        .encode();
        let parked = DacChCfg0 {
            volume: MIN_VOLUME,
            ..Default::default()
        }
        .encode();
        for (cfg0, cfg1, cfg2, volume) in [
            (OUT1X_CFG0, OUT1X_CFG1, OUT1X_CFG2, DAC_CH1A_CFG0),
            (OUT2X_CFG0, OUT2X_CFG1, OUT2X_CFG2, DAC_CH2A_CFG0),
        ] {
            self.write(cfg0, source).await?;
            self.write(cfg1, positive).await?;
            self.write(cfg2, negative).await?;
            self.write(volume, parked).await?;
        }

        let outputs = match profile {
            Profile::Subwoofer => {
                let mixer = MixerCfg0 {
                    dac_asi: true,
                    ..Default::default()
                };
                self.write(MIXER_CFG0, mixer.encode()).await?;
                self.mixer(Mixer::AsiCh1, &MixerCoefficients::RIGHT_DAC_HALF)
                    .await?;
                self.mixer(Mixer::AsiCh2, &MixerCoefficients::RIGHT_DAC_HALF)
                    .await?;
                self.biquad(BiquadFilter::Dac2Stage1, &BiquadCoefficients::LOWPASS_150_HZ)
                    .await?;
                self.biquad(BiquadFilter::Dac2Stage2, &BiquadCoefficients::LOWPASS_150_HZ)
                    .await?;
                ChEn {
                    out_ch2: true,
                    ..Default::default()
                }
            }
            Profile::Stereo => {
                self.biquad(BiquadFilter::Dac1Stage1, &BiquadCoefficients::HIGHPASS_150_HZ)
                    .await?;
                self.biquad(BiquadFilter::Dac2Stage1, &BiquadCoefficients::HIGHPASS_150_HZ)
                    .await?;
                self.biquad(BiquadFilter::Dac1Stage2, &BiquadCoefficients::LOWPASS_16_KHZ)
                    .await?;
                self.biquad(BiquadFilter::Dac2Stage2, &BiquadCoefficients::LOWPASS_16_KHZ)
                    .await?;
                ChEn {
                    out_ch1: true,
                    out_ch2: true,
                    ..Default::default()
                }
            }
        };
        self.write(CH_EN, outputs.encode()).await?;

        let power = PwrCfg {
            dac_pdz: true,
            ..Default::default()
        };
        self.write(PWR_CFG, power.encode()).await
    }
}

impl<I: I2c, D: DelayNs> CodecControl for Tad5212<I, D> {
    type Error = Error<I::Error>;

    async fn set_volume(
        &mut self,
        channel: Channel,
        volume: VolumePercent,
    ) -> Result<(), Self::Error> {
        Tad5212::set_volume(self, channel, volume).await
    }

    async fn query_status(&mut self) -> Result<CodecStatus, Self::Error> {
        Tad5212::query_status(self).await
    }

    fn is_ready(&self) -> bool {
        Tad5212::is_ready(self)
    }
}
