//! Amplifier and codec supervision loop
//!
//! Runs every [`POLL_TICK`](crate::config::POLL_TICK) and owns the product
//! policy that sits above the drivers:
//!
//! 1. Every [`STATUS_DUMP_TICKS`] ticks, query and log each codec's status.
//! 2. Sample every amplifier. Faults are logged; an over-temperature warning
//!    asks the source to drop to [`OTW_SOURCE_VOLUME`].
//! 3. While playing, forward source volume changes to every codec.
//! 4. On the transition into playing, run the de-pop sequence:
//!
//! ```text
//! codecs → 0 %   wait 50 ms   release amp resets   wait 50 ms   codecs → source volume
//! ```
//!
//! Driver errors are logged and never stop the loop.

use embedded_hal_async::delay::DelayNs;
use platform::{AudioSource, PlaybackState, SourceVolume, VolumePercent};

use crate::audio::amp::AmpMonitor;
use crate::audio::codec::{Channel, CodecControl};
#[cfg(feature = "defmt")]
use crate::config::DEVICE_NAME;
use crate::config::{DEPOP_STEP, OTW_SOURCE_VOLUME, POLL_TICK, STATUS_DUMP_TICKS};

/// Polling state carried between ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Supervisor {
    previous_volume: SourceVolume,
    previous_state: PlaybackState,
    ticks_since_dump: u32,
}

impl Default for Supervisor {
    fn default() -> Self {
        Self::new()
    }
}

impl Supervisor {
    /// Start from a stopped source at volume 0.
    pub const fn new() -> Self {
        Self {
            previous_volume: SourceVolume::new(0),
            previous_state: PlaybackState::Stopped,
            ticks_since_dump: 0,
        }
    }

    /// Last source volume forwarded to the codecs (or requested on OTW).
    pub fn previous_volume(&self) -> SourceVolume {
        self.previous_volume
    }

    /// Playback state seen on the last tick.
    pub fn previous_state(&self) -> PlaybackState {
        self.previous_state
    }

    /// Run one supervision step.
    pub async fn tick<S, A, C, D>(
        &mut self,
        source: &mut S,
        amps: &mut [A],
        codecs: &mut [C],
        delay: &mut D,
    ) where
        S: AudioSource,
        A: AmpMonitor,
        C: CodecControl,
        D: DelayNs,
    {
        self.ticks_since_dump = self.ticks_since_dump.saturating_add(1);
        if self.ticks_since_dump >= STATUS_DUMP_TICKS {
            self.ticks_since_dump = 0;
            dump_status(codecs).await;
        }

        self.check_amps(source, amps).await;

        let volume = source.volume();
        let state = source.playback_state();

        if state.is_playing() && volume != self.previous_volume {
            #[cfg(feature = "defmt")]
            defmt::debug!("Source volume {=u8} → codecs", volume.get());
            set_all(codecs, volume.to_percent()).await;
            self.previous_volume = volume;
        }

        if state != self.previous_state {
            #[cfg(feature = "defmt")]
            defmt::info!("Playback state {}", state);
            if state.is_playing() {
                depop(amps, codecs, delay, volume.to_percent()).await;
            }
            self.previous_state = state;
        }
    }

    /// Tick forever at [`POLL_TICK`].
    pub async fn run<S, A, C, D>(
        &mut self,
        source: &mut S,
        amps: &mut [A],
        codecs: &mut [C],
        delay: &mut D,
    ) -> !
    where
        S: AudioSource,
        A: AmpMonitor,
        C: CodecControl,
        D: DelayNs,
    {
        #[cfg(feature = "defmt")]
        defmt::info!("{} supervisor running", DEVICE_NAME);
        let mut ticker = embassy_time::Ticker::every(POLL_TICK);
        loop {
            self.tick(source, amps, codecs, delay).await;
            ticker.next().await;
        }
    }

    async fn check_amps<S, A>(&mut self, source: &mut S, amps: &mut [A])
    where
        S: AudioSource,
        A: AmpMonitor,
    {
        for amp in amps {
            let status = match amp.status().await {
                Ok(status) => status,
                Err(_e) => {
                    #[cfg(feature = "defmt")]
                    defmt::error!("Amp status read failed: {}", defmt::Debug2Format(&_e));
                    continue;
                }
            };

            if status.is_fault() {
                #[cfg(feature = "defmt")]
                defmt::error!("Amp fault: {}", status);
            } else if status.is_warning() {
                #[cfg(feature = "defmt")]
                defmt::warn!("Amp over-temperature warning, reducing volume");
                source.request_volume(OTW_SOURCE_VOLUME);
                self.previous_volume = OTW_SOURCE_VOLUME;
            }
        }
    }
}

async fn dump_status<C: CodecControl>(codecs: &mut [C]) {
    for codec in codecs {
        if !codec.is_ready() {
            continue;
        }
        match codec.query_status().await {
            Ok(_status) => {
                #[cfg(feature = "defmt")]
                defmt::debug!("Codec {}", _status);
            }
            Err(_e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("Codec status unknown: {}", defmt::Debug2Format(&_e));
            }
        }
    }
}

async fn set_all<C: CodecControl>(codecs: &mut [C], volume: VolumePercent) {
    for codec in codecs {
        if !codec.is_ready() {
            continue;
        }
        if let Err(_e) = codec.set_volume(Channel::Both, volume).await {
            #[cfg(feature = "defmt")]
            defmt::error!("Codec volume write failed: {}", defmt::Debug2Format(&_e));
        }
    }
}

async fn depop<A, C, D>(amps: &mut [A], codecs: &mut [C], delay: &mut D, volume: VolumePercent)
where
    A: AmpMonitor,
    C: CodecControl,
    D: DelayNs,
{
    let step_ms = u32::try_from(DEPOP_STEP.as_millis()).unwrap_or(u32::MAX);

    set_all(codecs, VolumePercent::MUTE).await;
    delay.delay_ms(step_ms).await;
    for amp in amps {
        if let Err(_e) = amp.set_reset(false).await {
            #[cfg(feature = "defmt")]
            defmt::error!("Amp reset release failed: {}", defmt::Debug2Format(&_e));
        }
    }
    delay.delay_ms(step_ms).await;
    set_all(codecs, volume).await;
}
