//! Product constants for the Symphony 2.1 board.
//!
//! Two TAD5212 codecs share one I²C bus: the subwoofer channel on the
//! grounded strap, the stereo pair on the 4.7 kΩ pull-down. Each codec feeds
//! its own TPA3255.
//!
//! Supervisor timing:
//!
//! ```text
//! tick ──10 ms──▶ tick ──10 ms──▶ ... (50 ticks) ──▶ status dump
//! ```

use embassy_time::Duration;

use crate::audio::codec::tad5212::Tad5212Address;
use platform::SourceVolume;

/// Advertised device name.
pub const DEVICE_NAME: &str = "Symphony 2.1";

/// Codec driving the subwoofer amplifier.
pub const SUBWOOFER_CODEC_ADDRESS: Tad5212Address = Tad5212Address::Short;

/// Codec driving the stereo amplifier.
pub const SPEAKER_CODEC_ADDRESS: Tad5212Address = Tad5212Address::PullDown4k7;

/// Supervisor polling period.
pub const POLL_TICK: Duration = Duration::from_millis(10);

/// Period of the codec status dump.
pub const STATUS_DUMP_PERIOD: Duration = Duration::from_millis(500);

/// [`STATUS_DUMP_PERIOD`] expressed in supervisor ticks.
pub const STATUS_DUMP_TICKS: u32 = 50;

/// Each half of the de-pop sequence (mute → release amps → unmute).
pub const DEPOP_STEP: Duration = Duration::from_millis(50);

/// Source volume requested when an amplifier reports over-temperature.
///
/// Half of the 0..=127 source range.
pub const OTW_SOURCE_VOLUME: SourceVolume = SourceVolume::new(0x3F);

/// Wait after board power-up before the codecs are initialised.
pub const POWER_UP_DELAY: Duration = Duration::from_millis(200);
