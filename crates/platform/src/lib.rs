//! Platform collaborators for the Symphony 2.1 audio control core
//!
//! This crate holds the trait-level boundary between the audio control
//! drivers and the outside world, plus the domain newtypes both sides share.
//!
//! # Architecture Layers
//!
//! ```text
//! Supervisor (audio-control::supervisor)
//!         ↓
//! Device drivers (audio-control: TAD5212 codec, TPA3255 amplifier)
//!         ↓
//! Platform collaborators (this crate - traits + newtypes)
//!         ↓
//! HAL (embedded-hal I²C / GPIO / delay implementations)
//! ```
//!
//! # Collaborators
//!
//! - [`AudioSource`] - upstream playback state and volume (Bluetooth sink)
//! - I²C bus - any [`embedded_hal_async::i2c::I2c`]
//! - GPIO - [`embedded_hal::digital::OutputPin`] / [`embedded_hal::digital::InputPin`]
//! - Delay - [`embedded_hal_async::delay::DelayNs`]
//!
//! # Features
//!
//! - `std`: Expose [`mocks`] outside of this crate's own tests
//! - `defmt`: Enable defmt derives
//!
//! # Example
//!
//! ```
//! use platform::{AudioSource, PlaybackState};
//!
//! fn percent_if_playing<S: AudioSource>(source: &S) -> Option<u8> {
//!     (source.playback_state() == PlaybackState::Playing)
//!         .then(|| source.volume().to_percent().get())
//! }
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(clippy::unreachable)] // no unreachable!() that isn't documented
#![deny(unused_must_use)]
// all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(unsafe_op_in_unsafe_fn)] // unsafe fn body is not implicitly unsafe block
#![warn(clippy::print_stdout)] // prefer defmt over println! in lib code
// Pedantic lints suppressed for this hardware HAL crate:
#![allow(clippy::doc_markdown)] // hex addresses and register names in doc comments
#![allow(clippy::must_use_candidate)] // accessors, callers decide
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

#[cfg(all(feature = "std", not(test)))]
extern crate std;

pub mod audio;
pub mod audio_types;
pub mod mocks;

pub use audio::{AudioSource, PlaybackState};
pub use audio_types::{OutOfRangeError, SourceVolume, VolumePercent};
