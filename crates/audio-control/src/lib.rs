//! Symphony 2.1 audio control core
//!
//! Drives a TI TAD5212 stereo codec over its paged I²C register map and
//! supervises TI TPA3255 class-D amplifiers through their fault lines.
//!
//! # Architecture
//!
//! ```text
//! Supervisor (supervisor)          polling loop, fault policy, de-pop
//!         ↓
//! Device drivers (audio)           Tad5212 engine, Tpa3255 fault decoder
//!         ↓
//! Paged transport (tad5212)        page tracking, 1/4-byte writes, timeouts
//!         ↓
//! Register codec (bitfield)        named fields ↔ register bytes
//!         ↓
//! embedded-hal-async I²C / embedded-hal GPIO
//! ```
//!
//! # Features
//!
//! - `defmt` - Structured logging through defmt (lifecycle, faults, status dumps)
//! - `hardware` - Hardware target (implies `defmt`)
//! - `std` - Host builds outside of tests (enables `platform/std` mocks)
//!
//! # Example
//!
//! ```no_run
//! use audio_control::audio::codec::tad5212::{Channel, Profile, Tad5212, Tad5212Config};
//! use audio_control::config::{POWER_UP_DELAY, SUBWOOFER_CODEC_ADDRESS};
//! use embassy_time::Timer;
//! use platform::VolumePercent;
//!
//! async fn bring_up<I, D>(bus: I, delay: D) -> Result<(), audio_control::Error<I::Error>>
//! where
//!     I: embedded_hal_async::i2c::I2c,
//!     D: embedded_hal_async::delay::DelayNs,
//! {
//!     // board rails first
//!     Timer::after(POWER_UP_DELAY).await;
//!     let mut codec = Tad5212::new(delay, Tad5212Config::default());
//!     codec
//!         .initialize(bus, SUBWOOFER_CODEC_ADDRESS.into(), Profile::Subwoofer)
//!         .await?;
//!     codec.set_volume(Channel::Both, VolumePercent::new(40)).await
//! }
//! ```

#![cfg_attr(all(not(test), not(feature = "std")), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Critical correctness: deny these
#![deny(clippy::await_holding_lock)] // holding a blocking Mutex across .await is a bug
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::print_stdout)] // prefer defmt over println! in lib code
// Intentional allows for this codebase:
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)] // register names in doc comments

pub mod audio;
pub mod bitfield;
pub mod config;
pub mod error;
pub mod supervisor;

pub use error::{Error, InvalidArgument, InvalidState};
pub use supervisor::Supervisor;
