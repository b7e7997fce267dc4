//! Audio output chain: codec and amplifier drivers
//!
//! - [`codec`] - TAD5212 paged-register codec, [`codec::CodecControl`] seam
//! - [`amp`] - TPA3255 fault monitor, [`amp::AmpMonitor`] seam

pub mod amp;
pub mod codec;

pub use amp::{AmpMonitor, FaultStatus, MockAmp};
pub use codec::{Channel, CodecControl, MockCodec};
