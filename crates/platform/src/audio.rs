//! Upstream audio source abstraction
//!
//! The Bluetooth A2DP sink (or any other stream producer) owns the playback
//! state and the remote volume. The audio control core only consumes both,
//! except for one write path: the amplifier fault policy may lower the
//! volume on behalf of the local host.

use crate::audio_types::SourceVolume;

/// Audio source trait
pub trait AudioSource {
    /// Current playback state of the stream.
    fn playback_state(&self) -> PlaybackState;

    /// Current remote volume (0–127).
    fn volume(&self) -> SourceVolume;

    /// Ask the source to adopt `volume` as if the local host had changed it.
    ///
    /// The source reports the new value through [`volume`](Self::volume)
    /// once it has been accepted.
    fn request_volume(&mut self, volume: SourceVolume);
}

/// Playback state reported by the audio source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PlaybackState {
    /// No audio is streaming (also covers paused / suspended).
    #[default]
    Stopped,
    /// Audio samples are being delivered.
    Playing,
}

impl PlaybackState {
    /// Returns `true` while audio is streaming.
    pub fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }
}
