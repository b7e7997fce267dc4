//! Type system enforcement tests for audio domain newtypes.
//! These newtypes keep the two volume scales apart: the upstream source
//! speaks AVRCP (0–127), the codec drivers speak percent (0–100).

// Integration test file: expect/unwrap/panic are intentional test mechanisms.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

// ── VolumePercent ────────────────────────────────────────────────────────────

#[test]
fn volume_percent_new_clamps_over_100() {
    use platform::audio_types::VolumePercent;
    let v = VolumePercent::new(150);
    assert_eq!(v.get(), 100, "VolumePercent::new(150) should clamp to 100");
}

#[test]
fn volume_percent_try_new_rejects_over_100() {
    use platform::audio_types::VolumePercent;
    assert!(VolumePercent::try_new(101).is_err());
    assert!(VolumePercent::try_new(255).is_err());
}

#[test]
fn volume_percent_try_new_accepts_valid_range() {
    use platform::audio_types::VolumePercent;
    assert!(VolumePercent::try_new(0).is_ok());
    assert!(VolumePercent::try_new(50).is_ok());
    assert!(VolumePercent::try_new(100).is_ok());
}

#[test]
fn volume_percent_default_is_mute() {
    use platform::audio_types::VolumePercent;
    assert!(VolumePercent::default().is_mute());
    assert!(!VolumePercent::MAX.is_mute());
}

#[test]
fn volume_percent_is_one_byte() {
    use platform::audio_types::VolumePercent;
    assert_eq!(core::mem::size_of::<VolumePercent>(), 1);
}

// ── SourceVolume ─────────────────────────────────────────────────────────────

#[test]
fn source_volume_new_clamps_over_127() {
    use platform::audio_types::SourceVolume;
    assert_eq!(SourceVolume::new(200).get(), SourceVolume::MAX_RAW);
}

#[test]
fn source_volume_try_new_reports_range() {
    use platform::audio_types::SourceVolume;
    let err = SourceVolume::try_new(0x80).unwrap_err();
    assert_eq!((err.value, err.min, err.max), (0x80, 0, 0x7F));
}

#[test]
fn source_volume_converts_to_percent() {
    use platform::audio_types::{SourceVolume, VolumePercent};
    let percent: VolumePercent = SourceVolume::new(0x7F).into();
    assert_eq!(percent, VolumePercent::MAX);
    // 0x3F is the level the fault policy backs off to: 63 * 100 / 127 = 49
    assert_eq!(SourceVolume::new(0x3F).to_percent().get(), 49);
}

// ── PlaybackState ────────────────────────────────────────────────────────────

#[test]
fn playback_state_defaults_to_stopped() {
    use platform::PlaybackState;
    assert_eq!(PlaybackState::default(), PlaybackState::Stopped);
    assert!(PlaybackState::Playing.is_playing());
}
