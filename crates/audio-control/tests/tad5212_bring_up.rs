//! TAD5212 bring-up tests against the paged register-file mock.
// Integration test file: expect/unwrap/panic are intentional test mechanisms.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects,
    clippy::use_debug
)]
//!
//! Each test drives the real driver over `platform::mocks::MockI2c` and
//! checks the resulting register file and the ordered event log.
//!
//! Run with: cargo test -p audio-control --test tad5212_bring_up

use audio_control::audio::codec::tad5212::registers::{
    CH_EN, DAC_CH1A_CFG0, DAC_CH2A_CFG0, DEV_MISC_CFG, MIXER_CFG0, PASI_CFG0, PASI_RX_CH1_CFG,
    PASI_RX_CH2_CFG, PWR_CFG, SW_RESET, RegisterId,
};
use audio_control::audio::codec::tad5212::{
    BiquadCoefficients, BiquadFilter, BusTimeouts, MixerCoefficients, Profile, Tad5212,
    Tad5212Config,
};
use audio_control::{Error, InvalidState};
use embassy_time::Duration;
use platform::mocks::{Event, EventLog, MockDelay, MockI2c};

const ADDR: u8 = 0x50;
const SETTLE_NS: u64 = 10_000_000;

fn rig() -> (Tad5212<MockI2c, MockDelay>, MockI2c, EventLog) {
    let log = EventLog::new();
    let bus = MockI2c::with_log(log.clone());
    let codec = Tad5212::new(MockDelay::with_log(log.clone()), Tad5212Config::default());
    (codec, bus, log)
}

fn page_selects(events: &[Event]) -> Vec<u8> {
    events
        .iter()
        .filter_map(|e| match e {
            Event::PageSelect { page, .. } => Some(*page),
            _ => None,
        })
        .collect()
}

fn reg(bus: &MockI2c, id: RegisterId) -> u8 {
    bus.register(ADDR, id.page, id.addr)
}

fn assert_biquad(bus: &MockI2c, filter: BiquadFilter, expected: &BiquadCoefficients) {
    let slot = filter.slot().unwrap();
    let mut addr = slot.addr;
    for word in expected.words() {
        assert_eq!(bus.word(ADDR, slot.page, addr), word, "{filter:?} @ {addr:#04x}");
        addr += 4;
    }
}

#[tokio::test]
async fn subwoofer_bring_up() {
    let (mut codec, bus, log) = rig();
    codec
        .initialize(bus.clone(), ADDR, Profile::Subwoofer)
        .await
        .unwrap();
    assert!(codec.is_ready());
    assert_eq!(codec.profile(), Some(Profile::Subwoofer));

    // reset, wake, mixer page, mixer coefficients, biquads, back to page 0
    assert_eq!(page_selects(&log.events()), vec![0, 0, 1, 0x11, 0x0F, 0]);

    assert_eq!(reg(&bus, DEV_MISC_CFG), 0x29);
    assert_eq!(reg(&bus, PASI_CFG0), 0x80);
    assert_eq!(reg(&bus, PASI_RX_CH1_CFG), 0x20);
    assert_eq!(reg(&bus, PASI_RX_CH2_CFG), 0x30);
    assert_eq!(reg(&bus, DAC_CH1A_CFG0), 81);
    assert_eq!(reg(&bus, DAC_CH2A_CFG0), 81);
    assert_eq!(reg(&bus, MIXER_CFG0), 0x80);
    assert_eq!(reg(&bus, CH_EN), 0x04);
    assert_eq!(reg(&bus, PWR_CFG), 0x40);

    // L+R downmix into DAC2
    let [half, zero] = MixerCoefficients::RIGHT_DAC_HALF.words();
    assert_eq!(bus.word(ADDR, 0x11, 0x08), half);
    assert_eq!(bus.word(ADDR, 0x11, 0x0C), zero);
    assert_eq!(bus.word(ADDR, 0x11, 0x10), half);
    assert_eq!(bus.word(ADDR, 0x11, 0x14), zero);

    assert_biquad(&bus, BiquadFilter::Dac2Stage1, &BiquadCoefficients::LOWPASS_150_HZ);
    assert_biquad(&bus, BiquadFilter::Dac2Stage2, &BiquadCoefficients::LOWPASS_150_HZ);
    // DAC1 chain untouched
    assert_eq!(bus.word(ADDR, 0x0F, 0x08), 0);
}

#[tokio::test]
async fn stereo_bring_up() {
    let (mut codec, bus, log) = rig();
    codec
        .initialize(bus.clone(), ADDR, Profile::Stereo)
        .await
        .unwrap();

    assert_eq!(page_selects(&log.events()), vec![0, 0, 0x0F, 0]);
    assert_eq!(reg(&bus, CH_EN), 0x0C);
    assert_eq!(reg(&bus, PWR_CFG), 0x40);
    assert_eq!(reg(&bus, MIXER_CFG0), 0, "stereo leaves the mixer alone");

    assert_biquad(&bus, BiquadFilter::Dac1Stage1, &BiquadCoefficients::HIGHPASS_150_HZ);
    assert_biquad(&bus, BiquadFilter::Dac2Stage1, &BiquadCoefficients::HIGHPASS_150_HZ);
    assert_biquad(&bus, BiquadFilter::Dac1Stage2, &BiquadCoefficients::LOWPASS_16_KHZ);
    assert_biquad(&bus, BiquadFilter::Dac2Stage2, &BiquadCoefficients::LOWPASS_16_KHZ);
}

#[tokio::test]
async fn settle_delays_follow_reset_and_wake() {
    let (mut codec, bus, log) = rig();
    codec
        .initialize(bus.clone(), ADDR, Profile::Stereo)
        .await
        .unwrap();
    let events = log.events();

    let delays: Vec<usize> = events
        .iter()
        .enumerate()
        .filter(|(_, e)| matches!(e, Event::Delay { .. }))
        .map(|(i, _)| i)
        .collect();
    assert_eq!(delays.len(), 2);

    for (index, register) in delays.iter().zip([SW_RESET, DEV_MISC_CFG]) {
        assert_eq!(events[*index], Event::Delay { ns: SETTLE_NS });
        match &events[index - 1] {
            Event::Write { register: r, page, .. } => {
                assert_eq!((*page, *r), (register.page, register.addr));
            }
            other => panic!("delay after {other:?}"),
        }
    }
}

#[tokio::test]
async fn second_initialize_is_rejected_without_traffic() {
    let (mut codec, bus, _) = rig();
    codec
        .initialize(bus.clone(), ADDR, Profile::Subwoofer)
        .await
        .unwrap();
    let before = bus.transaction_count();

    let err = codec
        .initialize(bus.clone(), ADDR, Profile::Stereo)
        .await
        .unwrap_err();
    assert_eq!(err.error(), &Error::InvalidState(InvalidState::AlreadyInitialized));
    assert_eq!(bus.transaction_count(), before);
    assert_eq!(codec.profile(), Some(Profile::Subwoofer));
}

#[tokio::test]
async fn failed_step_leaves_the_handle_uninitialized() {
    let (mut codec, bus, _) = rig();
    bus.fail_after(5);

    let err = codec
        .initialize(bus.clone(), ADDR, Profile::Stereo)
        .await
        .unwrap_err();
    assert!(matches!(err.error(), Error::Transport(_)));
    assert!(err.error().is_transport());
    assert!(!codec.is_ready());
    // sequence aborted at the failing transaction
    assert_eq!(bus.transaction_count(), 6);

    // a clean retry succeeds
    codec
        .initialize(bus.clone(), ADDR, Profile::Stereo)
        .await
        .unwrap();
    assert_eq!(reg(&bus, CH_EN), 0x0C);
}

#[tokio::test]
async fn stalled_bus_times_out() {
    let log = EventLog::new();
    let bus = MockI2c::with_log(log.clone());
    let config = Tad5212Config {
        timeouts: BusTimeouts {
            read: Duration::from_millis(20),
            write: Duration::from_millis(20),
        },
        ..Tad5212Config::default()
    };
    let mut codec = Tad5212::new(MockDelay::with_log(log), config);

    bus.stall_after(2);
    let err = codec
        .initialize(bus.clone(), ADDR, Profile::Subwoofer)
        .await
        .unwrap_err();
    assert_eq!(err.error(), &Error::Timeout);
    assert!(!codec.is_ready());
}

#[tokio::test]
async fn deinitialize_then_reinitialize_other_profile() {
    let (mut codec, bus, _) = rig();
    codec
        .initialize(bus.clone(), ADDR, Profile::Subwoofer)
        .await
        .unwrap();
    let bus_back = codec.deinitialize().unwrap();
    assert!(!codec.is_ready());
    assert_eq!(
        codec.query_status().await.unwrap_err(),
        Error::InvalidState(InvalidState::NotInitialized)
    );

    codec
        .initialize(bus_back, ADDR, Profile::Stereo)
        .await
        .unwrap();
    assert_eq!(reg(&bus, CH_EN), 0x0C);
}
