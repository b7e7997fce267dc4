//! Bus ownership across failed TAD5212 bring-ups.
// Integration test file: expect/unwrap/panic are intentional test mechanisms.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
//!
//! Uses a bus that cannot be cloned, like a HAL I²C peripheral, so the only
//! way to retry is with the bus the failed attempt handed back.

use core::cell::Cell;
use std::rc::Rc;

use audio_control::audio::codec::tad5212::registers::CH_EN;
use audio_control::audio::codec::tad5212::{BusTimeouts, Profile, Tad5212, Tad5212Config};
use audio_control::{Error, InvalidArgument, InvalidState};
use embassy_time::Duration;
use embedded_hal_async::i2c::{ErrorType, I2c, Operation};
use platform::mocks::{MockDelay, MockI2c};

const ADDR: u8 = 0x50;

/// Owned bus: no `Clone`, flags its own drop.
struct OwnedBus {
    inner: MockI2c,
    dropped: Rc<Cell<bool>>,
}

impl OwnedBus {
    fn new(inner: MockI2c) -> (Self, Rc<Cell<bool>>) {
        let dropped = Rc::new(Cell::new(false));
        let bus = Self {
            inner,
            dropped: dropped.clone(),
        };
        (bus, dropped)
    }
}

impl Drop for OwnedBus {
    fn drop(&mut self) {
        self.dropped.set(true);
    }
}

impl ErrorType for OwnedBus {
    type Error = <MockI2c as ErrorType>::Error;
}

impl I2c for OwnedBus {
    async fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        self.inner.transaction(address, operations).await
    }
}

fn codec(config: Tad5212Config) -> Tad5212<OwnedBus, MockDelay> {
    Tad5212::new(MockDelay::new(), config)
}

#[tokio::test]
async fn bad_address_hands_the_bus_back() {
    let registers = MockI2c::new();
    let (bus, dropped) = OwnedBus::new(registers.clone());
    let mut codec = codec(Tad5212Config::default());

    let failure = codec
        .initialize(bus, 0x4C, Profile::Stereo)
        .await
        .unwrap_err();
    assert_eq!(
        failure.error(),
        &Error::InvalidArgument(InvalidArgument::Address(0x4C))
    );
    assert!(!dropped.get());
    assert_eq!(registers.transaction_count(), 0);

    codec
        .initialize(failure.into_bus(), ADDR, Profile::Stereo)
        .await
        .unwrap();
    assert!(codec.is_ready());
    assert!(!dropped.get());
    assert_eq!(registers.register(ADDR, CH_EN.page, CH_EN.addr), 0x0C);
}

#[tokio::test]
async fn transport_failure_hands_the_bus_back() {
    let registers = MockI2c::new();
    let (bus, dropped) = OwnedBus::new(registers.clone());
    let mut codec = codec(Tad5212Config::default());
    registers.fail_after(5);

    let failure = codec
        .initialize(bus, ADDR, Profile::Stereo)
        .await
        .unwrap_err();
    assert!(failure.error().is_transport());
    assert!(!codec.is_ready());
    assert!(!dropped.get());

    let (error, bus) = failure.into_parts();
    assert!(matches!(error, Error::Transport(_)));
    codec.initialize(bus, ADDR, Profile::Stereo).await.unwrap();
    assert_eq!(registers.register(ADDR, CH_EN.page, CH_EN.addr), 0x0C);
}

#[tokio::test]
async fn timed_out_bring_up_hands_the_bus_back() {
    let registers = MockI2c::new();
    let (bus, dropped) = OwnedBus::new(registers.clone());
    let mut codec = codec(Tad5212Config {
        timeouts: BusTimeouts {
            read: Duration::from_millis(20),
            write: Duration::from_millis(20),
        },
        ..Tad5212Config::default()
    });
    registers.stall_after(2);

    let failure = codec
        .initialize(bus, ADDR, Profile::Subwoofer)
        .await
        .unwrap_err();
    assert_eq!(failure.error(), &Error::Timeout);
    assert!(!dropped.get());

    codec
        .initialize(failure.into_bus(), ADDR, Profile::Subwoofer)
        .await
        .unwrap();
    assert_eq!(codec.profile(), Some(Profile::Subwoofer));
}

#[tokio::test]
async fn rejected_second_bring_up_keeps_both_buses() {
    let first_registers = MockI2c::new();
    let second_registers = MockI2c::new();
    let (first, first_dropped) = OwnedBus::new(first_registers);
    let (second, second_dropped) = OwnedBus::new(second_registers.clone());
    let mut codec = codec(Tad5212Config::default());

    codec.initialize(first, ADDR, Profile::Subwoofer).await.unwrap();
    let failure = codec
        .initialize(second, ADDR, Profile::Stereo)
        .await
        .unwrap_err();
    assert_eq!(
        failure.error(),
        &Error::InvalidState(InvalidState::AlreadyInitialized)
    );
    assert_eq!(second_registers.transaction_count(), 0);
    assert!(!second_dropped.get());

    drop(failure.into_bus());
    assert!(second_dropped.get());

    let first = codec.deinitialize().unwrap();
    assert!(!first_dropped.get());
    drop(first);
    assert!(first_dropped.get());
}

#[tokio::test]
async fn failure_converts_into_the_driver_error() {
    let (bus, _) = OwnedBus::new(MockI2c::new());
    let mut codec = codec(Tad5212Config::default());

    async fn bring_up(
        codec: &mut Tad5212<OwnedBus, MockDelay>,
        bus: OwnedBus,
    ) -> Result<(), Error<<OwnedBus as ErrorType>::Error>> {
        codec.initialize(bus, 0x4C, Profile::Stereo).await?;
        Ok(())
    }

    assert_eq!(
        bring_up(&mut codec, bus).await,
        Err(Error::InvalidArgument(InvalidArgument::Address(0x4C)))
    );
}
