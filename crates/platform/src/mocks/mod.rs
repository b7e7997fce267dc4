//! Mock implementations for testing
//!
//! This module provides mock implementations of every collaborator the
//! audio control core talks to, for use in unit and integration tests:
//!
//! - [`MockI2c`] - paged register file behind an async I²C bus
//! - [`MockDelay`] - records requested delays, returns immediately
//! - [`MockOutputPin`] / [`MockInputPin`] - GPIO lines
//! - [`MockAudioSource`] - upstream playback state and volume
//!
//! All mocks can share one [`EventLog`] so a test can assert the relative
//! order of bus transactions, delays and pin changes.

#![cfg(any(test, feature = "std"))]

mod i2c;
mod pins;

pub use i2c::{MockI2c, MockI2cError, PAGE_SELECT_REGISTER};
pub use pins::{MockInputPin, MockOutputPin, MockPinError};

use core::cell::RefCell;
use std::rc::Rc;
use std::vec::Vec;

use crate::{AudioSource, PlaybackState, SourceVolume};

/// One observable side effect recorded by a mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Page-select write (`[0x00, page]`).
    PageSelect {
        /// 7-bit device address
        address: u8,
        /// Page written
        page: u8,
    },
    /// Register write (1 or more data bytes, auto-incrementing).
    Write {
        /// 7-bit device address
        address: u8,
        /// Page that was selected on the device at the time of the write
        page: u8,
        /// First register written
        register: u8,
        /// Data bytes after the register address
        data: Vec<u8>,
    },
    /// Register read (write of the register address, then read).
    Read {
        /// 7-bit device address
        address: u8,
        /// Page that was selected on the device at the time of the read
        page: u8,
        /// First register read
        register: u8,
        /// Number of bytes read
        len: usize,
    },
    /// Delay requested through [`MockDelay`].
    Delay {
        /// Requested duration in nanoseconds
        ns: u64,
    },
    /// Level driven on a [`MockOutputPin`].
    PinLevel {
        /// Name given to the pin at construction
        pin: &'static str,
        /// `true` for high
        high: bool,
    },
}

impl Event {
    /// Returns `true` for [`Event::PageSelect`].
    pub fn is_page_select(&self) -> bool {
        matches!(self, Self::PageSelect { .. })
    }
}

/// Shared, clonable event log.
#[derive(Debug, Clone, Default)]
pub struct EventLog(Rc<RefCell<Vec<Event>>>);

impl EventLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event.
    pub fn push(&self, event: Event) {
        self.0.borrow_mut().push(event);
    }

    /// Snapshot of all recorded events.
    pub fn events(&self) -> Vec<Event> {
        self.0.borrow().clone()
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    /// Returns `true` if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Forget all recorded events.
    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

/// Mock delay provider
///
/// Returns immediately and records the requested duration.
#[derive(Debug, Clone, Default)]
pub struct MockDelay {
    log: EventLog,
}

impl MockDelay {
    /// Create a delay with its own log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a delay that records into `log`.
    pub fn with_log(log: EventLog) -> Self {
        Self { log }
    }

    /// Sum of all requested delays, in nanoseconds.
    pub fn total_ns(&self) -> u64 {
        self.log
            .events()
            .iter()
            .filter_map(|e| match e {
                Event::Delay { ns } => Some(*ns),
                _ => None,
            })
            .fold(0u64, u64::saturating_add)
    }

    fn record(&self, ns: u64) {
        self.log.push(Event::Delay { ns });
    }
}

impl embedded_hal_async::delay::DelayNs for MockDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.record(u64::from(ns));
    }

    async fn delay_us(&mut self, us: u32) {
        self.record(u64::from(us).saturating_mul(1_000));
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.record(u64::from(ms).saturating_mul(1_000_000));
    }
}

/// Mock audio source
///
/// Volume requests are accepted immediately and recorded in `requests`.
#[derive(Debug, Clone, Default)]
pub struct MockAudioSource {
    /// Reported playback state
    pub state: PlaybackState,
    /// Reported volume
    pub volume: SourceVolume,
    /// Every volume passed to [`AudioSource::request_volume`], in order
    pub requests: Vec<SourceVolume>,
}

impl MockAudioSource {
    /// Create a stopped source at `volume`.
    pub fn new(volume: u8) -> Self {
        Self {
            state: PlaybackState::Stopped,
            volume: SourceVolume::new(volume),
            requests: Vec::new(),
        }
    }
}

impl AudioSource for MockAudioSource {
    fn playback_state(&self) -> PlaybackState {
        self.state
    }

    fn volume(&self) -> SourceVolume {
        self.volume
    }

    fn request_volume(&mut self, volume: SourceVolume) {
        self.requests.push(volume);
        self.volume = volume;
    }
}
