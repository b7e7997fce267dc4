//! Mock GPIO lines

use core::cell::{Cell, RefCell};
use std::rc::Rc;
use std::vec::Vec;

use embedded_hal::digital::{ErrorKind, ErrorType, InputPin, OutputPin};

use super::{Event, EventLog};

/// Error produced by a [`MockInputPin`] configured to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockPinError;

impl embedded_hal::digital::Error for MockPinError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// Mock output pin
///
/// Clones share the level history.
#[derive(Debug, Clone)]
pub struct MockOutputPin {
    name: &'static str,
    history: Rc<RefCell<Vec<bool>>>,
    log: Option<EventLog>,
}

impl MockOutputPin {
    /// Create a named pin with no history.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            history: Rc::default(),
            log: None,
        }
    }

    /// Create a named pin that also records into `log`.
    pub fn with_log(name: &'static str, log: EventLog) -> Self {
        Self {
            log: Some(log),
            ..Self::new(name)
        }
    }

    /// Last driven level (`None` if never driven).
    pub fn level(&self) -> Option<bool> {
        self.history.borrow().last().copied()
    }

    /// Every level driven so far, oldest first.
    pub fn history(&self) -> Vec<bool> {
        self.history.borrow().clone()
    }

    fn drive(&self, high: bool) {
        self.history.borrow_mut().push(high);
        if let Some(log) = &self.log {
            log.push(Event::PinLevel {
                pin: self.name,
                high,
            });
        }
    }
}

impl ErrorType for MockOutputPin {
    type Error = core::convert::Infallible;
}

impl OutputPin for MockOutputPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.drive(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.drive(true);
        Ok(())
    }
}

#[derive(Debug, Default)]
struct InputState {
    high: Cell<bool>,
    failing: Cell<bool>,
    reads: Cell<usize>,
}

/// Mock input pin
///
/// Clones share the level, so a test can keep a handle and change the
/// level after giving the pin to a driver.
#[derive(Debug, Clone, Default)]
pub struct MockInputPin {
    state: Rc<InputState>,
}

impl MockInputPin {
    /// Create a pin reading `high`.
    pub fn new(high: bool) -> Self {
        let pin = Self::default();
        pin.set_level(high);
        pin
    }

    /// Change the level subsequent reads return.
    pub fn set_level(&self, high: bool) {
        self.state.high.set(high);
    }

    /// Make every subsequent read fail.
    pub fn fail_reads(&self) {
        self.state.failing.set(true);
    }

    /// Number of reads performed.
    pub fn read_count(&self) -> usize {
        self.state.reads.get()
    }
}

impl ErrorType for MockInputPin {
    type Error = MockPinError;
}

impl InputPin for MockInputPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        self.state.reads.set(self.state.reads.get().saturating_add(1));
        if self.state.failing.get() {
            return Err(MockPinError);
        }
        Ok(self.state.high.get())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn output_pin_records_history() {
        let mut pin = MockOutputPin::new("reset");
        pin.set_low().unwrap();
        pin.set_high().unwrap();
        assert_eq!(pin.history(), vec![false, true]);
        assert_eq!(pin.level(), Some(true));
    }

    #[test]
    fn input_pin_clone_shares_level() {
        let handle = MockInputPin::new(true);
        let mut pin = handle.clone();
        assert!(pin.is_high().unwrap());
        handle.set_level(false);
        assert!(pin.is_low().unwrap());
        assert_eq!(handle.read_count(), 2);
    }
}
