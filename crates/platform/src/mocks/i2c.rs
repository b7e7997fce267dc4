//! Mock paged I²C bus
//!
//! Models TI-style paged register devices: register 0x00 on every page is
//! the page-select register, multi-byte writes auto-increment the register
//! address, and a write of just a register address sets the read pointer.
//! Several device addresses can live on the same mock bus; each keeps its
//! own page.

use core::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::vec::Vec;

use embedded_hal::i2c::{ErrorKind, ErrorType, NoAcknowledgeSource, Operation};

use super::{Event, EventLog};

/// Page-select register address (present on every page).
pub const PAGE_SELECT_REGISTER: u8 = 0x00;

/// Error produced by injected failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockI2cError(pub ErrorKind);

impl embedded_hal::i2c::Error for MockI2cError {
    fn kind(&self) -> ErrorKind {
        self.0
    }
}

enum Outcome {
    Proceed,
    Fail,
    Stall,
}

#[derive(Debug, Default)]
struct BusState {
    /// (device address, page, register) -> value
    registers: HashMap<(u8, u8, u8), u8>,
    /// device address -> selected page (devices power up on page 0)
    pages: HashMap<u8, u8>,
    /// device address -> read pointer
    pointers: HashMap<u8, u8>,
    transactions: usize,
    fail_at: Option<usize>,
    stall_at: Option<usize>,
}

impl BusState {
    fn begin(&mut self) -> Outcome {
        let index = self.transactions;
        self.transactions = self.transactions.saturating_add(1);
        if self.stall_at == Some(index) {
            self.stall_at = None;
            Outcome::Stall
        } else if self.fail_at == Some(index) {
            self.fail_at = None;
            Outcome::Fail
        } else {
            Outcome::Proceed
        }
    }

    fn page(&self, address: u8) -> u8 {
        self.pages.get(&address).copied().unwrap_or(0)
    }

    fn write(&mut self, log: &EventLog, address: u8, bytes: &[u8]) {
        let Some((&register, data)) = bytes.split_first() else {
            return;
        };
        let page = self.page(address);
        self.pointers.insert(address, register);

        match data {
            [] => {}
            [new_page] if register == PAGE_SELECT_REGISTER => {
                self.pages.insert(address, *new_page);
                self.registers
                    .insert((address, *new_page, PAGE_SELECT_REGISTER), *new_page);
                log.push(Event::PageSelect {
                    address,
                    page: *new_page,
                });
            }
            _ => {
                let mut reg = register;
                for &byte in data {
                    self.registers.insert((address, page, reg), byte);
                    reg = reg.wrapping_add(1);
                }
                log.push(Event::Write {
                    address,
                    page,
                    register,
                    data: data.to_vec(),
                });
            }
        }
    }

    fn read(&mut self, log: &EventLog, address: u8, buffer: &mut [u8]) {
        let page = self.page(address);
        let register = self.pointers.get(&address).copied().unwrap_or(0);
        let mut reg = register;
        for slot in buffer.iter_mut() {
            *slot = self
                .registers
                .get(&(address, page, reg))
                .copied()
                .unwrap_or(0);
            reg = reg.wrapping_add(1);
        }
        self.pointers.insert(address, reg);
        log.push(Event::Read {
            address,
            page,
            register,
            len: buffer.len(),
        });
    }
}

/// Mock async I²C bus backed by a paged register file.
///
/// Clones share the same register file and log, so a test can keep one
/// handle while the driver owns another.
#[derive(Debug, Clone, Default)]
pub struct MockI2c {
    state: Rc<RefCell<BusState>>,
    log: EventLog,
}

impl MockI2c {
    /// Create an empty bus with its own event log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty bus that records into `log`.
    pub fn with_log(log: EventLog) -> Self {
        Self {
            state: Rc::default(),
            log,
        }
    }

    /// The log this bus records into.
    pub fn log(&self) -> EventLog {
        self.log.clone()
    }

    /// Recorded events (shorthand for `self.log().events()`).
    pub fn events(&self) -> Vec<Event> {
        self.log.events()
    }

    /// Preload a register value.
    pub fn set_register(&self, address: u8, page: u8, register: u8, value: u8) {
        self.state
            .borrow_mut()
            .registers
            .insert((address, page, register), value);
    }

    /// Current register value (0 if never written).
    pub fn register(&self, address: u8, page: u8, register: u8) -> u8 {
        self.state
            .borrow()
            .registers
            .get(&(address, page, register))
            .copied()
            .unwrap_or(0)
    }

    /// Four consecutive registers read as one big-endian word.
    pub fn word(&self, address: u8, page: u8, register: u8) -> u32 {
        let mut bytes = [0u8; 4];
        let mut reg = register;
        for byte in &mut bytes {
            *byte = self.register(address, page, reg);
            reg = reg.wrapping_add(1);
        }
        u32::from_be_bytes(bytes)
    }

    /// Page currently selected on the device at `address`.
    pub fn page(&self, address: u8) -> u8 {
        self.state.borrow().page(address)
    }

    /// Number of transactions started so far (including failed ones).
    pub fn transaction_count(&self) -> usize {
        self.state.borrow().transactions
    }

    /// Make the transaction `n` transactions from now fail with a NACK
    /// (`0` = the next one).
    pub fn fail_after(&self, n: usize) {
        let mut state = self.state.borrow_mut();
        state.fail_at = Some(state.transactions.saturating_add(n));
    }

    /// Make the transaction `n` transactions from now never complete.
    pub fn stall_after(&self, n: usize) {
        let mut state = self.state.borrow_mut();
        state.stall_at = Some(state.transactions.saturating_add(n));
    }
}

impl ErrorType for MockI2c {
    type Error = MockI2cError;
}

impl embedded_hal_async::i2c::I2c for MockI2c {
    async fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        let outcome = self.state.borrow_mut().begin();
        match outcome {
            Outcome::Proceed => {}
            Outcome::Fail => {
                return Err(MockI2cError(ErrorKind::NoAcknowledge(
                    NoAcknowledgeSource::Address,
                )))
            }
            Outcome::Stall => core::future::pending::<()>().await,
        }

        let mut state = self.state.borrow_mut();
        for op in operations.iter_mut() {
            match op {
                Operation::Write(bytes) => state.write(&self.log, address, bytes),
                Operation::Read(buffer) => state.read(&self.log, address, buffer),
            }
        }
        Ok(())
    }
}
