//! Paged register transport
//!
//! Wraps one TAD5212 on an async I²C bus and tracks which page the device
//! currently has selected, so a page-select write is only issued when the
//! page actually changes. Every bus transaction is bounded by a timeout.
//!
//! # Page tracking
//!
//! ```text
//! None ──select_page(p) ok──▶ Some(p)
//!   ▲                           │
//!   └──── select failed ────────┤
//!   └──── SW_RESET written ─────┘
//! ```
//!
//! A failed page select leaves the device page unknown, so the next access
//! re-selects unconditionally. A software reset returns the device to page 0
//! behind our back, handled the same way.

use embassy_time::{with_timeout, Duration};
use embedded_hal_async::i2c::I2c;

use crate::error::{Error, InvalidArgument};

use super::registers::{is_coefficient_page, RegisterId, PAGE_CFG, SW_RESET};

/// Per-transaction timeouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BusTimeouts {
    /// Budget for one write-then-read transaction
    pub read: Duration,
    /// Budget for one write transaction
    pub write: Duration,
}

impl Default for BusTimeouts {
    fn default() -> Self {
        Self {
            read: Duration::from_millis(100),
            write: Duration::from_millis(100),
        }
    }
}

/// A register value, sized by the page it targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Value {
    /// 1-byte value for pages below 0x0F
    Byte(u8),
    /// 4-byte value for coefficient pages (0x0F and up), sent MSB first
    Word(u32),
}

impl Value {
    /// Width on the wire in bytes.
    pub const fn width(self) -> u8 {
        match self {
            Self::Byte(_) => 1,
            Self::Word(_) => 4,
        }
    }
}

/// Page-tracking register transport for one device.
pub struct PagedTransport<I> {
    bus: I,
    address: u8,
    page: Option<u8>,
    timeouts: BusTimeouts,
}

impl<I: I2c> PagedTransport<I> {
    /// Wrap `bus` for the device at 7-bit `address`. The device page is
    /// unknown until the first access.
    pub fn new(bus: I, address: u8, timeouts: BusTimeouts) -> Self {
        Self {
            bus,
            address,
            page: None,
            timeouts,
        }
    }

    /// 7-bit device address.
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Page the device is known to have selected, if any.
    pub fn current_page(&self) -> Option<u8> {
        self.page
    }

    /// Forget the tracked page; the next access selects again.
    pub fn invalidate_page(&mut self) {
        self.page = None;
    }

    /// Give the bus back.
    pub fn release(self) -> I {
        self.bus
    }

    /// Write `page` to the page-select register unconditionally.
    pub async fn select_page(&mut self, page: u8) -> Result<(), Error<I::Error>> {
        self.page = None;
        self.write_raw(&[PAGE_CFG, page]).await?;
        self.page = Some(page);

        #[cfg(feature = "defmt")]
        defmt::trace!("TAD5212 {=u8:#04x}: page {=u8}", self.address, page);

        Ok(())
    }

    /// Write one register, selecting its page first only if needed.
    ///
    /// Width is checked against the page before any bus access.
    pub async fn write_register(
        &mut self,
        reg: RegisterId,
        value: Value,
    ) -> Result<(), Error<I::Error>> {
        match (value, is_coefficient_page(reg.page)) {
            (Value::Byte(byte), false) => {
                self.ensure_page(reg.page).await?;
                self.write_raw(&[reg.addr, byte]).await?;
            }
            (Value::Word(word), true) => {
                self.ensure_page(reg.page).await?;
                let [b0, b1, b2, b3] = word.to_be_bytes();
                self.write_raw(&[reg.addr, b0, b1, b2, b3]).await?;
            }
            (value, _) => {
                return Err(InvalidArgument::ValueWidth {
                    page: reg.page,
                    width: value.width(),
                }
                .into())
            }
        }

        if reg == SW_RESET {
            self.invalidate_page();
        }
        Ok(())
    }

    /// Read one byte register, selecting its page first only if needed.
    pub async fn read_register(&mut self, reg: RegisterId) -> Result<u8, Error<I::Error>> {
        self.ensure_page(reg.page).await?;

        let mut value = [0u8; 1];
        let address = self.address;
        match with_timeout(
            self.timeouts.read,
            self.bus.write_read(address, &[reg.addr], &mut value),
        )
        .await
        {
            Ok(Ok(())) => Ok(u8::from_be_bytes(value)),
            Ok(Err(e)) => Err(Error::Transport(e)),
            Err(_) => Err(Error::Timeout),
        }
    }

    /// Write consecutive 32-bit words at `base`, `base + 4`, ...
    ///
    /// The page is selected at most once, before the first word, so the
    /// words of one coefficient set are never split by a page change.
    pub async fn write_words(
        &mut self,
        base: RegisterId,
        words: &[u32],
    ) -> Result<(), Error<I::Error>> {
        if !is_coefficient_page(base.page) {
            return Err(InvalidArgument::ValueWidth {
                page: base.page,
                width: 4,
            }
            .into());
        }

        self.ensure_page(base.page).await?;
        let mut addr = base.addr;
        for word in words {
            let [b0, b1, b2, b3] = word.to_be_bytes();
            self.write_raw(&[addr, b0, b1, b2, b3]).await?;
            addr = addr.wrapping_add(4);
        }
        Ok(())
    }

    async fn ensure_page(&mut self, page: u8) -> Result<(), Error<I::Error>> {
        if self.page != Some(page) {
            self.select_page(page).await?;
        }
        Ok(())
    }

    async fn write_raw(&mut self, bytes: &[u8]) -> Result<(), Error<I::Error>> {
        let address = self.address;
        match with_timeout(self.timeouts.write, self.bus.write(address, bytes)).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(Error::Transport(e)),
            Err(_) => Err(Error::Timeout),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction};

    const ADDR: u8 = 0x50;

    #[tokio::test]
    async fn page_is_selected_only_on_change() {
        let expectations = [
            Transaction::write(ADDR, vec![0x00, 0x00]),
            Transaction::write(ADDR, vec![0x76, 0x04]),
            Transaction::write(ADDR, vec![0x78, 0x40]),
            Transaction::write(ADDR, vec![0x00, 0x01]),
            Transaction::write(ADDR, vec![0x2C, 0x80]),
        ];
        let mut bus = I2cMock::new(&expectations);
        let mut transport = PagedTransport::new(bus.clone(), ADDR, BusTimeouts::default());

        transport
            .write_register(RegisterId::new(0, 0x76), Value::Byte(0x04))
            .await
            .unwrap();
        transport
            .write_register(RegisterId::new(0, 0x78), Value::Byte(0x40))
            .await
            .unwrap();
        transport
            .write_register(RegisterId::new(1, 0x2C), Value::Byte(0x80))
            .await
            .unwrap();
        assert_eq!(transport.current_page(), Some(1));

        bus.done();
    }

    #[tokio::test]
    async fn coefficient_page_takes_big_endian_words() {
        let expectations = [
            Transaction::write(ADDR, vec![0x00, 0x11]),
            Transaction::write(ADDR, vec![0x08, 0x20, 0x00, 0x00, 0x00]),
        ];
        let mut bus = I2cMock::new(&expectations);
        let mut transport = PagedTransport::new(bus.clone(), ADDR, BusTimeouts::default());

        transport
            .write_register(RegisterId::new(0x11, 0x08), Value::Word(0x2000_0000))
            .await
            .unwrap();

        bus.done();
    }

    #[tokio::test]
    async fn width_mismatch_is_rejected_without_bus_access() {
        let mut bus = I2cMock::new(&[]);
        let mut transport = PagedTransport::new(bus.clone(), ADDR, BusTimeouts::default());

        let err = transport
            .write_register(RegisterId::new(0x0F, 0x08), Value::Byte(1))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            Error::InvalidArgument(InvalidArgument::ValueWidth { page: 0x0F, width: 1 })
        );
        let err = transport
            .write_register(RegisterId::new(0x00, 0x76), Value::Word(1))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));

        bus.done();
    }

    #[tokio::test]
    async fn software_reset_forgets_the_page() {
        let expectations = [
            Transaction::write(ADDR, vec![0x00, 0x00]),
            Transaction::write(ADDR, vec![0x01, 0x01]),
            Transaction::write(ADDR, vec![0x00, 0x00]),
            Transaction::write(ADDR, vec![0x02, 0x29]),
        ];
        let mut bus = I2cMock::new(&expectations);
        let mut transport = PagedTransport::new(bus.clone(), ADDR, BusTimeouts::default());

        transport
            .write_register(SW_RESET, Value::Byte(0x01))
            .await
            .unwrap();
        assert_eq!(transport.current_page(), None);
        transport
            .write_register(RegisterId::new(0, 0x02), Value::Byte(0x29))
            .await
            .unwrap();

        bus.done();
    }

    #[tokio::test]
    async fn read_is_one_write_read() {
        let expectations = [
            Transaction::write(ADDR, vec![0x00, 0x00]),
            Transaction::write_read(ADDR, vec![0x77], vec![0xA4]),
        ];
        let mut bus = I2cMock::new(&expectations);
        let mut transport = PagedTransport::new(bus.clone(), ADDR, BusTimeouts::default());

        let value = transport
            .read_register(RegisterId::new(0, 0x77))
            .await
            .unwrap();
        assert_eq!(value, 0xA4);

        bus.done();
    }
}
