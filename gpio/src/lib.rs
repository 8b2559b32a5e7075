//! GPIO plumbing and an HD44780 character LCD driver for bit-banged 4-bit buses.
//!
//! The crate is split along the collaborators the driver needs:
//! - [GpioPort] sets and clears single pins (and, optionally, several neighbouring pins at once),
//! - [delay::Delay] blocks the calling thread for a [std::time::Duration],
//! - [lcd::hd44780] turns those two into a working display.
//!
//! [raw::RawGpioDriver] is a memory-mapped backend for BCM283x-family boards.

pub mod delay;
pub mod lcd;
pub mod raw;

#[cfg(test)]
pub(crate) mod testing;

use std::fmt::{Debug, Display, Formatter};
use thiserror::Error;

#[derive(Debug, Error, Eq, PartialEq, Clone)]
pub enum GpioError {
    #[error("pin already in use")]
    AlreadyInUse,
    #[error("invalid argument")]
    InvalidArgument,
    #[error("the feature is not supported on this backend")]
    NotSupported,
    #[error("IO error: {0}")]
    Io(std::io::ErrorKind),
    #[error("error: {0}")]
    Other(String),
}

impl From<std::io::Error> for GpioError {
    fn from(err: std::io::Error) -> Self {
        GpioError::Io(err.kind())
    }
}

pub type GpioResult<T> = Result<T, GpioError>;

/// Identifies a single GPIO pin as a bit inside a port group.
///
/// What a "port" is depends on the backend: an 8-bit `PxOUT` register on small microcontrollers,
/// a 32-pin GPSET/GPCLR bank for [raw::RawGpioDriver].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct PinId {
    pub port: u8,
    pub bit: u8,
}

impl PinId {
    pub const fn new(port: u8, bit: u8) -> Self {
        Self { port, bit }
    }

    /// Returns the pin `offset` bits above this one, in the same port.
    pub const fn offset(self, offset: u8) -> Self {
        Self {
            port: self.port,
            bit: self.bit + offset,
        }
    }
}

impl Display for PinId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "P{}.{}", self.port, self.bit)
    }
}

/// Output side of a GPIO backend, as seen by the LCD driver.
///
/// Pins are expected to already be configured as outputs; direction handling is the backend's business.
pub trait GpioPort: Debug {
    /// Drives the pin high.
    fn set_high(&self, pin: PinId) -> GpioResult<()>;
    /// Drives the pin low.
    fn set_low(&self, pin: PinId) -> GpioResult<()>;

    /// Drives the pin to the given level.
    fn write(&self, pin: PinId, high: bool) -> GpioResult<()> {
        if high {
            self.set_high(pin)
        } else {
            self.set_low(pin)
        }
    }

    /// Writes the lowest `count` bits of `value` to `count` consecutive pins starting at `first`,
    /// LSb on `first`.
    ///
    /// The default implementation writes the pins one by one. Backends that can update a whole
    /// port at once should override it.
    fn write_bits(&self, first: PinId, count: u8, value: u8) -> GpioResult<()> {
        for i in 0..count {
            self.write(first.offset(i), value & (1 << i) != 0)?;
        }
        Ok(())
    }
}
