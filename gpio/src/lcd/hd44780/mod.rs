//! HD44780 LCD module.
//!
//! Write-only, timing-based driver for HD44780-compatible controllers on a 4-bit bus. There is no
//! busy flag polling: every command is followed by a wait long enough for the slowest instruction
//! of its kind, see [driver::timing].
//!
//! Typical use:
//! 1. describe the wiring with a [config::PinMap] (validated once, up front),
//! 2. build a [driver::GpioHD44780Driver] over a [crate::GpioPort] and a [crate::delay::Delay],
//! 3. call [driver::HD44780Driver::init], then the printing helpers from [driver::HD44780Ext].

pub mod config;
pub mod driver;
