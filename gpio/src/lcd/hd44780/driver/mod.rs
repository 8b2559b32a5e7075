//! HD44780 driver interface.
//!
//! [HD44780Driver] holds the raw transfer operations plus thin wrappers for each instruction.
//! The text and number helpers live in [HD44780Ext], which every driver gets for free.

pub mod command;
mod ext;
mod gpio;
pub mod timing;

use crate::GpioError;
use crate::lcd::hd44780::config::Geometry;
use command::*;
pub use ext::*;
pub use gpio::*;
use std::fmt::Debug;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error, Eq, PartialEq, Clone)]
pub enum LcdError {
    #[error(transparent)]
    Gpio(#[from] GpioError),
    #[error("position ({row}, {column}) is not on a {geometry:?} display")]
    PositionOutOfRange {
        row: u8,
        column: u8,
        geometry: Geometry,
    },
    #[error("DDRAM address {0:#04x} is above 0x7f")]
    AddressOutOfRange(u8),
}

pub type LcdResult<T> = Result<T, LcdError>;

pub trait HD44780Driver: Debug {
    /// Brings the controller from any state into 4-bit, 2-line mode with the display on, the given
    /// cursor style and left-to-right entry. Safe to call again on a running display.
    fn init(&mut self, cursor: CursorStyle) -> LcdResult<()>;

    /// Layout of the attached module.
    fn geometry(&self) -> Geometry;

    /// Blocks for at least `duration`, using the driver's delay.
    fn settle(&mut self, duration: Duration);

    /// Clears the display and sets the cursor to the home position.
    fn clear_display(&mut self) -> LcdResult<()> {
        self.send_command(CLEAR_DISPLAY)?;
        self.settle(timing::LONG_EXECUTION);
        Ok(())
    }

    /// Sets the cursor to the home position and undoes any display shift.
    fn return_home(&mut self) -> LcdResult<()> {
        self.send_command(RETURN_HOME)?;
        self.settle(timing::LONG_EXECUTION);
        Ok(())
    }

    /// Sets the direction the cursor moves after each character, and whether the display follows.
    fn set_entry_mode(&mut self, cursor_direction: CursorDirection, shift: bool) -> LcdResult<()> {
        let mut command = ENTRY_MODE_SET;
        if cursor_direction == CursorDirection::Right {
            command |= ENTRY_INCREMENT;
        }
        if shift {
            command |= ENTRY_SHIFT;
        }
        self.send_command(command)
    }

    /// Sets the display on/off and the cursor style.
    fn set_display_control(&mut self, display_on: bool, cursor: CursorStyle) -> LcdResult<()> {
        let mut command = DISPLAY_CONTROL | cursor.flags();
        if display_on {
            command |= DISPLAY_ON;
        }
        self.send_command(command)
    }

    /// Moves the cursor or shifts the whole display by one cell.
    fn cursor_shift(&mut self, display_shift: bool, direction: CursorDirection) -> LcdResult<()> {
        let mut command = CURSOR_SHIFT;
        if display_shift {
            command |= SHIFT_DISPLAY;
        }
        if direction == CursorDirection::Right {
            command |= SHIFT_RIGHT;
        }
        self.send_command(command)
    }

    /// Function set for the 4-bit bus. The data length bit is never set: this driver can't talk
    /// 8-bit.
    fn function_set(&mut self, two_lines: bool, font_5x10: bool) -> LcdResult<()> {
        let mut command = FUNCTION_SET;
        if two_lines {
            command |= FUNCTION_2LINES;
        }
        if font_5x10 {
            command |= FUNCTION_5X10;
        }
        self.send_command(command)
    }

    /// Sets the DDRAM address, i.e. moves the cursor.
    fn set_ddram_address(&mut self, address: u8) -> LcdResult<()> {
        if address > DDRAM_ADDRESS_MAX {
            return Err(LcdError::AddressOutOfRange(address));
        }
        self.send_command(SET_DDRAM_ADDRESS | address)
    }

    // Low-level transfers, implemented by the bus driver.

    /// Sends a command to the HD44780 controller.
    /// Sets the RS pin to 0 (command).
    fn send_command(&mut self, command: u8) -> LcdResult<()>;

    /// Sends data to the HD44780 controller.
    /// Sets the RS pin to 1 (data).
    fn send_data(&mut self, data: u8) -> LcdResult<()>;
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum CursorDirection {
    /// Moves the cursor to the left after writing data.
    Left,
    /// Moves the cursor to the right after writing data.
    Right,
}

/// How the cursor is drawn.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum CursorStyle {
    Hidden,
    /// Underline cursor.
    #[default]
    Underline,
    /// Underline cursor plus a blinking block.
    Blink,
}

impl CursorStyle {
    /// Cursor and blink bits of the display control instruction.
    pub fn flags(&self) -> u8 {
        match self {
            CursorStyle::Hidden => 0,
            CursorStyle::Underline => DISPLAY_CURSOR,
            CursorStyle::Blink => DISPLAY_CURSOR | DISPLAY_BLINK,
        }
    }
}
