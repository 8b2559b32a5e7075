//! Text and number output on top of [HD44780Driver].

use crate::lcd::hd44780::driver::command::*;
use crate::lcd::hd44780::driver::timing::SETTLE;
use crate::lcd::hd44780::driver::{HD44780Driver, LcdError, LcdResult};

/// Printing helpers, available on every [HD44780Driver].
///
/// Each call is independent: nothing is remembered between calls, so the cursor is wherever the
/// controller left it.
pub trait HD44780Ext: HD44780Driver {
    /// Moves the cursor to (`row`, `column`).
    ///
    /// # Errors
    /// - [LcdError::PositionOutOfRange] if the cell isn't on the display. Nothing is sent then.
    fn set_position(&mut self, row: u8, column: u8) -> LcdResult<()> {
        let geometry = self.geometry();
        let address = geometry
            .address(row, column)
            .ok_or(LcdError::PositionOutOfRange {
                row,
                column,
                geometry,
            })?;
        self.send_command(SET_DDRAM_ADDRESS | address)
    }

    /// Prints a single character code at the cursor.
    fn print_char(&mut self, c: u8) -> LcdResult<()> {
        self.send_data(c)
    }

    /// Prints `text` byte by byte, stopping at the end or at the first NUL.
    ///
    /// Bytes are sent as-is, so non-ASCII text shows whatever the controller's character ROM has at
    /// those codes.
    fn print_str(&mut self, text: &str) -> LcdResult<()> {
        for byte in text.bytes().take_while(|&b| b != 0) {
            self.send_data(byte)?;
        }
        Ok(())
    }

    /// Prints `value` as an optional `-` and exactly four digits, zero-padded.
    ///
    /// Only -9999..=9999 prints correctly. Beyond that the thousands "digit" becomes whatever
    /// character follows `'9'` in the character ROM; no error is reported.
    fn print_int(&mut self, value: i16) -> LcdResult<()> {
        if value < 0 {
            self.send_data(b'-')?;
        }
        for digit in four_digits(value.unsigned_abs()) {
            self.send_data(digit)?;
        }
        Ok(())
    }

    /// Prints `value` as [HD44780Ext::print_int] of the integer part, `.`, and four decimals.
    ///
    /// The decimals are truncated, never rounded, so no carry ever reaches the integer part:
    /// `0.99999` prints as `0000.9999`.
    fn print_float(&mut self, value: f64) -> LcdResult<()> {
        let mut value = value;
        if value < 0.0 {
            self.send_data(b'-')?;
            value = -value;
        }

        let whole = value as i16;
        self.print_int(whole)?;

        self.settle(SETTLE);
        self.send_data(b'.')?;

        let fraction = ((value - f64::from(whole)) * 10_000.0) as i16;
        self.print_int(fraction)
    }

    /// Shifts the visible window `times` cells to the left. DDRAM is untouched.
    fn shift_display_left(&mut self, times: u8) -> LcdResult<()> {
        for _ in 0..times {
            self.send_command(SHIFT_DISPLAY_LEFT)?;
            self.settle(SETTLE);
        }
        Ok(())
    }

    /// Shifts the visible window `times` cells to the right. DDRAM is untouched.
    fn shift_display_right(&mut self, times: u8) -> LcdResult<()> {
        for _ in 0..times {
            self.send_command(SHIFT_DISPLAY_RIGHT)?;
            self.settle(SETTLE);
        }
        Ok(())
    }

    /// Moves the cursor one cell to the left.
    fn move_cursor_left(&mut self) -> LcdResult<()> {
        self.send_command(MOVE_CURSOR_LEFT)
    }

    /// Moves the cursor one cell to the right.
    fn move_cursor_right(&mut self) -> LcdResult<()> {
        self.send_command(MOVE_CURSOR_RIGHT)
    }
}

impl<T: HD44780Driver + ?Sized> HD44780Ext for T {}

/// Thousands, hundreds, tens and ones of `magnitude` as character codes.
fn four_digits(magnitude: u16) -> [u8; 4] {
    let digit = |n: u16| b'0'.wrapping_add(n as u8);
    [
        digit(magnitude / 1000),
        digit(magnitude / 100 % 10),
        digit(magnitude / 10 % 10),
        digit(magnitude % 10),
    ]
}
