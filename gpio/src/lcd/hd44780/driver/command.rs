//! HD44780 instruction set, as used in 4-bit mode.

pub const CLEAR_DISPLAY: u8 = 0b0000_0001;
pub const RETURN_HOME: u8 = 0b0000_0010;

pub const ENTRY_MODE_SET: u8 = 0b0000_0100;
pub const ENTRY_INCREMENT: u8 = 0b0000_0010;
pub const ENTRY_SHIFT: u8 = 0b0000_0001;

pub const DISPLAY_CONTROL: u8 = 0b0000_1000;
pub const DISPLAY_ON: u8 = 0b0000_0100;
pub const DISPLAY_CURSOR: u8 = 0b0000_0010;
pub const DISPLAY_BLINK: u8 = 0b0000_0001;

pub const CURSOR_SHIFT: u8 = 0b0001_0000;
pub const SHIFT_DISPLAY: u8 = 0b0000_1000;
pub const SHIFT_RIGHT: u8 = 0b0000_0100;

pub const FUNCTION_SET: u8 = 0b0010_0000;
pub const FUNCTION_8BIT: u8 = 0b0001_0000;
pub const FUNCTION_2LINES: u8 = 0b0000_1000;
pub const FUNCTION_5X10: u8 = 0b0000_0100;

pub const SET_DDRAM_ADDRESS: u8 = 0b1000_0000;
pub const DDRAM_ADDRESS_MAX: u8 = 0b0111_1111;

pub const ENTRY_INCREMENT_NO_SHIFT: u8 = ENTRY_MODE_SET | ENTRY_INCREMENT;
pub const DISPLAY_ON_CURSOR_ON: u8 = DISPLAY_CONTROL | DISPLAY_ON | DISPLAY_CURSOR;
pub const MOVE_CURSOR_LEFT: u8 = CURSOR_SHIFT;
pub const MOVE_CURSOR_RIGHT: u8 = CURSOR_SHIFT | SHIFT_RIGHT;
pub const SHIFT_DISPLAY_LEFT: u8 = CURSOR_SHIFT | SHIFT_DISPLAY;
pub const SHIFT_DISPLAY_RIGHT: u8 = CURSOR_SHIFT | SHIFT_DISPLAY | SHIFT_RIGHT;
pub const FUNCTION_4BIT_2LINES: u8 = FUNCTION_SET | FUNCTION_2LINES;

/// High nibble of an 8-bit function set. Sent alone, three times, to resynchronise the controller
/// whatever mode it is in.
pub const RESET_NIBBLE: u8 = (FUNCTION_SET | FUNCTION_8BIT) >> 4;
/// High nibble of a 4-bit function set. Sent alone, while the controller still reads 8-bit
/// instructions, it switches the bus to 4-bit mode.
pub const FOUR_BIT_NIBBLE: u8 = FUNCTION_SET >> 4;
