//! Minimum waits from the HD44780U datasheet (Hitachi ADE-207-272), at the 270 kHz nominal
//! oscillator, rounded up to leave room for slower clones such as the KS0066.
//!
//! All of them are lower bounds: a [crate::delay::Delay] that overshoots is harmless.

use std::time::Duration;

/// Each phase of the Enable strobe. Covers PW_EH (≥ 450 ns) and t_cycE (≥ 1 µs over a nibble).
pub const ENABLE_PULSE: Duration = Duration::from_micros(1);

/// Gap after each nibble before the data lines change again.
pub const NIBBLE_SETTLE: Duration = Duration::from_micros(1);

/// Execution time of every instruction except clear and home (37 µs nominal), and of a data write
/// (37 µs + t_ADD 4 µs).
pub const COMMAND_EXECUTION: Duration = Duration::from_micros(50);

/// Execution time of clear display and return home (1.52 ms nominal).
pub const LONG_EXECUTION: Duration = Duration::from_millis(2);

/// Wait after V_CC rises above 4.5 V before talking to the controller.
pub const POWER_ON: Duration = Duration::from_millis(15);

/// Wait after the first `0x3` nibble of the reset handshake.
pub const HANDSHAKE_FIRST: Duration = Duration::from_micros(4100);

/// Wait after the remaining handshake nibbles and after each configuration step of `init`.
pub const INIT_STEP: Duration = Duration::from_micros(100);

/// Pause between repeated display shifts, and before the decimal point of a float.
pub const SETTLE: Duration = Duration::from_micros(100);
