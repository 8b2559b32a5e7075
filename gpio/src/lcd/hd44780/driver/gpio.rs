use crate::delay::Delay;
use crate::lcd::hd44780::config::{DataLines, Geometry, PinMap};
use crate::lcd::hd44780::driver::command::*;
use crate::lcd::hd44780::driver::timing::*;
use crate::lcd::hd44780::driver::{CursorStyle, HD44780Driver, LcdResult};
use crate::{GpioPort, GpioResult};
use log::{debug, trace};
use std::time::Duration;

/// HD44780 driver bit-banging a 4-bit bus over a [GpioPort].
///
/// The port is borrowed for the driver's whole life; nothing else should touch those pins meanwhile.
#[derive(Debug)]
pub struct GpioHD44780Driver<'a, D: Delay> {
    port: &'a dyn GpioPort,
    pins: PinMap,
    geometry: Geometry,
    delay: D,
}

impl<'a, D: Delay> GpioHD44780Driver<'a, D> {
    pub fn new(port: &'a dyn GpioPort, pins: PinMap, geometry: Geometry, delay: D) -> Self {
        GpioHD44780Driver {
            port,
            pins,
            geometry,
            delay,
        }
    }

    pub fn pins(&self) -> &PinMap {
        &self.pins
    }

    /// Latches whatever is on the data lines: E low, high, low.
    pub fn strobe(&mut self) -> GpioResult<()> {
        let pin_e = self.pins.enable();
        self.port.set_low(pin_e)?;
        self.delay.delay(ENABLE_PULSE);
        self.port.set_high(pin_e)?;
        self.delay.delay(ENABLE_PULSE);
        self.port.set_low(pin_e)?;
        self.delay.delay(ENABLE_PULSE);
        Ok(())
    }

    /// Puts a single nibble on D4..D7 and strobes it in.
    fn write_nibble(&mut self, nibble: u8) -> GpioResult<()> {
        trace!("Writing nibble: {:04b}", nibble);
        self.port
            .write_bits(self.pins.data().first(), DataLines::WIDTH, nibble & 0x0F)?;
        self.strobe()?;
        self.delay.delay(NIBBLE_SETTLE);
        Ok(())
    }

    fn send(&mut self, data: u8, rs: bool) -> GpioResult<()> {
        trace!("Sending data: {:08b}, RS: {}", data, rs);

        self.port.write(self.pins.register_select(), rs)?;
        self.port.set_low(self.pins.enable())?;

        // High nibble first: during the reset handshake the controller only reads D4..D7.
        self.write_nibble(data >> 4)?;
        self.write_nibble(data & 0x0F)?;

        self.delay.delay(COMMAND_EXECUTION);
        Ok(())
    }

    /// Reset handshake from the datasheet (figure 24): three 8-bit function sets, which land whatever
    /// the controller was doing, then the nibble switching it to 4-bit.
    fn synchronize(&mut self) -> GpioResult<()> {
        self.port.set_low(self.pins.register_select())?;

        self.write_nibble(RESET_NIBBLE)?;
        self.delay.delay(HANDSHAKE_FIRST);
        self.write_nibble(RESET_NIBBLE)?;
        self.delay.delay(INIT_STEP);
        self.write_nibble(RESET_NIBBLE)?;
        self.delay.delay(INIT_STEP);

        self.write_nibble(FOUR_BIT_NIBBLE)?;
        self.delay.delay(INIT_STEP);
        Ok(())
    }

    fn step(&mut self, name: &str, command: u8, wait: Duration) -> LcdResult<()> {
        debug!("Init: {} ({:#04x})", name, command);
        self.send_command(command)?;
        self.delay.delay(wait);
        Ok(())
    }
}

impl<D: Delay> HD44780Driver for GpioHD44780Driver<'_, D> {
    fn init(&mut self, cursor: CursorStyle) -> LcdResult<()> {
        debug!("Init: resetting control lines");
        self.port.set_low(self.pins.enable())?;
        self.port.set_low(self.pins.register_select())?;
        self.delay.delay(POWER_ON);

        debug!("Init: forcing 4-bit mode");
        self.synchronize()?;

        self.step("return home", RETURN_HOME, LONG_EXECUTION)?;
        self.step("clear display", CLEAR_DISPLAY, LONG_EXECUTION)?;
        self.step("function set", FUNCTION_4BIT_2LINES, INIT_STEP)?;
        self.step(
            "display control",
            DISPLAY_CONTROL | DISPLAY_ON | cursor.flags(),
            INIT_STEP,
        )?;
        self.step("entry mode", ENTRY_INCREMENT_NO_SHIFT, INIT_STEP)?;
        self.step("cursor to first line", SET_DDRAM_ADDRESS, Duration::ZERO)?;
        Ok(())
    }

    fn geometry(&self) -> Geometry {
        self.geometry
    }

    fn settle(&mut self, duration: Duration) {
        self.delay.delay(duration);
    }

    fn send_command(&mut self, command: u8) -> LcdResult<()> {
        Ok(self.send(command, false)?)
    }

    fn send_data(&mut self, data: u8) -> LcdResult<()> {
        Ok(self.send(data, true)?)
    }
}
