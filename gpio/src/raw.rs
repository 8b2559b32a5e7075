//! Memory-mapped GPIO for BCM283x-family boards.
//!
//! Ports are the 32-pin banks of the GPSET/GPCLR registers, so [PinId] `(port, bit)` is GPIO
//! `port * 32 + bit`, and a nibble on consecutive bits of one bank is written with a single
//! GPCLR and a single GPSET.

use crate::lcd::hd44780::config::PinMap;
use crate::{GpioError, GpioPort, GpioResult, PinId};
use bitvec::vec::BitVec;
use log::{debug, trace};
use memmap2::{MmapOptions, MmapRaw};
use std::fmt::{Debug, Formatter};
use std::fs::OpenOptions;
use std::sync::atomic::AtomicU8;

pub struct RawGpioDriver {
    mmap: MmapRaw,
    used_pins: BitVec<AtomicU8>,
}

impl RawGpioDriver {
    // 0x7e200000 on the bus, mapped here on BCM2836/7
    const GPIO_BASE: u32 = 0x3F200000;

    const PIN_COUNT: usize = 58;

    /// Width of a GPSET/GPCLR bank; use it for [PinMap::with_port_width].
    pub const PORT_WIDTH: u8 = 32;

    const GPSET0: usize = 0x1c / 4;
    const GPCLR0: usize = 0x28 / 4;

    fn create(path: &str) -> GpioResult<Self> {
        let file = OpenOptions::new().read(true).write(true).open(path)?;

        let mmap = MmapOptions::new()
            .offset(Self::GPIO_BASE as u64)
            .len(4096)
            .map_raw(&file)?;

        Ok(RawGpioDriver {
            mmap,
            used_pins: BitVec::repeat(false, Self::PIN_COUNT),
        })
    }

    pub fn new_gpiomem() -> GpioResult<Self> {
        Self::create("/dev/gpiomem")
    }

    pub fn new_mem() -> GpioResult<Self> {
        Self::create("/dev/mem")
    }

    /// Global GPIO number of `pin`.
    pub fn index(pin: PinId) -> GpioResult<usize> {
        if pin.bit >= Self::PORT_WIDTH {
            return Err(GpioError::InvalidArgument);
        }
        let index = pin.port as usize * Self::PORT_WIDTH as usize + pin.bit as usize;
        if index >= Self::PIN_COUNT {
            return Err(GpioError::InvalidArgument);
        }
        Ok(index)
    }

    pub fn raw_set_pin_function(&self, pin_index: usize, function: u8) -> GpioResult<()> {
        if function > 0b111 {
            return Err(GpioError::InvalidArgument);
        }

        if pin_index >= Self::PIN_COUNT {
            return Err(GpioError::InvalidArgument);
        }

        let mmap = self.mmap.as_mut_ptr() as *mut u32;
        // GPFSELn register
        let register_ptr = unsafe { mmap.add(pin_index / 10) };
        let shift = (pin_index % 10) * 3;

        let mut register_value = unsafe { register_ptr.read_volatile() };
        register_value &= !(0b111 << shift); // Clear the bits for this pin
        register_value |= (function as u32) << shift;
        unsafe { register_ptr.write_volatile(register_value) };

        Ok(())
    }

    /// Writes `mask` to GPSETn (`high`) or GPCLRn of `bank`. Pins outside the mask are untouched.
    fn raw_write_bank(&self, bank: u8, mask: u32, high: bool) -> GpioResult<()> {
        if bank as usize * Self::PORT_WIDTH as usize >= Self::PIN_COUNT {
            return Err(GpioError::InvalidArgument);
        }
        if mask == 0 {
            return Ok(());
        }

        let mmap = self.mmap.as_mut_ptr() as *mut u32;
        // GPSETn/GPCLRn register
        let base = if high { Self::GPSET0 } else { Self::GPCLR0 };
        let register_ptr = unsafe { mmap.add(base + bank as usize) };
        unsafe { register_ptr.write_volatile(mask) };

        trace!("Bank {} {}: {:032b}", bank, if high { "set" } else { "clear" }, mask);
        Ok(())
    }

    /// Claims every pin of `pins` as a low output.
    ///
    /// # Errors
    /// - `GpioError::InvalidArgument` if a pin doesn't exist on this chip,
    /// - `GpioError::AlreadyInUse` if a pin is already claimed. Nothing is claimed then.
    pub fn claim(&self, pins: &PinMap) -> GpioResult<()> {
        let mut indices = [0usize; 6];
        for (slot, pin) in indices.iter_mut().zip(pins.pins()) {
            *slot = Self::index(pin)?;
        }

        if indices.iter().any(|&index| self.used_pins[index]) {
            return Err(GpioError::AlreadyInUse);
        }

        for (pin, &index) in pins.pins().iter().zip(&indices) {
            self.used_pins.set_aliased(index, true);
            self.set_low(*pin)?;
            self.raw_set_pin_function(index, 1)?; // Set to output
            debug!("Claimed GPIO{} ({}) as output", index, pin);
        }
        Ok(())
    }

    /// Returns the pins of `pins` to inputs and releases them.
    pub fn release(&self, pins: &PinMap) -> GpioResult<()> {
        for pin in pins.pins() {
            let index = Self::index(pin)?;
            self.raw_set_pin_function(index, 0)?; // Set to input
            self.used_pins.set_aliased(index, false);
        }
        Ok(())
    }

    fn claimed(&self, pin: PinId) -> GpioResult<usize> {
        let index = Self::index(pin)?;
        if !self.used_pins[index] {
            return Err(GpioError::InvalidArgument);
        }
        Ok(index)
    }
}

impl Debug for RawGpioDriver {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "RawGpioDriver({:?})", self.mmap.as_ptr().addr())
    }
}

impl GpioPort for RawGpioDriver {
    fn set_high(&self, pin: PinId) -> GpioResult<()> {
        self.claimed(pin)?;
        self.raw_write_bank(pin.port, 1 << pin.bit, true)
    }

    fn set_low(&self, pin: PinId) -> GpioResult<()> {
        self.claimed(pin)?;
        self.raw_write_bank(pin.port, 1 << pin.bit, false)
    }

    fn write_bits(&self, first: PinId, count: u8, value: u8) -> GpioResult<()> {
        for i in 0..count {
            self.claimed(first.offset(i))?;
        }

        let field = (1u32 << count) - 1;
        let bits = u32::from(value) & field;
        self.raw_write_bank(first.port, (!bits & field) << first.bit, false)?;
        self.raw_write_bank(first.port, bits << first.bit, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pin_index_spans_banks() {
        assert_eq!(RawGpioDriver::index(PinId::new(0, 17)), Ok(17));
        assert_eq!(RawGpioDriver::index(PinId::new(1, 0)), Ok(32));
        assert_eq!(RawGpioDriver::index(PinId::new(1, 25)), Ok(57));
    }

    #[test]
    fn pin_index_rejects_missing_pins() {
        assert_eq!(
            RawGpioDriver::index(PinId::new(1, 26)),
            Err(GpioError::InvalidArgument)
        );
        assert_eq!(
            RawGpioDriver::index(PinId::new(0, 32)),
            Err(GpioError::InvalidArgument)
        );
        assert_eq!(
            RawGpioDriver::index(PinId::new(2, 0)),
            Err(GpioError::InvalidArgument)
        );
    }
}
