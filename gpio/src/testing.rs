//! Recording collaborators and a behavioural HD44780 model for tests.

use crate::delay::Delay;
use crate::lcd::hd44780::config::{DataLines, Geometry, PinMap};
use crate::lcd::hd44780::driver::GpioHD44780Driver;
use crate::{GpioError, GpioPort, GpioResult, PinId};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BusEvent {
    Level { pin: PinId, high: bool },
    Delay(Duration),
}

type Log = Rc<RefCell<Vec<BusEvent>>>;

/// What the controller latched on one falling edge of E.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Frame {
    pub rs: bool,
    pub nibble: u8,
}

#[derive(Debug, Default)]
pub struct RecordingPort {
    log: Log,
    failing: RefCell<Option<PinId>>,
}

impl RecordingPort {
    pub fn events(&self) -> Vec<BusEvent> {
        self.log.borrow().clone()
    }

    /// Makes every write to `pin` fail from now on.
    pub fn fail_on(&self, pin: PinId) {
        *self.failing.borrow_mut() = Some(pin);
    }

    fn record(&self, pin: PinId, high: bool) -> GpioResult<()> {
        if *self.failing.borrow() == Some(pin) {
            return Err(GpioError::NotSupported);
        }
        self.log.borrow_mut().push(BusEvent::Level { pin, high });
        Ok(())
    }
}

impl GpioPort for RecordingPort {
    fn set_high(&self, pin: PinId) -> GpioResult<()> {
        self.record(pin, true)
    }

    fn set_low(&self, pin: PinId) -> GpioResult<()> {
        self.record(pin, false)
    }
}

#[derive(Debug)]
pub struct RecordingDelay {
    log: Log,
}

impl Delay for RecordingDelay {
    fn delay(&mut self, duration: Duration) {
        self.log.borrow_mut().push(BusEvent::Delay(duration));
    }
}

/// A recording port and delay sharing one ordered log, wired like the reference board:
/// EN on P1.6, RS on P1.7, D4..D7 on P1.0..P1.3.
pub struct Rig {
    pub port: RecordingPort,
    pub pins: PinMap,
    pub geometry: Geometry,
}

impl Rig {
    pub fn new() -> Self {
        let pins = PinMap::new(PinId::new(1, 6), PinId::new(1, 7), DataLines::new(1, 0))
            .expect("reference wiring is valid");
        Self::with_pins(pins)
    }

    pub fn with_pins(pins: PinMap) -> Self {
        Self {
            port: RecordingPort::default(),
            pins,
            geometry: Geometry::Lcd16x2,
        }
    }

    pub fn with_geometry(geometry: Geometry) -> Self {
        Self {
            geometry,
            ..Self::new()
        }
    }

    pub fn driver(&self) -> GpioHD44780Driver<'_, RecordingDelay> {
        let delay = RecordingDelay {
            log: self.port.log.clone(),
        };
        GpioHD44780Driver::new(&self.port, self.pins, self.geometry, delay)
    }

    pub fn events(&self) -> Vec<BusEvent> {
        self.port.events()
    }

    pub fn take_events(&self) -> Vec<BusEvent> {
        std::mem::take(&mut *self.port.log.borrow_mut())
    }

    pub fn frames(&self) -> Vec<Frame> {
        Self::frames_of(&self.pins, &self.events())
    }

    /// Replays `events` and returns what was latched on each falling edge of E.
    pub fn frames_of(pins: &PinMap, events: &[BusEvent]) -> Vec<Frame> {
        let mut frames = Vec::new();
        replay(pins, events, |levels| frames.push(latch(pins, levels)), |_| {});
        frames
    }

    /// Frames paired up into (RS, byte), for traffic after the reset handshake.
    pub fn bytes(&self) -> Vec<(bool, u8)> {
        let frames = self.frames();
        assert_eq!(frames.len() % 2, 0, "odd number of nibbles: {:?}", frames);
        frames
            .chunks(2)
            .map(|pair| (pair[1].rs, pair[0].nibble << 4 | pair[1].nibble))
            .collect()
    }

    pub fn enable_pulses(&self) -> usize {
        let en = self.pins.enable();
        let mut high = false;
        let mut pulses = 0;
        for event in self.events() {
            if let BusEvent::Level { pin, high: level } = event {
                if pin == en {
                    if level && !high {
                        pulses += 1;
                    }
                    high = level;
                }
            }
        }
        pulses
    }

    /// Total delay between each latched frame and the next one (or the end of the log).
    pub fn waits_after_frames(&self) -> Vec<Duration> {
        let waits = RefCell::new(Vec::<Duration>::new());
        replay(
            &self.pins,
            &self.events(),
            |_| waits.borrow_mut().push(Duration::ZERO),
            |duration| {
                if let Some(last) = waits.borrow_mut().last_mut() {
                    *last += duration;
                }
            },
        );
        waits.into_inner()
    }
}

fn replay(
    pins: &PinMap,
    events: &[BusEvent],
    mut on_latch: impl FnMut(&HashMap<PinId, bool>),
    mut on_delay: impl FnMut(Duration),
) {
    let en = pins.enable();
    let mut levels: HashMap<PinId, bool> = HashMap::new();
    for event in events {
        match *event {
            BusEvent::Level { pin, high } => {
                let was_high = levels.get(&pin).copied().unwrap_or(false);
                if pin == en && was_high && !high {
                    on_latch(&levels);
                }
                levels.insert(pin, high);
            }
            BusEvent::Delay(duration) => on_delay(duration),
        }
    }
}

fn latch(pins: &PinMap, levels: &HashMap<PinId, bool>) -> Frame {
    let level = |pin: &PinId| levels.get(pin).copied().unwrap_or(false);
    let nibble = pins
        .data()
        .pins()
        .iter()
        .enumerate()
        .fold(0, |acc, (i, pin)| acc | (u8::from(level(pin)) << i));
    Frame {
        rs: level(&pins.register_select()),
        nibble,
    }
}

/// Where the controller's bus interface stands before the driver starts talking.
#[derive(Debug, Copy, Clone)]
pub enum StartState {
    /// Fresh power-on: 8-bit interface.
    EightBit,
    /// Already in 4-bit mode, between bytes.
    FourBit,
    /// In 4-bit mode with this high nibble already latched.
    FourBitMidByte(u8),
}

/// Instruction-level model of an HD44780 with D0..D3 tied low.
#[derive(Debug)]
pub struct ControllerModel {
    pub eight_bit: bool,
    pub two_lines: bool,
    pub display_on: bool,
    pub cursor_on: bool,
    pub blink_on: bool,
    pub increment: bool,
    pub entry_shift: bool,
    pub address: u8,
    pub display_offset: i32,
    pub ddram: [u8; 128],
    pending: Option<u8>,
}

impl ControllerModel {
    pub fn new(start: StartState) -> Self {
        let (eight_bit, pending) = match start {
            StartState::EightBit => (true, None),
            StartState::FourBit => (false, None),
            StartState::FourBitMidByte(high) => (false, Some(high)),
        };
        Self {
            eight_bit,
            two_lines: false,
            display_on: false,
            cursor_on: false,
            blink_on: false,
            increment: true,
            entry_shift: false,
            address: 0,
            display_offset: 0,
            ddram: [b' '; 128],
            pending,
        }
    }

    pub fn pending_nibble(&self) -> bool {
        self.pending.is_some()
    }

    pub fn feed(&mut self, frames: &[Frame]) {
        for frame in frames {
            if self.eight_bit {
                self.execute(frame.rs, frame.nibble << 4);
                continue;
            }
            match self.pending.take() {
                None => self.pending = Some(frame.nibble),
                Some(high) => self.execute(frame.rs, high << 4 | frame.nibble),
            }
        }
    }

    /// The 16 visible characters of `row`, ignoring display shift.
    pub fn line(&self, row: usize) -> String {
        let start = [0x00, 0x40, 0x10, 0x50][row];
        self.ddram[start..start + 16]
            .iter()
            .map(|&b| b as char)
            .collect()
    }

    fn execute(&mut self, rs: bool, byte: u8) {
        if rs {
            self.ddram[self.address as usize] = byte;
            self.advance(self.increment);
            return;
        }

        if byte & 0x80 != 0 {
            self.address = byte & 0x7F;
        } else if byte & 0x40 != 0 {
            // CGRAM address, not modelled.
        } else if byte & 0x20 != 0 {
            self.eight_bit = byte & 0x10 != 0;
            self.two_lines = byte & 0x08 != 0;
            self.pending = None;
        } else if byte & 0x10 != 0 {
            let right = byte & 0x04 != 0;
            if byte & 0x08 != 0 {
                self.display_offset += if right { 1 } else { -1 };
            } else {
                self.advance(right);
            }
        } else if byte & 0x08 != 0 {
            self.display_on = byte & 0x04 != 0;
            self.cursor_on = byte & 0x02 != 0;
            self.blink_on = byte & 0x01 != 0;
        } else if byte & 0x04 != 0 {
            self.increment = byte & 0x02 != 0;
            self.entry_shift = byte & 0x01 != 0;
        } else if byte & 0x02 != 0 {
            self.address = 0;
            self.display_offset = 0;
        } else if byte & 0x01 != 0 {
            self.ddram = [b' '; 128];
            self.address = 0;
            self.display_offset = 0;
            self.increment = true;
        }
    }

    fn advance(&mut self, forward: bool) {
        let next = if forward {
            self.address.wrapping_add(1)
        } else {
            self.address.wrapping_sub(1)
        };
        self.address = next & 0x7F;
    }
}
