//! Wiring and geometry of an HD44780 module.

use crate::PinId;
use thiserror::Error;

/// Port width assumed by [PinMap::new], matching the 8-bit I/O ports of small microcontrollers.
pub const DEFAULT_PORT_WIDTH: u8 = 8;

#[derive(Debug, Error, Eq, PartialEq, Clone)]
pub enum ConfigError {
    #[error("port width {0} is not between 4 and 32")]
    InvalidPortWidth(u8),
    #[error("{signal} pin {pin} is outside a {width}-bit port")]
    PinOutOfRange {
        signal: &'static str,
        pin: PinId,
        width: u8,
    },
    #[error("data base bit {base} pushes the nibble past a {width}-bit port")]
    DataBaseOutOfRange { base: u8, width: u8 },
    #[error("EN and RS share pin {0}")]
    SharedControlPin(PinId),
    #[error("{signal} pin {pin} overlaps the data lines")]
    DataOverlap { signal: &'static str, pin: PinId },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// The four data lines D4..D7, which must sit on consecutive bits of one port.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct DataLines {
    pub port: u8,
    /// Bit carrying D4; D5..D7 follow on the next three bits.
    pub base: u8,
}

impl DataLines {
    pub const WIDTH: u8 = 4;

    pub const fn new(port: u8, base: u8) -> Self {
        Self { port, base }
    }

    /// Pin carrying D4.
    pub const fn first(&self) -> PinId {
        PinId::new(self.port, self.base)
    }

    pub fn contains(&self, pin: PinId) -> bool {
        pin.port == self.port && (self.base..self.base + Self::WIDTH).contains(&pin.bit)
    }

    pub fn pins(&self) -> [PinId; 4] {
        let first = self.first();
        [first, first.offset(1), first.offset(2), first.offset(3)]
    }
}

/// Validated pin assignment of the six LCD signals.
///
/// Can only be obtained through [PinMap::new] or [PinMap::with_port_width], so a driver holding one
/// never has to re-check it.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct PinMap {
    enable: PinId,
    register_select: PinId,
    data: DataLines,
}

impl PinMap {
    /// Validates the pin assignment against [DEFAULT_PORT_WIDTH]-bit ports.
    pub fn new(enable: PinId, register_select: PinId, data: DataLines) -> ConfigResult<Self> {
        Self::with_port_width(DEFAULT_PORT_WIDTH, enable, register_select, data)
    }

    /// Validates the pin assignment against ports `width` bits wide.
    ///
    /// # Errors
    /// - [ConfigError::InvalidPortWidth] if `width` can't hold a nibble or exceeds 32 bits,
    /// - [ConfigError::PinOutOfRange] if EN or RS sits beyond the port width,
    /// - [ConfigError::DataBaseOutOfRange] if D7 would land beyond the port width,
    /// - [ConfigError::SharedControlPin] if EN and RS are the same pin,
    /// - [ConfigError::DataOverlap] if EN or RS is one of the data lines.
    pub fn with_port_width(
        width: u8,
        enable: PinId,
        register_select: PinId,
        data: DataLines,
    ) -> ConfigResult<Self> {
        if !(DataLines::WIDTH..=32).contains(&width) {
            return Err(ConfigError::InvalidPortWidth(width));
        }

        for (signal, pin) in [("EN", enable), ("RS", register_select)] {
            if pin.bit >= width {
                return Err(ConfigError::PinOutOfRange { signal, pin, width });
            }
        }

        if data.base > width - DataLines::WIDTH {
            return Err(ConfigError::DataBaseOutOfRange {
                base: data.base,
                width,
            });
        }

        if enable == register_select {
            return Err(ConfigError::SharedControlPin(enable));
        }

        for (signal, pin) in [("EN", enable), ("RS", register_select)] {
            if data.contains(pin) {
                return Err(ConfigError::DataOverlap { signal, pin });
            }
        }

        Ok(Self {
            enable,
            register_select,
            data,
        })
    }

    pub fn enable(&self) -> PinId {
        self.enable
    }

    pub fn register_select(&self) -> PinId {
        self.register_select
    }

    pub fn data(&self) -> DataLines {
        self.data
    }

    /// All six pins: EN, RS, then D4..D7.
    pub fn pins(&self) -> [PinId; 6] {
        let [d4, d5, d6, d7] = self.data.pins();
        [self.enable, self.register_select, d4, d5, d6, d7]
    }
}

/// Visible layout of the module.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum Geometry {
    #[default]
    Lcd16x2,
    Lcd16x4,
}

impl Geometry {
    pub const COLUMNS: u8 = 16;

    pub fn rows(&self) -> u8 {
        match self {
            Geometry::Lcd16x2 => 2,
            Geometry::Lcd16x4 => 4,
        }
    }

    /// DDRAM address of the first cell of `row`, or `None` if the row doesn't exist.
    ///
    /// 16x4 modules are 2-line controllers with each line folded in two: rows 2 and 3 continue
    /// rows 0 and 1 at offset 16.
    pub fn row_address(&self, row: u8) -> Option<u8> {
        if row >= self.rows() {
            return None;
        }
        Some(match row {
            0 => 0x00,
            1 => 0x40,
            2 => 0x10,
            _ => 0x50,
        })
    }

    /// DDRAM address of the cell at (`row`, `column`), or `None` if it isn't visible.
    pub fn address(&self, row: u8, column: u8) -> Option<u8> {
        if column >= Self::COLUMNS {
            return None;
        }
        self.row_address(row).map(|base| base + column)
    }
}
