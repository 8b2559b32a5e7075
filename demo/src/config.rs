use dotenv::var;
use lcd16x2_gpio::PinId;
use lcd16x2_gpio::lcd::hd44780::config::{DataLines, Geometry, PinMap};
use lcd16x2_gpio::lcd::hd44780::driver::CursorStyle;
use lcd16x2_gpio::raw::RawGpioDriver;
use thiserror::Error;

#[derive(Debug, Error, Eq, PartialEq)]
pub enum ParseError {
    #[error("invalid pin `{0}`, expected a GPIO number or `bank.bit`")]
    Pin(String),
    #[error("invalid number `{0}`")]
    Number(String),
    #[error("invalid cursor style `{0}`, expected off, on or blink")]
    Cursor(String),
    #[error("invalid geometry `{0}`, expected 16x2 or 16x4")]
    Geometry(String),
}

#[derive(Debug)]
pub struct DemoConfig {
    pub pins: PinMap,
    pub cursor: CursorStyle,
    pub geometry: Geometry,
}

impl DemoConfig {
    /// Reads the `LCD16X2_*` variables (after `dotenv()` has run).
    pub fn from_env() -> eyre::Result<Self> {
        let enable = parse_pin(&var("LCD16X2_PIN_EN")?)?;
        let register_select = parse_pin(&var("LCD16X2_PIN_RS")?)?;
        let data = DataLines::new(
            parse_number(&var("LCD16X2_DATA_PORT")?)?,
            parse_number(&var("LCD16X2_DATA_BASE")?)?,
        );
        let cursor = parse_cursor(&var("LCD16X2_CURSOR").unwrap_or_else(|_| "on".to_string()))?;
        let geometry =
            parse_geometry(&var("LCD16X2_GEOMETRY").unwrap_or_else(|_| "16x2".to_string()))?;

        let pins =
            PinMap::with_port_width(RawGpioDriver::PORT_WIDTH, enable, register_select, data)?;

        Ok(Self {
            pins,
            cursor,
            geometry,
        })
    }
}

fn parse_number(s: &str) -> Result<u8, ParseError> {
    s.trim()
        .parse()
        .map_err(|_| ParseError::Number(s.to_string()))
}

/// Accepts a plain GPIO number (`17`) or an explicit bank and bit (`0.17`).
pub fn parse_pin(s: &str) -> Result<PinId, ParseError> {
    let err = || ParseError::Pin(s.to_string());
    let s = s.trim();
    match s.split_once('.') {
        Some((port, bit)) => Ok(PinId::new(
            port.parse().map_err(|_| err())?,
            bit.parse().map_err(|_| err())?,
        )),
        None => {
            let gpio: u8 = s.parse().map_err(|_| err())?;
            Ok(PinId::new(
                gpio / RawGpioDriver::PORT_WIDTH,
                gpio % RawGpioDriver::PORT_WIDTH,
            ))
        }
    }
}

pub fn parse_cursor(s: &str) -> Result<CursorStyle, ParseError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "off" | "hidden" => Ok(CursorStyle::Hidden),
        "on" | "underline" => Ok(CursorStyle::Underline),
        "blink" => Ok(CursorStyle::Blink),
        _ => Err(ParseError::Cursor(s.to_string())),
    }
}

pub fn parse_geometry(s: &str) -> Result<Geometry, ParseError> {
    match s.trim() {
        "16x2" => Ok(Geometry::Lcd16x2),
        "16x4" => Ok(Geometry::Lcd16x4),
        _ => Err(ParseError::Geometry(s.to_string())),
    }
}
