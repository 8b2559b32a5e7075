mod config;

use crate::config::DemoConfig;
use dotenv::dotenv;
use lcd16x2_gpio::delay::SpinDelay;
use lcd16x2_gpio::lcd::hd44780::driver::{GpioHD44780Driver, HD44780Driver, HD44780Ext};
use lcd16x2_gpio::raw::RawGpioDriver;
use log::{debug, info};
use std::thread::sleep;
use std::time::Duration;
use sysinfo::System;

fn main() -> eyre::Result<()> {
    // Initialize environment and logger
    dotenv().ok();
    pretty_env_logger::init();

    const UNKNOWN_STR: &str = "???";

    info!(
        "LCD demo on {} ({})",
        System::host_name().as_deref().unwrap_or(UNKNOWN_STR),
        System::cpu_arch(),
    );

    let config = DemoConfig::from_env()?;
    info!(
        "LCD @ EN: {}, RS: {}, Data: {:?}, {:?}, cursor {:?}",
        config.pins.enable(),
        config.pins.register_select(),
        config.pins.data(),
        config.geometry,
        config.cursor,
    );

    debug!("Initializing GPIO driver...");
    let gpio = RawGpioDriver::new_gpiomem()?;
    gpio.claim(&config.pins)?;
    debug!("{:?} initialized.", gpio);

    let mut lcd = GpioHD44780Driver::new(&gpio, config.pins, config.geometry, SpinDelay::new());
    lcd.init(config.cursor)?;
    info!("LCD initialized");

    lcd.set_position(0, 0)?;
    lcd.print_str("Teste LCD 16x2")?;

    lcd.set_position(1, 0)?;
    lcd.print_float(-9237.0989)?;

    lcd.set_position(0, 15)?;
    lcd.print_char(b'?')?;

    let mut counter: i16 = 0;
    loop {
        lcd.set_position(1, 11)?;
        lcd.print_int(counter)?;

        counter = (counter + 1) % 10_000;
        sleep(Duration::from_millis(100));
    }
}
