//! Tamago - Digital Pet Firmware
//!
//! Main firmware binary for STM32F103 boards driving a 32x16 P10 LED panel.
//! The pet's sprite animations and a periodic clock face are rendered into
//! frames that the scan task multiplexes onto the panel four rows at a time.
//!
//! Configuration comes from tamago.toml, validated and embedded by build.rs.

#![no_std]
#![no_main]

use core::cell::RefCell;

use defmt::*;
use embassy_executor::Spawner;
use embassy_stm32::gpio::{Level, Output, Speed};
use embassy_stm32::i2c::I2c;
use embassy_sync::blocking_mutex::Mutex;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use tamago_core::animation::{AnimationPlayer, Catalog, SpriteSheet, DEFAULT_CATALOG};
use tamago_core::config::DeviceConfig;
use tamago_core::display::ScanPins;
use tamago_core::lifecycle::LifeCycle;
use tamago_drivers::sensor::Bmp180;
use tamago_drivers::storage::M24fc256;
use tamago_hal::I2cConfig;
use tamago_hal_stm32f1::i2c::i2c_config;
use tamago_hal_stm32f1::{HalI2c, HalPin};

use crate::board::board_delay;
use crate::bus::{I2cMutex, SharedI2c};
use crate::tasks::PanelSpi;

mod board;
mod bus;
mod channels;
mod tasks;

/// Postcard-encoded [`DeviceConfig`] produced by build.rs
const CONFIG_BLOB: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/config.bin"));

/// Sprite sheet checked against the catalog by build.rs
static SPRITES: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/sprites.bin"));

static CATALOG: Catalog = DEFAULT_CATALOG;

static I2C_BUS: StaticCell<I2cMutex> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Tamago firmware starting...");

    let p = embassy_stm32::init(Default::default());
    info!("Peripherals initialized");

    let config = load_config();
    if let Err(e) = config.validate() {
        error!("Configuration rejected: {}", e);
        defmt::panic!("invalid configuration");
    }
    info!("Configuration loaded");

    // Sprite catalog problems are configuration defects: refuse to start
    let sheet = match SpriteSheet::new(SPRITES) {
        Ok(sheet) => sheet,
        Err(e) => {
            error!("Sprite sheet rejected: {}", e);
            defmt::panic!("invalid sprite sheet");
        }
    };
    info!("Sprite sheet with {} frames", sheet.num_frames());

    let player = match AnimationPlayer::new(sheet, &CATALOG) {
        Ok(player) => player,
        Err(e) => {
            error!("Animation catalog rejected: {}", e);
            defmt::panic!("invalid animation catalog");
        }
    };

    // Panel control lines; OE starts inactive until the first scanline
    let oe_idle = config.scan.oe_active_low;
    let pins = ScanPins {
        oe: HalPin::new(Output::new(p.PA2, Level::Low, Speed::VeryHigh), oe_idle),
        latch: HalPin::new(Output::new(p.PA3, Level::Low, Speed::VeryHigh), false),
        a: HalPin::new(Output::new(p.PA1, Level::Low, Speed::VeryHigh), false),
        b: HalPin::new(Output::new(p.PA0, Level::Low, Speed::VeryHigh), false),
    };
    let panel = PanelSpi {
        spi: p.SPI1,
        sck: p.PA5,
        mosi: p.PA7,
    };
    info!("Panel pins initialized");

    // Status LED is active low
    let led = HalPin::new(Output::new(p.PC13, Level::High, Speed::Low), true);

    let mut life = LifeCycle::new(config.lifecycle.clone());
    let peripherals = &config.peripherals;

    let mut thermometer = None;
    let mut eeprom = None;
    if peripherals.temperature_sensor || peripherals.eeprom {
        let i2c = I2c::new_blocking(
            p.I2C2,
            p.PB10,
            p.PB11,
            i2c_config(&I2cConfig {
                frequency: peripherals.i2c_frequency_hz,
            }),
        );
        let bus: &'static I2cMutex = I2C_BUS.init(Mutex::new(RefCell::new(HalI2c::new(i2c))));
        info!("I2C2 initialized at {} Hz", peripherals.i2c_frequency_hz);

        if peripherals.temperature_sensor {
            match Bmp180::new(SharedI2c::new(bus), board_delay()) {
                Ok(sensor) => {
                    info!("BMP180 found");
                    thermometer = Some(sensor);
                }
                Err(e) => warn!("BMP180 not available: {}", e),
            }
        }

        if peripherals.eeprom {
            let mut storage = M24fc256::new(SharedI2c::new(bus));
            match storage.probe() {
                Ok(()) => {
                    info!("24FC256 found");
                    tasks::lifecycle::restore(&mut storage, &mut life);
                    eeprom = Some(storage);
                }
                Err(e) => warn!("24FC256 not available: {}", e),
            }
        }
    }

    // Spawn tasks
    spawner.spawn(unwrap!(tasks::scan_task(panel, pins, config.scan)));
    spawner.spawn(unwrap!(tasks::animation_task(player, config.animation)));
    spawner.spawn(unwrap!(tasks::clock_task(config.clock)));
    spawner.spawn(unwrap!(tasks::lifecycle_task(
        life,
        eeprom,
        led,
        config.animation
    )));
    if let Some(sensor) = thermometer {
        spawner.spawn(unwrap!(tasks::sensor_task(
            sensor,
            peripherals.sensor_period_ms
        )));
    }

    info!("All tasks spawned, firmware running");

    // Main task has nothing else to do - all work happens in spawned tasks
}

/// Decode the embedded configuration, falling back to defaults
fn load_config() -> DeviceConfig {
    match postcard::from_bytes::<DeviceConfig>(CONFIG_BLOB) {
        Ok(config) => config,
        Err(_) => {
            warn!("Embedded configuration unreadable, using defaults");
            DeviceConfig::default()
        }
    }
}
