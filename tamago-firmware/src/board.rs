//! Board definition
//!
//! Reference wiring of a Blue Pill (STM32F103C8) to a single P10 panel:
//!
//! | Signal        | Pin  |
//! |---------------|------|
//! | OE            | PA2  |
//! | A             | PA1  |
//! | B             | PA0  |
//! | Latch (SCLK)  | PA3  |
//! | SPI1 SCK      | PA5  |
//! | SPI1 MOSI     | PA7  |
//! | I2C2 SCL      | PB10 |
//! | I2C2 SDA      | PB11 |
//! | Status LED    | PC13 |

use embassy_stm32::gpio::Output;
use embassy_stm32::i2c::{I2c, Master};
use embassy_stm32::mode::Blocking;

use tamago_hal_stm32f1::{CycleDelay, HalI2c, HalPin};

/// Core clock after `embassy_stm32::init` with the default (HSI) setup
pub const SYSCLK_HZ: u32 = 8_000_000;

/// Storage page holding the stats record
pub const STATS_PAGE: u16 = 0;

/// Push-pull output adapted to `tamago-hal`
pub type BoardPin = HalPin<Output<'static>>;

/// I2C2, shared by the sensor and the EEPROM
pub type BoardI2c = HalI2c<I2c<'static, Blocking, Master>>;

/// Busy-wait delay at the board's core clock
pub const fn board_delay() -> CycleDelay {
    CycleDelay::new(SYSCLK_HZ)
}
