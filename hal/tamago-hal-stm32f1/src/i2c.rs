//! I2C adapter for STM32F1
//!
//! Provides I2C communication for the BMP180 sensor and the 24FC256 EEPROM
//! on I2C2 (PB10/PB11).

use embassy_stm32::time::Hertz;
use embedded_hal::i2c::{Error as _, ErrorKind};
use tamago_hal::i2c::I2cConfig;

/// Error from I2C operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum I2cBusError {
    /// Bus error
    Bus,
    /// Arbitration lost
    ArbitrationLost,
    /// NACK received
    Nack,
    /// Overrun
    Overrun,
    /// Other error
    Other,
}

impl From<ErrorKind> for I2cBusError {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::Bus => I2cBusError::Bus,
            ErrorKind::ArbitrationLoss => I2cBusError::ArbitrationLost,
            ErrorKind::NoAcknowledge(_) => I2cBusError::Nack,
            ErrorKind::Overrun => I2cBusError::Overrun,
            _ => I2cBusError::Other,
        }
    }
}

/// I2C bus adapter over an `embedded-hal` I2C master
pub struct HalI2c<I> {
    bus: I,
}

impl<I: embedded_hal::i2c::I2c> HalI2c<I> {
    /// Wrap an I2C master
    pub fn new(bus: I) -> Self {
        Self { bus }
    }
}

impl<I: embedded_hal::i2c::I2c> tamago_hal::I2cBus for HalI2c<I> {
    type Error = I2cBusError;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.bus
            .write(address, data)
            .map_err(|e| I2cBusError::from(e.kind()))
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.bus
            .write_read(address, write_data, read_buf)
            .map_err(|e| I2cBusError::from(e.kind()))
    }
}

/// Convert a chip-independent I2C configuration to embassy-stm32's
pub fn i2c_config(config: &I2cConfig) -> embassy_stm32::i2c::Config {
    let mut out = embassy_stm32::i2c::Config::default();
    out.frequency = Hertz(config.frequency);
    out
}
