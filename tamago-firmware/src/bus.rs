//! Shared I2C bus
//!
//! The BMP180 and the 24FC256 sit on the same I2C2 bus but are driven from
//! different tasks. Every transfer runs to completion inside one lock, and
//! all tasks run on the thread-mode executor, so a blocking mutex is enough.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::ThreadModeRawMutex;
use embassy_sync::blocking_mutex::Mutex;

use tamago_hal::I2cBus;
use tamago_hal_stm32f1::I2cBusError;

use crate::board::BoardI2c;

/// Bus owned by the composition root
pub type I2cMutex = Mutex<ThreadModeRawMutex, RefCell<BoardI2c>>;

/// Handle to the shared bus, one per device driver
#[derive(Clone, Copy)]
pub struct SharedI2c {
    bus: &'static I2cMutex,
}

impl SharedI2c {
    pub fn new(bus: &'static I2cMutex) -> Self {
        Self { bus }
    }
}

impl I2cBus for SharedI2c {
    type Error = I2cBusError;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), I2cBusError> {
        self.bus.lock(|bus| bus.borrow_mut().write(address, data))
    }

    fn write_read(
        &mut self,
        address: u8,
        write: &[u8],
        read: &mut [u8],
    ) -> Result<(), I2cBusError> {
        self.bus
            .lock(|bus| bus.borrow_mut().write_read(address, write, read))
    }
}
