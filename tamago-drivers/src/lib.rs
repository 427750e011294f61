//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the capability traits
//! defined in tamago-core for the optional peripherals on the I2C bus:
//!
//! - Temperature sensor (Bosch BMP180)
//! - Serial EEPROM (Microchip 24FC256)

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod sensor;
pub mod storage;
