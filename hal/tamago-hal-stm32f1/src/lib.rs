//! STM32F1-specific HAL for the Tamago firmware
//!
//! This crate bridges embassy-stm32 peripherals to the `tamago-hal` traits.
//! It supports STM32F1 chips including:
//!
//! - STM32F103C8 (Blue Pill, the reference Tamago board)
//! - STM32F103CB
//!
//! # Features
//!
//! - `stm32f103c8` - Enable support for STM32F103C8T6
//! - `stm32f103cb` - Enable support for STM32F103CBT6
//! - `defmt` - Enable debug formatting support
//!
//! # Usage
//!
//! The firmware constructs blocking embassy-stm32 drivers and wraps them in
//! the adapters here ([`HalPin`], [`HalSpi`], [`HalI2c`], [`CycleDelay`]) so
//! that `tamago-core` and `tamago-drivers` can drive them through the
//! chip-independent traits.

#![no_std]

pub mod delay;
pub mod gpio;
pub mod i2c;
pub mod spi;

pub use delay::CycleDelay;
pub use gpio::HalPin;
pub use i2c::{HalI2c, I2cBusError};
pub use spi::{HalSpi, SpiBusError};
