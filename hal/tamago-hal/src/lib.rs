//! Tamago Hardware Abstraction Layer
//!
//! This crate defines the hardware abstraction traits the display and
//! animation core is written against. Chip-specific HALs (STM32F1, host
//! mocks in tests) implement them, so the scan-out protocol and the
//! peripheral drivers run unchanged on the device and on the host.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (tamago-firmware)          │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  tamago-core / tamago-drivers           │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  tamago-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │  tamago-hal-  │
//!             │    stm32f1    │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`] - Digital output (OE, latch, row select)
//! - [`spi::SpiBus`] - Serial shift-out to the panel
//! - [`i2c::I2cBus`] - I2C bus operations (sensor, EEPROM)
//! - [`delay::PreciseDelay`] - Microsecond busy-wait

#![no_std]
#![deny(unsafe_code)]

pub mod delay;
pub mod gpio;
pub mod i2c;
pub mod spi;

// Re-export key traits at crate root for convenience
pub use delay::PreciseDelay;
pub use gpio::OutputPin;
pub use i2c::{I2cBus, I2cConfig};
pub use spi::{SpiBus, SpiConfig};
