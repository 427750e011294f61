//! Board-agnostic core logic for the Tamago digital pet firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Frame buffers and the producer/scanner hand-off
//! - Row-multiplexed display scan-out
//! - Sprite-sheet animation player and status icons
//! - Clock face and software clock
//! - Pet life cycle and stats persistence codec
//! - Configuration type definitions and validation
//! - Capability traits (temperature sensor, page storage)

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod animation;
pub mod clock;
pub mod config;
pub mod display;
pub mod lifecycle;
pub mod selection;
pub mod traits;
