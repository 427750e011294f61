//! Temperature sensors

pub mod bmp180;

pub use bmp180::{Bmp180, CONVERSION_TIME_US};
