//! Temperature sensor trait

/// Errors that can occur with temperature sensing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Sensor did not answer on the bus
    NotResponding,
    /// Sensor answered with an unexpected chip id
    WrongChip(u8),
    /// Factory calibration data is unusable (all zeros or all ones)
    InvalidCalibration,
    /// Reading out of expected range
    OutOfRange,
    /// Bus transfer failed during a conversion
    ConversionError,
}

/// Trait for ambient temperature sensors
///
/// The pet's life cycle consumes these readings; a board without a sensor
/// simply has no implementation.
pub trait TemperatureSensor {
    /// Read the current temperature in degrees Celsius
    ///
    /// Returns a fixed-point value with 0.1°C resolution.
    /// For example, 21.5°C is returned as 215.
    ///
    /// Takes `&mut self` because a reading triggers a bus transaction.
    fn read_celsius_x10(&mut self) -> Result<i16, SensorError>;

    /// Read the current temperature in whole degrees Celsius
    fn read_celsius(&mut self) -> Result<i16, SensorError> {
        self.read_celsius_x10().map(|t| t / 10)
    }
}
