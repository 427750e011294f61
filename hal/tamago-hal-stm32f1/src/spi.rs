//! SPI adapter for STM32F1
//!
//! The panel is fed from SPI1 in transmit-only mode (SCK on PA5, MOSI on
//! PA7). embassy-stm32 provides the blocking driver; this module maps it onto
//! [`tamago_hal::SpiBus`] and converts the chip-independent configuration.

use embassy_stm32::spi::{Config, MODE_0, MODE_1, MODE_2, MODE_3};
use embassy_stm32::time::Hertz;
use embedded_hal::spi::{Error as _, ErrorKind};
use tamago_hal::spi::{Mode, Phase, Polarity, SpiConfig};

/// Error from SPI operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpiBusError {
    /// Receive overrun
    Overrun,
    /// Mode fault (multi-master conflict)
    ModeFault,
    /// Frame format error
    FrameFormat,
    /// Other error
    Other,
}

impl From<ErrorKind> for SpiBusError {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::Overrun => SpiBusError::Overrun,
            ErrorKind::ModeFault => SpiBusError::ModeFault,
            ErrorKind::FrameFormat => SpiBusError::FrameFormat,
            _ => SpiBusError::Other,
        }
    }
}

/// SPI bus adapter over an `embedded-hal` SPI bus
pub struct HalSpi<S> {
    bus: S,
}

impl<S: embedded_hal::spi::SpiBus<u8>> HalSpi<S> {
    /// Wrap an SPI bus
    pub fn new(bus: S) -> Self {
        Self { bus }
    }
}

impl<S: embedded_hal::spi::SpiBus<u8>> tamago_hal::SpiBus for HalSpi<S> {
    type Error = SpiBusError;

    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.bus
            .write(data)
            .and_then(|()| self.bus.flush())
            .map_err(|e| SpiBusError::from(e.kind()))
    }
}

/// Convert a chip-independent SPI configuration to embassy-stm32's
pub fn spi_config(config: &SpiConfig) -> Config {
    let mode = match (config.polarity, config.phase) {
        (Polarity::IdleLow, Phase::CaptureOnFirstTransition) => MODE_0,
        (Polarity::IdleLow, Phase::CaptureOnSecondTransition) => MODE_1,
        (Polarity::IdleHigh, Phase::CaptureOnFirstTransition) => MODE_2,
        (Polarity::IdleHigh, Phase::CaptureOnSecondTransition) => MODE_3,
    };

    let mut out = Config::default();
    out.frequency = Hertz(config.frequency);
    out.mode = mode;
    out
}

/// Default panel SPI configuration: mode 0 at the given frequency
pub fn panel_spi_config(frequency: u32) -> Config {
    spi_config(&SpiConfig::with_mode(frequency, Mode::Mode0))
}
