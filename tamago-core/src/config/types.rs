//! Configuration type definitions
//!
//! These types represent the device configuration. The firmware build
//! script reads them from `tamago.toml` and embeds them as postcard binary
//! data. Every field has a default, so a partial file is valid.

use serde::{Deserialize, Serialize};

/// Current configuration layout version
pub const CONFIG_VERSION: u8 = 1;

/// Complete device configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(default)]
pub struct DeviceConfig {
    /// Layout version (must equal [`CONFIG_VERSION`])
    pub version: u8,
    pub scan: ScanConfig,
    pub animation: AnimationConfig,
    pub clock: ClockConfig,
    pub lifecycle: LifeCycleConfig,
    pub peripherals: PeripheralConfig,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            scan: ScanConfig::default(),
            animation: AnimationConfig::default(),
            clock: ClockConfig::default(),
            lifecycle: LifeCycleConfig::default(),
            peripherals: PeripheralConfig::default(),
        }
    }
}

/// Display scan-out timing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(default)]
pub struct ScanConfig {
    /// Time per scanline in milliseconds
    pub period_ms: u16,
    /// Latch pulse width in microseconds (at least 1)
    pub latch_pulse_us: u16,
    /// Rows lit for this long per scanline, then blanked (None = whole period)
    pub on_time_us: Option<u16>,
    /// Output-enable is active low
    pub oe_active_low: bool,
    /// Shift clock in Hz
    pub spi_frequency_hz: u32,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            period_ms: 5,
            latch_pulse_us: 1,
            on_time_us: None,
            oe_active_low: false,
            spi_frequency_hz: 4_000_000,
        }
    }
}

/// Animation timing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(default)]
pub struct AnimationConfig {
    /// Player update cadence in milliseconds
    pub tick_ms: u32,
    /// Refresh interval for living pets
    pub default_rate_ms: u16,
    /// Refresh interval for the ghost
    pub ghost_rate_ms: u16,
    /// Seconds the hatching frame is shown after the egg hatches
    pub hatch_duration_s: u32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            tick_ms: 1,
            default_rate_ms: 500,
            ghost_rate_ms: 750,
            hatch_duration_s: 2,
        }
    }
}

/// Clock face
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(default)]
pub struct ClockConfig {
    /// Time of day at power-on
    pub start_hours: u8,
    pub start_minutes: u8,
    /// Clock face period in seconds (0 disables)
    pub show_every_s: u32,
    /// Seconds of each period the clock face is shown
    pub show_for_s: u32,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            start_hours: 12,
            start_minutes: 0,
            show_every_s: 60,
            show_for_s: 5,
        }
    }
}

/// Life-cycle thresholds and behaviour
///
/// Ages are seconds since the egg appeared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(default)]
pub struct LifeCycleConfig {
    /// Life-cycle update cadence in milliseconds
    pub tick_ms: u32,
    pub hatch_at_s: u32,
    pub child_at_s: u32,
    pub teen_at_s: u32,
    pub adult_at_s: u32,
    /// Maskutchi becomes Oyajitchi at this age without new care mistakes
    pub special_at_s: u32,
    /// Age of natural death
    pub lifespan_s: u32,
    /// Care mistakes that kill the pet
    pub max_care_mistakes: u8,
    pub sleep_from_hour: u8,
    pub wake_at_hour: u8,
    /// Comfortable ambient range, 0.1°C
    pub comfort_min_x10: i16,
    pub comfort_max_x10: i16,
    /// Stats save interval in seconds (0 disables saving)
    pub save_every_s: u32,
}

impl Default for LifeCycleConfig {
    fn default() -> Self {
        Self {
            tick_ms: 1000,
            hatch_at_s: 300,
            child_at_s: 3900,
            teen_at_s: 7500,
            adult_at_s: 18300,
            special_at_s: 25500,
            lifespan_s: 172_800,
            max_care_mistakes: 12,
            sleep_from_hour: 21,
            wake_at_hour: 8,
            comfort_min_x10: 150,
            comfort_max_x10: 300,
            save_every_s: 300,
        }
    }
}

/// Optional peripherals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(default)]
pub struct PeripheralConfig {
    /// Probe for a BMP180 temperature sensor
    pub temperature_sensor: bool,
    /// Probe for a 24FC256 EEPROM
    pub eeprom: bool,
    /// Temperature sampling period in milliseconds
    pub sensor_period_ms: u32,
    /// I2C clock in Hz
    pub i2c_frequency_hz: u32,
}

impl Default for PeripheralConfig {
    fn default() -> Self {
        Self {
            temperature_sensor: true,
            eeprom: true,
            sensor_period_ms: 10_000,
            i2c_frequency_hz: 100_000,
        }
    }
}
