//! Configuration validation

use super::types::{DeviceConfig, CONFIG_VERSION};

/// Configuration defects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Layout version not understood by this firmware
    UnsupportedVersion(u8),
    /// Scan period of zero
    ZeroScanPeriod,
    /// Latch pulse of zero
    ZeroLatchPulse,
    /// Brightness on-time does not fit in the scan period
    OnTimeTooLong,
    /// Zero SPI or I2C clock
    ZeroBusFrequency,
    /// Zero animation, life-cycle or sensor period
    ZeroTick,
    /// Zero frame refresh interval
    ZeroFrameRate,
    /// Life-cycle ages not strictly increasing
    ThresholdOrder,
    /// Hour outside 0..24
    InvalidHour(u8),
    /// Minute outside 0..60
    InvalidMinute(u8),
    /// Comfort band minimum above maximum
    ComfortRange,
}

impl DeviceConfig {
    /// Check the configuration for values the firmware cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version != CONFIG_VERSION {
            return Err(ConfigError::UnsupportedVersion(self.version));
        }

        let scan = &self.scan;
        if scan.period_ms == 0 {
            return Err(ConfigError::ZeroScanPeriod);
        }
        if scan.latch_pulse_us == 0 {
            return Err(ConfigError::ZeroLatchPulse);
        }
        if let Some(on_time) = scan.on_time_us {
            if u32::from(on_time) >= u32::from(scan.period_ms) * 1000 {
                return Err(ConfigError::OnTimeTooLong);
            }
        }
        if scan.spi_frequency_hz == 0 || self.peripherals.i2c_frequency_hz == 0 {
            return Err(ConfigError::ZeroBusFrequency);
        }

        let anim = &self.animation;
        if anim.tick_ms == 0 || self.lifecycle.tick_ms == 0 || self.peripherals.sensor_period_ms == 0
        {
            return Err(ConfigError::ZeroTick);
        }
        if anim.default_rate_ms == 0 || anim.ghost_rate_ms == 0 {
            return Err(ConfigError::ZeroFrameRate);
        }

        let life = &self.lifecycle;
        let ages = [
            life.hatch_at_s,
            life.child_at_s,
            life.teen_at_s,
            life.adult_at_s,
            life.special_at_s,
            life.lifespan_s,
        ];
        if ages.windows(2).any(|w| w[0] >= w[1]) {
            return Err(ConfigError::ThresholdOrder);
        }
        if life.comfort_min_x10 > life.comfort_max_x10 {
            return Err(ConfigError::ComfortRange);
        }

        for hour in [
            self.clock.start_hours,
            life.sleep_from_hour,
            life.wake_at_hour,
        ] {
            if hour >= 24 {
                return Err(ConfigError::InvalidHour(hour));
            }
        }
        if self.clock.start_minutes >= 60 {
            return Err(ConfigError::InvalidMinute(self.clock.start_minutes));
        }

        Ok(())
    }
}
