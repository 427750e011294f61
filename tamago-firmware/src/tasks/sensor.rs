//! Ambient temperature task
//!
//! Samples the BMP180 every period. The conversion wait is an async timer,
//! so the scan task keeps running while the sensor converts.

use defmt::*;
use embassy_time::{Duration, Ticker, Timer};

use tamago_drivers::sensor::{Bmp180, CONVERSION_TIME_US};
use tamago_hal_stm32f1::CycleDelay;

use crate::bus::SharedI2c;
use crate::channels::{running, TEMPERATURE};

/// Temperature sensor on the shared bus
pub type Thermometer = Bmp180<SharedI2c, CycleDelay>;

#[embassy_executor::task]
pub async fn sensor_task(mut sensor: Thermometer, period_ms: u32) {
    info!("Sensor task started");

    let mut ticker = Ticker::every(Duration::from_millis(u64::from(period_ms)));

    while running() {
        match sensor.start_conversion() {
            Ok(()) => {
                Timer::after_micros(u64::from(CONVERSION_TIME_US)).await;
                match sensor.finish_conversion() {
                    Ok(celsius_x10) => {
                        trace!("Ambient {} x0.1 C", celsius_x10);
                        TEMPERATURE.signal(celsius_x10);
                    }
                    Err(e) => warn!("Temperature read failed: {}", e),
                }
            }
            Err(e) => warn!("Temperature conversion failed: {}", e),
        }

        ticker.next().await;
    }

    info!("Sensor task stopped");
}
