//! Display scan-out task
//!
//! Drives one scanline per period from whichever frame is registered on
//! the frame bus. A full refresh takes four periods (50 Hz at 5 ms).

use defmt::*;
use embassy_stm32::peripherals::{PA5, PA7, SPI1};
use embassy_stm32::spi::Spi;
use embassy_stm32::Peri;
use embassy_time::{Duration, Ticker};

use tamago_core::config::ScanConfig;
use tamago_core::display::{DisplayScanner, ScanPins};
use tamago_hal_stm32f1::spi::panel_spi_config;
use tamago_hal_stm32f1::HalSpi;

use crate::board::{board_delay, BoardPin};
use crate::channels::{running, FRAME_BUS};

/// SPI1 and its transmit pins, handed over unconfigured
pub struct PanelSpi {
    pub spi: Peri<'static, SPI1>,
    pub sck: Peri<'static, PA5>,
    pub mosi: Peri<'static, PA7>,
}

/// Scan task - refreshes the panel forever
#[embassy_executor::task]
pub async fn scan_task(panel: PanelSpi, pins: ScanPins<BoardPin>, config: ScanConfig) {
    info!("Scan task started");

    let spi = Spi::new_blocking_txonly(
        panel.spi,
        panel.sck,
        panel.mosi,
        panel_spi_config(config.spi_frequency_hz),
    );
    let mut scanner = DisplayScanner::new(HalSpi::new(spi), pins, board_delay(), config);

    let mut ticker = Ticker::every(Duration::from_millis(u64::from(config.period_ms)));
    let mut dropped: u32 = 0;

    while running() {
        let report = scanner.scan_line(FRAME_BUS.active_frame());
        if report.tx_errors > 0 {
            dropped = dropped.wrapping_add(u32::from(report.tx_errors));
            trace!(
                "Scanline {} dropped {} bytes ({} total)",
                report.scanline,
                report.tx_errors,
                dropped
            );
        }
        ticker.next().await;
    }

    scanner.blank();
    info!("Scan task stopped");
}
