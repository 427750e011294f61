//! Inter-task communication
//!
//! Defines the statics shared between Embassy tasks. Everything here is
//! last-writer-wins: readers take whatever value is current and tolerate
//! it being one period stale.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use portable_atomic::{AtomicBool, AtomicU32, Ordering};

use tamago_core::display::FrameBus;
use tamago_core::selection::Selection;

/// What the animation task should show (updated by the life-cycle task)
pub static SELECTION: Signal<CriticalSectionRawMutex, Selection> = Signal::new();

/// Ambient temperature in 0.1°C (updated by the sensor task)
pub static TEMPERATURE: Signal<CriticalSectionRawMutex, i16> = Signal::new();

/// Frame hand-off between the producers and the scan task
pub static FRAME_BUS: FrameBus = FrameBus::new();

/// Current time of day in seconds (updated by the clock task)
pub static SECONDS_OF_DAY: AtomicU32 = AtomicU32::new(0);

/// Cleared to stop every task loop at its next iteration
pub static RUNNING: AtomicBool = AtomicBool::new(true);

/// Whether task loops should keep going
pub fn running() -> bool {
    RUNNING.load(Ordering::Relaxed)
}

/// Hour of day as published by the clock task
pub fn hour_of_day() -> u8 {
    (SECONDS_OF_DAY.load(Ordering::Relaxed) / 3600 % 24) as u8
}
