//! Clock task
//!
//! Keeps the software clock, renders the clock face into its frame-bus
//! slot and switches the displayed producer according to the schedule.

use defmt::*;
use embassy_time::{Duration, Instant, Ticker};
use portable_atomic::Ordering;

use tamago_core::clock::{ClockFace, FaceSchedule, SoftClock, TimeOfDay};
use tamago_core::config::ClockConfig;
use tamago_core::display::Producer;

use crate::channels::{running, FRAME_BUS, SECONDS_OF_DAY};

/// Clock resolution in milliseconds
const CLOCK_TICK_MS: u32 = 100;

#[embassy_executor::task]
pub async fn clock_task(config: ClockConfig) {
    info!("Clock task started");

    let start = TimeOfDay::new(config.start_hours, config.start_minutes, 0).unwrap_or_default();
    let mut clock = SoftClock::new(start);
    let mut face = ClockFace::new();
    let schedule = FaceSchedule::new(config.show_every_s, config.show_for_s);
    if !schedule.is_enabled() {
        info!("Clock face disabled");
    }

    let mut sink = FRAME_BUS.frame(Producer::Clock);
    let mut ticker = Ticker::every(Duration::from_millis(u64::from(CLOCK_TICK_MS)));
    let boot = Instant::now();
    let mut shown = FRAME_BUS.active();

    while running() {
        SECONDS_OF_DAY.store(clock.seconds_of_day(), Ordering::Relaxed);

        let now = clock.now();
        face.update(&now, &mut sink);

        let uptime_s = boot.elapsed().as_secs() as u32;
        let producer = schedule.producer_at(uptime_s);
        if producer != shown {
            debug!("Showing {} at {}:{}", producer, now.hours, now.minutes);
            FRAME_BUS.set_buffer(producer);
            shown = producer;
        }

        ticker.next().await;
        clock.advance(CLOCK_TICK_MS);
    }

    FRAME_BUS.set_buffer(Producer::Animation);
    info!("Clock task stopped");
}
