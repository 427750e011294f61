//! Life-cycle task
//!
//! Ages the pet, folds in ambient temperature and the time of day, and
//! tells the animation task what to show. Stats are saved to the EEPROM
//! periodically, on every evolution and when the task stops.

use defmt::*;
use embassy_time::{Duration, Ticker};

use tamago_core::config::AnimationConfig;
use tamago_core::lifecycle::{decode, encode, LifeCycle, PersistError, Stats};
use tamago_core::selection::select_for;
use tamago_core::traits::{PageStorage, PAGE_SIZE};
use tamago_drivers::storage::M24fc256;
use tamago_hal::OutputPin;

use crate::board::{BoardPin, STATS_PAGE};
use crate::bus::SharedI2c;
use crate::channels::{hour_of_day, running, SELECTION, TEMPERATURE};

/// Stats storage on the shared bus
pub type Eeprom = M24fc256<SharedI2c>;

/// Load saved stats into `life`; a blank or unreadable record keeps the egg
pub fn restore(eeprom: &mut Eeprom, life: &mut LifeCycle) {
    let mut page = [0u8; PAGE_SIZE];
    if let Err(e) = eeprom.read_page(STATS_PAGE, &mut page) {
        warn!("Stats read failed: {}", e);
        return;
    }

    match decode(&page) {
        Ok(stats) => {
            info!(
                "Restored {} aged {} s ({} care mistakes)",
                stats.evolution, stats.age_s, stats.care_mistakes
            );
            life.restore(stats);
        }
        Err(PersistError::Empty) => info!("No saved pet, starting from an egg"),
        Err(e) => warn!("Saved stats rejected: {}", e),
    }
}

fn save(eeprom: &mut Eeprom, stats: &Stats) {
    let mut page = [0u8; PAGE_SIZE];
    if let Err(e) = encode(stats, &mut page) {
        warn!("Stats encode failed: {}", e);
        return;
    }
    match eeprom.write_page(STATS_PAGE, &page) {
        Ok(()) => trace!("Stats saved at age {} s", stats.age_s),
        Err(e) => warn!("Stats save failed: {}", e),
    }
}

#[embassy_executor::task]
pub async fn lifecycle_task(
    mut life: LifeCycle,
    mut storage: Option<Eeprom>,
    mut led: BoardPin,
    animation: AnimationConfig,
) {
    info!("Life cycle task started");

    let tick_ms = life.config().tick_ms;
    let save_every_s = life.config().save_every_s;
    let mut last_saved_s = life.stats().age_s;
    let mut ticker = Ticker::every(Duration::from_millis(u64::from(tick_ms)));

    SELECTION.signal(select_for(&life.stats(), &animation));

    while running() {
        ticker.next().await;
        led.toggle();

        if let Some(celsius_x10) = TEMPERATURE.try_take() {
            life.observe_ambient(celsius_x10);
        }
        life.set_sleeping_by_hour(hour_of_day());

        let evolved = life.tick(tick_ms);
        let stats = life.stats();
        if let Some(evolution) = evolved {
            if evolution.is_dead() {
                warn!("Pet died at age {} s", stats.age_s);
            } else {
                info!("Evolved into {} at age {} s", evolution, stats.age_s);
            }
        }

        SELECTION.signal(select_for(&stats, &animation));

        if let Some(eeprom) = storage.as_mut() {
            let due = save_every_s > 0 && stats.age_s.saturating_sub(last_saved_s) >= save_every_s;
            if evolved.is_some() || due {
                save(eeprom, &stats);
                last_saved_s = stats.age_s;
            }
        }
    }

    if let Some(eeprom) = storage.as_mut() {
        save(eeprom, &life.stats());
    }
    info!("Life cycle task stopped");
}
