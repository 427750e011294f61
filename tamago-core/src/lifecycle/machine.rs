//! Life-cycle state machine
//!
//! Ages the pet from elapsed time and moves it along the evolution tree:
//!
//! ```text
//! Egg ─► Babytchi ─► Marutchi ─┬─► Tamatchi ──────► Mametchi / Ginjirotchi / Maskutchi /
//!                              │                    Kuchipatchi / Nyorotchi / Tarakotchi
//!                              └─► Kuchitamatchi ─► Kuchipatchi / Nyorotchi / Tarakotchi
//!
//! Maskutchi ─► Oyajitchi (no new care mistakes)
//! any ─► Obaketchi (lifespan reached or too many care mistakes)
//! ```

use super::stats::{Evolution, Stats, StatusFlag};
use crate::config::LifeCycleConfig;

/// Owner of the pet statistics
pub struct LifeCycle {
    stats: Stats,
    config: LifeCycleConfig,
    sub_ms: u32,
    paused: bool,
}

impl LifeCycle {
    /// Fresh egg
    pub fn new(config: LifeCycleConfig) -> Self {
        Self {
            stats: Stats::default(),
            config,
            sub_ms: 0,
            paused: false,
        }
    }

    /// Continue from saved statistics
    pub fn restore(&mut self, stats: Stats) {
        self.stats = stats;
        self.sub_ms = 0;
    }

    /// Read-only snapshot
    pub fn stats(&self) -> Stats {
        self.stats
    }

    pub fn config(&self) -> &LifeCycleConfig {
        &self.config
    }

    /// Stop aging (time spent paused does not count)
    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn has_flag(&self, flag: StatusFlag) -> bool {
        self.stats.has(flag)
    }

    pub fn set_flag(&mut self, flag: StatusFlag, on: bool) {
        self.stats.set(flag, on);
    }

    /// Count a care mistake; death is decided on the next tick
    pub fn record_care_mistake(&mut self) {
        self.stats.care_mistakes = self.stats.care_mistakes.saturating_add(1);
    }

    /// Update the sleeping flag from the hour of day
    pub fn set_sleeping_by_hour(&mut self, hour: u8) {
        let from = self.config.sleep_from_hour;
        let until = self.config.wake_at_hour;
        let asleep = if from > until {
            hour >= from || hour < until
        } else {
            hour >= from && hour < until
        };
        self.stats.set(StatusFlag::IsSleeping, asleep);
    }

    /// Record an ambient temperature reading (0.1°C)
    ///
    /// Outside the comfort band the pet gets tired.
    pub fn observe_ambient(&mut self, celsius_x10: i16) {
        self.stats.ambient_x10 = Some(celsius_x10);
        let comfortable =
            (self.config.comfort_min_x10..=self.config.comfort_max_x10).contains(&celsius_x10);
        self.stats.set(StatusFlag::IsTired, !comfortable);
    }

    /// Advance by `elapsed_ms`
    ///
    /// Returns the new evolution if the pet evolved (or died). Large steps
    /// pass through every intermediate evolution.
    pub fn tick(&mut self, elapsed_ms: u32) -> Option<Evolution> {
        if self.paused {
            return None;
        }

        let total = u64::from(self.sub_ms) + u64::from(elapsed_ms);
        let whole = (total / 1000) as u32;
        self.sub_ms = (total % 1000) as u32;
        self.stats.age_s = self.stats.age_s.saturating_add(whole);

        let mut last = None;
        while let Some(next) = self.next_evolution() {
            self.evolve(next);
            last = Some(next);
        }
        last
    }

    fn evolve(&mut self, next: Evolution) {
        self.stats.evolution = next;
        self.stats.evolved_at_s = self.stats.age_s;
        self.stats.mistakes_at_evolve = self.stats.care_mistakes;
    }

    fn next_evolution(&self) -> Option<Evolution> {
        use Evolution::*;

        let s = &self.stats;
        let c = &self.config;
        if s.evolution.is_dead() {
            return None;
        }
        if s.age_s >= c.lifespan_s || s.care_mistakes >= c.max_care_mistakes {
            return Some(Obaketchi);
        }

        let next = match s.evolution {
            Egg if s.age_s >= c.hatch_at_s => Babytchi,
            Babytchi if s.age_s >= c.child_at_s => Marutchi,
            Marutchi if s.age_s >= c.teen_at_s => {
                if s.care_mistakes <= 2 {
                    Tamatchi
                } else {
                    Kuchitamatchi
                }
            }
            Tamatchi if s.age_s >= c.adult_at_s => match s.care_mistakes {
                0 => Mametchi,
                1 => Ginjirotchi,
                2 => Maskutchi,
                3 => Kuchipatchi,
                4 | 5 => Nyorotchi,
                _ => Tarakotchi,
            },
            Kuchitamatchi if s.age_s >= c.adult_at_s => match s.care_mistakes {
                0 | 1 => Kuchipatchi,
                2 | 3 => Nyorotchi,
                _ => Tarakotchi,
            },
            Maskutchi
                if s.age_s >= c.special_at_s && s.care_mistakes == s.mistakes_at_evolve =>
            {
                Oyajitchi
            }
            _ => return None,
        };
        Some(next)
    }
}
