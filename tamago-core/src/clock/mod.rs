//! Time of day and the clock face
//!
//! The board has no RTC; [`SoftClock`] keeps time from the executor's tick
//! starting at the configured time of day. The [`face`] renders it as `HH:MM`
//! and the [`schedule`] decides when the face takes over the panel.

pub mod face;
pub mod schedule;

pub use face::ClockFace;
pub use schedule::FaceSchedule;

/// Seconds in a day
pub const SECONDS_PER_DAY: u32 = 24 * 60 * 60;

/// Wall-clock time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeOfDay {
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
}

impl TimeOfDay {
    /// Validated constructor
    pub fn new(hours: u8, minutes: u8, seconds: u8) -> Option<Self> {
        if hours >= 24 || minutes >= 60 || seconds >= 60 {
            return None;
        }
        Some(Self {
            hours,
            minutes,
            seconds,
        })
    }

    /// Time from seconds since midnight (wraps at 24 h)
    pub fn from_seconds(seconds: u32) -> Self {
        let s = seconds % SECONDS_PER_DAY;
        Self {
            hours: (s / 3600) as u8,
            minutes: ((s / 60) % 60) as u8,
            seconds: (s % 60) as u8,
        }
    }

    /// Seconds since midnight
    pub fn seconds_of_day(&self) -> u32 {
        u32::from(self.hours) * 3600 + u32::from(self.minutes) * 60 + u32::from(self.seconds)
    }
}

/// Software clock advanced by elapsed time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoftClock {
    seconds: u32,
    sub_ms: u32,
}

impl SoftClock {
    /// Clock starting at `start`
    pub fn new(start: TimeOfDay) -> Self {
        Self {
            seconds: start.seconds_of_day(),
            sub_ms: 0,
        }
    }

    /// Current time
    pub fn now(&self) -> TimeOfDay {
        TimeOfDay::from_seconds(self.seconds)
    }

    /// Seconds since midnight
    pub fn seconds_of_day(&self) -> u32 {
        self.seconds
    }

    /// Set the time, dropping any partial second
    pub fn set(&mut self, time: TimeOfDay) {
        self.seconds = time.seconds_of_day();
        self.sub_ms = 0;
    }

    /// Advance by `elapsed_ms`; returns whole seconds that passed
    pub fn advance(&mut self, elapsed_ms: u32) -> u32 {
        let total = self.sub_ms + elapsed_ms % 1000;
        let whole = elapsed_ms / 1000 + total / 1000;
        self.sub_ms = total % 1000;
        self.seconds = ((u64::from(self.seconds) + u64::from(whole)) % u64::from(SECONDS_PER_DAY))
            as u32;
        whole
    }
}
