//! Clock face scheduling
//!
//! The clock face is shown for the last `for_s` seconds of every `every_s`
//! second period of uptime; the animation owns the panel the rest of the
//! time.

use crate::display::Producer;

/// When the clock face owns the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FaceSchedule {
    /// Period in seconds (0 disables the clock face)
    pub every_s: u32,
    /// Seconds of each period the clock is shown (0 disables)
    pub for_s: u32,
}

impl FaceSchedule {
    pub const fn new(every_s: u32, for_s: u32) -> Self {
        Self { every_s, for_s }
    }

    /// Clock face never shown
    pub const fn disabled() -> Self {
        Self::new(0, 0)
    }

    pub fn is_enabled(&self) -> bool {
        self.every_s > 0 && self.for_s > 0
    }

    /// Producer that should own the panel at `uptime_s`
    pub fn producer_at(&self, uptime_s: u32) -> Producer {
        if !self.is_enabled() {
            return Producer::Animation;
        }
        let phase = uptime_s % self.every_s;
        if phase >= self.every_s.saturating_sub(self.for_s) {
            Producer::Clock
        } else {
            Producer::Animation
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled() {
        let schedule = FaceSchedule::disabled();
        for t in 0..1000 {
            assert_eq!(schedule.producer_at(t), Producer::Animation);
        }
        assert_eq!(FaceSchedule::new(60, 0).producer_at(59), Producer::Animation);
    }

    #[test]
    fn test_tail_of_each_period() {
        let schedule = FaceSchedule::new(60, 5);
        assert_eq!(schedule.producer_at(0), Producer::Animation);
        assert_eq!(schedule.producer_at(54), Producer::Animation);
        assert_eq!(schedule.producer_at(55), Producer::Clock);
        assert_eq!(schedule.producer_at(59), Producer::Clock);
        assert_eq!(schedule.producer_at(60), Producer::Animation);
        assert_eq!(schedule.producer_at(115), Producer::Clock);
    }

    #[test]
    fn test_always_clock() {
        let schedule = FaceSchedule::new(10, 10);
        for t in 0..30 {
            assert_eq!(schedule.producer_at(t), Producer::Clock);
        }
    }
}
