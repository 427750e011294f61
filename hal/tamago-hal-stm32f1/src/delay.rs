//! Cycle-counting delay for STM32F1
//!
//! The latch pulse is a single microsecond, which is below what the embassy
//! time driver can schedule, so it is produced by spinning the core.

use tamago_hal::PreciseDelay;

/// Busy-wait delay calibrated to the core clock
pub struct CycleDelay {
    cycles_per_us: u32,
}

impl CycleDelay {
    /// Create a delay for a core running at `sysclk_hz`
    pub const fn new(sysclk_hz: u32) -> Self {
        let per_us = sysclk_hz / 1_000_000;
        Self {
            cycles_per_us: if per_us == 0 { 1 } else { per_us },
        }
    }
}

impl PreciseDelay for CycleDelay {
    fn delay_us(&mut self, us: u32) {
        cortex_m::asm::delay(us.saturating_mul(self.cycles_per_us));
    }
}
