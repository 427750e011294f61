//! Precise delay abstraction
//!
//! The panel latch needs a pulse of at least one microsecond, far below the
//! executor's timer granularity, so it is produced by a busy-wait supplied
//! by the chip HAL. Host tests substitute a recording or no-op delay.

/// Blocking microsecond delay
pub trait PreciseDelay {
    /// Busy-wait for at least `us` microseconds
    fn delay_us(&mut self, us: u32);

    /// Busy-wait for at least `ms` milliseconds
    fn delay_ms(&mut self, ms: u32) {
        for _ in 0..ms {
            self.delay_us(1000);
        }
    }
}

impl<T: PreciseDelay + ?Sized> PreciseDelay for &mut T {
    fn delay_us(&mut self, us: u32) {
        (**self).delay_us(us);
    }
}
