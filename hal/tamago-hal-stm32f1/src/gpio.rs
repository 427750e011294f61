//! GPIO adapter for STM32F1
//!
//! Wraps any `embedded-hal` push-pull output (typically
//! `embassy_stm32::gpio::Output`) so it can be used as a
//! [`tamago_hal::OutputPin`].

use embedded_hal::digital::OutputPin as EhOutputPin;
use tamago_hal::OutputPin;

/// Output pin adapter
///
/// Tracks the last commanded level so `is_set_high` works through a shared
/// reference. Pin writes on the F1 GPIO block are infallible, so the
/// `embedded-hal` error is discarded.
pub struct HalPin<P> {
    pin: P,
    high: bool,
}

impl<P: EhOutputPin> HalPin<P> {
    /// Wrap a pin, driving it to the given initial level
    pub fn new(mut pin: P, initial_high: bool) -> Self {
        let _ = if initial_high {
            pin.set_high()
        } else {
            pin.set_low()
        };
        Self {
            pin,
            high: initial_high,
        }
    }

    /// Release the underlying pin
    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: EhOutputPin> OutputPin for HalPin<P> {
    fn set_high(&mut self) {
        let _ = self.pin.set_high();
        self.high = true;
    }

    fn set_low(&mut self) {
        let _ = self.pin.set_low();
        self.high = false;
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}
