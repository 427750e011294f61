//! Row-multiplexed scan-out for P10-style panels
//!
//! One call to [`DisplayScanner::scan_line`] performs one scan phase:
//!
//! 1. Shift the sixteen bytes of the current scanline into the column
//!    shift registers, bottom quarter of the panel first.
//! 2. Blank the rows (output-enable off) so the old row does not ghost.
//! 3. Pulse the latch to move the shifted data to the output register.
//! 4. Drive the A/B row-select lines for the scanline.
//! 5. Enable the rows again (optionally only for `on_time_us`).
//! 6. Advance to the next scanline.
//!
//! The caller sleeps for the scan period between calls.

use tamago_hal::{OutputPin, PreciseDelay, SpiBus};

use super::frame::{BYTES_PER_ROW, FRAME_SIZE};
use crate::config::ScanConfig;
use crate::traits::FrameSource;

/// Number of bytes shifted out per scanline
pub const BYTES_PER_SCANLINE: usize = FRAME_SIZE / 4;

/// Row-group currently being driven
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Scanline {
    S0,
    S1,
    S2,
    S3,
}

impl Scanline {
    /// All scanlines in scan order
    pub const ALL: [Scanline; 4] = [Scanline::S0, Scanline::S1, Scanline::S2, Scanline::S3];

    /// Scanline number (0..4)
    pub fn index(self) -> usize {
        match self {
            Scanline::S0 => 0,
            Scanline::S1 => 1,
            Scanline::S2 => 2,
            Scanline::S3 => 3,
        }
    }

    /// Next scanline, wrapping after S3
    pub fn next(self) -> Self {
        match self {
            Scanline::S0 => Scanline::S1,
            Scanline::S1 => Scanline::S2,
            Scanline::S2 => Scanline::S3,
            Scanline::S3 => Scanline::S0,
        }
    }

    /// Levels of the (A, B) row-select lines, `true` = high
    pub fn select_levels(self) -> (bool, bool) {
        match self {
            Scanline::S0 => (false, false),
            Scanline::S1 => (true, false),
            Scanline::S2 => (false, true),
            Scanline::S3 => (true, true),
        }
    }

    /// Byte offset of this scanline's first row
    pub fn base_offset(self) -> usize {
        self.index() * BYTES_PER_ROW
    }
}

/// Frame byte offsets in the order they are shifted for `scanline`
///
/// For each column byte `c` the row quarters are sent bottom first:
/// `base + 48 + c`, `base + 32 + c`, `base + 16 + c`, `base + c`.
pub fn shift_offsets(scanline: Scanline) -> [usize; BYTES_PER_SCANLINE] {
    const QUARTER: usize = FRAME_SIZE / 4;
    let base = scanline.base_offset();
    let mut offsets = [0usize; BYTES_PER_SCANLINE];
    for column in 0..BYTES_PER_ROW {
        for quarter in 0..4 {
            offsets[column * 4 + quarter] = base + (3 - quarter) * QUARTER + column;
        }
    }
    offsets
}

/// Panel control lines
pub struct ScanPins<P> {
    /// Output enable (blanks all rows when inactive)
    pub oe: P,
    /// Latch (storage-register clock)
    pub latch: P,
    /// Row select A
    pub a: P,
    /// Row select B
    pub b: P,
}

/// Outcome of one scan phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScanReport {
    /// Scanline that was driven
    pub scanline: Scanline,
    /// Bytes the SPI bus failed to transmit
    pub tx_errors: u8,
}

/// Display scanner state machine
pub struct DisplayScanner<SPI, P, D> {
    spi: SPI,
    pins: ScanPins<P>,
    delay: D,
    config: ScanConfig,
    scanline: Scanline,
}

impl<SPI, P, D> DisplayScanner<SPI, P, D>
where
    SPI: SpiBus,
    P: OutputPin,
    D: PreciseDelay,
{
    /// Create a scanner, blanking the panel and parking the control lines
    pub fn new(spi: SPI, pins: ScanPins<P>, delay: D, config: ScanConfig) -> Self {
        let mut scanner = Self {
            spi,
            pins,
            delay,
            config,
            scanline: Scanline::S0,
        };
        scanner.set_output(false);
        scanner.pins.latch.set_low();
        scanner.pins.a.set_low();
        scanner.pins.b.set_low();
        scanner
    }

    /// Scanline the next call will drive
    pub fn scanline(&self) -> Scanline {
        self.scanline
    }

    /// Active scan configuration
    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Turn the rows off until the next scan
    pub fn blank(&mut self) {
        self.set_output(false);
    }

    /// Drive one scanline from `frame` and advance
    ///
    /// SPI failures are counted in the report and never retried; the next
    /// cycle repaints the row.
    pub fn scan_line<F: FrameSource + ?Sized>(&mut self, frame: &F) -> ScanReport {
        let scanline = self.scanline;
        let mut tx_errors: u8 = 0;

        for offset in shift_offsets(scanline) {
            if self.spi.write(&[frame.byte(offset)]).is_err() {
                tx_errors = tx_errors.saturating_add(1);
            }
        }

        self.set_output(false);

        self.pins.latch.set_high();
        self.delay.delay_us(u32::from(self.config.latch_pulse_us.max(1)));
        self.pins.latch.set_low();

        let (a, b) = scanline.select_levels();
        self.pins.a.set_state(a);
        self.pins.b.set_state(b);

        self.set_output(true);

        if let Some(on_time) = self.config.on_time_us {
            self.delay.delay_us(u32::from(on_time));
            self.set_output(false);
        }

        self.scanline = scanline.next();

        ScanReport {
            scanline,
            tx_errors,
        }
    }

    /// Enable or blank the rows, honouring the OE polarity
    fn set_output(&mut self, enabled: bool) {
        self.pins.oe.set_state(enabled != self.config.oe_active_low);
    }
}
