//! `HH:MM` clock face

use super::TimeOfDay;
use crate::display::{FrameBuffer, BYTES_PER_ROW};
use crate::traits::FrameSink;

/// Five-row digit font; row `r` of digit `d` is `FONT[d + 10 * r]`
const FONT: [u8; 50] = [
    0x7C, 0x08, 0x78, 0x7C, 0x40, 0x7C, 0x7C, 0x7C, 0x7C, 0x7C, //
    0x4C, 0x18, 0x04, 0x04, 0x40, 0x40, 0x40, 0x04, 0x44, 0x44, //
    0x54, 0x08, 0x38, 0x78, 0x50, 0x78, 0x7C, 0x08, 0x7C, 0x7C, //
    0x64, 0x08, 0x40, 0x04, 0x7C, 0x04, 0x44, 0x10, 0x44, 0x04, //
    0x7C, 0x1C, 0x7C, 0x7C, 0x10, 0x78, 0x7C, 0x10, 0x7C, 0x7C, //
];

/// First pixel row of the digits
const TOP_ROW: usize = 5;

/// Digit height in rows
const GLYPH_ROWS: usize = 5;

/// Frame bytes holding the two divider dots (bit 0)
const DIVIDER: [usize; 2] = [25, 33];

/// Draw `HH:MM` into `frame`, replacing its contents
pub fn render(time: &TimeOfDay, frame: &mut FrameBuffer) {
    frame.clear();
    let digits = [
        time.hours / 10,
        time.hours % 10,
        time.minutes / 10,
        time.minutes % 10,
    ];

    let bytes = frame.as_bytes_mut();
    for (column, digit) in digits.iter().enumerate() {
        let digit = usize::from(*digit % 10);
        for row in 0..GLYPH_ROWS {
            bytes[(TOP_ROW + row) * BYTES_PER_ROW + column] = FONT[digit + 10 * row];
        }
    }
    for index in DIVIDER {
        bytes[index] |= 0x01;
    }
}

/// Clock face producer
///
/// Re-renders only when the displayed minute changes.
#[derive(Debug, Default)]
pub struct ClockFace {
    frame: FrameBuffer,
    shown: Option<(u8, u8)>,
}

impl ClockFace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last rendered frame
    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    /// Render `time` into `sink` if `HH:MM` changed; returns whether it did
    pub fn update<S: FrameSink + ?Sized>(&mut self, time: &TimeOfDay, sink: &mut S) -> bool {
        let key = (time.hours, time.minutes);
        if self.shown == Some(key) {
            return false;
        }
        render(time, &mut self.frame);
        sink.store(self.frame.as_bytes());
        self.shown = Some(key);
        true
    }

    /// Force the next update to re-render
    pub fn invalidate(&mut self) {
        self.shown = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_layout() {
        let mut frame = FrameBuffer::new();
        render(&TimeOfDay::new(12, 34, 0).unwrap(), &mut frame);
        let bytes = frame.as_bytes();

        // Digit d occupies column byte d of rows 5..10
        for row in 0..GLYPH_ROWS {
            let base = (TOP_ROW + row) * BYTES_PER_ROW;
            let divider = if base == 24 || base == 32 { 0x01 } else { 0 };
            assert_eq!(bytes[base], FONT[1 + 10 * row]);
            assert_eq!(bytes[base + 1], FONT[2 + 10 * row] | divider);
            assert_eq!(bytes[base + 2], FONT[3 + 10 * row]);
            assert_eq!(bytes[base + 3], FONT[4 + 10 * row]);
        }

        // Nothing outside rows 5..10
        assert!(bytes[..20].iter().all(|b| *b == 0));
        assert!(bytes[40..].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_divider_dots() {
        let mut frame = FrameBuffer::new();
        render(&TimeOfDay::new(0, 0, 0).unwrap(), &mut frame);
        assert!(frame.pixel(15, 6));
        assert!(frame.pixel(15, 8));
        assert!(!frame.pixel(15, 7));
    }

    #[test]
    fn test_update_only_on_minute_change() {
        let mut face = ClockFace::new();
        let mut out = FrameBuffer::new();

        assert!(face.update(&TimeOfDay::new(8, 5, 0).unwrap(), &mut out));
        assert_eq!(&out, face.frame());
        assert!(!face.update(&TimeOfDay::new(8, 5, 59).unwrap(), &mut out));
        assert!(face.update(&TimeOfDay::new(8, 6, 0).unwrap(), &mut out));

        face.invalidate();
        assert!(face.update(&TimeOfDay::new(8, 6, 0).unwrap(), &mut out));
    }
}
