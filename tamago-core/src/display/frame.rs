//! Frame buffers and the producer hand-off

use portable_atomic::{AtomicU8, Ordering};

/// Bytes in one frame
pub const FRAME_SIZE: usize = 64;

/// Panel width in pixels
pub const PANEL_WIDTH: usize = 32;

/// Panel height in pixels
pub const PANEL_HEIGHT: usize = 16;

/// Bytes per pixel row
pub const BYTES_PER_ROW: usize = PANEL_WIDTH / 8;

/// Raw frame bytes
pub type Frame = [u8; FRAME_SIZE];

/// Owned frame with pixel access
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameBuffer {
    bytes: Frame,
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameBuffer {
    /// Blank frame
    pub const fn new() -> Self {
        Self {
            bytes: [0; FRAME_SIZE],
        }
    }

    /// Frame from raw bytes
    pub const fn from_bytes(bytes: Frame) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &Frame {
        &self.bytes
    }

    pub fn as_bytes_mut(&mut self) -> &mut Frame {
        &mut self.bytes
    }

    /// Clear every pixel
    pub fn clear(&mut self) {
        self.bytes = [0; FRAME_SIZE];
    }

    /// Byte index and bit mask for a pixel, `None` when off-panel
    fn locate(x: usize, y: usize) -> Option<(usize, u8)> {
        if x >= PANEL_WIDTH || y >= PANEL_HEIGHT {
            return None;
        }
        Some((y * BYTES_PER_ROW + x / 8, 0x80 >> (x % 8)))
    }

    /// Read a pixel (off-panel reads as unlit)
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        match Self::locate(x, y) {
            Some((index, mask)) => self.bytes[index] & mask != 0,
            None => false,
        }
    }

    /// Set or clear a pixel (off-panel writes are ignored)
    pub fn set_pixel(&mut self, x: usize, y: usize, lit: bool) {
        if let Some((index, mask)) = Self::locate(x, y) {
            if lit {
                self.bytes[index] |= mask;
            } else {
                self.bytes[index] &= !mask;
            }
        }
    }
}

/// Frame shared between a producer task and the scanner
///
/// Each byte is an independent atomic. Writers publish a whole frame byte by
/// byte and the scanner may observe a mix of old and new bytes for one scan
/// cycle; nothing depends on the frame being read as a unit.
pub struct SharedFrame {
    bytes: [AtomicU8; FRAME_SIZE],
}

impl Default for SharedFrame {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedFrame {
    /// Blank shared frame, usable in a `static`
    pub const fn new() -> Self {
        #[allow(clippy::declare_interior_mutable_const)]
        const ZERO: AtomicU8 = AtomicU8::new(0);
        Self {
            bytes: [ZERO; FRAME_SIZE],
        }
    }

    /// Read one byte (out of range reads as 0)
    pub fn load(&self, index: usize) -> u8 {
        self.bytes
            .get(index)
            .map(|b| b.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    /// Overwrite the whole frame
    pub fn publish(&self, frame: &Frame) {
        for (slot, value) in self.bytes.iter().zip(frame.iter()) {
            slot.store(*value, Ordering::Relaxed);
        }
    }
}

/// Which producer currently owns the displayed frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Producer {
    /// Pet animation
    Animation = 0,
    /// Clock face
    Clock = 1,
}

impl Producer {
    fn from_raw(raw: u8) -> Self {
        match raw {
            1 => Producer::Clock,
            _ => Producer::Animation,
        }
    }
}

/// The single hand-off point between producers and the scanner
///
/// Each producer renders into its own [`SharedFrame`]; the scanner displays
/// whichever one was last registered with [`set_buffer`](Self::set_buffer).
/// Switching is not double-buffered: a switch in the middle of a scan cycle
/// can show one torn frame.
pub struct FrameBus {
    animation: SharedFrame,
    clock: SharedFrame,
    active: AtomicU8,
}

impl Default for FrameBus {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameBus {
    /// Both frames blank, animation active
    pub const fn new() -> Self {
        Self {
            animation: SharedFrame::new(),
            clock: SharedFrame::new(),
            active: AtomicU8::new(Producer::Animation as u8),
        }
    }

    /// The frame a producer renders into
    pub fn frame(&self, producer: Producer) -> &SharedFrame {
        match producer {
            Producer::Animation => &self.animation,
            Producer::Clock => &self.clock,
        }
    }

    /// Register the producer whose frame is displayed from now on
    pub fn set_buffer(&self, producer: Producer) {
        self.active.store(producer as u8, Ordering::Relaxed);
    }

    /// Producer currently displayed
    pub fn active(&self) -> Producer {
        Producer::from_raw(self.active.load(Ordering::Relaxed))
    }

    /// Frame currently displayed; read once per scanline
    pub fn active_frame(&self) -> &SharedFrame {
        self.frame(self.active())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{FrameSink, FrameSource};

    #[test]
    fn test_pixel_layout() {
        let mut frame = FrameBuffer::new();
        frame.set_pixel(0, 0, true);
        frame.set_pixel(31, 15, true);
        frame.set_pixel(9, 2, true);

        assert_eq!(frame.as_bytes()[0], 0x80);
        assert_eq!(frame.as_bytes()[63], 0x01);
        assert_eq!(frame.as_bytes()[2 * BYTES_PER_ROW + 1], 0x40);
        assert!(frame.pixel(9, 2));
        assert!(!frame.pixel(10, 2));

        frame.set_pixel(9, 2, false);
        assert!(!frame.pixel(9, 2));
    }

    #[test]
    fn test_off_panel_pixels_ignored() {
        let mut frame = FrameBuffer::new();
        frame.set_pixel(32, 0, true);
        frame.set_pixel(0, 16, true);
        assert_eq!(frame, FrameBuffer::new());
        assert!(!frame.pixel(100, 100));
    }

    #[test]
    fn test_shared_frame_publish() {
        let shared = SharedFrame::new();
        let mut bytes = [0u8; FRAME_SIZE];
        for (i, b) in bytes.iter_mut().enumerate() {
            *b = i as u8;
        }

        let mut sink = &shared;
        sink.store(&bytes);

        assert_eq!(shared.byte(0), 0);
        assert_eq!(shared.byte(63), 63);
        assert_eq!(shared.byte(64), 0);
        assert_eq!(shared.snapshot().as_bytes(), &bytes);
    }

    #[test]
    fn test_frame_bus_hand_off() {
        let bus = FrameBus::new();
        bus.frame(Producer::Animation).publish(&[0xAA; FRAME_SIZE]);
        bus.frame(Producer::Clock).publish(&[0x55; FRAME_SIZE]);

        assert_eq!(bus.active(), Producer::Animation);
        assert_eq!(bus.active_frame().byte(10), 0xAA);

        bus.set_buffer(Producer::Clock);
        assert_eq!(bus.active(), Producer::Clock);
        assert_eq!(bus.active_frame().byte(10), 0x55);

        bus.set_buffer(Producer::Animation);
        assert_eq!(bus.active_frame().byte(10), 0xAA);
    }
}
