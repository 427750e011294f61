//! Frame access traits
//!
//! Producers (animation player, clock face) write whole frames through a
//! [`FrameSink`]; the scanner reads individual bytes through a
//! [`FrameSource`]. Neither side knows whether the frame is a plain owned
//! buffer or the lock-free frame shared between tasks.

use crate::display::{Frame, FrameBuffer, SharedFrame, FRAME_SIZE};

/// Read access to a frame, one byte at a time
pub trait FrameSource {
    /// Byte at `index` (0..FRAME_SIZE)
    ///
    /// Out-of-range indices read as 0 (blank).
    fn byte(&self, index: usize) -> u8;

    /// Copy the whole frame out
    fn snapshot(&self) -> FrameBuffer {
        let mut frame = FrameBuffer::new();
        for (i, b) in frame.as_bytes_mut().iter_mut().enumerate() {
            *b = self.byte(i);
        }
        frame
    }
}

/// Write access to a frame
pub trait FrameSink {
    /// Replace the frame contents
    fn store(&mut self, frame: &Frame);
}

impl FrameSource for FrameBuffer {
    fn byte(&self, index: usize) -> u8 {
        self.as_bytes().get(index).copied().unwrap_or(0)
    }
}

impl FrameSink for FrameBuffer {
    fn store(&mut self, frame: &Frame) {
        self.as_bytes_mut().copy_from_slice(frame);
    }
}

impl FrameSource for SharedFrame {
    fn byte(&self, index: usize) -> u8 {
        self.load(index)
    }
}

impl FrameSink for &SharedFrame {
    fn store(&mut self, frame: &Frame) {
        self.publish(frame);
    }
}

impl FrameSource for [u8; FRAME_SIZE] {
    fn byte(&self, index: usize) -> u8 {
        self.get(index).copied().unwrap_or(0)
    }
}
