//! Dot-matrix display model and scan-out
//!
//! The panel is 32x16 single-colour pixels packed into a 64-byte frame.
//! Byte `row * 4 + c` holds columns `8c..8c+8` of `row`, most significant bit
//! leftmost. The panel drivers light four rows at a time, so the frame is
//! scanned out as four scanlines: scanline `S` drives rows `S`, `S+4`, `S+8`
//! and `S+12`.

pub mod frame;
pub mod scanner;

pub use frame::{
    Frame, FrameBuffer, FrameBus, Producer, SharedFrame, BYTES_PER_ROW, FRAME_SIZE, PANEL_HEIGHT,
    PANEL_WIDTH,
};
pub use scanner::{shift_offsets, DisplayScanner, ScanPins, ScanReport, Scanline};
