//! Sprite sheet view

use crate::display::{Frame, FRAME_SIZE};

/// Sprite sheet defects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SheetError {
    /// No frames at all
    Empty,
    /// Length is not a whole number of frames
    Misaligned { len: usize },
}

/// Read-only view over a flat array of 64-byte frames
#[derive(Debug, Clone, Copy)]
pub struct SpriteSheet<'a> {
    bytes: &'a [u8],
}

impl<'a> SpriteSheet<'a> {
    /// Wrap a sheet blob
    pub fn new(bytes: &'a [u8]) -> Result<Self, SheetError> {
        if bytes.is_empty() {
            return Err(SheetError::Empty);
        }
        if bytes.len() % FRAME_SIZE != 0 {
            return Err(SheetError::Misaligned { len: bytes.len() });
        }
        Ok(Self { bytes })
    }

    /// Number of frames in the sheet
    pub fn num_frames(&self) -> usize {
        self.bytes.len() / FRAME_SIZE
    }

    /// Frame at `index`, `None` past the end
    pub fn frame(&self, index: usize) -> Option<&'a Frame> {
        let start = index.checked_mul(FRAME_SIZE)?;
        let end = start.checked_add(FRAME_SIZE)?;
        self.bytes.get(start..end)?.try_into().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_lookup() {
        let mut blob = [0u8; FRAME_SIZE * 3];
        blob[FRAME_SIZE] = 0xAB;
        blob[FRAME_SIZE * 3 - 1] = 0xCD;

        let sheet = SpriteSheet::new(&blob).unwrap();
        assert_eq!(sheet.num_frames(), 3);
        assert_eq!(sheet.frame(1).unwrap()[0], 0xAB);
        assert_eq!(sheet.frame(2).unwrap()[FRAME_SIZE - 1], 0xCD);
        assert!(sheet.frame(3).is_none());
        assert!(sheet.frame(usize::MAX).is_none());
    }

    #[test]
    fn test_rejects_bad_sizes() {
        assert_eq!(SpriteSheet::new(&[]).unwrap_err(), SheetError::Empty);
        assert_eq!(
            SpriteSheet::new(&[0u8; FRAME_SIZE + 1]).unwrap_err(),
            SheetError::Misaligned {
                len: FRAME_SIZE + 1
            }
        );
    }
}
