//! Status icon overlay
//!
//! Icons are 3x3 glyphs in fixed corners of the panel. They are OR-ed onto
//! every frame after the sprite is copied, so they never erase sprite pixels
//! and survive animation changes.

use crate::display::FrameBuffer;

/// Status icons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Icon {
    /// Droppings to clean up (bottom right)
    Poo,
    /// Pet is sick (top right)
    Skull,
    /// Pet is asleep (top left)
    Sleep,
}

impl Icon {
    /// All icons
    pub const ALL: [Icon; 3] = [Icon::Poo, Icon::Skull, Icon::Sleep];

    fn bit(self) -> u8 {
        match self {
            Icon::Poo => 1 << 0,
            Icon::Skull => 1 << 1,
            Icon::Sleep => 1 << 2,
        }
    }

    /// Frame byte and mask for each glyph row
    pub fn glyph(self) -> [(usize, u8); 3] {
        match self {
            // Rows 13..16, columns 29..32
            Icon::Poo => [(55, 0x02), (59, 0x07), (63, 0x07)],
            // Rows 0..3, columns 29..32
            Icon::Skull => [(3, 0x07), (7, 0x05), (11, 0x02)],
            // Rows 0..3, columns 0..3
            Icon::Sleep => [(0, 0xE0), (4, 0x40), (8, 0xE0)],
        }
    }
}

/// Set of icons currently shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IconSet {
    bits: u8,
}

impl IconSet {
    /// No icons
    pub const fn empty() -> Self {
        Self { bits: 0 }
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    pub fn contains(&self, icon: Icon) -> bool {
        self.bits & icon.bit() != 0
    }

    /// Show or hide an icon
    pub fn set(&mut self, icon: Icon, shown: bool) {
        if shown {
            self.bits |= icon.bit();
        } else {
            self.bits &= !icon.bit();
        }
    }

    /// Builder form of [`set`](Self::set)
    pub fn with(mut self, icon: Icon) -> Self {
        self.set(icon, true);
        self
    }

    /// OR every shown glyph into `frame`
    pub fn apply(&self, frame: &mut FrameBuffer) {
        let bytes = frame.as_bytes_mut();
        for icon in Icon::ALL {
            if self.contains(icon) {
                for (index, mask) in icon.glyph() {
                    bytes[index] |= mask;
                }
            }
        }
    }
}
