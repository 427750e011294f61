//! Animation catalog
//!
//! Static table mapping each [`AnimationId`] to its run of frames in the
//! sprite sheet.

/// Frames in the reference sprite sheet
pub const NUM_OF_FRAMES: usize = 167;

/// Default refresh interval in milliseconds
pub const DEFAULT_RATE_MS: u16 = 500;

/// Named animations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum AnimationId {
    IdleEgg,
    HatchEgg,
    IdleBabytchi,
    IdleMarutchi,
    IdleTamatchi,
    IdleKuchitamatchi,
    IdleMametchi,
    IdleGinjirotchi,
    IdleMaskutchi,
    IdleKuchipatchi,
    IdleNyorotchi,
    IdleTarakotchi,
    IdleOyajitchi,
    IdleObaketchi,
}

impl AnimationId {
    /// Number of animations
    pub const COUNT: usize = 14;

    /// All animations in catalog order
    pub const ALL: [AnimationId; Self::COUNT] = [
        AnimationId::IdleEgg,
        AnimationId::HatchEgg,
        AnimationId::IdleBabytchi,
        AnimationId::IdleMarutchi,
        AnimationId::IdleTamatchi,
        AnimationId::IdleKuchitamatchi,
        AnimationId::IdleMametchi,
        AnimationId::IdleGinjirotchi,
        AnimationId::IdleMaskutchi,
        AnimationId::IdleKuchipatchi,
        AnimationId::IdleNyorotchi,
        AnimationId::IdleTarakotchi,
        AnimationId::IdleOyajitchi,
        AnimationId::IdleObaketchi,
    ];

    /// Position in the catalog table
    pub fn index(self) -> usize {
        self as usize
    }
}

/// One run of frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AnimationSet {
    /// Index of the first frame in the sheet
    pub offset: u16,
    /// Number of frames (1-255)
    pub length: u8,
    /// Default refresh interval in milliseconds
    pub rate_ms: u16,
}

impl AnimationSet {
    /// Create an entry
    pub const fn new(offset: u16, length: u8, rate_ms: u16) -> Self {
        Self {
            offset,
            length,
            rate_ms,
        }
    }

    /// One past the last frame index
    pub fn end(&self) -> usize {
        usize::from(self.offset) + usize::from(self.length)
    }
}

/// Catalog defects, detected at initialisation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CatalogError {
    /// Entry has no frames
    ZeroLength(AnimationId),
    /// Entry has a zero refresh interval
    ZeroRate(AnimationId),
    /// Entry runs past the end of the sprite sheet
    OutOfBounds(AnimationId),
}

/// Table of animations indexed by [`AnimationId`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    sets: [AnimationSet; AnimationId::COUNT],
}

impl Catalog {
    /// Build a catalog from entries in [`AnimationId::ALL`] order
    pub const fn new(sets: [AnimationSet; AnimationId::COUNT]) -> Self {
        Self { sets }
    }

    /// Entry for an animation
    pub fn get(&self, id: AnimationId) -> &AnimationSet {
        &self.sets[id.index()]
    }

    /// Iterate over `(id, entry)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (AnimationId, &AnimationSet)> {
        AnimationId::ALL.iter().copied().zip(self.sets.iter())
    }

    /// Check every entry against a sheet of `num_frames` frames
    pub fn validate(&self, num_frames: usize) -> Result<(), CatalogError> {
        for (id, set) in self.iter() {
            if set.length == 0 {
                return Err(CatalogError::ZeroLength(id));
            }
            if set.rate_ms == 0 {
                return Err(CatalogError::ZeroRate(id));
            }
            if set.end() > num_frames {
                return Err(CatalogError::OutOfBounds(id));
            }
        }
        Ok(())
    }
}

/// Catalog for the reference 167-frame sheet
pub const DEFAULT_CATALOG: Catalog = Catalog::new([
    AnimationSet::new(0, 2, DEFAULT_RATE_MS),    // IdleEgg
    AnimationSet::new(2, 1, DEFAULT_RATE_MS),    // HatchEgg
    AnimationSet::new(3, 36, DEFAULT_RATE_MS),   // IdleBabytchi
    AnimationSet::new(39, 28, DEFAULT_RATE_MS),  // IdleMarutchi
    AnimationSet::new(67, 2, DEFAULT_RATE_MS),   // IdleTamatchi
    AnimationSet::new(69, 16, DEFAULT_RATE_MS),  // IdleKuchitamatchi
    AnimationSet::new(85, 2, DEFAULT_RATE_MS),   // IdleMametchi
    AnimationSet::new(87, 12, DEFAULT_RATE_MS),  // IdleGinjirotchi
    AnimationSet::new(99, 12, DEFAULT_RATE_MS),  // IdleMaskutchi
    AnimationSet::new(111, 28, DEFAULT_RATE_MS), // IdleKuchipatchi
    AnimationSet::new(139, 16, DEFAULT_RATE_MS), // IdleNyorotchi
    AnimationSet::new(155, 2, DEFAULT_RATE_MS),  // IdleTarakotchi
    AnimationSet::new(157, 8, DEFAULT_RATE_MS),  // IdleOyajitchi
    AnimationSet::new(165, 2, DEFAULT_RATE_MS),  // IdleObaketchi
]);
