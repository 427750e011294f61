//! Animation player
//!
//! The player owns the current selection and the playback cursor. It is
//! driven by [`AnimationPlayer::update`] on a fixed tick and writes one
//! composed frame (sprite plus icon overlay) into a [`FrameSink`] per call.

use super::catalog::{AnimationId, Catalog, CatalogError};
use super::icons::{Icon, IconSet};
use super::sheet::{SheetError, SpriteSheet};
use crate::display::FrameBuffer;
use crate::selection::Selection;
use crate::traits::FrameSink;

/// Errors from animation setup and control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AnimationError {
    /// Catalog does not fit the sheet
    Catalog(CatalogError),
    /// Sheet blob is malformed
    Sheet(SheetError),
    /// Refresh interval of zero
    ZeroRate,
}

impl From<CatalogError> for AnimationError {
    fn from(e: CatalogError) -> Self {
        AnimationError::Catalog(e)
    }
}

impl From<SheetError> for AnimationError {
    fn from(e: SheetError) -> Self {
        AnimationError::Sheet(e)
    }
}

/// Sprite-sheet animation player
pub struct AnimationPlayer<'a> {
    sheet: SpriteSheet<'a>,
    catalog: &'a Catalog,
    current: AnimationId,
    cursor: u8,
    elapsed_ms: u32,
    /// Caller override of the catalog rate
    rate_override: Option<u16>,
    /// Rate in force for the current interval
    active_rate: u16,
    /// Frame 0 of a fresh selection has not been shown yet
    pending: bool,
    icons: IconSet,
}

impl<'a> AnimationPlayer<'a> {
    /// Create a player showing [`AnimationId::IdleEgg`]
    ///
    /// Fails if any catalog entry is empty, has a zero rate or runs past the
    /// end of the sheet, so `update` never has to handle those cases.
    pub fn new(sheet: SpriteSheet<'a>, catalog: &'a Catalog) -> Result<Self, AnimationError> {
        catalog.validate(sheet.num_frames())?;

        let current = AnimationId::IdleEgg;
        Ok(Self {
            sheet,
            catalog,
            current,
            cursor: 0,
            elapsed_ms: 0,
            rate_override: None,
            active_rate: catalog.get(current).rate_ms,
            pending: true,
            icons: IconSet::empty(),
        })
    }

    /// Currently selected animation
    pub fn current(&self) -> AnimationId {
        self.current
    }

    /// Frame position within the current animation
    pub fn cursor(&self) -> u8 {
        self.cursor
    }

    /// Absolute sheet frame index of the current frame
    pub fn frame_index(&self) -> usize {
        usize::from(self.catalog.get(self.current).offset) + usize::from(self.cursor)
    }

    /// Refresh interval currently in force
    pub fn refresh_rate(&self) -> u16 {
        self.active_rate
    }

    pub fn icons(&self) -> IconSet {
        self.icons
    }

    /// Switch to `id`
    ///
    /// Re-selecting the current animation changes nothing, so callers may
    /// assert the same selection on every tick. A new selection restarts at
    /// frame 0, which is shown on the next update. Returns whether the
    /// animation changed.
    pub fn select(&mut self, id: AnimationId) -> bool {
        if id == self.current {
            return false;
        }
        self.current = id;
        self.cursor = 0;
        self.elapsed_ms = 0;
        self.pending = true;
        self.active_rate = self.effective_rate();
        true
    }

    /// Override the catalog refresh interval
    ///
    /// Takes effect at the next frame boundary.
    pub fn set_refresh_rate(&mut self, rate_ms: u16) -> Result<(), AnimationError> {
        if rate_ms == 0 {
            return Err(AnimationError::ZeroRate);
        }
        self.rate_override = Some(rate_ms);
        Ok(())
    }

    /// Return to the catalog refresh interval at the next frame boundary
    pub fn clear_refresh_rate(&mut self) {
        self.rate_override = None;
    }

    /// Show or hide a status icon
    pub fn show_icon(&mut self, icon: Icon, shown: bool) {
        self.icons.set(icon, shown);
    }

    /// Apply a selection decision (icons, rate, animation)
    ///
    /// A `rate_ms` of 0 falls back to the catalog rate. Returns whether the
    /// animation changed.
    pub fn apply(&mut self, selection: &Selection) -> bool {
        self.icons = selection.icons;
        if self.set_refresh_rate(selection.rate_ms).is_err() {
            self.clear_refresh_rate();
        }
        self.select(selection.animation)
    }

    /// Advance playback by `elapsed_ms` and store the composed frame
    ///
    /// Returns `true` when the sprite frame changed (new selection shown or
    /// cursor advanced). The frame is stored on every call so icon changes
    /// appear within one update.
    pub fn update<S: FrameSink + ?Sized>(&mut self, elapsed_ms: u32, sink: &mut S) -> bool {
        let changed = if self.pending {
            self.pending = false;
            self.elapsed_ms = 0;
            true
        } else {
            self.advance(elapsed_ms)
        };

        let mut frame = match self.sheet.frame(self.frame_index()) {
            Some(bytes) => FrameBuffer::from_bytes(*bytes),
            None => FrameBuffer::new(),
        };
        self.icons.apply(&mut frame);
        sink.store(frame.as_bytes());

        changed
    }

    fn advance(&mut self, elapsed_ms: u32) -> bool {
        let length = self.catalog.get(self.current).length;
        let mut advanced = false;

        self.elapsed_ms = self.elapsed_ms.saturating_add(elapsed_ms);
        while self.elapsed_ms >= u32::from(self.active_rate) {
            self.elapsed_ms -= u32::from(self.active_rate);
            // cursor < length <= 255, so cursor + 1 cannot overflow
            self.cursor = if self.cursor + 1 >= length {
                0
            } else {
                self.cursor + 1
            };
            self.active_rate = self.effective_rate();
            advanced = true;
        }
        advanced
    }

    fn effective_rate(&self) -> u16 {
        self.rate_override
            .unwrap_or(self.catalog.get(self.current).rate_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::catalog::{AnimationSet, DEFAULT_CATALOG, NUM_OF_FRAMES};
    use crate::display::{Frame, FRAME_SIZE};
    use proptest::prelude::*;

    const SHEET_FRAMES: usize = 32;

    /// Sheet where every byte of frame `i` equals `i`
    fn numbered_sheet() -> [u8; FRAME_SIZE * SHEET_FRAMES] {
        let mut blob = [0u8; FRAME_SIZE * SHEET_FRAMES];
        for (i, b) in blob.iter_mut().enumerate() {
            *b = (i / FRAME_SIZE) as u8;
        }
        blob
    }

    /// Catalog with every entry set to `set`
    fn uniform_catalog(set: AnimationSet) -> Catalog {
        Catalog::new([set; AnimationId::COUNT])
    }

    fn catalog_with(id: AnimationId, set: AnimationSet) -> Catalog {
        let mut sets = [AnimationSet::new(0, 1, 100); AnimationId::COUNT];
        sets[id.index()] = set;
        Catalog::new(sets)
    }

    #[test]
    fn test_new_validates_catalog() {
        let blob = numbered_sheet();
        let sheet = SpriteSheet::new(&blob).unwrap();
        let catalog = catalog_with(AnimationId::HatchEgg, AnimationSet::new(30, 4, 100));

        assert_eq!(
            AnimationPlayer::new(sheet, &catalog).err(),
            Some(AnimationError::Catalog(CatalogError::OutOfBounds(
                AnimationId::HatchEgg
            )))
        );
    }

    #[test]
    fn test_default_catalog_against_full_sheet() {
        let blob = [0u8; FRAME_SIZE * NUM_OF_FRAMES];
        let sheet = SpriteSheet::new(&blob).unwrap();
        let player = AnimationPlayer::new(sheet, &DEFAULT_CATALOG).unwrap();
        assert_eq!(player.current(), AnimationId::IdleEgg);
        assert_eq!(player.refresh_rate(), 500);
    }

    #[test]
    fn test_first_update_shows_frame_zero() {
        let blob = numbered_sheet();
        let sheet = SpriteSheet::new(&blob).unwrap();
        let catalog = uniform_catalog(AnimationSet::new(5, 3, 100));
        let mut player = AnimationPlayer::new(sheet, &catalog).unwrap();
        let mut out = FrameBuffer::new();

        assert!(player.update(1, &mut out));
        assert_eq!(out.as_bytes(), &[5u8; FRAME_SIZE]);

        // Time spent before the first frame is not carried over
        assert!(!player.update(99, &mut out));
        assert!(player.update(1, &mut out));
        assert_eq!(out.as_bytes()[0], 6);
    }

    #[test]
    fn test_reselect_keeps_cursor() {
        let blob = numbered_sheet();
        let sheet = SpriteSheet::new(&blob).unwrap();
        let catalog = uniform_catalog(AnimationSet::new(0, 8, 10));
        let mut player = AnimationPlayer::new(sheet, &catalog).unwrap();
        let mut out = FrameBuffer::new();

        player.update(0, &mut out);
        player.update(10, &mut out);
        player.update(10, &mut out);
        assert_eq!(player.cursor(), 2);

        assert!(!player.select(AnimationId::IdleEgg));
        player.update(5, &mut out);
        assert_eq!(player.cursor(), 2);
        assert_eq!(out.as_bytes()[0], 2);
    }

    #[test]
    fn test_switch_resets_cursor() {
        let blob = numbered_sheet();
        let sheet = SpriteSheet::new(&blob).unwrap();
        let mut sets = [AnimationSet::new(0, 4, 10); AnimationId::COUNT];
        sets[AnimationId::IdleBabytchi.index()] = AnimationSet::new(10, 6, 20);
        let catalog = Catalog::new(sets);
        let mut player = AnimationPlayer::new(sheet, &catalog).unwrap();
        let mut out = FrameBuffer::new();

        player.update(0, &mut out);
        player.update(10, &mut out);
        player.update(7, &mut out);
        assert_eq!(player.cursor(), 1);

        assert!(player.select(AnimationId::IdleBabytchi));
        assert_eq!(player.cursor(), 0);
        assert_eq!(player.refresh_rate(), 20);

        // Leftover time from the old animation does not advance the new one
        assert!(player.update(15, &mut out));
        assert_eq!(out.as_bytes()[0], 10);
        assert!(!player.update(15, &mut out));
        assert!(player.update(5, &mut out));
        assert_eq!(out.as_bytes()[0], 11);
    }

    #[test]
    fn test_single_frame_never_advances() {
        let blob = numbered_sheet();
        let sheet = SpriteSheet::new(&blob).unwrap();
        let catalog = uniform_catalog(AnimationSet::new(7, 1, 1));
        let mut player = AnimationPlayer::new(sheet, &catalog).unwrap();
        let mut out = FrameBuffer::new();

        for _ in 0..100 {
            player.update(3, &mut out);
            assert_eq!(player.cursor(), 0);
            assert_eq!(out.as_bytes()[0], 7);
        }
    }

    #[test]
    fn test_two_frame_alternation_without_drift() {
        let mut blob = [0u8; FRAME_SIZE * 2];
        blob[..FRAME_SIZE].fill(0xFF);
        let sheet = SpriteSheet::new(&blob).unwrap();
        let catalog = uniform_catalog(AnimationSet::new(0, 2, 10));
        let mut player = AnimationPlayer::new(sheet, &catalog).unwrap();
        let mut out = FrameBuffer::new();

        for tick in 0..1000u32 {
            player.update(1, &mut out);
            let expected: Frame = if (tick / 10) % 2 == 0 {
                [0xFF; FRAME_SIZE]
            } else {
                [0x00; FRAME_SIZE]
            };
            assert_eq!(out.as_bytes(), &expected, "tick {}", tick);
        }
    }

    #[test]
    fn test_refresh_rate_latched_at_boundary() {
        let blob = numbered_sheet();
        let sheet = SpriteSheet::new(&blob).unwrap();
        let catalog = uniform_catalog(AnimationSet::new(0, 8, 100));
        let mut player = AnimationPlayer::new(sheet, &catalog).unwrap();
        let mut out = FrameBuffer::new();

        player.update(0, &mut out);
        player.update(40, &mut out);
        player.set_refresh_rate(10).unwrap();

        // Current interval still runs at 100 ms
        assert_eq!(player.refresh_rate(), 100);
        assert!(!player.update(50, &mut out));
        assert!(player.update(10, &mut out));
        assert_eq!(player.cursor(), 1);

        // Next interval uses the override
        assert_eq!(player.refresh_rate(), 10);
        assert!(player.update(10, &mut out));
        assert_eq!(player.cursor(), 2);
    }

    #[test]
    fn test_zero_rate_rejected() {
        let blob = numbered_sheet();
        let sheet = SpriteSheet::new(&blob).unwrap();
        let catalog = uniform_catalog(AnimationSet::new(0, 2, 100));
        let mut player = AnimationPlayer::new(sheet, &catalog).unwrap();

        assert_eq!(player.set_refresh_rate(0), Err(AnimationError::ZeroRate));
        assert_eq!(player.refresh_rate(), 100);
    }

    #[test]
    fn test_icon_overlay_every_update() {
        let blob = [0u8; FRAME_SIZE * 2];
        let sheet = SpriteSheet::new(&blob).unwrap();
        let catalog = uniform_catalog(AnimationSet::new(0, 2, 1));
        let mut player = AnimationPlayer::new(sheet, &catalog).unwrap();
        let mut out = FrameBuffer::new();

        player.show_icon(Icon::Poo, true);
        for _ in 0..10 {
            player.update(1, &mut out);
            for (index, mask) in Icon::Poo.glyph() {
                assert_eq!(out.as_bytes()[index] & mask, mask);
            }
        }

        // Icons survive a switch
        player.select(AnimationId::IdleObaketchi);
        player.update(1, &mut out);
        assert_eq!(out.as_bytes()[63] & 0x07, 0x07);

        player.show_icon(Icon::Poo, false);
        player.update(0, &mut out);
        assert_eq!(out, FrameBuffer::new());
    }

    #[test]
    fn test_apply_selection() {
        let blob = numbered_sheet();
        let sheet = SpriteSheet::new(&blob).unwrap();
        let catalog = uniform_catalog(AnimationSet::new(0, 2, 500));
        let mut player = AnimationPlayer::new(sheet, &catalog).unwrap();

        let selection = Selection {
            animation: AnimationId::IdleObaketchi,
            rate_ms: 750,
            icons: IconSet::empty().with(Icon::Skull),
        };
        assert!(player.apply(&selection));
        assert_eq!(player.current(), AnimationId::IdleObaketchi);
        assert_eq!(player.refresh_rate(), 750);
        assert!(player.icons().contains(Icon::Skull));

        assert!(!player.apply(&selection));
    }

    proptest! {
        #[test]
        fn prop_animation_is_periodic(
            offset in 0u16..16,
            length in 1u8..=16,
            rate in 1u16..1000,
        ) {
            let blob = numbered_sheet();
            let sheet = SpriteSheet::new(&blob).unwrap();
            let catalog = uniform_catalog(AnimationSet::new(offset, length, rate));
            let mut player = AnimationPlayer::new(sheet, &catalog).unwrap();
            let mut out = FrameBuffer::new();

            player.update(0, &mut out);
            for step in 0..(3 * usize::from(length)) {
                let expected = offset as usize + step % usize::from(length);
                prop_assert_eq!(usize::from(out.as_bytes()[0]), expected);
                prop_assert!(player.update(u32::from(rate), &mut out));
            }
        }

        #[test]
        fn prop_advances_once_per_interval(
            rate in 1u16..200,
            ticks in prop::collection::vec(0u32..50, 1..200),
        ) {
            let blob = numbered_sheet();
            let sheet = SpriteSheet::new(&blob).unwrap();
            let catalog = uniform_catalog(AnimationSet::new(0, 32, rate));
            let mut player = AnimationPlayer::new(sheet, &catalog).unwrap();
            let mut out = FrameBuffer::new();

            player.update(0, &mut out);
            let total: u32 = ticks.iter().sum();
            for dt in &ticks {
                player.update(*dt, &mut out);
            }
            let expected = (total / u32::from(rate)) % 32;
            prop_assert_eq!(u32::from(player.cursor()), expected);
        }
    }
}
