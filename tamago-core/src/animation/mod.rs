//! Sprite-sheet animation
//!
//! Every animation is a run of consecutive frames in one flat sprite sheet.
//! The [`catalog`] names the runs, the [`player`] steps through the selected
//! run at its refresh rate and the [`icons`] overlay is OR-ed on top of
//! every frame it emits.

pub mod catalog;
pub mod icons;
pub mod player;
pub mod sheet;

pub use catalog::{
    AnimationId, AnimationSet, Catalog, CatalogError, DEFAULT_CATALOG, DEFAULT_RATE_MS,
    NUM_OF_FRAMES,
};
pub use icons::{Icon, IconSet};
pub use player::{AnimationError, AnimationPlayer};
pub use sheet::{SheetError, SpriteSheet};
