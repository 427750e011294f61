//! Pet life cycle
//!
//! Statistics and evolution bookkeeping. The animation side only ever sees a
//! [`Stats`] snapshot; see [`crate::selection`].

pub mod machine;
pub mod persist;
pub mod stats;

pub use machine::LifeCycle;
pub use persist::{decode, encode, PersistError, RECORD_VERSION};
pub use stats::{Evolution, Stage, Stats, StatusFlag};
