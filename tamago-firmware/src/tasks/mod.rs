//! Embassy async tasks
//!
//! Each task runs independently and communicates via the statics in
//! `channels`.

pub mod animation;
pub mod clock;
pub mod lifecycle;
pub mod scan;
pub mod sensor;

pub use animation::animation_task;
pub use clock::clock_task;
pub use lifecycle::{lifecycle_task, Eeprom};
pub use scan::{scan_task, PanelSpi};
pub use sensor::{sensor_task, Thermometer};
