//! Capability traits
//!
//! These traits define the interface between the application logic
//! and hardware-specific implementations. Optional peripherals are
//! represented by `Option` at the composition root.

pub mod display;
pub mod sensor;
pub mod storage;

pub use display::{FrameSink, FrameSource};
pub use sensor::{SensorError, TemperatureSensor};
pub use storage::{PageStorage, StorageError, PAGE_SIZE};
