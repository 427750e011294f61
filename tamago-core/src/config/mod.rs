//! Configuration types
//!
//! Board-agnostic configuration structures stored as postcard binary data.

pub mod types;
pub mod validate;

pub use types::*;
pub use validate::ConfigError;
