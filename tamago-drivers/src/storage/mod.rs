//! Non-volatile storage

pub mod m24fc256;

pub use m24fc256::M24fc256;
