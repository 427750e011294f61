//! Stats record codec
//!
//! The pet's statistics are saved in one 64-byte storage page: byte 0 holds
//! the record version, the rest the postcard-encoded [`Stats`]. Unused bytes
//! are left erased (0xFF) so a blank device reads back as [`PersistError::Empty`].

use super::stats::Stats;
use crate::traits::PAGE_SIZE;

/// Current record layout
pub const RECORD_VERSION: u8 = 1;

/// Erased storage byte
const ERASED: u8 = 0xFF;

/// Stats record errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PersistError {
    /// Page has never been written
    Empty,
    /// Page written by a different record layout
    UnsupportedVersion(u8),
    /// Payload does not decode
    Corrupt,
    /// Stats do not fit in a page
    Overflow,
}

/// Encode `stats` into a storage page
pub fn encode(stats: &Stats, page: &mut [u8; PAGE_SIZE]) -> Result<(), PersistError> {
    page.fill(ERASED);
    page[0] = RECORD_VERSION;
    postcard::to_slice(stats, &mut page[1..]).map_err(|_| PersistError::Overflow)?;
    Ok(())
}

/// Decode a storage page
pub fn decode(page: &[u8; PAGE_SIZE]) -> Result<Stats, PersistError> {
    match page[0] {
        RECORD_VERSION => postcard::from_bytes(&page[1..]).map_err(|_| PersistError::Corrupt),
        ERASED => Err(PersistError::Empty),
        other => Err(PersistError::UnsupportedVersion(other)),
    }
}
