//! Paged non-volatile storage trait

/// Errors from page storage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageError {
    /// Page index beyond the device
    OutOfRange,
    /// Address or length not a whole number of pages
    Unaligned,
    /// Bus transfer failed
    Bus,
    /// Device stayed busy after a write
    Timeout,
}

/// Size of one storage page in bytes
pub const PAGE_SIZE: usize = 64;

/// Storage addressed in fixed 64-byte pages
pub trait PageStorage {
    /// Number of pages the device holds
    fn page_count(&self) -> u16;

    /// Read one page
    fn read_page(&mut self, page: u16, buf: &mut [u8; PAGE_SIZE]) -> Result<(), StorageError>;

    /// Write one page, returning once the device has committed it
    fn write_page(&mut self, page: u16, data: &[u8; PAGE_SIZE]) -> Result<(), StorageError>;
}
