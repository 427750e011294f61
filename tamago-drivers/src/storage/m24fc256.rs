//! Microchip 24FC256 serial EEPROM
//!
//! 32 KiB organised as 512 pages of 64 bytes, addressed with a 16-bit
//! big-endian memory address. Only whole-page transfers are supported: a
//! partial write would still cost the page a full write cycle, so there is
//! nothing to gain from byte-wise access.
//!
//! After every write the device ignores the bus until its internal write
//! cycle finishes (up to 5 ms). The driver waits by acknowledge polling:
//! it re-addresses the chip until it answers, giving up after
//! [`ACK_POLL_LIMIT`] attempts.

use heapless::Vec;
use tamago_core::traits::{PageStorage, StorageError, PAGE_SIZE};
use tamago_hal::I2cBus;

/// 7-bit bus address with A0..A2 tied low
pub const ADDRESS: u8 = 0x50;

/// Device capacity in bytes
pub const CAPACITY: usize = 32 * 1024;

/// Number of pages
pub const PAGE_COUNT: u16 = (CAPACITY / PAGE_SIZE) as u16;

/// Acknowledge polls before a write is considered stuck
pub const ACK_POLL_LIMIT: u16 = 200;

/// 24FC256 driver
pub struct M24fc256<I2C> {
    i2c: I2C,
}

impl<I2C: I2cBus> M24fc256<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    /// Check the device answers on the bus
    pub fn probe(&mut self) -> Result<(), StorageError> {
        self.wait_until_ready()
    }

    /// Read consecutive pages starting at byte `address` into `buf`
    ///
    /// `address` and `buf.len()` must be multiples of [`PAGE_SIZE`].
    pub fn read_pages(&mut self, address: u16, buf: &mut [u8]) -> Result<(), StorageError> {
        Self::check_range(address, buf.len())?;
        self.wait_until_ready()?;

        let mut memory = address;
        for chunk in buf.chunks_exact_mut(PAGE_SIZE) {
            self.i2c
                .write_read(ADDRESS, &memory.to_be_bytes(), chunk)
                .map_err(|_| StorageError::Bus)?;
            memory = memory.wrapping_add(PAGE_SIZE as u16);
        }
        Ok(())
    }

    /// Write consecutive pages starting at byte `address`
    ///
    /// Returns once the last page has been committed.
    pub fn write_pages(&mut self, address: u16, data: &[u8]) -> Result<(), StorageError> {
        Self::check_range(address, data.len())?;

        let mut memory = address;
        for chunk in data.chunks_exact(PAGE_SIZE) {
            let mut tx: Vec<u8, { PAGE_SIZE + 2 }> = Vec::new();
            tx.extend_from_slice(&memory.to_be_bytes())
                .map_err(|_| StorageError::Unaligned)?;
            tx.extend_from_slice(chunk)
                .map_err(|_| StorageError::Unaligned)?;

            self.i2c
                .write(ADDRESS, &tx)
                .map_err(|_| StorageError::Bus)?;
            self.wait_until_ready()?;
            memory = memory.wrapping_add(PAGE_SIZE as u16);
        }
        Ok(())
    }

    /// Release the bus
    pub fn release(self) -> I2C {
        self.i2c
    }

    fn check_range(address: u16, len: usize) -> Result<(), StorageError> {
        if usize::from(address) % PAGE_SIZE != 0 || len % PAGE_SIZE != 0 {
            return Err(StorageError::Unaligned);
        }
        if usize::from(address) + len > CAPACITY {
            return Err(StorageError::OutOfRange);
        }
        Ok(())
    }

    /// Acknowledge polling
    fn wait_until_ready(&mut self) -> Result<(), StorageError> {
        for _ in 0..ACK_POLL_LIMIT {
            // Addressing the chip with a memory pointer and no data is
            // acknowledged only once the write cycle has finished
            if self.i2c.write(ADDRESS, &[0, 0]).is_ok() {
                return Ok(());
            }
        }
        Err(StorageError::Timeout)
    }
}

impl<I2C: I2cBus> PageStorage for M24fc256<I2C> {
    fn page_count(&self) -> u16 {
        PAGE_COUNT
    }

    fn read_page(&mut self, page: u16, buf: &mut [u8; PAGE_SIZE]) -> Result<(), StorageError> {
        if page >= PAGE_COUNT {
            return Err(StorageError::OutOfRange);
        }
        self.read_pages(page * PAGE_SIZE as u16, buf)
    }

    fn write_page(&mut self, page: u16, data: &[u8; PAGE_SIZE]) -> Result<(), StorageError> {
        if page >= PAGE_COUNT {
            return Err(StorageError::OutOfRange);
        }
        self.write_pages(page * PAGE_SIZE as u16, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::boxed::Box;

    /// Simulated EEPROM that stays busy for a few polls after each write
    struct MockEeprom {
        memory: Box<[u8; CAPACITY]>,
        pointer: usize,
        busy_polls: u16,
        busy_after_write: u16,
        page_writes: u16,
    }

    impl MockEeprom {
        fn new(busy_after_write: u16) -> Self {
            Self {
                memory: Box::new([0xFF; CAPACITY]),
                pointer: 0,
                busy_polls: 0,
                busy_after_write,
                page_writes: 0,
            }
        }
    }

    impl I2cBus for MockEeprom {
        type Error = ();

        fn write(&mut self, address: u8, data: &[u8]) -> Result<(), ()> {
            if address != ADDRESS {
                return Err(());
            }
            if self.busy_polls > 0 {
                self.busy_polls -= 1;
                return Err(());
            }
            let (addr, payload) = data.split_at(2);
            self.pointer = usize::from(u16::from_be_bytes([addr[0], addr[1]]));
            if !payload.is_empty() {
                // Page writes wrap within the page
                let page_start = self.pointer - self.pointer % PAGE_SIZE;
                for (i, b) in payload.iter().enumerate() {
                    let offset = (self.pointer + i) % PAGE_SIZE;
                    self.memory[page_start + offset] = *b;
                }
                self.page_writes += 1;
                self.busy_polls = self.busy_after_write;
            }
            Ok(())
        }

        fn write_read(&mut self, address: u8, write: &[u8], read: &mut [u8]) -> Result<(), ()> {
            if address != ADDRESS || self.busy_polls > 0 {
                return Err(());
            }
            self.pointer = usize::from(u16::from_be_bytes([write[0], write[1]]));
            for (i, b) in read.iter_mut().enumerate() {
                *b = self.memory[(self.pointer + i) % CAPACITY];
            }
            Ok(())
        }
    }

    #[test]
    fn test_write_then_read_pages() {
        let mut eeprom = M24fc256::new(MockEeprom::new(3));
        let mut data = [0u8; 2 * PAGE_SIZE];
        for (i, b) in data.iter_mut().enumerate() {
            *b = i as u8;
        }

        eeprom.write_pages(128, &data).unwrap();

        let mut back = [0u8; 2 * PAGE_SIZE];
        eeprom.read_pages(128, &mut back).unwrap();
        assert_eq!(back, data);

        let bus = eeprom.release();
        assert_eq!(bus.page_writes, 2);
        assert_eq!(bus.memory[127], 0xFF);
        assert_eq!(bus.memory[128 + 2 * PAGE_SIZE], 0xFF);
    }

    #[test]
    fn test_page_storage() {
        let mut eeprom = M24fc256::new(MockEeprom::new(1));
        assert_eq!(eeprom.page_count(), 512);

        eeprom.write_page(511, &[0x5A; PAGE_SIZE]).unwrap();
        let mut page = [0u8; PAGE_SIZE];
        eeprom.read_page(511, &mut page).unwrap();
        assert_eq!(page, [0x5A; PAGE_SIZE]);

        assert_eq!(
            eeprom.read_page(512, &mut page),
            Err(StorageError::OutOfRange)
        );
    }

    #[test]
    fn test_unaligned_rejected() {
        let mut eeprom = M24fc256::new(MockEeprom::new(0));
        let mut buf = [0u8; PAGE_SIZE];
        assert_eq!(eeprom.read_pages(10, &mut buf), Err(StorageError::Unaligned));
        assert_eq!(
            eeprom.write_pages(0, &[0u8; 10]),
            Err(StorageError::Unaligned)
        );
    }

    #[test]
    fn test_stuck_write_times_out() {
        let mut eeprom = M24fc256::new(MockEeprom::new(ACK_POLL_LIMIT + 1));
        assert_eq!(
            eeprom.write_page(0, &[0u8; PAGE_SIZE]),
            Err(StorageError::Timeout)
        );
    }

    #[test]
    fn test_erased_device_reads_ff() {
        let mut eeprom = M24fc256::new(MockEeprom::new(0));
        eeprom.probe().unwrap();
        let mut page = [0u8; PAGE_SIZE];
        eeprom.read_page(0, &mut page).unwrap();
        assert_eq!(page, [0xFF; PAGE_SIZE]);
    }
}
