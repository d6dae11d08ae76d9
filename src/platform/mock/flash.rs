//! Mock Flash implementation for testing
//!
//! Provides in-memory Flash simulation for unit tests.

use crate::platform::{error::FlashError, traits::FlashInterface, Result};
use alloc::vec;
use alloc::vec::Vec;
use core::cell::RefCell;

/// Flash page size (1 KB, same as STM32F103 medium density)
const PAGE_SIZE: u32 = 0x400;

/// Number of pages (128 x 1 KB = 128 KB)
const PAGE_COUNT: u32 = 128;

/// Mock Flash implementation
///
/// Simulates embedded flash in memory for testing. Supports:
/// - Lock/unlock bracket enforcement (erase/program while locked fail)
/// - Page-granular erase with per-page erase count tracking
/// - AND-semantics programming (bits only transition 1->0)
/// - Bounds checking on every operation
///
/// # Example
///
/// ```
/// use framelog::platform::mock::MockFlash;
/// use framelog::platform::traits::FlashInterface;
///
/// let mut flash = MockFlash::new();
///
/// flash.unlock().unwrap();
/// flash.erase_page(127).unwrap();
/// flash.program(127 * 0x400, &[0x41, 0x42]).unwrap();
/// flash.lock().unwrap();
///
/// let mut buf = [0u8; 2];
/// flash.read(127 * 0x400, &mut buf).unwrap();
/// assert_eq!(buf, [0x41, 0x42]);
/// ```
#[derive(Debug)]
pub struct MockFlash {
    /// Flash storage (initialized to 0xFF - erased state)
    storage: RefCell<Vec<u8>>,
    /// Erase count per page
    erase_counts: RefCell<Vec<u32>>,
    /// Lock state (true = locked, the power-on state)
    locked: RefCell<bool>,
}

impl MockFlash {
    /// Create a new mock Flash instance
    pub fn new() -> Self {
        let capacity = (PAGE_SIZE * PAGE_COUNT) as usize;
        Self {
            storage: RefCell::new(vec![0xFF; capacity]),
            erase_counts: RefCell::new(vec![0; PAGE_COUNT as usize]),
            locked: RefCell::new(true),
        }
    }

    /// Get Flash contents (for test verification)
    pub fn get_contents(&self, offset: u32, len: usize) -> Vec<u8> {
        let storage = self.storage.borrow();
        storage[offset as usize..offset as usize + len].to_vec()
    }

    /// Get erase count for a page
    pub fn get_erase_count(&self, page: u32) -> u32 {
        self.erase_counts.borrow()[page as usize]
    }

    /// Check whether the device is currently locked
    pub fn is_locked(&self) -> bool {
        *self.locked.borrow()
    }

    fn check_range(&self, offset: u32, len: usize) -> Result<()> {
        let capacity = (PAGE_SIZE * PAGE_COUNT) as usize;
        if offset as usize + len > capacity {
            return Err(FlashError::InvalidAddress.into());
        }
        Ok(())
    }
}

impl Default for MockFlash {
    fn default() -> Self {
        Self::new()
    }
}

impl FlashInterface for MockFlash {
    fn unlock(&mut self) -> Result<()> {
        *self.locked.borrow_mut() = false;
        Ok(())
    }

    fn lock(&mut self) -> Result<()> {
        *self.locked.borrow_mut() = true;
        Ok(())
    }

    fn erase_page(&mut self, page: u32) -> Result<()> {
        if page >= PAGE_COUNT {
            return Err(FlashError::InvalidAddress.into());
        }
        if *self.locked.borrow() {
            return Err(FlashError::Locked.into());
        }

        let start = (page * PAGE_SIZE) as usize;
        let mut storage = self.storage.borrow_mut();
        storage[start..start + PAGE_SIZE as usize].fill(0xFF);

        self.erase_counts.borrow_mut()[page as usize] += 1;
        Ok(())
    }

    fn program(&mut self, offset: u32, data: &[u8]) -> Result<()> {
        self.check_range(offset, data.len())?;
        if *self.locked.borrow() {
            return Err(FlashError::Locked.into());
        }

        // Flash can only change bits from 1 to 0
        let mut storage = self.storage.borrow_mut();
        for (i, &byte) in data.iter().enumerate() {
            storage[offset as usize + i] &= byte;
        }
        Ok(())
    }

    fn read(&mut self, offset: u32, buf: &mut [u8]) -> Result<()> {
        self.check_range(offset, buf.len())?;

        let storage = self.storage.borrow();
        buf.copy_from_slice(&storage[offset as usize..offset as usize + buf.len()]);
        Ok(())
    }

    fn page_size(&self) -> u32 {
        PAGE_SIZE
    }

    fn page_count(&self) -> u32 {
        PAGE_COUNT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_flash_read_write() {
        let mut flash = MockFlash::new();

        flash.unlock().unwrap();
        flash.erase_page(127).unwrap();
        flash.program(127 * PAGE_SIZE, &[0x41, 0x42, 0x43]).unwrap();
        flash.lock().unwrap();

        let mut buf = [0u8; 3];
        flash.read(127 * PAGE_SIZE, &mut buf).unwrap();
        assert_eq!(buf, [0x41, 0x42, 0x43]);
    }

    #[test]
    fn test_mock_flash_locked_rejects_operations() {
        let mut flash = MockFlash::new();
        assert!(flash.is_locked());

        assert!(flash.erase_page(127).is_err());
        assert!(flash.program(127 * PAGE_SIZE, &[0x00]).is_err());

        // Reads need no bracket
        let mut buf = [0u8; 1];
        assert!(flash.read(127 * PAGE_SIZE, &mut buf).is_ok());
        assert_eq!(buf[0], 0xFF);
    }

    #[test]
    fn test_mock_flash_erase_count() {
        let mut flash = MockFlash::new();

        flash.unlock().unwrap();
        flash.erase_page(10).unwrap();
        flash.erase_page(10).unwrap();
        flash.erase_page(10).unwrap();
        flash.lock().unwrap();

        assert_eq!(flash.get_erase_count(10), 3);
        assert_eq!(flash.get_erase_count(11), 0);
    }

    #[test]
    fn test_mock_flash_invalid_address() {
        let mut flash = MockFlash::new();
        flash.unlock().unwrap();

        assert!(flash.erase_page(PAGE_COUNT).is_err());
        assert!(flash.program(PAGE_SIZE * PAGE_COUNT, &[0x00]).is_err());

        let mut buf = [0u8; 2];
        assert!(flash.read(PAGE_SIZE * PAGE_COUNT - 1, &mut buf).is_err());
    }

    #[test]
    fn test_mock_flash_write_only_clears_bits() {
        let mut flash = MockFlash::new();
        let base = 127 * PAGE_SIZE;

        flash.unlock().unwrap();
        flash.erase_page(127).unwrap();

        // Write 0x0F (clears upper 4 bits)
        flash.program(base, &[0x0F]).unwrap();
        let mut buf = [0u8; 1];
        flash.read(base, &mut buf).unwrap();
        assert_eq!(buf[0], 0x0F);

        // Writing 0xFF over it cannot set bits back
        flash.program(base, &[0xFF]).unwrap();
        flash.read(base, &mut buf).unwrap();
        assert_eq!(buf[0], 0x0F);

        // Erase restores 0xFF
        flash.erase_page(127).unwrap();
        flash.read(base, &mut buf).unwrap();
        assert_eq!(buf[0], 0xFF);
    }
}
