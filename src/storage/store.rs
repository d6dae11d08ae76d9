//! Flash-backed sequential store
//!
//! `FlashStore` appends accepted payloads into a fixed range of erase
//! pages and tracks the next free byte offset. The region is volatile
//! scratch storage by policy: `init` always bulk-erases it, because the
//! cursor is never persisted and NOR cells cannot be reprogrammed without
//! an erase. Data does not survive a restart.
//!
//! Every erase/program runs inside the flash driver's unlock/lock
//! bracket; the bracket never interleaves with reads from the same store.

use crate::log_info;
use crate::platform::{FlashInterface, PlatformError};
use core::fmt;

/// Store errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    /// Commit would advance the cursor past the region capacity
    CapacityExceeded,
    /// Underlying flash driver failed
    Platform(PlatformError),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::CapacityExceeded => write!(f, "flash region capacity exceeded"),
            StoreError::Platform(e) => write!(f, "flash driver error: {}", e),
        }
    }
}

impl From<PlatformError> for StoreError {
    fn from(e: PlatformError) -> Self {
        StoreError::Platform(e)
    }
}

/// Sequential store over a reserved flash erase region
///
/// Owns the page bounds and the write cursor. The cursor starts at zero,
/// advances by exactly the length of each committed payload and never
/// moves otherwise; rejected commits leave both cursor and flash
/// untouched.
///
/// # Example
///
/// ```
/// use framelog::platform::mock::MockFlash;
/// use framelog::storage::FlashStore;
///
/// let mut flash = MockFlash::new();
/// let mut store = FlashStore::init(&mut flash, 127, 127).unwrap();
///
/// store.commit(&mut flash, b"ABC").unwrap();
/// assert_eq!(store.len(), 3);
///
/// let mut buf = [0u8; 3];
/// store.read(&mut flash, 0, &mut buf).unwrap();
/// assert_eq!(&buf, b"ABC");
/// ```
#[derive(Debug)]
pub struct FlashStore {
    /// First page of the reserved region (inclusive)
    start_page: u32,
    /// Last page of the reserved region (inclusive)
    end_page: u32,
    /// Erase page size of the device, cached at init
    page_size: u32,
    /// Next free byte offset relative to the start page base
    cursor: u32,
}

impl FlashStore {
    /// Initialize the store over pages `start_page..=end_page`
    ///
    /// Validates the range against the device geometry, then bulk-erases
    /// every page in the region inside one unlock/lock bracket and resets
    /// the cursor to zero. Anything previously stored is destroyed; the
    /// region is scratch storage, not persistent across restarts.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::InvalidConfig` for an empty or out-of-range
    /// page span, or the flash driver's error if an erase fails.
    pub fn init<F: FlashInterface>(
        flash: &mut F,
        start_page: u32,
        end_page: u32,
    ) -> Result<Self, PlatformError> {
        if start_page > end_page || end_page >= flash.page_count() {
            return Err(PlatformError::InvalidConfig);
        }

        flash.unlock()?;
        let mut result = Ok(());
        for page in start_page..=end_page {
            result = flash.erase_page(page);
            if result.is_err() {
                break;
            }
        }
        // Leave the device locked even if an erase failed
        flash.lock()?;
        result?;

        log_info!(
            "flash region pages {}..={} erased, cursor reset",
            start_page,
            end_page
        );

        Ok(Self {
            start_page,
            end_page,
            page_size: flash.page_size(),
            cursor: 0,
        })
    }

    /// Append a payload at the current cursor
    ///
    /// Programs `payload` at `region base + cursor` inside an unlock/lock
    /// bracket, then advances the cursor by the payload length. An empty
    /// payload is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::CapacityExceeded` if the payload does not fit
    /// in the remaining region; cursor and flash are left unchanged. Flash
    /// driver failures surface as `StoreError::Platform` (the device is
    /// re-locked, the cursor does not advance).
    pub fn commit<F: FlashInterface>(
        &mut self,
        flash: &mut F,
        payload: &[u8],
    ) -> Result<(), StoreError> {
        if payload.is_empty() {
            return Ok(());
        }
        if payload.len() as u32 > self.capacity() - self.cursor {
            return Err(StoreError::CapacityExceeded);
        }

        flash.unlock().map_err(StoreError::Platform)?;
        let programmed = flash.program(self.base() + self.cursor, payload);
        flash.lock().map_err(StoreError::Platform)?;
        programmed?;

        self.cursor += payload.len() as u32;
        Ok(())
    }

    /// Read stored bytes starting at `offset` (relative to the region base)
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::InvalidConfig` if the requested range reaches
    /// past the stored length.
    pub fn read<F: FlashInterface>(
        &self,
        flash: &mut F,
        offset: u32,
        buf: &mut [u8],
    ) -> Result<(), PlatformError> {
        if offset + buf.len() as u32 > self.cursor {
            return Err(PlatformError::InvalidConfig);
        }
        flash.read(self.base() + offset, buf)
    }

    /// Number of stored bytes (current cursor position)
    pub fn len(&self) -> u32 {
        self.cursor
    }

    /// True if nothing has been committed yet
    pub fn is_empty(&self) -> bool {
        self.cursor == 0
    }

    /// Region capacity in bytes
    pub fn capacity(&self) -> u32 {
        (self.end_page - self.start_page + 1) * self.page_size
    }

    /// Absolute byte offset of the region base
    fn base(&self) -> u32 {
        self.start_page * self.page_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::mock::MockFlash;

    fn store_over_one_page(flash: &mut MockFlash) -> FlashStore {
        FlashStore::init(flash, 127, 127).unwrap()
    }

    #[test]
    fn test_init_erases_region_and_locks() {
        let mut flash = MockFlash::new();

        // Dirty the region first
        flash.unlock().unwrap();
        flash.erase_page(127).unwrap();
        flash.program(127 * 0x400, &[0x00; 16]).unwrap();
        flash.lock().unwrap();

        let store = store_over_one_page(&mut flash);
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
        assert_eq!(store.capacity(), 0x400);
        assert_eq!(flash.get_erase_count(127), 2);
        assert!(flash.is_locked());
        assert!(flash.get_contents(127 * 0x400, 16).iter().all(|&b| b == 0xFF));
    }

    #[test]
    fn test_init_rejects_bad_range() {
        let mut flash = MockFlash::new();
        assert_eq!(
            FlashStore::init(&mut flash, 10, 9).unwrap_err(),
            PlatformError::InvalidConfig
        );
        assert_eq!(
            FlashStore::init(&mut flash, 127, 128).unwrap_err(),
            PlatformError::InvalidConfig
        );
    }

    #[test]
    fn test_commit_advances_cursor() {
        let mut flash = MockFlash::new();
        let mut store = store_over_one_page(&mut flash);

        store.commit(&mut flash, b"ABC").unwrap();
        assert_eq!(store.len(), 3);

        store.commit(&mut flash, b"DE").unwrap();
        assert_eq!(store.len(), 5);

        // Back-to-back layout, no delimiters
        assert_eq!(flash.get_contents(127 * 0x400, 5), b"ABCDE");
        assert!(flash.is_locked());
    }

    #[test]
    fn test_commit_empty_is_noop() {
        let mut flash = MockFlash::new();
        let mut store = store_over_one_page(&mut flash);

        store.commit(&mut flash, &[]).unwrap();
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_commit_capacity_guard() {
        let mut flash = MockFlash::new();
        let mut store = store_over_one_page(&mut flash);

        // Fill the 1 KB page in 255-byte chunks: 4 * 255 = 1020
        for _ in 0..4 {
            store.commit(&mut flash, &[0x55; 255]).unwrap();
        }
        assert_eq!(store.len(), 1020);

        // 5 more bytes would cross 1024
        assert_eq!(
            store.commit(&mut flash, &[0x55; 5]).unwrap_err(),
            StoreError::CapacityExceeded
        );
        assert_eq!(store.len(), 1020);

        // The remaining 4 bytes still fit exactly
        store.commit(&mut flash, &[0x55; 4]).unwrap();
        assert_eq!(store.len(), store.capacity());
    }

    #[test]
    fn test_read_bounds_checked_against_stored_length() {
        let mut flash = MockFlash::new();
        let mut store = store_over_one_page(&mut flash);
        store.commit(&mut flash, b"ABC").unwrap();

        let mut buf = [0u8; 3];
        store.read(&mut flash, 0, &mut buf).unwrap();
        assert_eq!(&buf, b"ABC");

        // Reading past the cursor is an error even though the flash
        // underneath is readable
        let mut buf4 = [0u8; 4];
        assert!(store.read(&mut flash, 0, &mut buf4).is_err());

        let mut one = [0u8; 1];
        assert!(store.read(&mut flash, 3, &mut one).is_err());
    }

    #[test]
    fn test_multi_page_region_capacity() {
        let mut flash = MockFlash::new();
        let store = FlashStore::init(&mut flash, 120, 123).unwrap();
        assert_eq!(store.capacity(), 4 * 0x400);
        for page in 120..=123 {
            assert_eq!(flash.get_erase_count(page), 1);
        }
    }
}
