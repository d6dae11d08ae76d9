//! Flash interface trait
//!
//! This module defines the embedded-flash driver interface that platform
//! implementations must provide.

use crate::platform::Result;

/// Flash interface trait
///
/// Models the unlock/operate/lock discipline of MCU embedded flash: erase
/// and program are only legal between [`unlock`](FlashInterface::unlock)
/// and [`lock`](FlashInterface::lock). Reads need no bracket.
///
/// # Safety Invariants
///
/// - Only one owner per flash instance; brackets must never nest or
///   interleave with another in-progress bracket
/// - Erase granularity is one page; programming assumes the target bytes
///   were erased (cells only transition 1→0)
/// - Byte offsets are absolute device offsets; the base of page `p` is
///   `p * page_size()`
pub trait FlashInterface {
    /// Unlock the device for erase/program operations
    fn unlock(&mut self) -> Result<()>;

    /// Re-lock the device
    fn lock(&mut self) -> Result<()>;

    /// Erase one page (all bytes become 0xFF)
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Flash` if the page index is out of range or
    /// the device is locked.
    fn erase_page(&mut self, page: u32) -> Result<()>;

    /// Program `data` starting at an absolute byte offset
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Flash` if the range falls outside the device
    /// or the device is locked.
    fn program(&mut self, offset: u32, data: &[u8]) -> Result<()>;

    /// Read `buf.len()` bytes starting at an absolute byte offset
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Flash` if the range falls outside the device.
    fn read(&mut self, offset: u32, buf: &mut [u8]) -> Result<()>;

    /// Erase page size in bytes
    fn page_size(&self) -> u32;

    /// Number of pages on the device
    fn page_count(&self) -> u32;

    /// Total device capacity in bytes
    fn capacity(&self) -> u32 {
        self.page_size() * self.page_count()
    }
}
