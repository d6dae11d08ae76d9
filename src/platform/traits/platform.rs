//! Root platform trait
//!
//! This module defines the root Platform trait that aggregates the
//! peripheral interfaces the datalogger core needs.

use super::{FlashInterface, TimerInterface, UartConfig, UartInterface};
use crate::platform::Result;

/// Root platform trait
///
/// Aggregates the serial link, embedded flash and timer behind associated
/// types, so the core is generic over the target through compile-time
/// dispatch. Board-level bring-up (clocks, pin muxing, USB) happens inside
/// [`init`](Platform::init) and is otherwise outside this crate's scope.
pub trait Platform: Sized {
    /// UART peripheral type
    type Uart: UartInterface;

    /// Flash peripheral type
    type Flash: FlashInterface;

    /// Timer peripheral type
    type Timer: TimerInterface;

    /// Initialize the platform
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::InitializationFailed` if board bring-up fails.
    fn init() -> Result<Self>;

    /// Create the datalogger UART
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::ResourceUnavailable` if the UART is already
    /// taken, or `PlatformError::Uart` for an unsupported configuration.
    fn create_uart(&mut self, config: UartConfig) -> Result<Self::Uart>;

    /// Create the embedded flash driver
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::ResourceUnavailable` if the flash is already
    /// taken.
    fn create_flash(&mut self) -> Result<Self::Flash>;

    /// Get timer instance
    fn timer(&self) -> &Self::Timer;

    /// Get mutable timer instance
    fn timer_mut(&mut self) -> &mut Self::Timer;
}
