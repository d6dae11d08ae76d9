//! Platform abstraction layer
//!
//! This module provides hardware abstraction for the peripherals the
//! datalogger core touches: the serial link, the embedded flash and a
//! monotonic timer. All platform-specific code must live behind these
//! traits; the core never talks to a HAL directly.

pub mod error;
pub mod traits;

// Mock implementations for hardware-free testing
#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export commonly used types
pub use error::{PlatformError, Result};
pub use traits::{FlashInterface, Platform, TimerInterface, UartInterface};
