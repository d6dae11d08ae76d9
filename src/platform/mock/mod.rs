//! Mock platform implementation for testing
//!
//! This module provides mock implementations of platform traits that can be
//! used for unit testing without requiring actual hardware.
//!
//! # Feature Gate
//!
//! This module is available in two contexts:
//! - During test builds (`#[cfg(test)]`)
//! - When the `mock` feature is enabled
//!
//! # Example
//!
//! ```
//! use framelog::platform::mock::MockUart;
//! use framelog::platform::traits::UartInterface;
//!
//! let mut uart = MockUart::new(Default::default());
//! uart.inject_rx_data(&[0x8D]);
//! assert_eq!(uart.read_byte().unwrap(), Some(0x8D));
//! assert_eq!(uart.read_byte().unwrap(), None);
//! ```

#![cfg(any(test, feature = "mock"))]

mod flash;
mod platform;
mod timer;
mod uart;

pub use flash::MockFlash;
pub use platform::MockPlatform;
pub use timer::MockTimer;
pub use uart::MockUart;
