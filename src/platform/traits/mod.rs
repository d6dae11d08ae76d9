//! Platform abstraction traits
//!
//! This module defines the traits that platform implementations must provide.

pub mod flash;
pub mod platform;
pub mod timer;
pub mod uart;

// Re-export trait interfaces
pub use flash::FlashInterface;
pub use platform::Platform;
pub use timer::TimerInterface;
pub use uart::{UartConfig, UartInterface, UartParity, UartStopBits};
