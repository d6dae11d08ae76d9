//! Timer interface trait
//!
//! This module defines the monotonic time source that platform
//! implementations must provide.

use crate::platform::Result;

/// Timer interface trait
///
/// Provides delays and a monotonic microsecond clock. The receiver uses
/// `now_us` to bound the lifetime of a partially received packet.
pub trait TimerInterface {
    /// Delay for the given number of microseconds
    fn delay_us(&mut self, us: u32) -> Result<()>;

    /// Delay for the given number of milliseconds
    fn delay_ms(&mut self, ms: u32) -> Result<()> {
        self.delay_us(ms.saturating_mul(1000))
    }

    /// Monotonic time since boot in microseconds
    fn now_us(&self) -> u64;

    /// Monotonic time since boot in milliseconds
    fn now_ms(&self) -> u64 {
        self.now_us() / 1000
    }
}
