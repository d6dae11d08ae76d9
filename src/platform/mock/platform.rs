//! Mock Platform implementation for testing

use crate::platform::{
    error::PlatformError,
    traits::{Platform, UartConfig},
    Result,
};

use super::{MockFlash, MockTimer, MockUart};

/// Mock Platform implementation
///
/// Provides mock peripheral implementations for hardware-free testing.
///
/// # Example
///
/// ```
/// use framelog::platform::mock::MockPlatform;
/// use framelog::platform::traits::{Platform, UartInterface};
///
/// let mut platform = MockPlatform::init().unwrap();
/// let mut uart = platform.create_uart(Default::default()).unwrap();
/// uart.write(b"test").unwrap();
/// ```
#[derive(Debug)]
pub struct MockPlatform {
    timer: MockTimer,
    uart_taken: bool,
    flash_taken: bool,
}

impl MockPlatform {
    /// Create a new mock platform
    pub fn new() -> Self {
        Self {
            timer: MockTimer::new(),
            uart_taken: false,
            flash_taken: false,
        }
    }
}

impl Default for MockPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl Platform for MockPlatform {
    type Uart = MockUart;
    type Flash = MockFlash;
    type Timer = MockTimer;

    fn init() -> Result<Self> {
        Ok(Self::new())
    }

    fn create_uart(&mut self, config: UartConfig) -> Result<Self::Uart> {
        if self.uart_taken {
            return Err(PlatformError::ResourceUnavailable);
        }
        self.uart_taken = true;
        Ok(MockUart::new(config))
    }

    fn create_flash(&mut self) -> Result<Self::Flash> {
        if self.flash_taken {
            return Err(PlatformError::ResourceUnavailable);
        }
        self.flash_taken = true;
        Ok(MockFlash::new())
    }

    fn timer(&self) -> &Self::Timer {
        &self.timer
    }

    fn timer_mut(&mut self) -> &mut Self::Timer {
        &mut self.timer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_platform_single_uart() {
        let mut platform = MockPlatform::init().unwrap();
        assert!(platform.create_uart(UartConfig::default()).is_ok());
        assert_eq!(
            platform.create_uart(UartConfig::default()).unwrap_err(),
            PlatformError::ResourceUnavailable
        );
    }

    #[test]
    fn test_mock_platform_single_flash() {
        let mut platform = MockPlatform::init().unwrap();
        assert!(platform.create_flash().is_ok());
        assert!(platform.create_flash().is_err());
    }
}
