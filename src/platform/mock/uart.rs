//! Mock UART implementation for testing

use crate::platform::{
    traits::{UartConfig, UartInterface},
    Result,
};
use alloc::vec::Vec;
use core::cell::RefCell;

/// Mock UART implementation
///
/// Provides in-memory buffers for transmit and receive data, allowing unit
/// tests to drive the wire protocol byte-by-byte and inspect what the core
/// sends back.
///
/// # Example
///
/// ```
/// use framelog::platform::mock::MockUart;
/// use framelog::platform::traits::UartInterface;
///
/// let mut uart = MockUart::new(Default::default());
///
/// // Inject received data for testing
/// uart.inject_rx_data(b"abc");
/// assert_eq!(uart.read_byte().unwrap(), Some(b'a'));
///
/// // Verify transmitted data
/// uart.write_byte(0x90).unwrap();
/// assert_eq!(uart.tx_buffer(), [0x90]);
/// ```
#[derive(Debug)]
pub struct MockUart {
    config: UartConfig,
    tx_buffer: RefCell<Vec<u8>>,
    rx_buffer: RefCell<Vec<u8>>,
}

impl MockUart {
    /// Create a new mock UART
    pub fn new(config: UartConfig) -> Self {
        Self {
            config,
            tx_buffer: RefCell::new(Vec::new()),
            rx_buffer: RefCell::new(Vec::new()),
        }
    }

    /// Get transmitted data (for test verification)
    pub fn tx_buffer(&self) -> Vec<u8> {
        self.tx_buffer.borrow().clone()
    }

    /// Clear transmit buffer
    pub fn clear_tx_buffer(&mut self) {
        self.tx_buffer.borrow_mut().clear();
    }

    /// Inject receive data (for test setup)
    pub fn inject_rx_data(&mut self, data: &[u8]) {
        self.rx_buffer.borrow_mut().extend_from_slice(data);
    }

    /// Number of received bytes not yet consumed
    pub fn rx_pending(&self) -> usize {
        self.rx_buffer.borrow().len()
    }

    /// Get current baud rate
    pub fn baud_rate(&self) -> u32 {
        self.config.baud_rate
    }
}

impl Default for MockUart {
    fn default() -> Self {
        Self::new(UartConfig::default())
    }
}

impl UartInterface for MockUart {
    fn read_byte(&mut self) -> Result<Option<u8>> {
        let mut rx = self.rx_buffer.borrow_mut();
        if rx.is_empty() {
            return Ok(None);
        }
        Ok(Some(rx.remove(0)))
    }

    fn write(&mut self, data: &[u8]) -> Result<usize> {
        self.tx_buffer.borrow_mut().extend_from_slice(data);
        Ok(data.len())
    }

    fn available(&self) -> bool {
        !self.rx_buffer.borrow().is_empty()
    }

    fn flush(&mut self) -> Result<()> {
        // Mock implementation - nothing to flush
        Ok(())
    }
}
