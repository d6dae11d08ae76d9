//! UART interface trait
//!
//! This module defines the serial link interface that platform implementations
//! must provide.

use crate::platform::Result;

/// UART stop bit configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UartStopBits {
    /// One stop bit
    One,
    /// Two stop bits
    Two,
}

/// UART parity configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UartParity {
    /// No parity bit
    None,
    /// Even parity
    Even,
    /// Odd parity
    Odd,
}

/// UART configuration
///
/// The default matches the datalogger link: 2400 baud, 8N1.
#[derive(Debug, Clone, Copy)]
pub struct UartConfig {
    /// Baud rate in bits per second
    pub baud_rate: u32,
    /// Number of stop bits
    pub stop_bits: UartStopBits,
    /// Parity mode
    pub parity: UartParity,
}

impl Default for UartConfig {
    fn default() -> Self {
        Self {
            baud_rate: 2400,
            stop_bits: UartStopBits::One,
            parity: UartParity::None,
        }
    }
}

/// UART interface trait
///
/// Platform implementations must provide this interface for serial communication.
///
/// # Safety Invariants
///
/// - UART peripheral must be initialized before use
/// - Only one owner per UART instance
/// - `read_byte` must never block; "nothing pending" is `Ok(None)`, so a
///   received 0x00 data byte is always distinguishable from an idle line
pub trait UartInterface {
    /// Read one byte without blocking
    ///
    /// Returns `Ok(Some(byte))` if a byte was pending, `Ok(None)` if the
    /// receive buffer is empty.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Uart` on hardware receive errors (overrun,
    /// framing).
    fn read_byte(&mut self) -> Result<Option<u8>>;

    /// Write data to the serial link
    ///
    /// Returns the number of bytes accepted for transmission.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Uart` if the transmitter rejects the data.
    fn write(&mut self, data: &[u8]) -> Result<usize>;

    /// Write a single byte to the serial link
    fn write_byte(&mut self, byte: u8) -> Result<()> {
        self.write(&[byte]).map(|_| ())
    }

    /// Check whether received data is pending
    fn available(&self) -> bool;

    /// Block until all queued transmit data has left the peripheral
    fn flush(&mut self) -> Result<()>;
}
