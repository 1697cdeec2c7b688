//! UART interface trait
//!
//! This module defines the character-oriented serial transport used for all
//! operator interaction and governed sample emission.

use crate::platform::error::UartError;
use crate::platform::Result;

/// UART configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UartConfig {
    /// Baud rate in bits per second
    pub baud_rate: u32,
}

impl Default for UartConfig {
    fn default() -> Self {
        // Factory default line rate
        Self { baud_rate: 38_400 }
    }
}

/// UART interface trait
///
/// Platform implementations must provide this interface for serial
/// communication.
pub trait UartInterface {
    /// Write data to the UART
    ///
    /// Blocks until all bytes are accepted by the transmitter.
    ///
    /// # Returns
    ///
    /// Number of bytes written.
    fn write(&mut self, data: &[u8]) -> Result<usize>;

    /// Read available data into the buffer without blocking
    ///
    /// # Returns
    ///
    /// Number of bytes read (0 when nothing is pending).
    fn read(&mut self, buffer: &mut [u8]) -> Result<usize>;

    /// Whether at least one received byte is pending
    ///
    /// Non-blocking predicate used to interrupt the measurement loop.
    fn available(&self) -> bool;

    /// Reconfigure the line rate
    fn set_baud_rate(&mut self, baud: u32) -> Result<()>;

    /// Flush the transmitter
    fn flush(&mut self) -> Result<()>;

    /// Read one byte, blocking until it arrives
    fn get_char(&mut self) -> Result<u8> {
        let mut buf = [0u8; 1];
        loop {
            if self.read(&mut buf)? == 1 {
                return Ok(buf[0]);
            }
        }
    }

    /// Write one byte
    fn put_char(&mut self, byte: u8) -> Result<()> {
        let written = self.write(&[byte])?;
        if written == 1 {
            Ok(())
        } else {
            Err(UartError::WriteFailed.into())
        }
    }
}
