//! Mock UART implementation for testing

use crate::platform::error::UartError;
use crate::platform::{
    traits::{UartConfig, UartInterface},
    Result,
};
use heapless::{Deque, Vec};

/// Transmit capture capacity (menus and prompts are verbose)
const TX_CAPACITY: usize = 8192;

/// Receive script capacity
const RX_CAPACITY: usize = 64;

/// Mock UART implementation
///
/// Provides in-memory buffers for transmit and receive data, allowing unit
/// tests to verify serial traffic without hardware. A blocking `get_char`
/// on an exhausted receive script returns an error instead of spinning, so
/// under-scripted tests fail fast.
///
/// # Example
///
/// ```
/// use serial_accel::platform::mock::MockUart;
/// use serial_accel::platform::traits::UartInterface;
///
/// let mut uart = MockUart::new(Default::default());
/// uart.write(b"Hello").unwrap();
/// assert_eq!(uart.tx_bytes(), b"Hello");
///
/// uart.inject_rx(b"x");
/// assert!(uart.available());
/// assert_eq!(uart.get_char().unwrap(), b'x');
/// ```
#[derive(Debug)]
pub struct MockUart {
    config: UartConfig,
    tx: Vec<u8, TX_CAPACITY>,
    rx: Deque<u8, RX_CAPACITY>,
}

impl MockUart {
    /// Create a new mock UART
    pub fn new(config: UartConfig) -> Self {
        Self {
            config,
            tx: Vec::new(),
            rx: Deque::new(),
        }
    }

    /// Transmitted bytes (for test verification)
    pub fn tx_bytes(&self) -> &[u8] {
        &self.tx
    }

    /// Transmitted bytes interpreted as UTF-8 (for test verification)
    pub fn tx_text(&self) -> &str {
        core::str::from_utf8(&self.tx).expect("mock UART transmitted non-UTF-8 text")
    }

    /// Clear the transmit capture
    pub fn clear_tx(&mut self) {
        self.tx.clear();
    }

    /// Inject receive data (for test setup)
    pub fn inject_rx(&mut self, data: &[u8]) {
        for &byte in data {
            self.rx.push_back(byte).expect("mock UART rx overflow");
        }
    }

    /// Current baud rate
    pub fn baud_rate(&self) -> u32 {
        self.config.baud_rate
    }
}

impl UartInterface for MockUart {
    fn write(&mut self, data: &[u8]) -> Result<usize> {
        self.tx
            .extend_from_slice(data)
            .map_err(|_| UartError::WriteFailed)?;
        Ok(data.len())
    }

    fn read(&mut self, buffer: &mut [u8]) -> Result<usize> {
        let mut count = 0;
        for slot in buffer.iter_mut() {
            match self.rx.pop_front() {
                Some(byte) => {
                    *slot = byte;
                    count += 1;
                }
                None => break,
            }
        }
        Ok(count)
    }

    fn available(&self) -> bool {
        !self.rx.is_empty()
    }

    fn set_baud_rate(&mut self, baud: u32) -> Result<()> {
        self.config.baud_rate = baud;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    // Would spin forever on an exhausted script; fail fast instead.
    fn get_char(&mut self) -> Result<u8> {
        self.rx
            .pop_front()
            .ok_or_else(|| UartError::ReadFailed.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_uart_write() {
        let mut uart = MockUart::new(UartConfig::default());
        let written = uart.write(b"Hello, World!").unwrap();
        assert_eq!(written, 13);
        assert_eq!(uart.tx_bytes(), b"Hello, World!");
    }

    #[test]
    fn test_mock_uart_read() {
        let mut uart = MockUart::new(UartConfig::default());
        uart.inject_rx(b"Test");

        let mut buffer = [0u8; 2];
        assert_eq!(uart.read(&mut buffer).unwrap(), 2);
        assert_eq!(&buffer, b"Te");

        let mut rest = [0u8; 8];
        assert_eq!(uart.read(&mut rest).unwrap(), 2);
        assert_eq!(&rest[..2], b"st");
    }

    #[test]
    fn test_mock_uart_available() {
        let mut uart = MockUart::new(UartConfig::default());
        assert!(!uart.available());

        uart.inject_rx(b"X");
        assert!(uart.available());

        uart.get_char().unwrap();
        assert!(!uart.available());
    }

    #[test]
    fn test_mock_uart_get_char_fails_on_empty_script() {
        let mut uart = MockUart::new(UartConfig::default());
        assert!(uart.get_char().is_err());
    }

    #[test]
    fn test_mock_uart_baud_rate() {
        let mut uart = MockUart::new(UartConfig::default());
        assert_eq!(uart.baud_rate(), 38_400);

        uart.set_baud_rate(9600).unwrap();
        assert_eq!(uart.baud_rate(), 9600);
    }
}
