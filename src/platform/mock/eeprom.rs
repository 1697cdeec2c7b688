//! Mock EEPROM implementation for testing
//!
//! Provides in-memory byte-addressed storage for unit tests. A fresh device
//! reads all 0xFF (erased state), which the application interprets as the
//! first-run condition.

use crate::platform::error::EepromError;
use crate::platform::{traits::EepromInterface, Result};

/// Mock EEPROM capacity in bytes
const CAPACITY: usize = 256;

/// Mock EEPROM implementation
///
/// # Example
///
/// ```
/// use serial_accel::platform::mock::MockEeprom;
/// use serial_accel::platform::traits::EepromInterface;
///
/// let mut eeprom = MockEeprom::new();
/// eeprom.write_long(9, 1650).unwrap();
/// assert_eq!(eeprom.read_long(9).unwrap(), 1650);
/// ```
#[derive(Debug)]
pub struct MockEeprom {
    storage: [u8; CAPACITY],
}

impl MockEeprom {
    /// Create a new mock EEPROM in the erased state (all 0xFF)
    pub fn new() -> Self {
        Self {
            storage: [0xFF; CAPACITY],
        }
    }

    /// Raw contents (for test verification)
    pub fn contents(&self, address: u16, len: usize) -> &[u8] {
        &self.storage[address as usize..address as usize + len]
    }
}

impl Default for MockEeprom {
    fn default() -> Self {
        Self::new()
    }
}

impl EepromInterface for MockEeprom {
    fn read_byte(&mut self, address: u16) -> Result<u8> {
        self.storage
            .get(address as usize)
            .copied()
            .ok_or_else(|| EepromError::InvalidAddress.into())
    }

    fn write_byte(&mut self, address: u16, value: u8) -> Result<()> {
        match self.storage.get_mut(address as usize) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(EepromError::InvalidAddress.into()),
        }
    }
}
