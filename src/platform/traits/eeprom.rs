//! EEPROM interface trait
//!
//! This module defines the byte-addressed non-volatile storage interface
//! used by the persistent settings store. Multi-byte accessors are provided
//! methods composed from byte operations in big-endian order, matching the
//! stored record layout.

use crate::platform::Result;

/// EEPROM interface trait
///
/// Platform implementations must provide byte-granular access; word and
/// long access come for free. Implementations must block until any prior
/// write has completed before starting the next operation.
pub trait EepromInterface {
    /// Read one byte from the given address
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Eeprom(EepromError::InvalidAddress)` if the
    /// address is outside the device capacity.
    fn read_byte(&mut self, address: u16) -> Result<u8>;

    /// Write one byte to the given address
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Eeprom(EepromError::InvalidAddress)` if the
    /// address is outside the device capacity.
    fn write_byte(&mut self, address: u16, value: u8) -> Result<()>;

    /// Read a big-endian 16-bit word starting at the given address
    fn read_word(&mut self, address: u16) -> Result<u16> {
        let high = self.read_byte(address)?;
        let low = self.read_byte(address + 1)?;
        Ok(u16::from_be_bytes([high, low]))
    }

    /// Write a big-endian 16-bit word starting at the given address
    fn write_word(&mut self, address: u16, value: u16) -> Result<()> {
        let [high, low] = value.to_be_bytes();
        self.write_byte(address, high)?;
        self.write_byte(address + 1, low)
    }

    /// Read a big-endian 32-bit value starting at the given address
    fn read_long(&mut self, address: u16) -> Result<u32> {
        let high = self.read_word(address)?;
        let low = self.read_word(address + 2)?;
        Ok(((high as u32) << 16) | low as u32)
    }

    /// Write a big-endian 32-bit value starting at the given address
    fn write_long(&mut self, address: u16, value: u32) -> Result<()> {
        self.write_word(address, (value >> 16) as u16)?;
        self.write_word(address + 2, value as u16)
    }
}
