//! Root platform trait
//!
//! This module defines the root Platform trait that aggregates all peripheral
//! interfaces.

use super::{AdcInterface, EepromInterface, GpioInterface, TimerInterface, UartConfig,
    UartInterface};
use crate::platform::Result;

/// Root platform trait
///
/// This trait aggregates all platform-specific peripheral interfaces and
/// provides platform initialization.
///
/// Platform implementations provide concrete types for each peripheral via
/// associated types, enabling zero-cost abstraction through compile-time
/// dispatch.
///
/// # Example
///
/// ```ignore
/// pub struct Atmega328Platform { /* ... */ }
///
/// impl Platform for Atmega328Platform {
///     type Adc = Atmega328Adc;
///     type Uart = Atmega328Uart;
///     // ... other associated types
///
///     fn init() -> Result<Self> {
///         // Configure clocks, pins, interrupt sources
///     }
///
///     // ... peripheral constructors
/// }
/// ```
pub trait Platform: Sized {
    /// ADC peripheral type
    type Adc: AdcInterface;

    /// UART peripheral type
    type Uart: UartInterface;

    /// EEPROM peripheral type
    type Eeprom: EepromInterface;

    /// GPIO peripheral type
    type Gpio: GpioInterface;

    /// Timer peripheral type
    type Timer: TimerInterface;

    /// Initialize the platform
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::InitializationFailed` if initialization fails.
    fn init() -> Result<Self>;

    /// Create the ADC peripheral instance
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::ResourceUnavailable` if the converter is
    /// already in use.
    fn create_adc(&mut self) -> Result<Self::Adc>;

    /// Create the UART peripheral instance
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::ResourceUnavailable` if the UART is already
    /// in use.
    fn create_uart(&mut self, config: UartConfig) -> Result<Self::Uart>;

    /// Create the EEPROM peripheral instance
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::ResourceUnavailable` if the EEPROM is already
    /// in use.
    fn create_eeprom(&mut self) -> Result<Self::Eeprom>;

    /// Create a GPIO peripheral instance
    ///
    /// # Arguments
    ///
    /// * `pin` - GPIO pin number
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::ResourceUnavailable` if the pin is already in
    /// use or the pin number is invalid.
    fn create_gpio(&mut self, pin: u8) -> Result<Self::Gpio>;

    /// Create the timer instance used for delays and timing operations
    fn create_timer(&mut self) -> Result<Self::Timer>;
}
