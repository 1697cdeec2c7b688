//! Platform abstraction traits
//!
//! This module defines the traits that platform implementations must provide.

pub mod adc;
pub mod eeprom;
pub mod gpio;
pub mod platform;
pub mod timer;
pub mod uart;

// Re-export trait interfaces
pub use adc::AdcInterface;
pub use eeprom::EepromInterface;
pub use gpio::{GpioInterface, GpioMode};
pub use platform::Platform;
pub use timer::TimerInterface;
pub use uart::{UartConfig, UartInterface};
