//! Mock platform implementation for testing
//!
//! This module provides mock implementations of platform traits that can be
//! used for unit testing without requiring actual hardware.
//!
//! # Feature Gate
//!
//! This module is available in two contexts:
//! - During test builds (`#[cfg(test)]`)
//! - When the `mock` feature is enabled
//!
//! # Example
//!
//! ```
//! use serial_accel::platform::mock::MockPlatform;
//! use serial_accel::platform::traits::{Platform, UartInterface};
//!
//! let mut platform = MockPlatform::init().unwrap();
//! let mut uart = platform.create_uart(Default::default()).unwrap();
//! uart.write(b"test").unwrap();
//! ```

#![cfg(any(test, feature = "mock"))]

mod adc;
mod eeprom;
mod gpio;
mod platform;
mod timer;
mod uart;

pub use adc::MockAdc;
pub use eeprom::MockEeprom;
pub use gpio::MockGpio;
pub use platform::MockPlatform;
pub use timer::MockTimer;
pub use uart::MockUart;
