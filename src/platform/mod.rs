//! Platform abstraction layer
//!
//! This module provides hardware abstraction for the dongle peripherals.
//! All platform-specific code must be isolated behind these interfaces.

pub mod error;
pub mod traits;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export commonly used types
pub use error::{AdcError, EepromError, GpioError, PlatformError, Result, TimerError, UartError};
pub use traits::{
    AdcInterface, EepromInterface, GpioInterface, Platform, TimerInterface, UartInterface,
};
