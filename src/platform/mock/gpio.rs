//! Mock GPIO implementation for testing

use crate::platform::error::GpioError;
use crate::platform::{
    traits::{GpioInterface, GpioMode},
    Result,
};

/// Mock GPIO implementation
///
/// Tracks pin level, mode, and toggle count so tests can verify indicator
/// behavior (steady vs. blinking) and input straps.
#[derive(Debug)]
pub struct MockGpio {
    pin: u8,
    level: bool,
    mode: GpioMode,
    toggle_count: u32,
}

impl MockGpio {
    /// Create a new mock GPIO pin in push-pull output mode, driven low
    pub fn new(pin: u8) -> Self {
        Self {
            pin,
            level: false,
            mode: GpioMode::OutputPushPull,
            toggle_count: 0,
        }
    }

    /// Pin number this instance was created for
    pub fn pin(&self) -> u8 {
        self.pin
    }

    /// Drive the simulated input level (for test setup)
    pub fn set_input_level(&mut self, level: bool) {
        self.level = level;
    }

    /// Number of toggles observed (for heartbeat verification)
    pub fn toggle_count(&self) -> u32 {
        self.toggle_count
    }
}

impl GpioInterface for MockGpio {
    fn set_high(&mut self) -> Result<()> {
        if self.mode != GpioMode::OutputPushPull {
            return Err(GpioError::InvalidMode.into());
        }
        self.level = true;
        Ok(())
    }

    fn set_low(&mut self) -> Result<()> {
        if self.mode != GpioMode::OutputPushPull {
            return Err(GpioError::InvalidMode.into());
        }
        self.level = false;
        Ok(())
    }

    fn toggle(&mut self) -> Result<()> {
        if self.mode != GpioMode::OutputPushPull {
            return Err(GpioError::InvalidMode.into());
        }
        self.level = !self.level;
        self.toggle_count += 1;
        Ok(())
    }

    fn read(&self) -> bool {
        self.level
    }

    fn set_mode(&mut self, mode: GpioMode) -> Result<()> {
        self.mode = mode;
        // Pull-up inputs idle high
        if mode == GpioMode::InputPullUp {
            self.level = true;
        }
        Ok(())
    }

    fn mode(&self) -> GpioMode {
        self.mode
    }
}
