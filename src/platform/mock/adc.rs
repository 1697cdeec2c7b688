//! Mock ADC implementation for testing
//!
//! Provides scripted 10-bit conversion results per channel, so tests can
//! stand in for both the blocking calibration reads and the free-running
//! producer that normally feeds the sampler from interrupt context.

use crate::platform::error::AdcError;
use crate::platform::{traits::AdcInterface, Result};
use heapless::Deque;

/// Number of multiplexed input channels the mock models
const CHANNEL_COUNT: usize = 8;

/// Mock ADC implementation
///
/// Each channel has a steady-state value returned by every conversion, and
/// an optional scripted sequence that is consumed first. Free-running mode
/// yields one conversion per [`AdcInterface::poll_conversion`] call for the
/// currently selected channel.
///
/// # Example
///
/// ```
/// use serial_accel::platform::mock::MockAdc;
/// use serial_accel::platform::traits::AdcInterface;
///
/// let mut adc = MockAdc::new();
/// adc.set_channel_value(0, 512);
/// assert_eq!(adc.read_blocking(0).unwrap(), 512);
/// ```
#[derive(Debug, Default)]
pub struct MockAdc {
    values: [u16; CHANNEL_COUNT],
    scripts: [Deque<u16, 64>; CHANNEL_COUNT],
    selected: u8,
    free_running: bool,
}

impl MockAdc {
    /// Create a new mock ADC with all channels reading zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the steady-state conversion value for a channel
    pub fn set_channel_value(&mut self, channel: u8, value: u16) {
        self.values[channel as usize] = value & 0x03FF;
    }

    /// Queue a sequence of conversion values consumed before the
    /// steady-state value
    pub fn script_channel(&mut self, channel: u8, values: &[u16]) {
        for &v in values {
            self.scripts[channel as usize]
                .push_back(v & 0x03FF)
                .expect("mock ADC script overflow");
        }
    }

    /// Currently selected channel
    pub fn selected_channel(&self) -> u8 {
        self.selected
    }

    fn convert(&mut self, channel: u8) -> Result<u16> {
        let idx = channel as usize;
        if idx >= CHANNEL_COUNT {
            return Err(AdcError::InvalidChannel.into());
        }
        Ok(self.scripts[idx].pop_front().unwrap_or(self.values[idx]))
    }
}

impl AdcInterface for MockAdc {
    fn read_blocking(&mut self, channel: u8) -> Result<u16> {
        self.convert(channel)
    }

    fn select_channel(&mut self, channel: u8) -> Result<()> {
        if channel as usize >= CHANNEL_COUNT {
            return Err(AdcError::InvalidChannel.into());
        }
        self.selected = channel;
        Ok(())
    }

    fn set_free_running(&mut self, enabled: bool) -> Result<()> {
        self.free_running = enabled;
        Ok(())
    }

    fn is_free_running(&self) -> bool {
        self.free_running
    }

    fn poll_conversion(&mut self) -> Result<Option<u16>> {
        if !self.free_running {
            return Ok(None);
        }
        let channel = self.selected;
        self.convert(channel).map(Some)
    }
}
