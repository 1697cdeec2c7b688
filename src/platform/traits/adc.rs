//! ADC interface trait
//!
//! This module defines the analog-to-digital converter interface the sampling
//! engine drives. The converter produces unsigned 10-bit counts and supports
//! a free-running (auto-triggered) mode in which it restarts itself after
//! every completed conversion.

use crate::platform::Result;

/// ADC interface trait
///
/// Platform implementations must provide this interface for analog sampling.
///
/// # Conversion delivery
///
/// On embedded targets the conversion-complete interrupt hands each result
/// to [`crate::sampler::Sampler::on_conversion_complete`] directly and
/// [`AdcInterface::poll_conversion`] may always return `None`. Host and
/// SITL implementations deliver results through `poll_conversion` instead,
/// which the sampler pump drains cooperatively.
pub trait AdcInterface {
    /// Perform a single blocking conversion on the given channel
    ///
    /// Used by the calibration flow and the self test, where free-running
    /// sampling is suspended. Returns the 10-bit count (0-1023).
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Adc(AdcError::InvalidChannel)` if the channel
    /// does not exist.
    fn read_blocking(&mut self, channel: u8) -> Result<u16>;

    /// Select the channel for the next auto-triggered conversion
    ///
    /// Mirrors reprogramming the converter's channel-select field; the
    /// in-flight conversion is unaffected.
    fn select_channel(&mut self, channel: u8) -> Result<()>;

    /// Enable or disable free-running (auto-triggered) conversion
    ///
    /// While disabled no new conversions start, which the consumer loop
    /// relies on to drain the sample buffers without tearing.
    fn set_free_running(&mut self, enabled: bool) -> Result<()>;

    /// Whether free-running conversion is currently enabled
    fn is_free_running(&self) -> bool;

    /// Fetch a completed free-running conversion, if one is ready
    ///
    /// Returns `None` when no result is pending (or when results are
    /// delivered via interrupt instead). Never blocks.
    fn poll_conversion(&mut self) -> Result<Option<u16>>;
}
