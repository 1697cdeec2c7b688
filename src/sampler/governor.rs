//! Output rate governor
//!
//! Paces measurement emission from the millisecond time base and bounds
//! the configurable output frequency by what each output format fits
//! through the serial link at each baud rate.

use crate::settings::OutputMode;

/// Highest sustainable output frequency in Hz per mode and baud index
///
/// Rows are indexed by [`OutputMode::index`], columns by the baud-rate
/// table index. Values found by experimental testing against each format's
/// worst-case line length.
pub const OUTPUT_FREQUENCY_LIMITS: [[u16; 7]; 3] = [
    [25, 45, 66, 83, 125, 142, 166],  // gravity
    [27, 58, 76, 111, 200, 250, 250], // raw
    [47, 90, 125, 166, 250, 250, 250], // binary
];

/// Highest sustainable output frequency for a mode and baud-rate index
pub fn frequency_limit(mode: OutputMode, baud_index: u8) -> u16 {
    OUTPUT_FREQUENCY_LIMITS[mode.index()][baud_index as usize]
}

/// Emission pacer
///
/// Derives an integer period from the configured frequency and gates each
/// emission on the current time base value. The gate is a two-millisecond
/// tolerance window (`now % period <= 1`) rather than an exact match, so a
/// main-loop pass that lands one tick late still fires; an occasional
/// double emission or skipped slot near window edges is accepted.
#[derive(Debug, Clone, Copy)]
pub struct RateGovernor {
    period_ms: u32,
}

impl RateGovernor {
    /// Create a governor for the given output frequency in Hz
    ///
    /// The period truncates to `1000 / freq_hz` milliseconds. Frequencies
    /// are clamped to at least 1 Hz upstream; a zero argument is treated
    /// as 1 Hz here as well.
    pub fn new(freq_hz: u16) -> Self {
        let freq = freq_hz.max(1) as u32;
        Self {
            period_ms: 1000 / freq,
        }
    }

    /// Whether an emission slot is open at the given time base value
    pub fn should_emit(&self, now_ms: u32) -> bool {
        now_ms % self.period_ms <= 1
    }

    /// Emission period in milliseconds
    pub fn period_ms(&self) -> u32 {
        self.period_ms
    }
}
