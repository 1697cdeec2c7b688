//! Device settings
//!
//! The operator-configurable settings that survive power cycles: sensor
//! range, output format, output frequency, and serial baud rate. The
//! persistent encoding and the store live in [`store`].

pub mod store;

use crate::sampler::governor;

/// Serial baud rates selectable from the configuration menu
///
/// Settings persist the index into this table rather than the rate itself.
pub const BAUD_RATES: [u32; 7] = [4800, 9600, 14400, 19200, 38400, 57600, 115200];

/// Factory-default output frequency in Hz
pub const DEFAULT_OUTPUT_FREQUENCY: u16 = 50;

/// Factory-default baud index (38400 baud)
pub const DEFAULT_BAUD_INDEX: u8 = 4;

/// Factory-default zero-G offset per axis, in millivolts (Vref / 2)
pub const DEFAULT_CALIBRATION_MILLIVOLTS: u32 = 1650;

/// Sensor full-scale range
///
/// Selects the range pin level on the sensor and carries the nominal
/// sensitivity used as the swing scale until the operator calibrates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccelRange {
    /// +/-1.5 G, 800 mV/G nominal
    Low,
    /// +/-6 G, 206 mV/G nominal
    High,
}

impl AccelRange {
    /// Nominal sensitivity in millivolts per G
    pub fn millivolts_per_g(self) -> u32 {
        match self {
            AccelRange::Low => 800,
            AccelRange::High => 206,
        }
    }

    /// Persistent encoding: the sensitivity constant itself
    ///
    /// The stored field holds mV/G directly, so a raw EEPROM dump reads
    /// as the active sensitivity.
    pub fn code(self) -> u16 {
        self.millivolts_per_g() as u16
    }

    /// Decode the persistent encoding
    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            800 => Some(AccelRange::Low),
            206 => Some(AccelRange::High),
            _ => None,
        }
    }
}

/// Measurement output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Calibrated G-values, human-readable
    Gravity,
    /// Raw averaged converter counts, human-readable
    Raw,
    /// Framed raw counts, machine-readable
    Binary,
}

impl OutputMode {
    /// Row index into the frequency limit table
    pub fn index(self) -> usize {
        match self {
            OutputMode::Gravity => 0,
            OutputMode::Raw => 1,
            OutputMode::Binary => 2,
        }
    }

    /// Persistent encoding
    pub fn code(self) -> u16 {
        self.index() as u16
    }

    /// Decode the persistent encoding
    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            0 => Some(OutputMode::Gravity),
            1 => Some(OutputMode::Raw),
            2 => Some(OutputMode::Binary),
            _ => None,
        }
    }

    /// Format name for operator-facing text
    pub fn label(self) -> &'static str {
        match self {
            OutputMode::Gravity => "Gravity",
            OutputMode::Raw => "Raw",
            OutputMode::Binary => "Binary",
        }
    }
}

/// Operator-configurable device settings
///
/// Invariant: `output_frequency` never exceeds the limit for the current
/// mode and baud index. [`Settings::clamp_output_frequency`] re-establishes
/// the invariant after any field change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub range: AccelRange,
    pub mode: OutputMode,
    pub output_frequency: u16,
    pub baud_index: u8,
}

impl Default for Settings {
    /// Factory defaults: low range, gravity output, 50 Hz, 38400 baud
    fn default() -> Self {
        Self {
            range: AccelRange::Low,
            mode: OutputMode::Gravity,
            output_frequency: DEFAULT_OUTPUT_FREQUENCY,
            baud_index: DEFAULT_BAUD_INDEX,
        }
    }
}

impl Settings {
    /// Configured serial baud rate
    pub fn baud_rate(&self) -> u32 {
        BAUD_RATES[self.baud_index as usize]
    }

    /// Highest sustainable output frequency for the current mode and baud
    pub fn frequency_limit(&self) -> u16 {
        governor::frequency_limit(self.mode, self.baud_index)
    }

    /// Pull the output frequency down to the current limit
    ///
    /// Returns true when the frequency was reduced, so the caller can
    /// notify the operator of the adjustment.
    pub fn clamp_output_frequency(&mut self) -> bool {
        let limit = self.frequency_limit();
        if self.output_frequency > limit {
            self.output_frequency = limit;
            true
        } else {
            false
        }
    }
}
