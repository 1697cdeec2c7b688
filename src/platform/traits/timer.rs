//! Timer interface trait
//!
//! This module defines the millisecond time source consumed by the rate
//! governor, the calibration polling cadence, and all blocking delays.

use crate::platform::Result;

/// Timer interface trait
///
/// Methods take `&self`; implementations use interior mutability so the
/// time source can be shared with interrupt context.
pub trait TimerInterface {
    /// Elapsed milliseconds since power-up
    ///
    /// Monotonic except for wraparound after ~49.7 days, which is an
    /// accepted non-fatal boundary condition. Implementations backed by a
    /// multi-byte counter written in interrupt context must perform the
    /// read with interrupts disabled (rollover hazard).
    fn now_ms(&self) -> u32;

    /// Block for the given number of milliseconds
    ///
    /// Built by polling [`TimerInterface::now_ms`]; nothing else progresses
    /// on the main loop for the duration.
    fn delay_ms(&self, ms: u32) -> Result<()>;

    /// Enable or disable the heartbeat blink on the indicator
    ///
    /// The blink itself is driven by the tick source; time sources without
    /// a heartbeat ignore the flag.
    fn set_blink(&self, _enabled: bool) {}

    /// Whether the heartbeat blink is active
    fn blink_enabled(&self) -> bool {
        false
    }
}
