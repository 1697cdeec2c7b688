//! Millisecond time base
//!
//! A free-running millisecond counter driven by a periodic 1 ms timer
//! interrupt. The counter doubles as the low-frequency heartbeat source:
//! every 100 ticks the indicator LED is toggled while blink mode is active
//! (factory test and sampling activity).

use crate::core::sync::CriticalSectionState;
use crate::platform::{GpioInterface, Result, TimerInterface};

/// Heartbeat toggle period in milliseconds
const HEARTBEAT_PERIOD_MS: u32 = 100;

#[derive(Debug, Clone, Copy)]
struct TimeBaseState {
    millis: u32,
    blink: bool,
}

/// Millisecond time base
///
/// `tick` runs in interrupt context; `now_ms` and `delay_ms` run on the
/// main loop. The counter is a multi-byte shared variable, so every read
/// goes through a critical section to avoid torn values during rollover.
/// The counter wraps after ~49.7 days; wraparound is an accepted non-fatal
/// boundary condition.
pub struct TimeBase {
    state: CriticalSectionState<TimeBaseState>,
}

impl TimeBase {
    /// Create a new time base at t = 0 with the heartbeat disabled
    pub const fn new() -> Self {
        Self {
            state: CriticalSectionState::new(TimeBaseState {
                millis: 0,
                blink: false,
            }),
        }
    }

    /// Advance the counter by one millisecond
    ///
    /// Called from the periodic timer interrupt. The hardware tick source
    /// must re-arm its own next-tick compare value every firing; that is a
    /// platform responsibility, not handled here. Toggles the heartbeat
    /// indicator every 100 ticks while blink mode is active.
    pub fn tick<G: GpioInterface>(&self, heartbeat: &mut G) -> Result<()> {
        let toggle = self.state.with_mut(|s| {
            s.millis = s.millis.wrapping_add(1);
            s.blink && s.millis % HEARTBEAT_PERIOD_MS == 0
        });
        if toggle {
            heartbeat.toggle()?;
        }
        Ok(())
    }

    /// Enable or disable the heartbeat blink
    pub fn set_blink(&self, on: bool) {
        self.state.with_mut(|s| s.blink = on);
    }

    /// Whether the heartbeat blink is active
    pub fn blink_enabled(&self) -> bool {
        self.state.with(|s| s.blink)
    }
}

impl Default for TimeBase {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerInterface for TimeBase {
    fn now_ms(&self) -> u32 {
        self.state.with(|s| s.millis)
    }

    fn delay_ms(&self, ms: u32) -> Result<()> {
        // Busy-wait; nothing else progresses on the main loop.
        let start = self.now_ms();
        while self.now_ms().wrapping_sub(start) < ms {}
        Ok(())
    }

    fn set_blink(&self, enabled: bool) {
        TimeBase::set_blink(self, enabled);
    }

    fn blink_enabled(&self) -> bool {
        TimeBase::blink_enabled(self)
    }
}
