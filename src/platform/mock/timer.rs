//! Mock Timer implementation for testing

use crate::platform::{traits::TimerInterface, Result};
use core::cell::Cell;

/// Mock Timer implementation
///
/// Uses simulated time. `delay_ms` advances the clock immediately, and an
/// optional auto-advance steps the clock on every `now_ms` read so polling
/// loops (warm-up waits, the rate governor) make progress in tests.
#[derive(Debug)]
pub struct MockTimer {
    now_ms: Cell<u32>,
    auto_advance_ms: Cell<u32>,
    blink: Cell<bool>,
}

impl MockTimer {
    /// Create a new mock timer at t = 0
    pub fn new() -> Self {
        Self {
            now_ms: Cell::new(0),
            auto_advance_ms: Cell::new(0),
            blink: Cell::new(false),
        }
    }

    /// Create a mock timer starting at the given millisecond count
    pub fn starting_at(now_ms: u32) -> Self {
        let timer = Self::new();
        timer.now_ms.set(now_ms);
        timer
    }

    /// Advance the simulated clock by `ms` on every `now_ms` read
    pub fn set_auto_advance(&self, ms: u32) {
        self.auto_advance_ms.set(ms);
    }

    /// Manually advance the simulated clock
    pub fn advance(&self, ms: u32) {
        self.now_ms.set(self.now_ms.get().wrapping_add(ms));
    }
}

impl Default for MockTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerInterface for MockTimer {
    fn now_ms(&self) -> u32 {
        let now = self.now_ms.get();
        self.now_ms
            .set(now.wrapping_add(self.auto_advance_ms.get()));
        now
    }

    fn delay_ms(&self, ms: u32) -> Result<()> {
        self.advance(ms);
        Ok(())
    }

    fn set_blink(&self, enabled: bool) {
        self.blink.set(enabled);
    }

    fn blink_enabled(&self) -> bool {
        self.blink.get()
    }
}
