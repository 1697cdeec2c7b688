//! Sampling engine
//!
//! The interrupt-driven round-robin sample scheduler and its circular
//! averaging buffers. The conversion-complete handler is the producer; the
//! cooperative main loop drains snapshots through the conversion pipeline
//! and emits them under control of the rate governor.

pub mod governor;
pub mod pipeline;

use crate::core::sync::CriticalSectionState;
use crate::platform::{AdcInterface, Result};
use crate::types::{AxisId, SensorReading};

/// Moving-average window size per axis (samples)
pub const AVERAGING_WINDOW: usize = 4;

#[derive(Debug, Clone, Copy)]
struct SamplerInner {
    axis: AxisId,
    cycles: u32,
    buffers: [[u16; AVERAGING_WINDOW]; 3],
}

/// Round-robin sample scheduler
///
/// Owns the axis cursor, the shared cycle counter, and one circular buffer
/// per axis. The producer ([`Sampler::on_conversion_complete`]) runs in
/// interrupt context on hardware; every access goes through a bounded
/// critical section, so consumer snapshot reads suspend the producer for
/// their duration rather than tolerating torn slots.
///
/// `new` is const so a `static` sampler can be shared with the interrupt
/// handler.
pub struct Sampler {
    state: CriticalSectionState<SamplerInner>,
}

impl Sampler {
    /// Create a sampler parked on the Z axis with empty buffers
    pub const fn new() -> Self {
        Self {
            state: CriticalSectionState::new(SamplerInner {
                axis: AxisId::Z,
                cycles: 0,
                buffers: [[0; AVERAGING_WINDOW]; 3],
            }),
        }
    }

    /// Reset the cycle counter and park the cursor on `axis`
    ///
    /// Measurement mode starts on X; the first full window is complete
    /// once the counter reaches the window size.
    pub fn begin(&self, axis: AxisId) {
        self.state.with_mut(|s| {
            s.axis = axis;
            s.cycles = 0;
        });
    }

    /// Record a completed conversion and advance the round-robin cursor
    ///
    /// Stores the 10-bit result at `buffer[axis][cycles % window]`. When
    /// the cursor is on Z it moves to X and the shared cycle counter
    /// increments (exactly once per full Z->X->Y cycle); otherwise the
    /// cursor steps X->Y->Z. Returns the next axis so the caller can
    /// reprogram the converter channel select before the next
    /// auto-triggered conversion. Never blocks.
    pub fn on_conversion_complete(&self, raw: u16) -> AxisId {
        self.state.with_mut(|s| {
            let slot = (s.cycles as usize) % AVERAGING_WINDOW;
            s.buffers[s.axis.channel() as usize][slot] = raw;
            let (next, cycle_complete) = s.axis.advance();
            if cycle_complete {
                s.cycles = s.cycles.wrapping_add(1);
            }
            s.axis = next;
            next
        })
    }

    /// Axis the cursor is currently parked on
    pub fn current_axis(&self) -> AxisId {
        self.state.with(|s| s.axis)
    }

    /// Completed axis cycles since the last [`Sampler::begin`]
    pub fn cycle_count(&self) -> u32 {
        self.state.with(|s| s.cycles)
    }

    /// Whether every buffer slot has been written at least once
    pub fn is_warmed_up(&self) -> bool {
        self.state.with(|s| s.cycles as usize >= AVERAGING_WINDOW)
    }

    /// Copy all buffers inside one bounded critical section
    pub fn snapshot(&self) -> SamplerSnapshot {
        SamplerSnapshot {
            buffers: self.state.with(|s| s.buffers),
        }
    }

    /// Drain pending free-running conversions from a polled converter
    ///
    /// Stands in for the conversion-complete interrupt on host and SITL
    /// targets: feeds at most one full axis cycle (three conversions) per
    /// call through [`Sampler::on_conversion_complete`], reprogramming the
    /// channel select after each one.
    pub fn pump_cycle<A: AdcInterface>(&self, adc: &mut A) -> Result<()> {
        for _ in 0..3 {
            match adc.poll_conversion()? {
                Some(raw) => {
                    let next = self.on_conversion_complete(raw);
                    adc.select_channel(next.channel())?;
                }
                None => break,
            }
        }
        Ok(())
    }
}

impl Default for Sampler {
    fn default() -> Self {
        Self::new()
    }
}

/// Consistent copy of the per-axis circular buffers
#[derive(Debug, Clone, Copy)]
pub struct SamplerSnapshot {
    buffers: [[u16; AVERAGING_WINDOW]; 3],
}

impl SamplerSnapshot {
    /// Buffered window for one axis
    pub fn window(&self, axis: AxisId) -> &[u16; AVERAGING_WINDOW] {
        &self.buffers[axis.channel() as usize]
    }

    /// Integer-truncated moving average per axis
    pub fn averaged(&self) -> SensorReading {
        SensorReading {
            x: pipeline::average(self.window(AxisId::X)),
            y: pipeline::average(self.window(AxisId::Y)),
            z: pipeline::average(self.window(AxisId::Z)),
        }
    }
}
