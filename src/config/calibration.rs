//! Guided calibration flow
//!
//! Walks the operator through capturing the maximum and minimum reading
//! for each axis in turn, then derives the swing scale and zero-G offset
//! from the captured extremes. All results are staged locally and applied
//! only when every axis completes; an abort keystroke at any point leaves
//! the caller's calibration untouched.

use core::fmt::Write as _;

use heapless::String;

use crate::config::{fmt_error, print, print_line};
use crate::platform::{AdcInterface, Result, TimerInterface, UartInterface};
use crate::sampler::pipeline;
use crate::types::{AxisData, AxisId, CalibrationOffset, SwingScale};

/// Live-echo poll cadence
const POLL_INTERVAL_MS: u32 = 50;

/// How a calibration invocation ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalibrationOutcome {
    /// All six captures registered; offsets and swing updated
    Completed,
    /// Operator pressed 'x'; nothing updated
    Aborted,
}

/// Which extreme the current capture is hunting for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CapturePhase {
    FindMax,
    FindMin,
}

impl CapturePhase {
    fn prompt(self) -> &'static str {
        match self {
            CapturePhase::FindMax => "Find Maximum",
            CapturePhase::FindMin => "Find Minimum",
        }
    }
}

/// Poll one axis on the live-echo cadence until a keystroke arrives
///
/// Returns the last converted value together with the keystroke that
/// registered it.
fn capture_extreme<U, A, T>(
    uart: &mut U,
    adc: &mut A,
    timer: &T,
    axis: AxisId,
    phase: CapturePhase,
) -> Result<(u32, u8)>
where
    U: UartInterface,
    A: AdcInterface,
    T: TimerInterface,
{
    let mut line = String::<32>::new();
    write!(line, "{} {} Value:", phase.prompt(), axis.label()).map_err(|_| fmt_error())?;
    print_line(uart, &line)?;

    loop {
        let raw = adc.read_blocking(axis.channel())? as u32;
        line.clear();
        write!(line, "{}:\t{}\r", axis.label(), raw).map_err(|_| fmt_error())?;
        print(uart, &line)?;
        if uart.available() {
            let key = uart.get_char()?;
            return Ok((raw, key));
        }
        timer.delay_ms(POLL_INTERVAL_MS)?;
    }
}

fn is_abort(key: u8) -> bool {
    key.eq_ignore_ascii_case(&b'x')
}

/// Run the guided calibration flow
///
/// For each axis the operator registers a maximum and a minimum extreme;
/// the swing is half the raw spread converted to millivolts, the offset
/// is the spread midpoint converted to millivolts:
///
/// ```text
/// swing  = to_mv((max - min) / 2)
/// offset = to_mv((max - min) / 2 + min)
/// ```
///
/// `offsets` and `swing` are written only on [`CalibrationOutcome::Completed`];
/// persistence is the caller's responsibility so an aborted run can never
/// reach the store.
pub fn run<U, A, T>(
    uart: &mut U,
    adc: &mut A,
    timer: &T,
    offsets: &mut CalibrationOffset,
    swing: &mut SwingScale,
) -> Result<CalibrationOutcome>
where
    U: UartInterface,
    A: AdcInterface,
    T: TimerInterface,
{
    print_line(uart, "Calibration Menu (Press X at any time to Exit)")?;
    print_line(
        uart,
        "For each axis you will be prompted to find the maximum and minimum values.",
    )?;
    print_line(
        uart,
        "Simply rotate the serial accelerometer until you find the appropriate value and",
    )?;
    print_line(uart, "press a key (any key except x) to register the value")?;

    let mut staged_offsets = AxisData::<u32>::default();
    let mut staged_swing = AxisData::<u32>::default();

    for axis in AxisId::ALL {
        let mut line = String::<32>::new();
        write!(line, "Calibrate {} Axis", axis.label()).map_err(|_| fmt_error())?;
        print_line(uart, &line)?;

        let (max, key) = capture_extreme(uart, adc, timer, axis, CapturePhase::FindMax)?;
        if is_abort(key) {
            return Ok(CalibrationOutcome::Aborted);
        }
        let (min, key) = capture_extreme(uart, adc, timer, axis, CapturePhase::FindMin)?;
        if is_abort(key) {
            return Ok(CalibrationOutcome::Aborted);
        }

        let half_spread = max.saturating_sub(min) / 2;
        *staged_swing.axis_mut(axis) = pipeline::to_millivolts(half_spread);
        *staged_offsets.axis_mut(axis) = pipeline::to_millivolts(half_spread + min);
    }
    print(uart, "\n\n\r")?;

    *offsets = staged_offsets;
    *swing = staged_swing;
    Ok(CalibrationOutcome::Completed)
}
