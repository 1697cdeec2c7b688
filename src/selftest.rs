//! First-boot self test
//!
//! Runs once after a factory reset: settles, takes one blocking conversion
//! per axis, and checks the calibrated G-values against the flat-on-table
//! expectation (X and Y near zero, Z near one). The verdict is returned as
//! a value; acting on it (steady indicator, halt) is the caller's job.

use crate::config::print_line;
use crate::platform::{AdcInterface, Result, TimerInterface, UartInterface};
use crate::sampler::pipeline;
use crate::types::{AxisId, CalibrationOffset, SensorReading, SwingScale};

/// Settling delay before sampling, in milliseconds
const SETTLE_MS: u32 = 1000;

/// X and Y fail at or beyond this magnitude
const LATERAL_LIMIT_G: f32 = 0.2;

/// Z must fall strictly inside this band
const VERTICAL_BAND_G: (f32, f32) = (0.8, 1.2);

/// Per-axis self-test verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelfTestReport {
    pub x_ok: bool,
    pub y_ok: bool,
    pub z_ok: bool,
}

impl SelfTestReport {
    /// Whether every axis passed
    pub fn passed(&self) -> bool {
        self.x_ok && self.y_ok && self.z_ok
    }
}

/// Run the self test against the given calibration
///
/// Prints the banner, waits out the settling delay, converts one blocking
/// reading per axis through the pipeline, and reports each failing axis by
/// name. Prints `Pass` when all three axes are in band.
pub fn run<U, A, T>(
    uart: &mut U,
    adc: &mut A,
    timer: &T,
    offsets: &CalibrationOffset,
    swing: &SwingScale,
) -> Result<SelfTestReport>
where
    U: UartInterface,
    A: AdcInterface,
    T: TimerInterface,
{
    print_line(uart, "Testing Accelerometer...")?;
    timer.delay_ms(SETTLE_MS)?;

    let counts = SensorReading {
        x: adc.read_blocking(AxisId::X.channel())? as u32,
        y: adc.read_blocking(AxisId::Y.channel())? as u32,
        z: adc.read_blocking(AxisId::Z.channel())? as u32,
    };
    let g = pipeline::to_g_value(&pipeline::reading_to_millivolts(&counts), offsets, swing);

    let report = SelfTestReport {
        x_ok: g.x.abs() < LATERAL_LIMIT_G,
        y_ok: g.y.abs() < LATERAL_LIMIT_G,
        z_ok: g.z > VERTICAL_BAND_G.0 && g.z < VERTICAL_BAND_G.1,
    };

    if !report.x_ok {
        print_line(uart, "X Axis Fails!")?;
    }
    if !report.y_ok {
        print_line(uart, "Y Axis Fails!")?;
    }
    if !report.z_ok {
        print_line(uart, "Z Axis Fails!")?;
    }
    if report.passed() {
        print_line(uart, "Pass")?;
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::mock::{MockAdc, MockTimer, MockUart};
    use crate::types::AxisData;

    fn factory_cal() -> (CalibrationOffset, SwingScale) {
        (AxisData::splat(1650), AxisData::splat(800))
    }

    #[test]
    fn test_flat_sensor_passes() {
        let mut uart = MockUart::new(Default::default());
        let mut adc = MockAdc::new();
        // X and Y at mid-scale (0 G), Z one swing above (1 G).
        adc.set_channel_value(AxisId::X.channel(), 512);
        adc.set_channel_value(AxisId::Y.channel(), 512);
        adc.set_channel_value(AxisId::Z.channel(), 760);
        let timer = MockTimer::new();
        let (offsets, swing) = factory_cal();

        let report = run(&mut uart, &mut adc, &timer, &offsets, &swing).unwrap();
        assert!(report.passed());
        assert!(uart.tx_text().contains("Pass"));
        assert!(uart.tx_text().contains("Testing Accelerometer..."));
    }

    #[test]
    fn test_tilted_z_fails_by_name() {
        let mut uart = MockUart::new(Default::default());
        let mut adc = MockAdc::new();
        adc.set_channel_value(AxisId::X.channel(), 512);
        adc.set_channel_value(AxisId::Y.channel(), 512);
        // 884 counts is about 1.5 G on Z, outside the band.
        adc.set_channel_value(AxisId::Z.channel(), 884);
        let timer = MockTimer::new();
        let (offsets, swing) = factory_cal();

        let report = run(&mut uart, &mut adc, &timer, &offsets, &swing).unwrap();
        assert!(!report.passed());
        assert!(!report.z_ok);
        assert!(report.x_ok && report.y_ok);
        assert!(uart.tx_text().contains("Z Axis Fails!"));
        assert!(!uart.tx_text().contains("Pass"));
    }

    #[test]
    fn test_lateral_drift_fails_x() {
        let mut uart = MockUart::new(Default::default());
        let mut adc = MockAdc::new();
        // 0.33 G of drift on X.
        adc.set_channel_value(AxisId::X.channel(), 594);
        adc.set_channel_value(AxisId::Y.channel(), 512);
        adc.set_channel_value(AxisId::Z.channel(), 760);
        let timer = MockTimer::new();
        let (offsets, swing) = factory_cal();

        let report = run(&mut uart, &mut adc, &timer, &offsets, &swing).unwrap();
        assert!(!report.x_ok);
        assert!(uart.tx_text().contains("X Axis Fails!"));
    }

    #[test]
    fn test_settling_delay_observed() {
        let mut uart = MockUart::new(Default::default());
        let mut adc = MockAdc::new();
        adc.set_channel_value(AxisId::Z.channel(), 760);
        adc.set_channel_value(AxisId::X.channel(), 512);
        adc.set_channel_value(AxisId::Y.channel(), 512);
        let timer = MockTimer::new();
        let (offsets, swing) = factory_cal();

        run(&mut uart, &mut adc, &timer, &offsets, &swing).unwrap();
        assert_eq!(timer.now_ms(), 1000);
    }
}
