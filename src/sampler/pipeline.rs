//! Averaging / conversion pipeline
//!
//! Consumer-side math that turns buffered raw counts into calibrated
//! G-values: moving average, counts -> millivolts, millivolts -> G. The
//! pipeline never allocates and recomputes every value fresh each emission
//! cycle.

use crate::sampler::AVERAGING_WINDOW;
use crate::types::{CalibrationOffset, GReading, MillivoltReading, SensorReading, SwingScale};

/// ADC reference voltage in millivolts
pub const VREF_MILLIVOLTS: u32 = 3300;

/// Full-scale code of the 10-bit converter
pub const ADC_FULL_SCALE: u32 = 1024;

/// Integer-truncated mean of one buffered window
pub fn average(window: &[u16; AVERAGING_WINDOW]) -> u32 {
    let sum: u32 = window.iter().map(|&v| v as u32).sum();
    sum / AVERAGING_WINDOW as u32
}

/// Convert a raw count to millivolts
///
/// `raw * Vref / full_scale`, truncating.
pub fn to_millivolts(raw: u32) -> u32 {
    raw * VREF_MILLIVOLTS / ADC_FULL_SCALE
}

/// Convert an averaged reading to millivolts per axis
pub fn reading_to_millivolts(reading: &SensorReading) -> MillivoltReading {
    MillivoltReading {
        x: to_millivolts(reading.x),
        y: to_millivolts(reading.y),
        z: to_millivolts(reading.z),
    }
}

/// Convert millivolts to calibrated G-values
///
/// `(mv - offset) / swing` per axis as a signed floating-point quotient.
/// A zero swing is a configuration precondition violation rejected when
/// calibration is saved; it is not checked here.
pub fn to_g_value(
    mv: &MillivoltReading,
    offset: &CalibrationOffset,
    swing: &SwingScale,
) -> GReading {
    GReading {
        x: (mv.x as f32 - offset.x as f32) / swing.x as f32,
        y: (mv.y as f32 - offset.y as f32) / swing.y as f32,
        z: (mv.z as f32 - offset.z as f32) / swing.z as f32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AxisData;

    const EPSILON: f32 = 1e-6;

    #[test]
    fn test_average_truncates() {
        assert_eq!(average(&[10, 20, 30, 41]), 25);
        assert_eq!(average(&[0, 0, 0, 3]), 0);
        assert_eq!(average(&[512, 512, 512, 512]), 512);
    }

    #[test]
    fn test_to_millivolts_reference_points() {
        assert_eq!(to_millivolts(0), 0);
        assert_eq!(to_millivolts(512), 1650);
        assert_eq!(to_millivolts(1023), 3296);
    }

    #[test]
    fn test_to_g_value_is_linear() {
        let offset = AxisData::splat(1650u32);
        let swing = AxisData::splat(800u32);

        // Zero at the offset
        let at_rest = to_g_value(&AxisData::splat(1650), &offset, &swing);
        assert!(at_rest.x.abs() < EPSILON);
        assert!(at_rest.y.abs() < EPSILON);
        assert!(at_rest.z.abs() < EPSILON);

        // Exactly one G one swing above the offset
        let one_g = to_g_value(&AxisData::splat(1650 + 800), &offset, &swing);
        assert!((one_g.z - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_to_g_value_signed_below_offset() {
        let offset = AxisData::splat(1650u32);
        let swing = AxisData::splat(800u32);
        let minus_one_g = to_g_value(&AxisData::splat(1650 - 800), &offset, &swing);
        assert!((minus_one_g.x + 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_per_axis_swing_applied() {
        let offset = AxisData::splat(1650u32);
        let swing = AxisData {
            x: 800u32,
            y: 400,
            z: 206,
        };
        let mv = AxisData::splat(1650 + 412);
        let g = to_g_value(&mv, &offset, &swing);
        assert!((g.x - 0.515).abs() < 1e-3);
        assert!((g.y - 1.03).abs() < 1e-3);
        assert!((g.z - 2.0).abs() < 1e-3);
    }
}
