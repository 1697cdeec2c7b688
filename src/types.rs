//! Shared value types
//!
//! Axis identifiers and the per-axis reading triples that flow through the
//! conversion pipeline and the persistent store.

/// One of the three orthogonal sense axes.
///
/// The discriminant is the hardware channel-select encoding of the
/// converter input the axis is wired to (Z=0, Y=1, X=2). Ordering matters:
/// the round-robin cursor visits Z -> X -> Y -> Z, and advancing off Z is
/// what completes an axis cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum AxisId {
    /// Z axis (channel 0)
    Z = 0,
    /// Y axis (channel 1)
    Y = 1,
    /// X axis (channel 2)
    X = 2,
}

impl AxisId {
    /// All axes in X, Y, Z display order
    pub const ALL: [AxisId; 3] = [AxisId::X, AxisId::Y, AxisId::Z];

    /// Converter channel-select value for this axis
    pub fn channel(self) -> u8 {
        self as u8
    }

    /// Axis label for operator-facing text
    pub fn label(self) -> &'static str {
        match self {
            AxisId::X => "X",
            AxisId::Y => "Y",
            AxisId::Z => "Z",
        }
    }

    /// Next axis in the round-robin sequence Z -> X -> Y -> Z
    ///
    /// Returns the successor and whether the step completes an axis cycle
    /// (true exactly when stepping off Z).
    pub fn advance(self) -> (AxisId, bool) {
        match self {
            AxisId::Z => (AxisId::X, true),
            AxisId::X => (AxisId::Y, false),
            AxisId::Y => (AxisId::Z, false),
        }
    }
}

/// Per-axis data triple
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AxisData<T> {
    pub x: T,
    pub y: T,
    pub z: T,
}

impl<T: Copy> AxisData<T> {
    /// Create a triple with the same value on every axis
    pub fn splat(value: T) -> Self {
        Self {
            x: value,
            y: value,
            z: value,
        }
    }

    /// Value for the given axis
    pub fn axis(&self, axis: AxisId) -> T {
        match axis {
            AxisId::X => self.x,
            AxisId::Y => self.y,
            AxisId::Z => self.z,
        }
    }

    /// Mutable access for the given axis
    pub fn axis_mut(&mut self, axis: AxisId) -> &mut T {
        match axis {
            AxisId::X => &mut self.x,
            AxisId::Y => &mut self.y,
            AxisId::Z => &mut self.z,
        }
    }
}

/// Averaged raw converter counts per axis
pub type SensorReading = AxisData<u32>;

/// Converted voltages per axis, in millivolts
pub type MillivoltReading = AxisData<u32>;

/// Zero-G bias per axis, in millivolts (persisted, operator-settable)
pub type CalibrationOffset = AxisData<u32>;

/// Millivolts-per-G scale per axis (persisted, operator-settable, non-zero)
pub type SwingScale = AxisData<u32>;

/// Calibrated acceleration per axis, in G
pub type GReading = AxisData<f32>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_robin_is_strictly_cyclic() {
        let mut axis = AxisId::Z;
        let mut visited = [AxisId::Z; 6];
        for slot in visited.iter_mut() {
            *slot = axis;
            (axis, _) = axis.advance();
        }
        assert_eq!(
            visited,
            [AxisId::Z, AxisId::X, AxisId::Y, AxisId::Z, AxisId::X, AxisId::Y]
        );
    }

    #[test]
    fn test_cycle_completes_only_off_z() {
        assert!(AxisId::Z.advance().1);
        assert!(!AxisId::X.advance().1);
        assert!(!AxisId::Y.advance().1);
    }

    #[test]
    fn test_channel_encoding_matches_hardware() {
        assert_eq!(AxisId::Z.channel(), 0);
        assert_eq!(AxisId::Y.channel(), 1);
        assert_eq!(AxisId::X.channel(), 2);
    }

    #[test]
    fn test_axis_accessors() {
        let mut data = AxisData::<u32>::splat(5);
        *data.axis_mut(AxisId::Y) = 9;
        assert_eq!(data.axis(AxisId::X), 5);
        assert_eq!(data.axis(AxisId::Y), 9);
        assert_eq!(data.axis(AxisId::Z), 5);
    }
}
