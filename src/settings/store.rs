//! Persistent settings store
//!
//! Fixed-address EEPROM layout, big-endian multi-byte values:
//!
//! | Address | Size | Contents                    |
//! |---------|------|-----------------------------|
//! | 0       | 1    | first-run flag (0 = initialized) |
//! | 1       | 2    | range sensitivity (mV/G: 800 or 206) |
//! | 3       | 2    | output mode code            |
//! | 5       | 2    | output frequency (Hz)       |
//! | 7       | 2    | baud-rate table index       |
//! | 9       | 12   | calibration offset x, y, z (mV, 4 bytes each) |
//! | 21      | 12   | swing scale x, y, z (mV/G, 4 bytes each) |
//!
//! Erased cells read 0xFF, so a fresh part reports first-run until the
//! flag is cleared after the factory defaults are written.

use crate::platform::{EepromInterface, PlatformError, Result};
use crate::settings::{AccelRange, OutputMode, Settings, BAUD_RATES};
use crate::types::{AxisId, CalibrationOffset, SwingScale};

const ADDR_FIRST_RUN: u16 = 0;
const ADDR_RANGE: u16 = 1;
const ADDR_MODE: u16 = 3;
const ADDR_FREQUENCY: u16 = 5;
const ADDR_BAUD_INDEX: u16 = 7;
const ADDR_CALIBRATION: u16 = 9;
const ADDR_SWING: u16 = 21;

const AXIS_SLOT_BYTES: u16 = 4;

/// Whether the part has never been initialized
///
/// True when the flag byte holds anything but zero, which covers both an
/// erased part (0xFF) and a deliberate factory-reset write.
pub fn is_first_run<E: EepromInterface>(eeprom: &mut E) -> Result<bool> {
    Ok(eeprom.read_byte(ADDR_FIRST_RUN)? != 0)
}

/// Clear the first-run flag after defaults have been written
pub fn mark_initialized<E: EepromInterface>(eeprom: &mut E) -> Result<()> {
    eeprom.write_byte(ADDR_FIRST_RUN, 0)
}

/// Load the operator settings
///
/// # Errors
///
/// Returns [`PlatformError::InvalidConfig`] when a stored code does not
/// decode or an index is out of table range. The caller decides whether to
/// fall back to factory defaults.
pub fn load_settings<E: EepromInterface>(eeprom: &mut E) -> Result<Settings> {
    let range =
        AccelRange::from_code(eeprom.read_word(ADDR_RANGE)?).ok_or(PlatformError::InvalidConfig)?;
    let mode =
        OutputMode::from_code(eeprom.read_word(ADDR_MODE)?).ok_or(PlatformError::InvalidConfig)?;
    let output_frequency = eeprom.read_word(ADDR_FREQUENCY)?;
    let baud_word = eeprom.read_word(ADDR_BAUD_INDEX)?;
    if baud_word as usize >= BAUD_RATES.len() {
        return Err(PlatformError::InvalidConfig);
    }
    Ok(Settings {
        range,
        mode,
        output_frequency,
        baud_index: baud_word as u8,
    })
}

/// Persist the operator settings
pub fn save_settings<E: EepromInterface>(eeprom: &mut E, settings: &Settings) -> Result<()> {
    eeprom.write_word(ADDR_RANGE, settings.range.code())?;
    eeprom.write_word(ADDR_MODE, settings.mode.code())?;
    eeprom.write_word(ADDR_FREQUENCY, settings.output_frequency)?;
    eeprom.write_word(ADDR_BAUD_INDEX, settings.baud_index as u16)?;
    Ok(())
}

fn axis_addr(base: u16, axis: AxisId) -> u16 {
    let slot = match axis {
        AxisId::X => 0,
        AxisId::Y => 1,
        AxisId::Z => 2,
    };
    base + slot * AXIS_SLOT_BYTES
}

/// Load the per-axis zero-G calibration offsets
pub fn load_calibration<E: EepromInterface>(eeprom: &mut E) -> Result<CalibrationOffset> {
    Ok(CalibrationOffset {
        x: eeprom.read_long(axis_addr(ADDR_CALIBRATION, AxisId::X))?,
        y: eeprom.read_long(axis_addr(ADDR_CALIBRATION, AxisId::Y))?,
        z: eeprom.read_long(axis_addr(ADDR_CALIBRATION, AxisId::Z))?,
    })
}

/// Persist the per-axis zero-G calibration offsets
pub fn save_calibration<E: EepromInterface>(
    eeprom: &mut E,
    offsets: &CalibrationOffset,
) -> Result<()> {
    eeprom.write_long(axis_addr(ADDR_CALIBRATION, AxisId::X), offsets.x)?;
    eeprom.write_long(axis_addr(ADDR_CALIBRATION, AxisId::Y), offsets.y)?;
    eeprom.write_long(axis_addr(ADDR_CALIBRATION, AxisId::Z), offsets.z)?;
    Ok(())
}

/// Load the per-axis swing scale
pub fn load_swing<E: EepromInterface>(eeprom: &mut E) -> Result<SwingScale> {
    Ok(SwingScale {
        x: eeprom.read_long(axis_addr(ADDR_SWING, AxisId::X))?,
        y: eeprom.read_long(axis_addr(ADDR_SWING, AxisId::Y))?,
        z: eeprom.read_long(axis_addr(ADDR_SWING, AxisId::Z))?,
    })
}

/// Persist the per-axis swing scale
///
/// # Errors
///
/// Returns [`PlatformError::InvalidConfig`] for a zero value on any axis;
/// a zero swing would divide the G conversion by zero, so it never reaches
/// the store.
pub fn save_swing<E: EepromInterface>(eeprom: &mut E, swing: &SwingScale) -> Result<()> {
    if swing.x == 0 || swing.y == 0 || swing.z == 0 {
        return Err(PlatformError::InvalidConfig);
    }
    eeprom.write_long(axis_addr(ADDR_SWING, AxisId::X), swing.x)?;
    eeprom.write_long(axis_addr(ADDR_SWING, AxisId::Y), swing.y)?;
    eeprom.write_long(axis_addr(ADDR_SWING, AxisId::Z), swing.z)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::mock::MockEeprom;
    use crate::settings::DEFAULT_CALIBRATION_MILLIVOLTS;
    use crate::types::AxisData;

    #[test]
    fn test_erased_part_reports_first_run() {
        let mut eeprom = MockEeprom::new();
        assert!(is_first_run(&mut eeprom).unwrap());
        mark_initialized(&mut eeprom).unwrap();
        assert!(!is_first_run(&mut eeprom).unwrap());
    }

    #[test]
    fn test_settings_round_trip() {
        let mut eeprom = MockEeprom::new();
        let settings = Settings {
            range: AccelRange::High,
            mode: OutputMode::Binary,
            output_frequency: 125,
            baud_index: 6,
        };
        save_settings(&mut eeprom, &settings).unwrap();
        assert_eq!(load_settings(&mut eeprom).unwrap(), settings);
    }

    #[test]
    fn test_range_field_holds_millivolts_per_g() {
        let mut eeprom = MockEeprom::new();
        save_settings(&mut eeprom, &Settings::default()).unwrap();
        assert_eq!(eeprom.read_word(ADDR_RANGE).unwrap(), 800);

        let high = Settings {
            range: AccelRange::High,
            ..Settings::default()
        };
        save_settings(&mut eeprom, &high).unwrap();
        assert_eq!(eeprom.read_word(ADDR_RANGE).unwrap(), 206);
    }

    #[test]
    fn test_erased_settings_fail_to_decode() {
        let mut eeprom = MockEeprom::new();
        // All cells 0xFF; the range code 0xFFFF is not a valid encoding.
        assert!(matches!(
            load_settings(&mut eeprom),
            Err(PlatformError::InvalidConfig)
        ));
    }

    #[test]
    fn test_out_of_range_baud_index_rejected() {
        let mut eeprom = MockEeprom::new();
        save_settings(&mut eeprom, &Settings::default()).unwrap();
        eeprom.write_word(ADDR_BAUD_INDEX, 7).unwrap();
        assert!(matches!(
            load_settings(&mut eeprom),
            Err(PlatformError::InvalidConfig)
        ));
    }

    #[test]
    fn test_calibration_round_trip() {
        let mut eeprom = MockEeprom::new();
        let offsets = AxisData {
            x: 1612u32,
            y: 1693,
            z: 1650,
        };
        save_calibration(&mut eeprom, &offsets).unwrap();
        assert_eq!(load_calibration(&mut eeprom).unwrap(), offsets);
    }

    #[test]
    fn test_swing_round_trip() {
        let mut eeprom = MockEeprom::new();
        let swing = AxisData {
            x: 793u32,
            y: 810,
            z: 801,
        };
        save_swing(&mut eeprom, &swing).unwrap();
        assert_eq!(load_swing(&mut eeprom).unwrap(), swing);
    }

    #[test]
    fn test_zero_swing_never_persists() {
        let mut eeprom = MockEeprom::new();
        let good = AxisData::splat(800u32);
        save_swing(&mut eeprom, &good).unwrap();
        let bad = AxisData { x: 800u32, y: 0, z: 800 };
        assert!(matches!(
            save_swing(&mut eeprom, &bad),
            Err(PlatformError::InvalidConfig)
        ));
        // The earlier good values are untouched.
        assert_eq!(load_swing(&mut eeprom).unwrap(), good);
    }

    #[test]
    fn test_factory_initialization_scenario() {
        let mut eeprom = MockEeprom::new();
        let settings = Settings::default();
        save_settings(&mut eeprom, &settings).unwrap();
        save_calibration(
            &mut eeprom,
            &AxisData::splat(DEFAULT_CALIBRATION_MILLIVOLTS),
        )
        .unwrap();
        save_swing(
            &mut eeprom,
            &AxisData::splat(settings.range.millivolts_per_g()),
        )
        .unwrap();
        mark_initialized(&mut eeprom).unwrap();

        assert!(!is_first_run(&mut eeprom).unwrap());
        assert_eq!(load_settings(&mut eeprom).unwrap(), settings);
        assert_eq!(
            load_calibration(&mut eeprom).unwrap(),
            AxisData::splat(1650)
        );
        assert_eq!(load_swing(&mut eeprom).unwrap(), AxisData::splat(800));
    }

    #[test]
    fn test_slots_do_not_overlap() {
        // Write every region, then verify each reads back intact.
        let mut eeprom = MockEeprom::new();
        let settings = Settings {
            range: AccelRange::High,
            mode: OutputMode::Raw,
            output_frequency: 200,
            baud_index: 5,
        };
        let cal = AxisData { x: 1u32, y: 2, z: 3 };
        let swing = AxisData { x: 4u32, y: 5, z: 6 };
        save_settings(&mut eeprom, &settings).unwrap();
        save_calibration(&mut eeprom, &cal).unwrap();
        save_swing(&mut eeprom, &swing).unwrap();
        mark_initialized(&mut eeprom).unwrap();

        assert_eq!(load_settings(&mut eeprom).unwrap(), settings);
        assert_eq!(load_calibration(&mut eeprom).unwrap(), cal);
        assert_eq!(load_swing(&mut eeprom).unwrap(), swing);
    }
}
