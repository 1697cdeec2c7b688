//! Measurement output formats
//!
//! Renders one measurement per call in the configured wire format. Text
//! lines end with LF CR, matching the terminal convention used throughout
//! the operator interface.

use core::fmt::Write as _;

use heapless::String;

use crate::platform::{Result, UartError, UartInterface};
use crate::types::{GReading, SensorReading};

/// Worst-case line length across the text formats
const LINE_CAPACITY: usize = 64;

/// Text line terminator
pub const LINE_END: &str = "\n\r";

/// Binary frame start marker
pub const FRAME_START: u8 = b'#';

/// Binary frame end marker
pub const FRAME_END: u8 = b'$';

fn fmt_error() -> crate::platform::PlatformError {
    UartError::WriteFailed.into()
}

/// Write one signed fixed-point G-value field
///
/// Sign column then a zero-padded magnitude with two decimals, five
/// characters minimum (" 1.00", "-0.25"). Positive values carry a space in
/// the sign column so columns stay aligned as the sign flips.
fn write_g_field(line: &mut String<LINE_CAPACITY>, value: f32) -> core::fmt::Result {
    let sign = if value.is_sign_negative() { '-' } else { ' ' };
    let magnitude = if value.is_sign_negative() { -value } else { value };
    write!(line, "{}{:04.2}", sign, magnitude)
}

/// Emit one calibrated measurement as a tab-separated text line
///
/// `sX.XX\tsY.YY\tsZ.ZZ` followed by the line terminator, where `s` is a
/// space or a minus sign.
pub fn write_gravity<U: UartInterface>(uart: &mut U, g: &GReading) -> Result<()> {
    let mut line = String::<LINE_CAPACITY>::new();
    (|| -> core::fmt::Result {
        write_g_field(&mut line, g.x)?;
        write!(line, "\t")?;
        write_g_field(&mut line, g.y)?;
        write!(line, "\t")?;
        write_g_field(&mut line, g.z)?;
        write!(line, "{}", LINE_END)
    })()
    .map_err(|_| fmt_error())?;
    uart.write(line.as_bytes())?;
    Ok(())
}

/// Emit one raw averaged measurement as a tab-separated text line
///
/// Each field is the averaged converter count zero-padded to four digits.
pub fn write_raw<U: UartInterface>(uart: &mut U, counts: &SensorReading) -> Result<()> {
    let mut line = String::<LINE_CAPACITY>::new();
    write!(line, "{:04}\t{:04}\t{:04}{}", counts.x, counts.y, counts.z, LINE_END)
        .map_err(|_| fmt_error())?;
    uart.write(line.as_bytes())?;
    Ok(())
}

/// Emit one raw averaged measurement as a framed binary record
///
/// `#` then the high and low byte of each axis count in X, Y, Z order,
/// then `$`. Eight bytes total, no line terminator.
pub fn write_binary<U: UartInterface>(uart: &mut U, counts: &SensorReading) -> Result<()> {
    let frame = [
        FRAME_START,
        (counts.x >> 8) as u8,
        counts.x as u8,
        (counts.y >> 8) as u8,
        counts.y as u8,
        (counts.z >> 8) as u8,
        counts.z as u8,
        FRAME_END,
    ];
    uart.write(&frame)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::mock::MockUart;
    use crate::types::AxisData;

    #[test]
    fn test_gravity_line_exact_bytes() {
        let mut uart = MockUart::new(Default::default());
        let g = AxisData {
            x: 0.05f32,
            y: -1.0,
            z: 1.0,
        };
        write_gravity(&mut uart, &g).unwrap();
        assert_eq!(uart.tx_text(), " 0.05\t-1.00\t 1.00\n\r");
    }

    #[test]
    fn test_gravity_negative_zero_keeps_sign_column() {
        let mut uart = MockUart::new(Default::default());
        let g = AxisData {
            x: -0.0f32,
            y: 0.0,
            z: 2.25,
        };
        write_gravity(&mut uart, &g).unwrap();
        assert_eq!(uart.tx_text(), "-0.00\t 0.00\t 2.25\n\r");
    }

    #[test]
    fn test_raw_line_zero_padded() {
        let mut uart = MockUart::new(Default::default());
        let counts = AxisData {
            x: 510u32,
            y: 7,
            z: 1023,
        };
        write_raw(&mut uart, &counts).unwrap();
        assert_eq!(uart.tx_text(), "0510\t0007\t1023\n\r");
    }

    #[test]
    fn test_binary_frame_exact_bytes() {
        let mut uart = MockUart::new(Default::default());
        let counts = AxisData {
            x: 0x0201u32,
            y: 0x0003,
            z: 0x03FF,
        };
        write_binary(&mut uart, &counts).unwrap();
        assert_eq!(
            uart.tx_bytes(),
            &[b'#', 0x02, 0x01, 0x00, 0x03, 0x03, 0xFF, b'$']
        );
    }

    #[test]
    fn test_binary_frame_is_eight_bytes() {
        let mut uart = MockUart::new(Default::default());
        write_binary(&mut uart, &AxisData::splat(512u32)).unwrap();
        assert_eq!(uart.tx_bytes().len(), 8);
    }
}
