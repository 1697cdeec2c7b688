//! Configuration menu
//!
//! The operator-facing configuration hub and its selection sub-flows. Each
//! sub-flow blocks on the UART until the operator finishes or aborts, then
//! returns to the menu; selecting exit hands control to measurement mode.
//! Free-running sampling is never active while any of this runs.

pub mod calibration;

use core::fmt::Write as _;

use heapless::String;

use crate::output::LINE_END;
use crate::platform::{Result, UartError, UartInterface};
use crate::settings::{AccelRange, OutputMode, Settings, BAUD_RATES};
use crate::types::CalibrationOffset;

const PROMPT_CAPACITY: usize = 96;

pub(crate) fn print<U: UartInterface>(uart: &mut U, text: &str) -> Result<()> {
    uart.write(text.as_bytes())?;
    Ok(())
}

pub(crate) fn print_line<U: UartInterface>(uart: &mut U, text: &str) -> Result<()> {
    uart.write(text.as_bytes())?;
    uart.write(LINE_END.as_bytes())?;
    Ok(())
}

pub(crate) fn fmt_error() -> crate::platform::PlatformError {
    UartError::WriteFailed.into()
}

/// A validated configuration-menu keystroke
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuSelection {
    Calibrate,
    OutputMode,
    OutputFrequency,
    SensorRange,
    BaudRate,
    Exit,
}

impl MenuSelection {
    /// Decode a menu keystroke; None for anything outside '1'..'5' and 'x'
    pub fn from_key(key: u8) -> Option<Self> {
        match key {
            b'1' => Some(MenuSelection::Calibrate),
            b'2' => Some(MenuSelection::OutputMode),
            b'3' => Some(MenuSelection::OutputFrequency),
            b'4' => Some(MenuSelection::SensorRange),
            b'5' => Some(MenuSelection::BaudRate),
            b'x' | b'X' => Some(MenuSelection::Exit),
            _ => None,
        }
    }
}

fn render_menu<U: UartInterface>(
    uart: &mut U,
    settings: &Settings,
    calibration: &CalibrationOffset,
) -> Result<()> {
    let mut line = String::<PROMPT_CAPACITY>::new();

    print_line(uart, "--- Serial Accelerometer Dongle MMA7361 ---")?;
    print(uart, "          Firmware Version 6.0")?;
    print(uart, "\n")?;
    print_line(uart, "")?;
    print_line(uart, "Select a menu item to continue:")?;

    write!(
        line,
        "[1] Calibrate (Current Calibration Values: {}, {}, {})",
        calibration.x, calibration.y, calibration.z
    )
    .map_err(|_| fmt_error())?;
    print_line(uart, &line)?;

    let mode_text = match settings.mode {
        OutputMode::Gravity => "Gravity Values",
        OutputMode::Raw => "Raw ADC Values",
        OutputMode::Binary => "Raw ADC Values in Binary Format",
    };
    line.clear();
    write!(line, "[2] Output Mode ({})", mode_text).map_err(|_| fmt_error())?;
    print_line(uart, &line)?;

    line.clear();
    write!(line, "[3] Output Frequency ({} Hz)", settings.output_frequency)
        .map_err(|_| fmt_error())?;
    print_line(uart, &line)?;

    let range_text = match settings.range {
        AccelRange::Low => "1.5g",
        AccelRange::High => "6.0g",
    };
    line.clear();
    write!(line, "[4] Sensor Range (+/- {})", range_text).map_err(|_| fmt_error())?;
    print_line(uart, &line)?;

    line.clear();
    write!(line, "[5] Baud Rate ({})", settings.baud_rate()).map_err(|_| fmt_error())?;
    print_line(uart, &line)?;

    print_line(uart, "[x] Exit")?;
    print(uart, "Selection: ")
}

/// Display the configuration menu and block for a valid selection
///
/// Invalid keystrokes re-display the menu; the accepted keystroke is
/// echoed back before returning.
pub fn prompt_menu<U: UartInterface>(
    uart: &mut U,
    settings: &Settings,
    calibration: &CalibrationOffset,
) -> Result<MenuSelection> {
    loop {
        render_menu(uart, settings, calibration)?;
        let key = uart.get_char()?;
        if let Some(selection) = MenuSelection::from_key(key) {
            let echo = [key, b'\n', b'\n', b'\r'];
            uart.write(&echo)?;
            return Ok(selection);
        }
        print_line(uart, "Invalid Selection!")?;
    }
}

/// Output mode selection sub-flow
///
/// Blocks until one of '1' (gravity), '2' (raw), or '3' (binary) arrives;
/// anything else re-prompts.
pub fn select_output_mode<U: UartInterface>(uart: &mut U, settings: &mut Settings) -> Result<()> {
    loop {
        print_line(uart, "Select the desired output mode")?;
        print_line(uart, "[1] Gravity Values")?;
        print_line(uart, "[2] Raw Values")?;
        print_line(uart, "[3] Raw Values in Binary Format")?;
        let mode = match uart.get_char()? {
            b'1' => OutputMode::Gravity,
            b'2' => OutputMode::Raw,
            b'3' => OutputMode::Binary,
            _ => {
                print_line(uart, "Invalid Selection.")?;
                continue;
            }
        };
        settings.mode = mode;
        print(uart, "\n\n\r")?;
        return Ok(());
    }
}

/// Output frequency selection sub-flow
///
/// 'i' steps the frequency up (bounded by the limit for the current mode
/// and baud), 'd' steps it down (floor 1 Hz), 'x' exits. The current value
/// is echoed in place after every keystroke.
pub fn select_output_frequency<U: UartInterface>(
    uart: &mut U,
    settings: &mut Settings,
) -> Result<()> {
    print_line(
        uart,
        "Set the desired output frequency. Press [i] to increase and [d] to decrease.",
    )?;
    print_line(uart, "Press [x] to exit")?;
    print_line(
        uart,
        "Frequency range is limited automatically by the output mode and baud rate",
    )?;

    let limit = settings.frequency_limit();
    loop {
        let mut line = String::<PROMPT_CAPACITY>::new();
        write!(line, "Output Frequency: {:3}\r", settings.output_frequency)
            .map_err(|_| fmt_error())?;
        print(uart, &line)?;

        match uart.get_char()?.to_ascii_lowercase() {
            b'x' => break,
            b'i' if settings.output_frequency < limit => settings.output_frequency += 1,
            b'd' if settings.output_frequency > 1 => settings.output_frequency -= 1,
            _ => {}
        }
    }
    print(uart, "\n\n\r")?;
    Ok(())
}

/// Sensor range selection sub-flow
///
/// Blocks until '1' (+/- 1.5g) or '2' (+/- 6.0g) arrives. Changing range
/// resets the swing scale to the nominal sensitivity for the new range;
/// the caller persists the swing and drives the G-select pin.
pub fn select_accelerometer_range<U: UartInterface>(
    uart: &mut U,
    settings: &mut Settings,
) -> Result<()> {
    loop {
        print_line(uart, "Select the desired accelerometer range.")?;
        print_line(uart, "[1] +/- 1.5g")?;
        print_line(uart, "[2] +/- 6.0g")?;
        let range = match uart.get_char()? {
            b'1' => AccelRange::Low,
            b'2' => AccelRange::High,
            _ => {
                print_line(uart, "Invalid Selection")?;
                continue;
            }
        };
        settings.range = range;
        print(uart, "\n\n\r")?;
        return Ok(());
    }
}

/// Baud rate selection sub-flow
///
/// Blocks until '1'..'7' arrives, selecting the corresponding table entry.
/// The caller re-initializes the UART with the new rate afterwards.
pub fn select_baud_rate<U: UartInterface>(uart: &mut U, settings: &mut Settings) -> Result<()> {
    loop {
        print_line(uart, "Select the desired baud rate.")?;
        for (i, rate) in BAUD_RATES.iter().enumerate() {
            let mut line = String::<PROMPT_CAPACITY>::new();
            write!(line, "[{}] {}", i + 1, rate).map_err(|_| fmt_error())?;
            print_line(uart, &line)?;
        }
        let key = uart.get_char()?;
        if (b'1'..=b'7').contains(&key) {
            settings.baud_index = key - b'1';
            print(uart, "\n\n\r")?;
            return Ok(());
        }
        print_line(uart, "Invalid Selection!")?;
    }
}
