//! End-to-end lifecycle tests against the mock platform
//!
//! Exercise the whole boot / configure / measure flow the way the device
//! runs it, with scripted serial input and simulated peripherals.

#![cfg(feature = "mock")]

use serial_accel::app::{BootOutcome, Dongle, BOOT_RESET_PIN, G_SELECT_PIN, LED_PIN};
use serial_accel::platform::mock::{
    MockAdc, MockEeprom, MockGpio, MockPlatform, MockTimer, MockUart,
};
use serial_accel::platform::{EepromInterface as _, GpioInterface as _, UartInterface as _};
use serial_accel::settings::{store, AccelRange, OutputMode, Settings};
use serial_accel::types::{AxisData, AxisId};

/// Sensor resting flat: X and Y at mid-scale, Z one nominal swing up.
fn flat_adc() -> MockAdc {
    let mut adc = MockAdc::new();
    adc.set_channel_value(AxisId::X.channel(), 512);
    adc.set_channel_value(AxisId::Y.channel(), 512);
    adc.set_channel_value(AxisId::Z.channel(), 760);
    adc
}

fn build(adc: MockAdc, eeprom: MockEeprom, uart: MockUart) -> Dongle<MockPlatform> {
    Dongle::<MockPlatform>::from_parts(
        uart,
        adc,
        eeprom,
        MockTimer::new(),
        MockGpio::new(LED_PIN),
        MockGpio::new(G_SELECT_PIN),
        MockGpio::new(BOOT_RESET_PIN),
    )
    .expect("mock peripherals always assemble")
}

fn scripted_uart(script: &[u8]) -> MockUart {
    let mut uart = MockUart::new(Default::default());
    uart.inject_rx(script);
    uart
}

#[test]
fn factory_boot_initializes_store_and_reports_pass() {
    let mut dongle = build(flat_adc(), MockEeprom::new(), MockUart::new(Default::default()));

    match dongle.boot().expect("boot") {
        BootOutcome::FactoryTest(report) => assert!(report.passed()),
        BootOutcome::Normal => panic!("erased EEPROM must take the factory path"),
    }
    assert!(dongle.uart().tx_text().contains("Pass"));
    assert!(dongle.led().read());

    let (_, _, mut eeprom, ..) = dongle.into_parts();
    assert!(!store::is_first_run(&mut eeprom).unwrap());
    assert_eq!(store::load_settings(&mut eeprom).unwrap(), Settings::default());
    assert_eq!(
        store::load_calibration(&mut eeprom).unwrap(),
        AxisData::splat(1650)
    );
    assert_eq!(store::load_swing(&mut eeprom).unwrap(), AxisData::splat(800));
}

#[test]
fn settings_survive_a_power_cycle() {
    let mut dongle = build(flat_adc(), MockEeprom::new(), MockUart::new(Default::default()));
    dongle.boot().expect("factory boot");
    let (_, _, eeprom, ..) = dongle.into_parts();

    // Change the baud rate through the menu, then power-cycle.
    let mut dongle = build(flat_adc(), eeprom, scripted_uart(b"57"));
    dongle.boot().expect("normal boot");
    dongle.run_cycle().expect("baud selection pass");
    assert_eq!(dongle.settings().baud_rate(), 115_200);
    let (_, _, eeprom, ..) = dongle.into_parts();

    let mut dongle = build(flat_adc(), eeprom, MockUart::new(Default::default()));
    assert_eq!(dongle.boot().unwrap(), BootOutcome::Normal);
    assert_eq!(dongle.settings().baud_rate(), 115_200);
}

#[test]
fn measurement_emits_binary_frame_until_interrupted() {
    let mut eeprom = MockEeprom::new();
    let binary = Settings {
        mode: OutputMode::Binary,
        ..Settings::default()
    };
    store::save_settings(&mut eeprom, &binary).unwrap();
    store::save_calibration(&mut eeprom, &AxisData::splat(1650)).unwrap();
    store::save_swing(&mut eeprom, &AxisData::splat(800)).unwrap();
    store::mark_initialized(&mut eeprom).unwrap();

    // Exit to measurement, then one pending byte interrupts it.
    let mut dongle = build(flat_adc(), eeprom, scripted_uart(b"xq"));
    assert_eq!(dongle.boot().unwrap(), BootOutcome::Normal);
    dongle.run_cycle().expect("measurement pass");

    // 512 = 0x0200, 760 = 0x02F8.
    let frame = [b'#', 0x02, 0x00, 0x02, 0x00, 0x02, 0xF8, b'$'];
    let tx = dongle.uart().tx_bytes();
    assert!(
        tx.windows(frame.len()).any(|w| w == frame),
        "no binary frame in transmit capture"
    );
    assert!(!dongle.uart().available());
}

#[test]
fn calibration_results_feed_the_gravity_output() {
    let mut adc = flat_adc();
    // The factory-boot self test takes one conversion per channel, then
    // one scripted conversion per capture: max then min per axis. The
    // steady-state values take over during measurement.
    adc.script_channel(AxisId::X.channel(), &[512, 900, 124]);
    adc.script_channel(AxisId::Y.channel(), &[512, 900, 124]);
    adc.script_channel(AxisId::Z.channel(), &[760, 900, 124]);

    // Calibrate (six accepts), then exit to measurement, then interrupt.
    let mut dongle = build(adc, MockEeprom::new(), scripted_uart(b"1      xq"));
    dongle.boot().expect("factory boot");
    dongle.run_cycle().expect("calibration pass");

    // Spread 776, half 388 -> 1250 mV swing; midpoint 512 -> 1650 mV offset.
    assert_eq!(dongle.swing(), &AxisData::splat(1250));
    assert_eq!(dongle.calibration(), &AxisData::splat(1650));

    dongle.run_cycle().expect("measurement pass");
    // X/Y at 512 counts sit exactly on the new offset; Z reads 0.64 G
    // against the wider calibrated swing.
    assert!(dongle.uart().tx_text().contains(" 0.00\t 0.00\t 0.64\n\r"));
}

#[test]
fn range_change_resets_swing_and_drives_select_pin() {
    let mut dongle = build(flat_adc(), MockEeprom::new(), MockUart::new(Default::default()));
    dongle.boot().expect("factory boot");
    let (_, _, eeprom, ..) = dongle.into_parts();

    // Menu: sensor range, choose +/- 6.0g.
    let mut dongle = build(flat_adc(), eeprom, scripted_uart(b"42"));
    dongle.boot().expect("normal boot");
    dongle.run_cycle().expect("range selection pass");

    assert_eq!(dongle.settings().range, AccelRange::High);
    assert_eq!(dongle.swing(), &AxisData::splat(206));
    let (_, _, mut eeprom, _, _, g_select, _) = dongle.into_parts();
    assert!(g_select.read());
    assert_eq!(store::load_swing(&mut eeprom).unwrap(), AxisData::splat(206));
}

#[test]
fn corrupt_settings_recover_without_clearing_calibration() {
    let mut dongle = build(flat_adc(), MockEeprom::new(), MockUart::new(Default::default()));
    dongle.boot().expect("factory boot");
    let (_, _, mut eeprom, ..) = dongle.into_parts();

    let custom_cal = AxisData { x: 1611u32, y: 1700, z: 1600 };
    store::save_calibration(&mut eeprom, &custom_cal).unwrap();
    // Scribble an undecodable output-mode code into the settings record.
    eeprom.write_word(3, 0x7777).unwrap();

    let mut dongle = build(flat_adc(), eeprom, MockUart::new(Default::default()));
    assert_eq!(dongle.boot().unwrap(), BootOutcome::Normal);
    assert_eq!(dongle.settings(), &Settings::default());
    assert_eq!(dongle.calibration(), &custom_cal);
}
