//! Dongle application
//!
//! Owns the peripherals, the sampler, and the persistent records, and runs
//! the boot / configure / measure lifecycle. Everything here is generic
//! over [`Platform`], so the whole application runs unchanged against the
//! mock platform on the host.

use crate::config::{self, calibration, print_line, MenuSelection};
use crate::platform::traits::{GpioMode, UartConfig};
use crate::platform::{
    AdcInterface, GpioInterface, Platform, PlatformError, Result, TimerInterface, UartInterface,
};
use crate::sampler::governor::RateGovernor;
use crate::sampler::{pipeline, Sampler};
use crate::selftest::{self, SelfTestReport};
use crate::settings::{
    store, AccelRange, OutputMode, Settings, DEFAULT_CALIBRATION_MILLIVOLTS,
};
use crate::types::{AxisData, AxisId, CalibrationOffset, SwingScale};
use crate::{log_info, log_warn, output};

/// Indicator LED pin
pub const LED_PIN: u8 = 5;

/// Sensor range-select pin (high = +/- 6.0g)
pub const G_SELECT_PIN: u8 = 2;

/// Factory-reset strap, active low with pull-up
pub const BOOT_RESET_PIN: u8 = 3;

/// How the boot path resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootOutcome {
    /// Factory defaults written and the self test run; the device is
    /// expected to halt after reporting
    FactoryTest(SelfTestReport),
    /// Persisted records loaded (or recovered to defaults)
    Normal,
}

/// The serial accelerometer dongle application
pub struct Dongle<P: Platform> {
    uart: P::Uart,
    adc: P::Adc,
    eeprom: P::Eeprom,
    timer: P::Timer,
    led: P::Gpio,
    g_select: P::Gpio,
    boot_reset: P::Gpio,
    sampler: Sampler,
    settings: Settings,
    calibration: CalibrationOffset,
    swing: SwingScale,
}

impl<P: Platform> Dongle<P> {
    /// Build the application from an initialized platform
    pub fn from_platform(mut platform: P) -> Result<Self> {
        let uart = platform.create_uart(UartConfig::default())?;
        let adc = platform.create_adc()?;
        let eeprom = platform.create_eeprom()?;
        let timer = platform.create_timer()?;
        let led = platform.create_gpio(LED_PIN)?;
        let g_select = platform.create_gpio(G_SELECT_PIN)?;
        let boot_reset = platform.create_gpio(BOOT_RESET_PIN)?;
        Self::from_parts(uart, adc, eeprom, timer, led, g_select, boot_reset)
    }

    /// Build the application from individual peripherals
    ///
    /// Tests use this to hand in pre-scripted mocks.
    pub fn from_parts(
        uart: P::Uart,
        adc: P::Adc,
        eeprom: P::Eeprom,
        timer: P::Timer,
        mut led: P::Gpio,
        mut g_select: P::Gpio,
        mut boot_reset: P::Gpio,
    ) -> Result<Self> {
        led.set_mode(GpioMode::OutputPushPull)?;
        g_select.set_mode(GpioMode::OutputPushPull)?;
        boot_reset.set_mode(GpioMode::InputPullUp)?;
        Ok(Self {
            uart,
            adc,
            eeprom,
            timer,
            led,
            g_select,
            boot_reset,
            sampler: Sampler::new(),
            settings: Settings::default(),
            calibration: AxisData::splat(DEFAULT_CALIBRATION_MILLIVOLTS),
            swing: AxisData::splat(AccelRange::Low.millivolts_per_g()),
        })
    }

    /// Tear the application back down into its peripherals
    ///
    /// Lets a test carry state (typically the EEPROM) into a rebuilt
    /// instance, simulating a power cycle.
    #[allow(clippy::type_complexity)]
    pub fn into_parts(
        self,
    ) -> (
        P::Uart,
        P::Adc,
        P::Eeprom,
        P::Timer,
        P::Gpio,
        P::Gpio,
        P::Gpio,
    ) {
        (
            self.uart,
            self.adc,
            self.eeprom,
            self.timer,
            self.led,
            self.g_select,
            self.boot_reset,
        )
    }

    /// Current settings (for test verification)
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Current calibration offsets (for test verification)
    pub fn calibration(&self) -> &CalibrationOffset {
        &self.calibration
    }

    /// Current swing scale (for test verification)
    pub fn swing(&self) -> &SwingScale {
        &self.swing
    }

    /// UART peripheral (for test verification)
    pub fn uart(&self) -> &P::Uart {
        &self.uart
    }

    /// Indicator LED peripheral (for test verification)
    pub fn led(&self) -> &P::Gpio {
        &self.led
    }

    /// Drive the range-select pin from the configured range
    fn apply_range(&mut self) -> Result<()> {
        match self.settings.range {
            AccelRange::High => self.g_select.set_high(),
            AccelRange::Low => self.g_select.set_low(),
        }
    }

    /// Run the boot path
    ///
    /// A low boot-reset strap or a set first-run flag selects the factory
    /// path: defaults and nominal calibration are persisted, the flag is
    /// cleared, and the self test runs. The caller is expected to halt
    /// after a [`BootOutcome::FactoryTest`]. Otherwise the persisted
    /// records are loaded; a record that fails to decode falls back to
    /// factory defaults without touching the store.
    pub fn boot(&mut self) -> Result<BootOutcome> {
        let factory = !self.boot_reset.read() || store::is_first_run(&mut self.eeprom)?;
        if factory {
            self.settings = Settings::default();
            self.calibration = AxisData::splat(DEFAULT_CALIBRATION_MILLIVOLTS);
            self.swing = AxisData::splat(self.settings.range.millivolts_per_g());
            store::save_settings(&mut self.eeprom, &self.settings)?;
            store::save_calibration(&mut self.eeprom, &self.calibration)?;
            store::save_swing(&mut self.eeprom, &self.swing)?;
            store::mark_initialized(&mut self.eeprom)?;

            self.uart.set_baud_rate(self.settings.baud_rate())?;
            self.apply_range()?;
            log_info!("factory reset complete, starting self test");

            // Heartbeat blinks for the duration of the test; a failure
            // leaves it blinking as the terminal state.
            self.timer.set_blink(true);
            let report = selftest::run(
                &mut self.uart,
                &mut self.adc,
                &self.timer,
                &self.calibration,
                &self.swing,
            )?;
            if report.passed() {
                self.timer.set_blink(false);
                self.led.set_high()?;
            }
            return Ok(BootOutcome::FactoryTest(report));
        }

        match store::load_settings(&mut self.eeprom) {
            Ok(settings) => self.settings = settings,
            Err(PlatformError::InvalidConfig) => {
                log_warn!("stored settings invalid, using factory defaults");
                self.settings = Settings::default();
            }
            Err(e) => return Err(e),
        }
        self.calibration = store::load_calibration(&mut self.eeprom)?;
        let swing = store::load_swing(&mut self.eeprom)?;
        if swing.x == 0 || swing.y == 0 || swing.z == 0 {
            log_warn!("stored swing invalid, using range default");
            self.swing = AxisData::splat(self.settings.range.millivolts_per_g());
        } else {
            self.swing = swing;
        }

        self.uart.set_baud_rate(self.settings.baud_rate())?;
        self.apply_range()?;
        Ok(BootOutcome::Normal)
    }

    /// Run one configuration-menu pass, entering measurement mode on exit
    ///
    /// Displays the menu, dispatches one selection, re-applies the
    /// frequency clamp (notifying the operator when it bites), and
    /// persists the settings. Selecting exit runs the measurement loop
    /// until a byte arrives on the UART, then returns for the next pass.
    pub fn run_cycle(&mut self) -> Result<()> {
        self.led.set_high()?;
        self.adc.set_free_running(false)?;

        let selection = config::prompt_menu(&mut self.uart, &self.settings, &self.calibration)?;
        let mut enter_measurement = false;
        match selection {
            MenuSelection::Calibrate => self.run_calibration()?,
            MenuSelection::OutputMode => {
                config::select_output_mode(&mut self.uart, &mut self.settings)?
            }
            MenuSelection::OutputFrequency => {
                config::select_output_frequency(&mut self.uart, &mut self.settings)?
            }
            MenuSelection::SensorRange => {
                config::select_accelerometer_range(&mut self.uart, &mut self.settings)?;
                // A range change invalidates the calibrated swing; fall
                // back to the nominal sensitivity until recalibrated.
                self.swing = AxisData::splat(self.settings.range.millivolts_per_g());
                store::save_swing(&mut self.eeprom, &self.swing)?;
                self.apply_range()?;
            }
            MenuSelection::BaudRate => {
                config::select_baud_rate(&mut self.uart, &mut self.settings)?;
                self.uart.set_baud_rate(self.settings.baud_rate())?;
            }
            MenuSelection::Exit => enter_measurement = true,
        }

        if self.settings.clamp_output_frequency() {
            print_line(
                &mut self.uart,
                "The new settings have caused the output frequency to change.",
            )?;
            print_line(&mut self.uart, "")?;
        }
        store::save_settings(&mut self.eeprom, &self.settings)?;

        if enter_measurement {
            self.measure()?;
        }
        Ok(())
    }

    fn run_calibration(&mut self) -> Result<()> {
        let mut new_offsets = self.calibration;
        let mut new_swing = self.swing;
        let outcome = calibration::run(
            &mut self.uart,
            &mut self.adc,
            &self.timer,
            &mut new_offsets,
            &mut new_swing,
        )?;
        if outcome != calibration::CalibrationOutcome::Completed {
            return Ok(());
        }
        match store::save_swing(&mut self.eeprom, &new_swing) {
            Ok(()) => {
                store::save_calibration(&mut self.eeprom, &new_offsets)?;
                self.calibration = new_offsets;
                self.swing = new_swing;
                Ok(())
            }
            Err(PlatformError::InvalidConfig) => {
                // Identical extremes leave a zero swing; keep the old
                // calibration rather than persist a divide-by-zero.
                print_line(&mut self.uart, "Calibration rejected: no swing measured.")?;
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Measurement loop
    ///
    /// Starts the round-robin sampler on X in free-running mode, waits for
    /// a full averaging window, then emits governed measurements until a
    /// byte arrives on the UART. The pending byte is consumed before
    /// returning so the next menu pass starts clean.
    fn measure(&mut self) -> Result<()> {
        let governor = RateGovernor::new(self.settings.output_frequency);
        self.sampler.begin(AxisId::X);
        self.adc.select_channel(AxisId::X.channel())?;
        self.adc.set_free_running(true)?;

        while !self.sampler.is_warmed_up() {
            self.sampler.pump_cycle(&mut self.adc)?;
        }

        loop {
            // Suspend conversions while copying the buffers.
            self.adc.set_free_running(false)?;
            let snapshot = self.sampler.snapshot();
            self.adc.set_free_running(true)?;
            let counts = snapshot.averaged();

            if governor.should_emit(self.timer.now_ms()) {
                self.led.toggle()?;
                match self.settings.mode {
                    OutputMode::Gravity => {
                        let g = pipeline::to_g_value(
                            &pipeline::reading_to_millivolts(&counts),
                            &self.calibration,
                            &self.swing,
                        );
                        output::write_gravity(&mut self.uart, &g)?;
                    }
                    OutputMode::Raw => output::write_raw(&mut self.uart, &counts)?,
                    OutputMode::Binary => output::write_binary(&mut self.uart, &counts)?,
                }
            }

            if self.uart.available() {
                let _ = self.uart.get_char()?;
                break;
            }
            self.sampler.pump_cycle(&mut self.adc)?;
        }

        self.adc.set_free_running(false)?;
        Ok(())
    }
}
