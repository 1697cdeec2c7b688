//! Mock platform root implementation

use super::{MockAdc, MockEeprom, MockGpio, MockTimer, MockUart};
use crate::platform::{
    traits::{Platform, UartConfig},
    Result,
};

/// Mock platform implementation
///
/// Hands out fresh in-memory peripheral instances. Tests that need to
/// pre-load scripts or inspect state afterwards usually construct the
/// individual mocks directly instead.
#[derive(Debug, Default)]
pub struct MockPlatform;

impl Platform for MockPlatform {
    type Adc = MockAdc;
    type Uart = MockUart;
    type Eeprom = MockEeprom;
    type Gpio = MockGpio;
    type Timer = MockTimer;

    fn init() -> Result<Self> {
        Ok(Self)
    }

    fn create_adc(&mut self) -> Result<Self::Adc> {
        Ok(MockAdc::new())
    }

    fn create_uart(&mut self, config: UartConfig) -> Result<Self::Uart> {
        Ok(MockUart::new(config))
    }

    fn create_eeprom(&mut self) -> Result<Self::Eeprom> {
        Ok(MockEeprom::new())
    }

    fn create_gpio(&mut self, pin: u8) -> Result<Self::Gpio> {
        Ok(MockGpio::new(pin))
    }

    fn create_timer(&mut self) -> Result<Self::Timer> {
        Ok(MockTimer::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::traits::UartInterface;

    #[test]
    fn test_mock_platform_creates_peripherals() {
        let mut platform = MockPlatform::init().unwrap();
        let mut uart = platform.create_uart(UartConfig::default()).unwrap();
        uart.write(b"ok").unwrap();
        assert_eq!(uart.tx_bytes(), b"ok");

        let gpio = platform.create_gpio(5).unwrap();
        assert_eq!(gpio.pin(), 5);
    }
}
