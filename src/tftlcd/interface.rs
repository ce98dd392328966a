//! Display interface using SPI
use display_interface::DisplayError;
use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

const RESET_PULSE_MS: u32 = 10;
const RESET_SETTLE_MS: u32 = 100;

/// The byte link the driver talks through
///
/// Every operation is fire-and-forget: the panel has no acknowledgment channel,
/// so an `Err` only ever means the link itself failed.
pub trait Transport {
    /// Pulse hardware reset. The panel must accept commands once this returns.
    fn reset(&mut self) -> Result<(), DisplayError>;

    /// Send one command opcode
    fn send_command(&mut self, command: u8) -> Result<(), DisplayError>;

    /// Send one data byte following a command
    fn send_data(&mut self, data: u8) -> Result<(), DisplayError>;

    /// Send a contiguous run of data bytes following a command
    fn send_data_burst(&mut self, data: &[u8]) -> Result<(), DisplayError>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn reset(&mut self) -> Result<(), DisplayError> {
        T::reset(self)
    }

    fn send_command(&mut self, command: u8) -> Result<(), DisplayError> {
        T::send_command(self, command)
    }

    fn send_data(&mut self, data: u8) -> Result<(), DisplayError> {
        T::send_data(self, data)
    }

    fn send_data_burst(&mut self, data: &[u8]) -> Result<(), DisplayError> {
        T::send_data_burst(self, data)
    }
}

/// 4-wire SPI connection to the panel: SPI device (with its own CS), D/C line and reset line
pub struct SpiInterface<SPI, DC, RST, DELAY> {
    /// SPI device
    spi: SPI,
    /// Data/Command Control Pin (High for data, Low for command)
    dc: DC,
    /// Pin for Reseting
    rst: RST,
    /// Delay provider for the reset pulse
    delay: DELAY,
}

impl<SPI, DC, RST, DELAY> SpiInterface<SPI, DC, RST, DELAY> {
    /// Wrap the bus and pins, nothing is sent yet
    pub fn new(spi: SPI, dc: DC, rst: RST, delay: DELAY) -> Self {
        SpiInterface {
            spi,
            dc,
            rst,
            delay,
        }
    }

    /// Give back the SPI device and the pins
    pub fn release(self) -> (SPI, DC, RST, DELAY) {
        (self.spi, self.dc, self.rst, self.delay)
    }
}

impl<SPI, DC, RST, DELAY> SpiInterface<SPI, DC, RST, DELAY>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
    DELAY: DelayNs,
{
    /// Write raw bytes with D/C already set
    fn write(&mut self, bytes: &[u8]) -> Result<(), DisplayError> {
        match self.spi.write(bytes) {
            Ok(_) => Ok(()),
            Err(e) => {
                log::error!("SPI write error ({} bytes): {:?}", bytes.len(), e);
                Err(DisplayError::BusWriteError)
            }
        }
    }
}

impl<SPI, DC, RST, DELAY> Transport for SpiInterface<SPI, DC, RST, DELAY>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
    DELAY: DelayNs,
{
    fn reset(&mut self) -> Result<(), DisplayError> {
        self.rst.set_high().map_err(|_| DisplayError::RSError)?;
        self.rst.set_low().map_err(|_| DisplayError::RSError)?;
        self.delay.delay_ms(RESET_PULSE_MS);
        self.rst.set_high().map_err(|_| DisplayError::RSError)?;
        self.delay.delay_ms(RESET_SETTLE_MS);
        Ok(())
    }

    fn send_command(&mut self, command: u8) -> Result<(), DisplayError> {
        // low for commands
        self.dc.set_low().map_err(|_| DisplayError::DCError)?;
        self.write(&[command])
    }

    fn send_data(&mut self, data: u8) -> Result<(), DisplayError> {
        // high for data
        self.dc.set_high().map_err(|_| DisplayError::DCError)?;
        self.write(&[data])
    }

    fn send_data_burst(&mut self, data: &[u8]) -> Result<(), DisplayError> {
        self.dc.set_high().map_err(|_| DisplayError::DCError)?;
        self.write(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::spi::{ErrorKind, ErrorType, Operation};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Wire {
        Dc(bool),
        Rst(bool),
        DelayMs(u32),
        Spi(Vec<u8>),
    }

    type Log = Rc<RefCell<Vec<Wire>>>;

    struct MockSpi {
        log: Log,
        fail: bool,
    }

    #[derive(Debug)]
    struct MockSpiError;

    impl embedded_hal::spi::Error for MockSpiError {
        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    impl ErrorType for MockSpi {
        type Error = MockSpiError;
    }

    impl SpiDevice for MockSpi {
        fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), Self::Error> {
            if self.fail {
                return Err(MockSpiError);
            }
            for op in operations {
                if let Operation::Write(bytes) = op {
                    self.log.borrow_mut().push(Wire::Spi(bytes.to_vec()));
                }
            }
            Ok(())
        }
    }

    struct MockDc(Log);

    impl embedded_hal::digital::ErrorType for MockDc {
        type Error = Infallible;
    }

    impl OutputPin for MockDc {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.0.borrow_mut().push(Wire::Dc(false));
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.0.borrow_mut().push(Wire::Dc(true));
            Ok(())
        }
    }

    struct MockRst(Log);

    impl embedded_hal::digital::ErrorType for MockRst {
        type Error = Infallible;
    }

    impl OutputPin for MockRst {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.0.borrow_mut().push(Wire::Rst(false));
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.0.borrow_mut().push(Wire::Rst(true));
            Ok(())
        }
    }

    struct MockDelay(Log);

    impl DelayNs for MockDelay {
        fn delay_ns(&mut self, _ns: u32) {}

        fn delay_ms(&mut self, ms: u32) {
            self.0.borrow_mut().push(Wire::DelayMs(ms));
        }
    }

    fn interface(fail: bool) -> (SpiInterface<MockSpi, MockDc, MockRst, MockDelay>, Log) {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let iface = SpiInterface::new(
            MockSpi {
                log: log.clone(),
                fail,
            },
            MockDc(log.clone()),
            MockRst(log.clone()),
            MockDelay(log.clone()),
        );
        (iface, log)
    }

    #[test]
    fn command_drives_dc_low_then_writes_opcode() {
        let (mut iface, log) = interface(false);
        iface.send_command(0x2A).unwrap();
        assert_eq!(*log.borrow(), vec![Wire::Dc(false), Wire::Spi(vec![0x2A])]);
    }

    #[test]
    fn data_and_burst_drive_dc_high() {
        let (mut iface, log) = interface(false);
        iface.send_data(0x01).unwrap();
        iface.send_data_burst(&[0xFF, 0xFF, 0x00, 0xF8]).unwrap();
        assert_eq!(
            *log.borrow(),
            vec![
                Wire::Dc(true),
                Wire::Spi(vec![0x01]),
                Wire::Dc(true),
                Wire::Spi(vec![0xFF, 0xFF, 0x00, 0xF8]),
            ]
        );
    }

    #[test]
    fn reset_pulses_low_and_waits_for_settle() {
        let (mut iface, log) = interface(false);
        iface.reset().unwrap();
        assert_eq!(
            *log.borrow(),
            vec![
                Wire::Rst(true),
                Wire::Rst(false),
                Wire::DelayMs(RESET_PULSE_MS),
                Wire::Rst(true),
                Wire::DelayMs(RESET_SETTLE_MS),
            ]
        );
    }

    #[test]
    fn spi_failure_maps_to_bus_write_error() {
        let (mut iface, _log) = interface(true);
        assert!(matches!(
            iface.send_command(0x2C),
            Err(DisplayError::BusWriteError)
        ));
        assert!(matches!(
            iface.send_data_burst(&[0; 4]),
            Err(DisplayError::BusWriteError)
        ));
    }

    #[test]
    fn release_hands_back_parts() {
        let (iface, log) = interface(false);
        let (_spi, mut dc, _rst, _delay) = iface.release();
        dc.set_low().unwrap();
        assert_eq!(*log.borrow(), vec![Wire::Dc(false)]);
    }
}
