//! Bosch BMP180 temperature sensor
//!
//! Only the temperature channel is used. A reading is a two-step
//! transaction: start a conversion, wait at least 4.5 ms, then read the
//! 16-bit uncompensated value and apply the factory calibration.
//!
//! The blocking [`TemperatureSensor`] implementation waits with the injected
//! [`PreciseDelay`]; async callers can use [`Bmp180::start_conversion`] and
//! [`Bmp180::finish_conversion`] with a timer in between instead.

use tamago_core::traits::{SensorError, TemperatureSensor};
use tamago_hal::{I2cBus, PreciseDelay};

/// 7-bit bus address
pub const ADDRESS: u8 = 0x77;

/// Value of the chip id register
pub const CHIP_ID: u8 = 0x55;

/// Temperature conversion time in microseconds
pub const CONVERSION_TIME_US: u32 = 4500;

const REG_CHIP_ID: u8 = 0xD0;
const REG_CALIBRATION: u8 = 0xAA;
const REG_CONTROL: u8 = 0xF4;
const REG_RESULT: u8 = 0xF6;
const CMD_TEMPERATURE: u8 = 0x2E;

/// Calibration block length (eleven big-endian words)
const CALIBRATION_LEN: usize = 22;

/// Factory calibration coefficients
///
/// Only AC5, AC6, MC and MD enter the temperature formula; the pressure
/// coefficients are kept for completeness of the block check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Calibration {
    pub ac1: i16,
    pub ac2: i16,
    pub ac3: i16,
    pub ac4: u16,
    pub ac5: u16,
    pub ac6: u16,
    pub b1: i16,
    pub b2: i16,
    pub mb: i16,
    pub mc: i16,
    pub md: i16,
}

impl Calibration {
    /// Parse the raw block, rejecting erased (0x0000 / 0xFFFF) words
    pub fn from_bytes(raw: &[u8; CALIBRATION_LEN]) -> Result<Self, SensorError> {
        let mut words = [0u16; CALIBRATION_LEN / 2];
        for (word, pair) in words.iter_mut().zip(raw.chunks_exact(2)) {
            *word = u16::from_be_bytes([pair[0], pair[1]]);
            if *word == 0x0000 || *word == 0xFFFF {
                return Err(SensorError::InvalidCalibration);
            }
        }

        Ok(Self {
            ac1: words[0] as i16,
            ac2: words[1] as i16,
            ac3: words[2] as i16,
            ac4: words[3],
            ac5: words[4],
            ac6: words[5],
            b1: words[6] as i16,
            b2: words[7] as i16,
            mb: words[8] as i16,
            mc: words[9] as i16,
            md: words[10] as i16,
        })
    }

    /// Compensated temperature in 0.1°C from an uncompensated reading
    pub fn temperature_x10(&self, ut: u16) -> Result<i16, SensorError> {
        let x1 = ((i32::from(ut) - i32::from(self.ac6)) * i32::from(self.ac5)) >> 15;
        let divisor = x1 + i32::from(self.md);
        if divisor == 0 {
            return Err(SensorError::OutOfRange);
        }
        let x2 = (i32::from(self.mc) << 11) / divisor;
        let b5 = x1 + x2;
        let t = (b5 + 8) >> 4;
        i16::try_from(t).map_err(|_| SensorError::OutOfRange)
    }
}

/// BMP180 driver
pub struct Bmp180<I2C, D> {
    i2c: I2C,
    delay: D,
    calibration: Calibration,
}

impl<I2C: I2cBus, D: PreciseDelay> Bmp180<I2C, D> {
    /// Probe the chip and load its calibration
    pub fn new(mut i2c: I2C, delay: D) -> Result<Self, SensorError> {
        let mut id = [0u8];
        i2c.write_read(ADDRESS, &[REG_CHIP_ID], &mut id)
            .map_err(|_| SensorError::NotResponding)?;
        if id[0] != CHIP_ID {
            return Err(SensorError::WrongChip(id[0]));
        }

        let mut raw = [0u8; CALIBRATION_LEN];
        i2c.write_read(ADDRESS, &[REG_CALIBRATION], &mut raw)
            .map_err(|_| SensorError::NotResponding)?;
        let calibration = Calibration::from_bytes(&raw)?;

        Ok(Self {
            i2c,
            delay,
            calibration,
        })
    }

    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    /// Start a temperature conversion
    pub fn start_conversion(&mut self) -> Result<(), SensorError> {
        self.i2c
            .write(ADDRESS, &[REG_CONTROL, CMD_TEMPERATURE])
            .map_err(|_| SensorError::ConversionError)
    }

    /// Read the result of a conversion started at least
    /// [`CONVERSION_TIME_US`] ago
    pub fn finish_conversion(&mut self) -> Result<i16, SensorError> {
        let mut raw = [0u8; 2];
        self.i2c
            .write_read(ADDRESS, &[REG_RESULT], &mut raw)
            .map_err(|_| SensorError::ConversionError)?;
        self.calibration.temperature_x10(u16::from_be_bytes(raw))
    }

    /// Release the bus and delay
    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }
}

impl<I2C: I2cBus, D: PreciseDelay> TemperatureSensor for Bmp180<I2C, D> {
    fn read_celsius_x10(&mut self) -> Result<i16, SensorError> {
        self.start_conversion()?;
        self.delay.delay_us(CONVERSION_TIME_US);
        self.finish_conversion()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::Vec;

    /// Register file answering like a BMP180
    struct MockBmp {
        regs: [u8; 256],
        pointer: u8,
        writes: Vec<(u8, u8), 8>,
        present: bool,
    }

    impl MockBmp {
        /// Datasheet example device (UT = 27898 gives 15.0°C)
        fn datasheet() -> Self {
            let mut regs = [0u8; 256];
            let words: [u16; 11] = [
                408,
                (-72i16) as u16,
                (-14383i16) as u16,
                32741,
                32757,
                23153,
                6190,
                4,
                (-32768i16) as u16,
                (-8711i16) as u16,
                2868,
            ];
            for (i, w) in words.iter().enumerate() {
                let [hi, lo] = w.to_be_bytes();
                regs[REG_CALIBRATION as usize + 2 * i] = hi;
                regs[REG_CALIBRATION as usize + 2 * i + 1] = lo;
            }
            regs[REG_CHIP_ID as usize] = CHIP_ID;
            regs[REG_RESULT as usize] = 0x6C;
            regs[REG_RESULT as usize + 1] = 0xFA;
            Self {
                regs,
                pointer: 0,
                writes: Vec::new(),
                present: true,
            }
        }
    }

    impl I2cBus for MockBmp {
        type Error = ();

        fn write(&mut self, address: u8, data: &[u8]) -> Result<(), ()> {
            if !self.present || address != ADDRESS {
                return Err(());
            }
            if let [reg, value] = data {
                let _ = self.writes.push((*reg, *value));
            }
            Ok(())
        }

        fn write_read(&mut self, address: u8, write: &[u8], read: &mut [u8]) -> Result<(), ()> {
            if !self.present || address != ADDRESS {
                return Err(());
            }
            self.pointer = write[0];
            for (i, b) in read.iter_mut().enumerate() {
                *b = self.regs[self.pointer as usize + i];
            }
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingDelay {
        total_us: u32,
    }

    impl PreciseDelay for RecordingDelay {
        fn delay_us(&mut self, us: u32) {
            self.total_us += us;
        }
    }

    #[test]
    fn test_datasheet_example() {
        let mut sensor = Bmp180::new(MockBmp::datasheet(), RecordingDelay::default()).unwrap();
        assert_eq!(sensor.calibration().mc, -8711);
        assert_eq!(sensor.read_celsius_x10(), Ok(150));
        assert_eq!(sensor.read_celsius(), Ok(15));

        let (bus, delay) = sensor.release();
        assert_eq!(bus.writes.as_slice(), &[(0xF4, 0x2E), (0xF4, 0x2E)]);
        assert!(delay.total_us >= 2 * CONVERSION_TIME_US);
    }

    #[test]
    fn test_split_conversion() {
        let mut sensor = Bmp180::new(MockBmp::datasheet(), RecordingDelay::default()).unwrap();
        sensor.start_conversion().unwrap();
        assert_eq!(sensor.finish_conversion(), Ok(150));
    }

    #[test]
    fn test_wrong_chip() {
        let mut bus = MockBmp::datasheet();
        bus.regs[REG_CHIP_ID as usize] = 0x58;
        assert_eq!(
            Bmp180::new(bus, RecordingDelay::default()).err(),
            Some(SensorError::WrongChip(0x58))
        );
    }

    #[test]
    fn test_absent_chip() {
        let mut bus = MockBmp::datasheet();
        bus.present = false;
        assert_eq!(
            Bmp180::new(bus, RecordingDelay::default()).err(),
            Some(SensorError::NotResponding)
        );
    }

    #[test]
    fn test_erased_calibration_rejected() {
        let mut bus = MockBmp::datasheet();
        bus.regs[REG_CALIBRATION as usize + 8] = 0xFF;
        bus.regs[REG_CALIBRATION as usize + 9] = 0xFF;
        assert_eq!(
            Bmp180::new(bus, RecordingDelay::default()).err(),
            Some(SensorError::InvalidCalibration)
        );
    }

    #[test]
    fn test_bus_error_during_read() {
        let mut sensor = Bmp180::new(MockBmp::datasheet(), RecordingDelay::default()).unwrap();
        sensor.i2c.present = false;
        assert_eq!(sensor.read_celsius_x10(), Err(SensorError::ConversionError));
    }
}
