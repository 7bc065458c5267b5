//! I2C bus driver for STM32F0
//!
//! Provides I2C communication for peripherals like the SH1106 OLED display.

use embassy_stm32::i2c::{Config, Error as I2cError, I2c, Master};
use embassy_stm32::mode::Blocking;
use embassy_stm32::time::Hertz;
use embassy_time::Duration;
use vitrine_hal::{I2cBus, I2cConfig};

/// Error from I2C operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum I2cBusError {
    /// Bus error
    Bus,
    /// Arbitration lost
    ArbitrationLost,
    /// NACK received
    Nack,
    /// Timeout
    Timeout,
    /// CRC error
    Crc,
    /// Overrun
    Overrun,
    /// Other error
    Other,
}

impl From<I2cError> for I2cBusError {
    fn from(e: I2cError) -> Self {
        match e {
            I2cError::Bus => I2cBusError::Bus,
            I2cError::Arbitration => I2cBusError::ArbitrationLost,
            I2cError::Nack => I2cBusError::Nack,
            I2cError::Timeout => I2cBusError::Timeout,
            I2cError::Crc => I2cBusError::Crc,
            I2cError::Overrun => I2cBusError::Overrun,
            _ => I2cBusError::Other,
        }
    }
}

/// Build the embassy peripheral config
pub fn embassy_config(config: &I2cConfig) -> Config {
    let mut i2c_config = Config::default();
    i2c_config.frequency = Hertz(config.frequency);
    i2c_config.timeout = Duration::from_millis(config.timeout_ms as u64);
    i2c_config
}

/// Blocking embassy I2C master exposed as an [`I2cBus`]
pub struct BlockingI2c<'d> {
    inner: I2c<'d, Blocking, Master>,
}

impl<'d> BlockingI2c<'d> {
    /// Wrap an already configured peripheral
    pub fn new(inner: I2c<'d, Blocking, Master>) -> Self {
        Self { inner }
    }

    /// Release the peripheral
    pub fn release(self) -> I2c<'d, Blocking, Master> {
        self.inner
    }
}

impl I2cBus for BlockingI2c<'_> {
    type Error = I2cBusError;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.inner.blocking_write(address, data)?;
        Ok(())
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.inner.blocking_read(address, buf)?;
        Ok(())
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.inner.blocking_write_read(address, write_data, read_buf)?;
        Ok(())
    }
}
