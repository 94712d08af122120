//! I2C bus driver for STM32F0
//!
//! Wraps a blocking embassy-stm32 I2C master. Each [`I2cBus::write`] maps to
//! one `embedded_hal` write, which the peripheral driver closes with a STOP
//! whether or not the transfer succeeded.

use embassy_stm32::i2c::Error as I2cError;
use glint_hal::I2cBus;

/// Error from I2C operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum I2cBusError {
    /// Bus error
    Bus,
    /// Arbitration lost
    ArbitrationLost,
    /// NACK received (panel absent or wrong address)
    Nack,
    /// Timeout
    Timeout,
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
            I2cError::Overrun => I2cBusError::Overrun,
            _ => I2cBusError::Other,
        }
    }
}

impl core::fmt::Display for I2cBusError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            I2cBusError::Bus => write!(f, "I2C bus error"),
            I2cBusError::ArbitrationLost => write!(f, "I2C arbitration lost"),
            I2cBusError::Nack => write!(f, "I2C NACK"),
            I2cBusError::Timeout => write!(f, "I2C timeout"),
            I2cBusError::Overrun => write!(f, "I2C overrun"),
            I2cBusError::Other => write!(f, "I2C error"),
        }
    }
}

/// Blocking I2C master usable as a display transport
///
/// Generic over the embassy driver so both `I2c<'_, Blocking, Master>` and
/// any other `embedded_hal` master reporting embassy errors fit.
pub struct Stm32I2c<T> {
    i2c: T,
}

impl<T> Stm32I2c<T>
where
    T: embedded_hal::i2c::I2c<Error = I2cError>,
{
    /// Wrap an initialized I2C master
    pub fn new(i2c: T) -> Self {
        Self { i2c }
    }

    /// Give back the underlying peripheral
    pub fn release(self) -> T {
        self.i2c
    }
}

impl<T> I2cBus for Stm32I2c<T>
where
    T: embedded_hal::i2c::I2c<Error = I2cError>,
{
    type Error = I2cBusError;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.i2c.write(address, data).map_err(I2cBusError::from)
    }
}
