//! I2C bus abstractions
//!
//! The OLED controllers only ever receive on I2C, so the trait is write-only.

/// I2C bus master
///
/// A single [`write`](I2cBus::write) is one complete bus transaction:
/// START, address, payload, STOP. Implementations must issue the STOP on
/// every exit path, including when the transfer fails part-way; a bus left
/// open blocks every later transaction.
pub trait I2cBus {
    /// Error type for I2C operations
    type Error;

    /// Write data to a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `data` - Bytes to write
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error>;
}

impl<T: I2cBus + ?Sized> I2cBus for &mut T {
    type Error = T::Error;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        (**self).write(address, data)
    }
}

/// Convert an 8-bit write address (R/W bit cleared) to the 7-bit form
///
/// Panel datasheets often quote `0x78`; the bus wants `0x3C`.
pub const fn seven_bit_address(write_address: u8) -> u8 {
    write_address >> 1
}

/// I2C configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct I2cConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
}

impl Default for I2cConfig {
    fn default() -> Self {
        // SH1106 and SSD1306 are both rated for fast mode
        Self::FAST
    }
}

impl I2cConfig {
    /// Standard mode (100 kHz)
    pub const STANDARD: Self = Self { frequency: 100_000 };

    /// Fast mode (400 kHz)
    pub const FAST: Self = Self { frequency: 400_000 };
}
