//! Command/data transport
//!
//! The controllers take two kinds of byte streams: commands and pixel-column
//! data. [`DisplayInterface`] is the seam the engine writes to; [`I2cInterface`]
//! implements it over any [`I2cBus`] by prefixing each transaction with the
//! control byte.

use core::fmt::Debug;

use glint_hal::I2cBus;

/// Control byte announcing a command stream
pub const CONTROL_COMMAND: u8 = 0x00;

/// Control byte announcing a data stream
pub const CONTROL_DATA: u8 = 0x40;

/// Largest payload sent in a single bus transaction
pub const MAX_TRANSFER: usize = 128;

/// Transport to the display controller
///
/// Each call must leave the bus released when it returns, whether it
/// succeeded or not.
pub trait DisplayInterface {
    /// Error type for interface operations
    type Error: Debug;

    /// Send controller command bytes
    fn send_command(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;

    /// Send pixel-column bytes, written from the last addressed column on
    fn send_data(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;
}

/// I2C transport
///
/// Payloads longer than [`MAX_TRANSFER`] are split across transactions; the
/// controllers keep their column pointer between them.
pub struct I2cInterface<B> {
    bus: B,
    address: u8,
}

impl<B: I2cBus> I2cInterface<B> {
    /// Create an interface for the panel at `address` (7-bit)
    pub fn new(bus: B, address: u8) -> Self {
        Self { bus, address }
    }

    /// Give back the bus
    pub fn release(self) -> B {
        self.bus
    }

    fn transfer(&mut self, control: u8, bytes: &[u8]) -> Result<(), B::Error> {
        let mut frame = [0u8; MAX_TRANSFER + 1];
        frame[0] = control;

        for chunk in bytes.chunks(MAX_TRANSFER) {
            frame[1..=chunk.len()].copy_from_slice(chunk);
            self.bus.write(self.address, &frame[..=chunk.len()])?;
        }

        Ok(())
    }
}

impl<B> DisplayInterface for I2cInterface<B>
where
    B: I2cBus,
    B::Error: Debug,
{
    type Error = B::Error;

    fn send_command(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        self.transfer(CONTROL_COMMAND, bytes)
    }

    fn send_data(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        self.transfer(CONTROL_DATA, bytes)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    /// Mock I2C bus capturing each transaction
    #[derive(Default)]
    struct MockBus {
        transactions: Vec<(u8, Vec<u8>)>,
        nack: bool,
    }

    impl I2cBus for MockBus {
        type Error = ();

        fn write(&mut self, address: u8, data: &[u8]) -> Result<(), ()> {
            if self.nack {
                return Err(());
            }
            self.transactions.push((address, data.to_vec()));
            Ok(())
        }
    }

    #[test]
    fn test_command_prefix() {
        let mut iface = I2cInterface::new(MockBus::default(), 0x3C);
        iface.send_command(&[0xAF]).unwrap();

        let bus = iface.release();
        assert_eq!(bus.transactions, vec![(0x3C, vec![CONTROL_COMMAND, 0xAF])]);
    }

    #[test]
    fn test_data_prefix() {
        let mut iface = I2cInterface::new(MockBus::default(), 0x3D);
        iface.send_data(&[0x7E, 0x11]).unwrap();

        let bus = iface.release();
        assert_eq!(bus.transactions, vec![(0x3D, vec![CONTROL_DATA, 0x7E, 0x11])]);
    }

    #[test]
    fn test_long_payload_is_chunked() {
        let mut iface = I2cInterface::new(MockBus::default(), 0x3C);
        let payload = [0xAAu8; MAX_TRANSFER + 10];
        iface.send_data(&payload).unwrap();

        let bus = iface.release();
        assert_eq!(bus.transactions.len(), 2);
        assert_eq!(bus.transactions[0].1.len(), MAX_TRANSFER + 1);
        assert_eq!(bus.transactions[1].1.len(), 11);
        for (_, frame) in &bus.transactions {
            assert_eq!(frame[0], CONTROL_DATA);
        }
    }

    #[test]
    fn test_full_page_fits_one_transaction() {
        let mut iface = I2cInterface::new(MockBus::default(), 0x3C);
        iface.send_data(&[0u8; 128]).unwrap();

        assert_eq!(iface.release().transactions.len(), 1);
    }

    #[test]
    fn test_bus_error_propagates() {
        let bus = MockBus {
            nack: true,
            ..Default::default()
        };
        let mut iface = I2cInterface::new(bus, 0x3C);

        assert_eq!(iface.send_command(&[0xAE]), Err(()));
    }
}
