//! I2C slave transaction engine
//!
//! After init the chip answers on address 0x40 until told otherwise.
//! Traffic moves through a receive queue (master writes land there)
//! and a transmit queue (drained by master reads). With clock
//! stretching disabled the chip answers early master reads with a
//! configurable response word instead of stalling the bus.

use ft4222_core::Ft4222Driver;

use crate::device::Ft4222;
use crate::error::{Error, Requirement, Result};

impl<D: Ft4222Driver> Ft4222<D> {
    /// Current slave address
    pub fn i2c_slave_address(&mut self) -> Result<u8> {
        self.guard("i2c_slave_address", Requirement::I2cSlave)?;
        self.driver_mut()
            .i2c_slave_get_address()
            .map_err(|status| Error::driver(status, "I2C slave get address"))
    }

    /// Change the slave address (7-bit)
    pub fn i2c_slave_set_address(&mut self, address: u8) -> Result<()> {
        self.guard("i2c_slave_set_address", Requirement::I2cSlave)?;
        if address > 0x7F {
            return Err(Error::InvalidParameter {
                op: "i2c_slave_set_address",
                reason: "address exceeds the 7-bit space",
            });
        }
        self.driver_mut()
            .i2c_slave_set_address(address)
            .map_err(|status| Error::driver(status, "I2C slave set address"))?;
        log::debug!("I2C slave address set to {:#04x}", address);
        Ok(())
    }

    /// Number of bytes waiting in the receive queue
    pub fn i2c_slave_rx_status(&mut self) -> Result<u16> {
        self.guard("i2c_slave_rx_status", Requirement::I2cSlave)?;
        self.driver_mut()
            .i2c_slave_get_rx_status()
            .map_err(|status| Error::driver(status, "I2C slave rx status"))
    }

    /// Drain up to `len` bytes from the receive queue
    ///
    /// Returns only the bytes that were actually available.
    pub fn i2c_slave_read(&mut self, len: u16) -> Result<Vec<u8>> {
        self.guard("i2c_slave_read", Requirement::I2cSlave)?;
        let mut buf = vec![0u8; len as usize];
        let transferred = self
            .driver_mut()
            .i2c_slave_read(&mut buf)
            .map_err(|status| Error::driver(status, "I2C slave read"))?;
        buf.truncate(transferred as usize);
        log::trace!("I2C slave read: {} of {} bytes", transferred, len);
        Ok(buf)
    }

    /// Enqueue `data` for the next master read
    ///
    /// Returns the number of bytes accepted into the transmit queue.
    pub fn i2c_slave_write(&mut self, data: &[u8]) -> Result<u16> {
        self.guard("i2c_slave_write", Requirement::I2cSlave)?;
        if data.is_empty() {
            return Err(Error::InvalidParameter {
                op: "i2c_slave_write",
                reason: "write data must not be empty",
            });
        }
        if data.len() > u16::MAX as usize {
            return Err(Error::InvalidParameter {
                op: "i2c_slave_write",
                reason: "write data exceeds the 16-bit transfer count",
            });
        }
        let accepted = self
            .driver_mut()
            .i2c_slave_write(data)
            .map_err(|status| Error::driver(status, "I2C slave write"))?;
        log::trace!("I2C slave write: {} of {} bytes", accepted, data.len());
        Ok(accepted)
    }

    /// Enable or disable clock stretching (disabled by default)
    ///
    /// With stretching enabled the chip holds SCL low while it is not
    /// ready; with it disabled the response word fills in instead.
    pub fn i2c_slave_set_clock_stretch(&mut self, enable: bool) -> Result<()> {
        self.guard("i2c_slave_set_clock_stretch", Requirement::I2cSlave)?;
        self.driver_mut()
            .i2c_slave_set_clock_stretch(enable)
            .map_err(|status| Error::driver(status, "I2C slave set clock stretch"))?;
        log::debug!("I2C slave clock stretch: {}", enable);
        Ok(())
    }

    /// Byte returned to the master while the transmit queue is empty
    ///
    /// Only effective while clock stretching is disabled. Defaults to
    /// 0xFF.
    pub fn i2c_slave_set_resp_word(&mut self, word: u8) -> Result<()> {
        self.guard("i2c_slave_set_resp_word", Requirement::I2cSlave)?;
        self.driver_mut()
            .i2c_slave_set_resp_word(word)
            .map_err(|status| Error::driver(status, "I2C slave set response word"))
    }

    /// Reset the I2C slave engine, keeping its configuration
    pub fn i2c_slave_reset(&mut self) -> Result<()> {
        self.guard("i2c_slave_reset", Requirement::I2cSlave)?;
        self.driver_mut()
            .i2c_slave_reset()
            .map_err(|status| Error::driver(status, "I2C slave reset"))?;
        log::debug!("I2C slave engine reset");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::device::Ft4222;
    use crate::error::Error;
    use ft4222_core::Ft4222Status;
    use ft4222_dummy::DummyFt4222;

    fn i2c_slave() -> Ft4222<DummyFt4222> {
        let mut ft = Ft4222::open(DummyFt4222::new()).unwrap();
        ft.init_i2c_slave().unwrap();
        ft
    }

    #[test]
    fn test_default_address_is_0x40() {
        let mut ft = i2c_slave();
        assert_eq!(ft.i2c_slave_address().unwrap(), 0x40);
    }

    #[test]
    fn test_set_address_bounds() {
        let mut ft = i2c_slave();
        ft.i2c_slave_set_address(0x29).unwrap();
        assert_eq!(ft.i2c_slave_address().unwrap(), 0x29);

        let err = ft.i2c_slave_set_address(0x80).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { .. }));
        assert_eq!(ft.i2c_slave_address().unwrap(), 0x29);
    }

    #[test]
    fn test_rx_queue_round_trip() {
        let mut ft = i2c_slave();
        ft.driver_mut().feed_i2c_slave_rx(&[9, 8, 7]);
        assert_eq!(ft.i2c_slave_rx_status().unwrap(), 3);
        let data = ft.i2c_slave_read(8).unwrap();
        assert_eq!(data, vec![9, 8, 7]);
        assert_eq!(ft.i2c_slave_rx_status().unwrap(), 0);
    }

    #[test]
    fn test_write_and_configuration() {
        let mut ft = i2c_slave();
        assert_eq!(ft.i2c_slave_write(&[1, 2, 3, 4]).unwrap(), 4);
        ft.i2c_slave_set_clock_stretch(true).unwrap();
        ft.i2c_slave_set_resp_word(0x00).unwrap();
        ft.i2c_slave_reset().unwrap();

        let err = ft.i2c_slave_write(&[]).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { .. }));
    }

    #[test]
    fn test_slave_ops_rejected_in_master_mode() {
        let mut ft = Ft4222::open(DummyFt4222::new()).unwrap();
        ft.init_i2c_master(400).unwrap();
        let err = ft.i2c_slave_address().unwrap_err();
        assert!(matches!(err, Error::ModeMismatch { .. }));
        assert_eq!(err.status(), Ft4222Status::IsNotI2cMode);
        assert_eq!(ft.driver().call_count("i2c_slave_get_address"), 0);
    }
}
