//! I2C master transaction engine
//!
//! Plain `i2c_read`/`i2c_write` frame a whole transaction (START,
//! data, STOP). The `_ex` variants take an explicit
//! [`TransactionFlag`] so multi-segment exchanges can be composed:
//! START a write, repeated-START a read, STOP at the end. Controller
//! status can be polled after a transfer to see how the slave
//! responded; `i2c_reset` restarts the engine and `i2c_reset_bus`
//! clocks nine SCL pulses to free a slave that is holding SDA low.

use ft4222_core::{ControllerStatus, Ft4222Driver, TransactionFlag};

use crate::device::Ft4222;
use crate::error::{Error, Requirement, Result};
use crate::i2c::check_address;

impl<D: Ft4222Driver> Ft4222<D> {
    /// Read `len` bytes from the slave at `address`, framed with START
    /// and STOP conditions
    ///
    /// Returns the bytes the driver actually transferred.
    pub fn i2c_read(&mut self, address: u16, len: u16) -> Result<Vec<u8>> {
        self.guard("i2c_read", Requirement::I2cMaster)?;
        check_address("i2c_read", address)?;
        check_read_len("i2c_read", len)?;
        let mut buf = vec![0u8; len as usize];
        let transferred = self
            .driver_mut()
            .i2c_master_read(address, &mut buf)
            .map_err(|status| Error::driver(status, "I2C read"))?;
        buf.truncate(transferred as usize);
        log::trace!(
            "I2C read from {:#04x}: {} of {} bytes",
            address,
            transferred,
            len
        );
        Ok(buf)
    }

    /// Write `data` to the slave at `address`, framed with START and
    /// STOP conditions
    ///
    /// Returns the number of bytes the driver transferred.
    pub fn i2c_write(&mut self, address: u16, data: &[u8]) -> Result<u16> {
        self.guard("i2c_write", Requirement::I2cMaster)?;
        check_address("i2c_write", address)?;
        check_write_data("i2c_write", data)?;
        let transferred = self
            .driver_mut()
            .i2c_master_write(address, data)
            .map_err(|status| Error::driver(status, "I2C write"))?;
        log::trace!(
            "I2C write to {:#04x}: {} of {} bytes",
            address,
            transferred,
            data.len()
        );
        Ok(transferred)
    }

    /// Read with caller-selected framing, for composing multi-segment
    /// transactions
    pub fn i2c_read_ex(
        &mut self,
        address: u16,
        flags: TransactionFlag,
        len: u16,
    ) -> Result<Vec<u8>> {
        self.guard("i2c_read_ex", Requirement::I2cMaster)?;
        check_address("i2c_read_ex", address)?;
        check_read_len("i2c_read_ex", len)?;
        let mut buf = vec![0u8; len as usize];
        let transferred = self
            .driver_mut()
            .i2c_master_read_ex(address, flags, &mut buf)
            .map_err(|status| Error::driver(status, "I2C read (flagged)"))?;
        buf.truncate(transferred as usize);
        log::trace!(
            "I2C flagged read from {:#04x} ({:?}): {} bytes",
            address,
            flags,
            transferred
        );
        Ok(buf)
    }

    /// Write with caller-selected framing, for composing multi-segment
    /// transactions
    pub fn i2c_write_ex(
        &mut self,
        address: u16,
        flags: TransactionFlag,
        data: &[u8],
    ) -> Result<u16> {
        self.guard("i2c_write_ex", Requirement::I2cMaster)?;
        check_address("i2c_write_ex", address)?;
        check_write_data("i2c_write_ex", data)?;
        let transferred = self
            .driver_mut()
            .i2c_master_write_ex(address, flags, data)
            .map_err(|status| Error::driver(status, "I2C write (flagged)"))?;
        log::trace!(
            "I2C flagged write to {:#04x} ({:?}): {} bytes",
            address,
            flags,
            transferred
        );
        Ok(transferred)
    }

    /// Controller status bits, e.g. for polling a slave after a
    /// transmission completed
    pub fn i2c_status(&mut self) -> Result<ControllerStatus> {
        self.guard("i2c_status", Requirement::I2cMaster)?;
        self.driver_mut()
            .i2c_master_get_status()
            .map_err(|status| Error::driver(status, "I2C get status"))
    }

    /// Soft reset of the I2C engine
    ///
    /// Keeps the configured settings and clears the device caches; no
    /// re-init is needed afterwards.
    pub fn i2c_reset(&mut self) -> Result<()> {
        self.guard("i2c_reset", Requirement::I2cMaster)?;
        self.driver_mut()
            .i2c_master_reset()
            .map_err(|status| Error::driver(status, "I2C reset"))?;
        log::debug!("I2C engine reset");
        Ok(())
    }

    /// Bus-level recovery
    ///
    /// Clocks nine SCL pulses so a slave holding SDA low can release
    /// it. If the bus stays stuck afterwards, only a hardware reset or
    /// power cycle will clear it.
    pub fn i2c_reset_bus(&mut self) -> Result<()> {
        self.guard("i2c_reset_bus", Requirement::I2cMaster)?;
        self.driver_mut()
            .i2c_master_reset_bus()
            .map_err(|status| Error::driver(status, "I2C bus reset"))?;
        log::debug!("I2C bus recovery issued");
        Ok(())
    }
}

fn check_read_len(op: &'static str, len: u16) -> Result<()> {
    if len == 0 {
        return Err(Error::InvalidParameter {
            op,
            reason: "read length must be non-zero",
        });
    }
    Ok(())
}

fn check_write_data(op: &'static str, data: &[u8]) -> Result<()> {
    if data.is_empty() {
        return Err(Error::InvalidParameter {
            op,
            reason: "write data must not be empty",
        });
    }
    if data.len() > u16::MAX as usize {
        return Err(Error::InvalidParameter {
            op,
            reason: "write data exceeds the 16-bit transfer count",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::device::Ft4222;
    use crate::error::Error;
    use ft4222_core::{Classification, ControllerStatus, Ft4222Status, TransactionFlag};
    use ft4222_dummy::DummyFt4222;

    const EEPROM: u16 = 0x50;

    fn i2c_master() -> Ft4222<DummyFt4222> {
        let mut dummy = DummyFt4222::new();
        dummy.attach_i2c_device(EEPROM, &[0xCA, 0xFE, 0xBA, 0xBE]);
        let mut ft = Ft4222::open(dummy).unwrap();
        ft.init_i2c_master(400).unwrap();
        ft
    }

    #[test]
    fn test_write_then_read_scenario() {
        let mut ft = i2c_master();
        let written = ft.i2c_write(EEPROM, &[0x00, 0x01]).unwrap();
        assert_eq!(written, 2);
        let data = ft.i2c_read(EEPROM, 2).unwrap();
        assert_eq!(data.len(), 2);
        assert!(ft.i2c_status().unwrap().is_idle());
    }

    #[test]
    fn test_unacknowledged_address_is_hard_failure() {
        let mut ft = i2c_master();
        let err = ft.i2c_read(0x33, 2).unwrap_err();
        assert!(matches!(
            err.classification(),
            Classification::Hard(_)
        ));
        // The controller latched the NACK for status polling
        assert!(ft.i2c_status().unwrap().nacked());
    }

    #[test]
    fn test_parameter_validation_before_native_call() {
        let mut ft = i2c_master();

        let err = ft.i2c_read(EEPROM, 0).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { .. }));
        let err = ft.i2c_write(EEPROM, &[]).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { .. }));
        let err = ft.i2c_read(0x400, 1).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { .. }));

        assert_eq!(ft.driver().call_count("i2c_master_read"), 0);
        assert_eq!(ft.driver().call_count("i2c_master_write"), 0);
    }

    #[test]
    fn test_flagged_variants_pass_framing_through() {
        let mut ft = i2c_master();
        ft.i2c_write_ex(EEPROM, TransactionFlag::START, &[0x00])
            .unwrap();
        assert_eq!(
            ft.driver().last_i2c_flags(),
            Some(TransactionFlag::START)
        );
        let data = ft
            .i2c_read_ex(EEPROM, TransactionFlag::REPEATED_START | TransactionFlag::STOP, 2)
            .unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(
            ft.driver().last_i2c_flags(),
            Some(TransactionFlag::REPEATED_START | TransactionFlag::STOP)
        );
    }

    #[test]
    fn test_reset_and_bus_recovery() {
        let mut ft = i2c_master();
        ft.i2c_reset().unwrap();
        ft.i2c_reset_bus().unwrap();
        assert_eq!(ft.driver().call_count("i2c_master_reset"), 1);
        assert_eq!(ft.driver().call_count("i2c_master_reset_bus"), 1);
    }

    #[test]
    fn test_ops_after_uninitialize_fail_not_opened() {
        let mut ft = i2c_master();
        ft.uninitialize().unwrap();
        let err = ft.i2c_write(EEPROM, &[0x00]).unwrap_err();
        assert!(matches!(err, Error::NotOpened { .. }));
        assert_eq!(
            err.classification(),
            Classification::Soft(Ft4222Status::DeviceNotOpened)
        );
        assert_eq!(ft.driver().call_count("i2c_master_write"), 0);

        let err = ft.i2c_status().unwrap_err();
        assert!(matches!(err, Error::NotOpened { .. }));
        assert_eq!(ft.driver().call_count("i2c_master_get_status"), 0);
    }

    #[test]
    fn test_i2c_ops_rejected_in_spi_mode() {
        let mut ft = Ft4222::open(DummyFt4222::new()).unwrap();
        ft.init_spi_slave().unwrap();
        let err = ft.i2c_read(EEPROM, 1).unwrap_err();
        assert_eq!(err.status(), Ft4222Status::IsNotI2cMode);
        assert_eq!(ft.driver().call_count("i2c_master_read"), 0);
    }

    #[test]
    fn test_status_reflects_written_bytes_in_dummy() {
        let mut ft = i2c_master();
        ft.i2c_write(EEPROM, &[0xAA, 0xBB]).unwrap();
        assert_eq!(ft.driver().i2c_written(EEPROM), vec![0xAA, 0xBB]);
        let status = ft.i2c_status().unwrap();
        assert!(!status.contains(ControllerStatus::ERROR));
    }
}
