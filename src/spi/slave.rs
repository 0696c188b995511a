//! SPI slave transaction engine
//!
//! In slave mode the chip buffers traffic in a receive queue and a
//! transmit queue; the master on the other side of the bus decides
//! when data actually moves. Raw mode exposes the bare byte stream,
//! protocol mode wraps transfers in the chip's framing.

use ft4222_core::{ClkPhase, ClkPolarity, Ft4222Driver};

use crate::device::Ft4222;
use crate::error::{Error, Requirement, Result};

impl<D: Ft4222Driver> Ft4222<D> {
    /// Set clock polarity and phase for slave operation
    pub fn spi_slave_set_mode(
        &mut self,
        clk_polarity: ClkPolarity,
        clk_phase: ClkPhase,
    ) -> Result<()> {
        self.guard("spi_slave_set_mode", Requirement::SpiSlave)?;
        self.driver_mut()
            .spi_slave_set_mode(clk_polarity, clk_phase)
            .map_err(|status| Error::driver(status, "SPI slave set mode"))?;
        log::debug!(
            "SPI slave clocking set: {:?}, {:?}",
            clk_polarity,
            clk_phase
        );
        Ok(())
    }

    /// Number of bytes waiting in the receive queue
    ///
    /// A pure status read: the queue is not modified.
    pub fn spi_slave_rx_status(&mut self) -> Result<u16> {
        self.guard("spi_slave_rx_status", Requirement::SpiSlave)?;
        self.driver_mut()
            .spi_slave_get_rx_status()
            .map_err(|status| Error::driver(status, "SPI slave rx status"))
    }

    /// Drain up to `len` bytes from the receive queue
    ///
    /// Returns only the bytes that were actually available, which may
    /// be fewer than requested (or none).
    pub fn spi_slave_read(&mut self, len: u16) -> Result<Vec<u8>> {
        self.guard("spi_slave_read", Requirement::SpiSlave)?;
        let mut buf = vec![0u8; len as usize];
        let transferred = self
            .driver_mut()
            .spi_slave_read(&mut buf)
            .map_err(|status| Error::driver(status, "SPI slave read"))?;
        buf.truncate(transferred as usize);
        log::trace!("SPI slave read: {} of {} bytes", transferred, len);
        Ok(buf)
    }

    /// Enqueue `data` for transmission to the master
    ///
    /// Returns the number of payload bytes accepted into the transmit
    /// queue. The underlying driver silently prepends one dummy byte
    /// (0x00) to every write; the reported count covers only the
    /// caller's payload and the engine does not compensate for the
    /// extra byte on the wire.
    pub fn spi_slave_write(&mut self, data: &[u8]) -> Result<u16> {
        self.guard("spi_slave_write", Requirement::SpiSlave)?;
        if data.is_empty() {
            return Err(Error::InvalidParameter {
                op: "spi_slave_write",
                reason: "write data must not be empty",
            });
        }
        if data.len() > u16::MAX as usize {
            return Err(Error::InvalidParameter {
                op: "spi_slave_write",
                reason: "write data exceeds the 16-bit transfer count",
            });
        }
        let accepted = self
            .driver_mut()
            .spi_slave_write(data)
            .map_err(|status| Error::driver(status, "SPI slave write"))?;
        log::trace!("SPI slave write: {} of {} bytes", accepted, data.len());
        Ok(accepted)
    }
}

#[cfg(test)]
mod tests {
    use crate::device::{Ft4222, Mode};
    use crate::error::Error;
    use ft4222_core::{
        ClkDiv, ClkPhase, ClkPolarity, Ft4222Status, IoMode, IoProtocol, SsoMap,
    };
    use ft4222_dummy::DummyFt4222;

    fn spi_slave(protocol: IoProtocol) -> Ft4222<DummyFt4222> {
        let mut ft = Ft4222::open(DummyFt4222::new()).unwrap();
        ft.init_spi_slave_ex(protocol).unwrap();
        ft
    }

    #[test]
    fn test_slave_ops_work_in_raw_and_protocol_modes() {
        for protocol in [IoProtocol::NoProtocol, IoProtocol::WithProtocol] {
            let mut ft = spi_slave(protocol);
            ft.spi_slave_set_mode(ClkPolarity::IdleHigh, ClkPhase::Trailing)
                .unwrap();
            assert_eq!(ft.spi_slave_rx_status().unwrap(), 0);
        }
    }

    #[test]
    fn test_rx_status_is_pure() {
        let mut ft = spi_slave(IoProtocol::NoProtocol);
        ft.driver_mut().feed_spi_slave_rx(&[1, 2, 3]);
        // Repeated status reads without peer writes: stable depth
        for _ in 0..3 {
            assert_eq!(ft.spi_slave_rx_status().unwrap(), 3);
        }
        let data = ft.spi_slave_read(3).unwrap();
        assert_eq!(data, vec![1, 2, 3]);
        assert_eq!(ft.spi_slave_rx_status().unwrap(), 0);
    }

    #[test]
    fn test_read_returns_only_available_bytes() {
        let mut ft = spi_slave(IoProtocol::NoProtocol);
        ft.driver_mut().feed_spi_slave_rx(&[0xDE, 0xAD]);
        let data = ft.spi_slave_read(16).unwrap();
        assert_eq!(data, vec![0xDE, 0xAD]);
        // Empty queue yields an empty read, not an error
        assert!(ft.spi_slave_read(16).unwrap().is_empty());
    }

    #[test]
    fn test_write_reports_payload_count_dummy_byte_excluded() {
        let mut ft = spi_slave(IoProtocol::WithProtocol);
        let accepted = ft.spi_slave_write(&[0x10, 0x20, 0x30]).unwrap();
        assert_eq!(accepted, 3);
        // The driver put the dummy byte on the wire ahead of the payload
        assert_eq!(ft.driver().spi_slave_tx(), vec![0x00, 0x10, 0x20, 0x30]);
    }

    #[test]
    fn test_write_rejects_empty() {
        let mut ft = spi_slave(IoProtocol::WithProtocol);
        let err = ft.spi_slave_write(&[]).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { .. }));
        assert_eq!(ft.driver().call_count("spi_slave_write"), 0);
    }

    #[test]
    fn test_slave_ops_rejected_in_master_mode() {
        let mut ft = Ft4222::open(DummyFt4222::new()).unwrap();
        ft.init_spi_master(
            IoMode::Single,
            ClkDiv::Div4,
            ClkPolarity::IdleLow,
            ClkPhase::Leading,
            SsoMap::SS0,
        )
        .unwrap();
        assert_eq!(ft.mode(), Mode::SpiMasterSingle);
        let err = ft.spi_slave_read(4).unwrap_err();
        assert!(matches!(err, Error::ModeMismatch { .. }));
        assert_eq!(err.status(), Ft4222Status::IsNotSpiMode);
        assert_eq!(ft.driver().call_count("spi_slave_read"), 0);
    }

    #[test]
    fn test_slave_ops_rejected_after_uninitialize() {
        let mut ft = spi_slave(IoProtocol::NoProtocol);
        ft.uninitialize().unwrap();
        let err = ft.spi_slave_rx_status().unwrap_err();
        assert!(matches!(err, Error::NotOpened { .. }));
        assert_eq!(err.status(), Ft4222Status::DeviceNotOpened);
        assert_eq!(ft.driver().call_count("spi_slave_get_rx_status"), 0);
    }
}
