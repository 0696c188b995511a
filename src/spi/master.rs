//! SPI master transaction engine
//!
//! Two sub-protocols, keyed by mode. Single-IO transfers are plain
//! full-clocked exchanges with a 16-bit byte count. Multi-IO transfers
//! are the chip's three-phase framing: a single-line phase (at most 15
//! bytes, a 4-bit field in the wire header), then a parallel write
//! phase and a parallel read phase with 16-bit counts each.
//!
//! Every operation validates its counts locally and checks the mode
//! tag before the driver sees anything; short transfers reported by
//! the driver are surfaced as-is, never padded to the requested count.

use ft4222_core::{CsPolarity, Ft4222Driver};

use crate::device::Ft4222;
use crate::error::{Error, Requirement, Result};

/// Longest single-line phase in a multi-IO transaction (4-bit field)
const MULTI_SINGLE_WRITE_MAX: u8 = 15;

impl<D: Ft4222Driver> Ft4222<D> {
    /// Read `len` bytes from the selected slave (single-IO mode)
    ///
    /// With `end_transaction` the chip-select line deasserts when the
    /// transfer completes; without it the line stays asserted so
    /// further transfers can be chained into one selection span.
    /// Returns the bytes the driver actually transferred, which may be
    /// fewer than requested.
    pub fn spi_single_read(&mut self, len: u16, end_transaction: bool) -> Result<Vec<u8>> {
        self.guard("spi_single_read", Requirement::SpiMasterSingle)?;
        if len == 0 {
            return Err(Error::InvalidParameter {
                op: "spi_single_read",
                reason: "read length must be non-zero",
            });
        }
        let mut buf = vec![0u8; len as usize];
        let transferred = self
            .driver_mut()
            .spi_master_single_read(&mut buf, end_transaction)
            .map_err(|status| Error::driver(status, "SPI single read"))?;
        buf.truncate(transferred as usize);
        log::trace!("SPI single read: {} of {} bytes", transferred, len);
        Ok(buf)
    }

    /// Write `data` to the selected slave (single-IO mode)
    ///
    /// Returns the number of bytes the driver accepted.
    pub fn spi_single_write(&mut self, data: &[u8], end_transaction: bool) -> Result<u16> {
        self.guard("spi_single_write", Requirement::SpiMasterSingle)?;
        check_transfer_len("spi_single_write", data)?;
        let transferred = self
            .driver_mut()
            .spi_master_single_write(data, end_transaction)
            .map_err(|status| Error::driver(status, "SPI single write"))?;
        log::trace!("SPI single write: {} of {} bytes", transferred, data.len());
        Ok(transferred)
    }

    /// Full-duplex exchange: clock out `write_data` while capturing
    /// the same number of bytes from the slave (single-IO mode)
    pub fn spi_single_read_write(
        &mut self,
        write_data: &[u8],
        end_transaction: bool,
    ) -> Result<Vec<u8>> {
        self.guard("spi_single_read_write", Requirement::SpiMasterSingle)?;
        check_transfer_len("spi_single_read_write", write_data)?;
        let mut buf = vec![0u8; write_data.len()];
        let transferred = self
            .driver_mut()
            .spi_master_single_read_write(&mut buf, write_data, end_transaction)
            .map_err(|status| Error::driver(status, "SPI single read-write"))?;
        buf.truncate(transferred as usize);
        log::trace!(
            "SPI single read-write: {} of {} bytes",
            transferred,
            write_data.len()
        );
        Ok(buf)
    }

    /// Three-phase multi-IO exchange (dual or quad mode)
    ///
    /// Phase 1 clocks out `single_write` bytes on one line (typically
    /// a command opcode), phase 2 clocks out `multi_write` bytes over
    /// all active lines, phase 3 clocks in `multi_read` bytes over all
    /// active lines. Any phase may be empty, but not all three; the
    /// write phases consume their bytes from the front of `write_data`
    /// in order. Returns exactly the bytes the driver reports read.
    pub fn spi_multi_read_write(
        &mut self,
        write_data: Option<&[u8]>,
        single_write: u8,
        multi_write: u16,
        multi_read: u16,
    ) -> Result<Vec<u8>> {
        self.guard("spi_multi_read_write", Requirement::SpiMasterMulti)?;
        if single_write > MULTI_SINGLE_WRITE_MAX {
            return Err(Error::InvalidParameter {
                op: "spi_multi_read_write",
                reason: "single-IO phase is limited to 15 bytes",
            });
        }
        if single_write == 0 && multi_write == 0 && multi_read == 0 {
            return Err(Error::InvalidParameter {
                op: "spi_multi_read_write",
                reason: "all three phases are empty",
            });
        }
        let write_buf = match write_data {
            None => {
                if single_write != 0 || multi_write != 0 {
                    return Err(Error::InvalidParameter {
                        op: "spi_multi_read_write",
                        reason: "write phases are non-zero but no write data was supplied",
                    });
                }
                &[][..]
            }
            Some(data) => {
                if data.len() < single_write as usize + multi_write as usize {
                    return Err(Error::InvalidParameter {
                        op: "spi_multi_read_write",
                        reason: "write data is shorter than the combined write phases",
                    });
                }
                data
            }
        };
        let mut read_buf = vec![0u8; multi_read as usize];
        let read = self
            .driver_mut()
            .spi_master_multi_read_write(&mut read_buf, write_buf, single_write, multi_write, multi_read)
            .map_err(|status| Error::driver(status, "SPI multi read-write"))?;
        read_buf.truncate(read as usize);
        log::trace!(
            "SPI multi read-write: phases {}/{}/{}, read {} bytes",
            single_write,
            multi_write,
            multi_read,
            read
        );
        Ok(read_buf)
    }

    /// Change chip-select polarity (any SPI master mode)
    pub fn set_cs_polarity(&mut self, polarity: CsPolarity) -> Result<()> {
        self.guard("set_cs_polarity", Requirement::SpiMaster)?;
        self.driver_mut()
            .spi_master_set_cs(polarity)
            .map_err(|status| Error::driver(status, "SPI set CS polarity"))?;
        log::debug!("chip select polarity set to {:?}", polarity);
        Ok(())
    }
}

fn check_transfer_len(op: &'static str, data: &[u8]) -> Result<()> {
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
    use crate::device::{Ft4222, Mode};
    use crate::error::Error;
    use ft4222_core::{
        Classification, ClkDiv, ClkPhase, ClkPolarity, CsPolarity, Ft4222Status, IoMode, SsoMap,
    };
    use ft4222_dummy::DummyFt4222;

    fn spi_master(io: IoMode) -> Ft4222<DummyFt4222> {
        let mut ft = Ft4222::open(DummyFt4222::new()).unwrap();
        ft.init_spi_master(
            io,
            ClkDiv::Div2,
            ClkPolarity::IdleLow,
            ClkPhase::Trailing,
            SsoMap::SS0,
        )
        .unwrap();
        ft
    }

    #[test]
    fn test_single_read_length_bounds() {
        let mut ft = spi_master(IoMode::Single);
        let err = ft.spi_single_read(0, true).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { .. }));
        assert_eq!(
            err.classification(),
            Classification::Hard(Ft4222Status::InvalidParameter)
        );
        assert_eq!(ft.driver().call_count("spi_master_single_read"), 0);

        let data = ft.spi_single_read(16, true).unwrap();
        assert_eq!(data.len(), 16);
    }

    #[test]
    fn test_single_write_rejects_empty() {
        let mut ft = spi_master(IoMode::Single);
        let err = ft.spi_single_write(&[], true).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { .. }));
        assert_eq!(ft.driver().call_count("spi_master_single_write"), 0);

        let written = ft.spi_single_write(&[0x9F], true).unwrap();
        assert_eq!(written, 1);
    }

    #[test]
    fn test_single_write_rejects_oversize() {
        let mut ft = spi_master(IoMode::Single);
        let data = vec![0u8; u16::MAX as usize + 1];
        let err = ft.spi_single_write(&data, true).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { .. }));
        assert_eq!(ft.driver().call_count("spi_master_single_write"), 0);
    }

    #[test]
    fn test_read_write_round_trip_length() {
        let mut ft = spi_master(IoMode::Single);
        let out = [0x01, 0x02, 0x03, 0x04];
        let back = ft.spi_single_read_write(&out, true).unwrap();
        assert_eq!(back.len(), out.len());
    }

    #[test]
    fn test_read_write_surfaces_scripted_response() {
        let mut ft = spi_master(IoMode::Single);
        ft.driver_mut().queue_spi_data(&[0xAA, 0xBB, 0xCC, 0xDD]);
        let back = ft.spi_single_read_write(&[0, 0, 0, 0], true).unwrap();
        assert_eq!(back, vec![0xAA, 0xBB, 0xCC, 0xDD]);
    }

    #[test]
    fn test_end_transaction_passes_through() {
        let mut ft = spi_master(IoMode::Single);
        ft.spi_single_write(&[1, 2], false).unwrap();
        assert_eq!(ft.driver().last_end_transaction(), Some(false));
        ft.spi_single_write(&[3], true).unwrap();
        assert_eq!(ft.driver().last_end_transaction(), Some(true));
    }

    #[test]
    fn test_single_ops_rejected_in_multi_mode() {
        let mut ft = spi_master(IoMode::Quad);
        let err = ft.spi_single_read(4, true).unwrap_err();
        assert!(matches!(err, Error::ModeMismatch { .. }));
        assert_eq!(err.status(), Ft4222Status::IsNotSpiSingleMode);
        assert_eq!(ft.driver().call_count("spi_master_single_read"), 0);
    }

    #[test]
    fn test_single_ops_rejected_after_set_lines() {
        let mut ft = spi_master(IoMode::Single);
        ft.spi_single_read(1, true).unwrap();
        ft.set_lines(IoMode::Quad).unwrap();
        assert_eq!(ft.mode(), Mode::SpiMasterMulti);
        let err = ft.spi_single_read(1, true).unwrap_err();
        assert!(matches!(err, Error::ModeMismatch { .. }));
        // And multi ops now work
        ft.spi_multi_read_write(Some(&[0x0B]), 1, 0, 4).unwrap();
    }

    #[test]
    fn test_multi_rejected_in_single_mode() {
        let mut ft = spi_master(IoMode::Single);
        let err = ft.spi_multi_read_write(None, 0, 0, 4).unwrap_err();
        assert_eq!(err.status(), Ft4222Status::IsNotSpiMultiMode);
        assert_eq!(ft.driver().call_count("spi_master_multi_read_write"), 0);
    }

    #[test]
    fn test_multi_phase_validation() {
        let mut ft = spi_master(IoMode::Dual);

        // Single-IO phase limited to 15 bytes
        let data = [0u8; 16];
        let err = ft.spi_multi_read_write(Some(&data), 16, 0, 0).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { .. }));

        // All phases empty is a no-op, rejected regardless of data
        let err = ft.spi_multi_read_write(Some(&data), 0, 0, 0).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { .. }));
        let err = ft.spi_multi_read_write(None, 0, 0, 0).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { .. }));

        // Write phases without write data
        let err = ft.spi_multi_read_write(None, 1, 0, 0).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { .. }));
        let err = ft.spi_multi_read_write(None, 0, 8, 0).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { .. }));

        // Write data shorter than the combined write phases
        let err = ft.spi_multi_read_write(Some(&[0x0B]), 1, 4, 0).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { .. }));

        // None of the rejects reached the driver
        assert_eq!(ft.driver().call_count("spi_master_multi_read_write"), 0);
    }

    #[test]
    fn test_multi_read_only_and_short_read() {
        let mut ft = spi_master(IoMode::Quad);

        // Pure read works without write data
        let data = ft.spi_multi_read_write(None, 0, 0, 8).unwrap();
        assert_eq!(data.len(), 8);

        // Short read from the driver is surfaced, not padded
        ft.driver_mut().queue_spi_data(&[0x11, 0x22]);
        let data = ft.spi_multi_read_write(None, 0, 0, 8).unwrap();
        assert_eq!(data, vec![0x11, 0x22]);
    }

    #[test]
    fn test_multi_write_phases_reach_driver() {
        let mut ft = spi_master(IoMode::Quad);
        let payload = [0x02, 0x10, 0x20, 0x30];
        ft.spi_multi_read_write(Some(&payload), 1, 3, 0).unwrap();
        assert_eq!(ft.driver().spi_written(), payload.to_vec());
    }

    #[test]
    fn test_set_cs_polarity() {
        let mut ft = spi_master(IoMode::Single);
        ft.set_cs_polarity(CsPolarity::ActiveHigh).unwrap();

        let mut ft = Ft4222::open(DummyFt4222::new()).unwrap();
        ft.init_spi_slave().unwrap();
        let err = ft.set_cs_polarity(CsPolarity::ActiveLow).unwrap_err();
        assert_eq!(err.status(), Ft4222Status::IsNotSpiMode);
    }
}
