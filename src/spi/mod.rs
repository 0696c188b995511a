//! SPI transaction engines
//!
//! [`master`] holds the single-IO and multi-IO master protocols,
//! [`slave`] the receive/transmit queue operations. The operations in
//! this module are shared by every SPI mode, master or slave.

pub mod master;
pub mod slave;

use ft4222_core::{DriveStrength, Ft4222Driver};

use crate::device::Ft4222;
use crate::error::{Error, Requirement, Result};

impl<D: Ft4222Driver> Ft4222<D> {
    /// Reset the SPI engine after a bus error
    ///
    /// Keeps the configured mode and settings; no re-init is needed
    /// afterwards.
    pub fn spi_reset(&mut self) -> Result<()> {
        self.guard("spi_reset", Requirement::Spi)?;
        self.driver_mut()
            .spi_reset()
            .map_err(|status| Error::driver(status, "SPI reset"))?;
        log::debug!("SPI engine reset");
        Ok(())
    }

    /// Purge rx/tx buffers and reset the transaction state for one
    /// slave-select index (0 to 3)
    pub fn spi_reset_transaction(&mut self, spi_idx: u8) -> Result<()> {
        self.guard("spi_reset_transaction", Requirement::Spi)?;
        if spi_idx > 3 {
            return Err(Error::InvalidParameter {
                op: "spi_reset_transaction",
                reason: "slave-select index must be 0 to 3",
            });
        }
        self.driver_mut()
            .spi_reset_transaction(spi_idx)
            .map_err(|status| Error::driver(status, "SPI reset transaction"))
    }

    /// Set driving strength of the clock, IO and slave-select pins
    ///
    /// 4 mA is enough unless the board wiring demands more.
    pub fn spi_set_driving_strength(
        &mut self,
        clk: DriveStrength,
        io: DriveStrength,
        sso: DriveStrength,
    ) -> Result<()> {
        self.guard("spi_set_driving_strength", Requirement::Spi)?;
        self.driver_mut()
            .spi_set_driving_strength(clk, io, sso)
            .map_err(|status| Error::driver(status, "SPI set driving strength"))
    }
}

#[cfg(test)]
mod tests {
    use crate::device::{Ft4222, Mode};
    use crate::error::Error;
    use ft4222_core::{
        ClkDiv, ClkPhase, ClkPolarity, DriveStrength, Ft4222Status, IoMode, SsoMap,
    };
    use ft4222_dummy::DummyFt4222;

    fn spi_master(io: IoMode) -> Ft4222<DummyFt4222> {
        let mut ft = Ft4222::open(DummyFt4222::new()).unwrap();
        ft.init_spi_master(
            io,
            ClkDiv::Div2,
            ClkPolarity::IdleLow,
            ClkPhase::Leading,
            SsoMap::SS0,
        )
        .unwrap();
        ft
    }

    #[test]
    fn test_shared_ops_valid_in_master_and_slave() {
        let mut ft = spi_master(IoMode::Single);
        ft.spi_reset().unwrap();
        ft.spi_reset_transaction(0).unwrap();
        ft.spi_set_driving_strength(DriveStrength::Ma4, DriveStrength::Ma4, DriveStrength::Ma4)
            .unwrap();

        let mut ft = Ft4222::open(DummyFt4222::new()).unwrap();
        ft.init_spi_slave().unwrap();
        assert_eq!(ft.mode(), Mode::SpiSlaveProtocol);
        ft.spi_reset().unwrap();
    }

    #[test]
    fn test_shared_ops_rejected_outside_spi() {
        let mut ft = Ft4222::open(DummyFt4222::new()).unwrap();
        ft.init_i2c_master(400).unwrap();
        let err = ft.spi_reset().unwrap_err();
        assert_eq!(err.status(), Ft4222Status::IsNotSpiMode);
        assert_eq!(ft.driver().call_count("spi_reset"), 0);
    }

    #[test]
    fn test_reset_transaction_index_bound() {
        let mut ft = spi_master(IoMode::Single);
        let err = ft.spi_reset_transaction(4).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { .. }));
        assert_eq!(ft.driver().call_count("spi_reset_transaction"), 0);
    }
}
