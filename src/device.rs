//! Device handle and mode transition manager
//!
//! A freshly opened FT4222H has no protocol configured. The handle
//! tracks which protocol mode it is locked into and mediates every
//! transition: init into a protocol, in-mode line retargeting, and
//! uninitialize back to the bare state. Every transaction engine
//! operation asserts the required mode here before the driver is
//! touched, so wrong-mode calls never reach the native library.
//!
//! The chip exposes two separate release calls: `uninitialize` drops
//! the protocol configuration, `close` drops the OS-level handle, and
//! they must run in that order. [`Ft4222::close`] performs the full
//! sequence, and the `Drop` impl repeats it best-effort on every other
//! exit path so neither resource leaks when a transfer fails mid-way.

use ft4222_core::{
    ClkDiv, ClkPhase, ClkPolarity, ClockRate, Ft4222Driver, IoMode, IoProtocol, SsoMap, Version,
};

use crate::error::{Error, Requirement, Result};

/// Protocol mode a handle is currently locked into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// No protocol configured
    Uninitialized,
    /// SPI master, single IO line
    SpiMasterSingle,
    /// SPI master, dual or quad IO lines
    SpiMasterMulti,
    /// SPI slave without framing
    SpiSlaveRaw,
    /// SPI slave with framed transfers
    SpiSlaveProtocol,
    /// I2C master
    I2cMaster,
    /// I2C slave
    I2cSlave,
}

impl Mode {
    /// True for both SPI master modes
    pub const fn is_spi_master(self) -> bool {
        matches!(self, Mode::SpiMasterSingle | Mode::SpiMasterMulti)
    }

    /// True for both SPI slave modes
    pub const fn is_spi_slave(self) -> bool {
        matches!(self, Mode::SpiSlaveRaw | Mode::SpiSlaveProtocol)
    }

    /// True for any SPI mode, master or slave
    pub const fn is_spi(self) -> bool {
        self.is_spi_master() || self.is_spi_slave()
    }

    /// True once a protocol has been configured
    pub const fn is_initialized(self) -> bool {
        !matches!(self, Mode::Uninitialized)
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Mode::Uninitialized => "uninitialized",
            Mode::SpiMasterSingle => "SPI master (single)",
            Mode::SpiMasterMulti => "SPI master (multi)",
            Mode::SpiSlaveRaw => "SPI slave (raw)",
            Mode::SpiSlaveProtocol => "SPI slave (protocol)",
            Mode::I2cMaster => "I2C master",
            Mode::I2cSlave => "I2C slave",
        };
        f.write_str(name)
    }
}

/// Handle to one opened FT4222H device
///
/// Owns the injected driver binding and the current [`Mode`]. All
/// operations take `&mut self`: the physical bus is a single shared
/// resource, so at most one transfer is in flight per handle.
pub struct Ft4222<D: Ft4222Driver> {
    driver: D,
    mode: Mode,
    released: bool,
}

impl<D: Ft4222Driver> Ft4222<D> {
    /// Open the device through the given driver binding
    ///
    /// The returned handle starts in [`Mode::Uninitialized`]; no
    /// protocol operations are legal until one of the `init_*`
    /// transitions succeeds.
    pub fn open(mut driver: D) -> Result<Self> {
        driver
            .open()
            .map_err(|status| Error::driver(status, "opening device"))?;
        log::info!("FT4222 device opened");
        Ok(Self {
            driver,
            mode: Mode::Uninitialized,
            released: false,
        })
    }

    /// Mode the handle is currently in
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Borrow the underlying driver binding
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Mutably borrow the underlying driver binding
    ///
    /// Intended for driver-specific extensions (and test fakes); going
    /// around the mode checks through this borrow is the caller's
    /// responsibility.
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Assert the handle is in a mode satisfying `required`
    ///
    /// Uninitialized handles fail with the "not opened" fault; handles
    /// in another protocol mode fail with a mode mismatch. Either way
    /// the driver is never called.
    pub(crate) fn guard(&self, op: &'static str, required: Requirement) -> Result<()> {
        let satisfied = match required {
            Requirement::Uninitialized => !self.mode.is_initialized(),
            Requirement::SpiMasterSingle => self.mode == Mode::SpiMasterSingle,
            Requirement::SpiMasterMulti => self.mode == Mode::SpiMasterMulti,
            Requirement::SpiMaster => self.mode.is_spi_master(),
            Requirement::Spi => self.mode.is_spi(),
            Requirement::SpiSlave => self.mode.is_spi_slave(),
            Requirement::I2cMaster => self.mode == Mode::I2cMaster,
            Requirement::I2cSlave => self.mode == Mode::I2cSlave,
        };
        if satisfied {
            return Ok(());
        }
        if !self.mode.is_initialized() {
            return Err(Error::NotOpened { op });
        }
        Err(Error::ModeMismatch {
            op,
            required,
            actual: self.mode,
        })
    }

    // ------------------------------------------------------------------
    // Transitions out of Uninitialized
    // ------------------------------------------------------------------

    /// Configure the chip as an SPI master
    ///
    /// `IoMode::Single` lands the handle in [`Mode::SpiMasterSingle`],
    /// `Dual` and `Quad` in [`Mode::SpiMasterMulti`]. `IoMode::None`
    /// is rejected before the driver is called: there is no valid
    /// zero-line master configuration.
    pub fn init_spi_master(
        &mut self,
        io_mode: IoMode,
        clk_div: ClkDiv,
        clk_polarity: ClkPolarity,
        clk_phase: ClkPhase,
        sso_map: SsoMap,
    ) -> Result<()> {
        self.guard("init_spi_master", Requirement::Uninitialized)?;
        if io_mode == IoMode::None {
            return Err(Error::InvalidParameter {
                op: "init_spi_master",
                reason: "io_mode none is not a valid master configuration",
            });
        }
        self.driver
            .spi_master_init(io_mode, clk_div, clk_polarity, clk_phase, sso_map)
            .map_err(|status| Error::driver(status, "SPI master init"))?;
        self.mode = if io_mode.is_multi() {
            Mode::SpiMasterMulti
        } else {
            Mode::SpiMasterSingle
        };
        log::debug!(
            "SPI master initialized: {} line(s), clk/{}, sso {:?}",
            io_mode.lines(),
            clk_div.divisor(),
            sso_map
        );
        Ok(())
    }

    /// Configure the chip as an SPI slave with the driver's default
    /// framing (equivalent to `init_spi_slave_ex(WithProtocol)`)
    pub fn init_spi_slave(&mut self) -> Result<()> {
        self.guard("init_spi_slave", Requirement::Uninitialized)?;
        self.driver
            .spi_slave_init()
            .map_err(|status| Error::driver(status, "SPI slave init"))?;
        self.mode = Mode::SpiSlaveProtocol;
        log::debug!("SPI slave initialized with default framing");
        Ok(())
    }

    /// Configure the chip as an SPI slave with explicit framing
    ///
    /// `NoProtocol` yields the raw byte-stream mode; `WithProtocol`
    /// and `NoAck` yield the framed mode.
    pub fn init_spi_slave_ex(&mut self, protocol: IoProtocol) -> Result<()> {
        self.guard("init_spi_slave_ex", Requirement::Uninitialized)?;
        self.driver
            .spi_slave_init_ex(protocol)
            .map_err(|status| Error::driver(status, "SPI slave init"))?;
        self.mode = match protocol {
            IoProtocol::NoProtocol => Mode::SpiSlaveRaw,
            IoProtocol::WithProtocol | IoProtocol::NoAck => Mode::SpiSlaveProtocol,
        };
        log::debug!("SPI slave initialized: {:?}", protocol);
        Ok(())
    }

    /// Configure the chip as an I2C master at `kbps` (60 to 3400)
    pub fn init_i2c_master(&mut self, kbps: u32) -> Result<()> {
        self.guard("init_i2c_master", Requirement::Uninitialized)?;
        if !(60..=3400).contains(&kbps) {
            return Err(Error::InvalidParameter {
                op: "init_i2c_master",
                reason: "bus speed must be between 60 and 3400 kbps",
            });
        }
        self.driver
            .i2c_master_init(kbps)
            .map_err(|status| Error::driver(status, "I2C master init"))?;
        self.mode = Mode::I2cMaster;
        log::debug!("I2C master initialized at {} kbps", kbps);
        Ok(())
    }

    /// Configure the chip as an I2C slave (address defaults to 0x40)
    pub fn init_i2c_slave(&mut self) -> Result<()> {
        self.guard("init_i2c_slave", Requirement::Uninitialized)?;
        self.driver
            .i2c_slave_init()
            .map_err(|status| Error::driver(status, "I2C slave init"))?;
        self.mode = Mode::I2cSlave;
        log::debug!("I2C slave initialized");
        Ok(())
    }

    // ------------------------------------------------------------------
    // In-mode reconfiguration and transition out
    // ------------------------------------------------------------------

    /// Switch an SPI master between single, dual and quad lines
    ///
    /// Retargets the mode tag without a full re-init. Useful for
    /// devices that take commands in single IO but move data in dual
    /// or quad. `IoMode::None` is rejected with the handle unchanged.
    pub fn set_lines(&mut self, io_mode: IoMode) -> Result<()> {
        self.guard("set_lines", Requirement::SpiMaster)?;
        if io_mode == IoMode::None {
            return Err(Error::InvalidParameter {
                op: "set_lines",
                reason: "io_mode none is not a valid master configuration",
            });
        }
        self.driver
            .spi_master_set_lines(io_mode)
            .map_err(|status| Error::driver(status, "SPI master set lines"))?;
        self.mode = if io_mode.is_multi() {
            Mode::SpiMasterMulti
        } else {
            Mode::SpiMasterSingle
        };
        log::debug!("SPI master retargeted to {} line(s)", io_mode.lines());
        Ok(())
    }

    /// Release the protocol configuration, returning the handle to
    /// [`Mode::Uninitialized`]
    ///
    /// Legal from any initialized mode. Calling it again on the
    /// already-uninitialized handle fails with the "not opened" fault.
    pub fn uninitialize(&mut self) -> Result<()> {
        if !self.mode.is_initialized() {
            return Err(Error::NotOpened { op: "uninitialize" });
        }
        self.driver
            .uninitialize()
            .map_err(|status| Error::driver(status, "uninitialize"))?;
        log::debug!("protocol state released ({} -> uninitialized)", self.mode);
        self.mode = Mode::Uninitialized;
        Ok(())
    }

    /// Release the protocol state and close the device
    ///
    /// Runs uninitialize (when a protocol is configured) and close in
    /// that order, attempting the close even when uninitialize fails.
    /// The handle is consumed either way.
    pub fn close(mut self) -> Result<()> {
        self.release()
    }

    fn release(&mut self) -> Result<()> {
        if self.released {
            return Ok(());
        }
        self.released = true;
        let uninit = if self.mode.is_initialized() {
            self.mode = Mode::Uninitialized;
            self.driver
                .uninitialize()
                .map_err(|status| Error::driver(status, "releasing protocol state"))
        } else {
            Ok(())
        };
        let close = self
            .driver
            .close()
            .map_err(|status| Error::driver(status, "closing device"));
        log::info!("FT4222 device closed");
        uninit.and(close)
    }

    // ------------------------------------------------------------------
    // Device control, valid on any open handle
    // ------------------------------------------------------------------

    /// Select the system clock all protocol clocks derive from
    pub fn set_clock(&mut self, rate: ClockRate) -> Result<()> {
        self.driver
            .set_clock(rate)
            .map_err(|status| Error::driver(status, "set system clock"))?;
        log::debug!("system clock set to {} kHz", rate.khz());
        Ok(())
    }

    /// Current system clock
    pub fn clock(&mut self) -> Result<ClockRate> {
        self.driver
            .get_clock()
            .map_err(|status| Error::driver(status, "get system clock"))
    }

    /// Chip and library version words
    pub fn version(&mut self) -> Result<Version> {
        self.driver
            .get_version()
            .map_err(|status| Error::driver(status, "get version"))
    }

    /// Software reset of the whole chip
    ///
    /// Drops any configured protocol, so the handle returns to
    /// [`Mode::Uninitialized`].
    pub fn chip_reset(&mut self) -> Result<()> {
        self.driver
            .chip_reset()
            .map_err(|status| Error::driver(status, "chip reset"))?;
        self.mode = Mode::Uninitialized;
        log::debug!("chip reset");
        Ok(())
    }

    /// Largest packet the device moves in one transaction
    ///
    /// Depends on bus speed, chip mode and configured function.
    pub fn max_transfer_size(&mut self) -> Result<u16> {
        self.driver
            .get_max_transfer_size()
            .map_err(|status| Error::driver(status, "get max transfer size"))
    }
}

impl<D: Ft4222Driver> Drop for Ft4222<D> {
    fn drop(&mut self) {
        if let Err(e) = self.release() {
            log::warn!("FT4222 release on drop failed: {}", e);
        }
    }
}
