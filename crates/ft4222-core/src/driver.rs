//! Device driver contract
//!
//! The native FT4222 library is an external collaborator: one function
//! per operation, each reporting an [`Ft4222Status`] and filling an
//! output parameter. This trait is that contract projected into Rust,
//! with the output parameter as the `Ok` payload. The driver value is
//! constructed explicitly by the caller and injected into the handle,
//! so tests can substitute an in-memory fake.
//!
//! Implementations must never put [`Ft4222Status::Ok`] in the `Err`
//! position; a non-`Ok` status is always an error, never a payload.
//!
//! All calls are synchronous and blocking. There is no cancellation: a
//! transfer runs until the driver reports completion or failure.

use crate::config::{
    ClkDiv, ClkPhase, ClkPolarity, ClockRate, ControllerStatus, CsPolarity, DriveStrength, IoMode,
    IoProtocol, SsoMap, TransactionFlag, Version,
};
use crate::status::Ft4222Status;

/// Outcome of a single native call
pub type DriverResult<T> = Result<T, Ft4222Status>;

/// One method per native driver entry point
///
/// Buffer lengths stand in for the native count parameters. Transfer
/// counts returned by the driver are surfaced verbatim; the engines
/// above decide what to do with short transfers.
pub trait Ft4222Driver {
    /// Open the physical device
    fn open(&mut self) -> DriverResult<()>;
    /// Close the OS-level handle; the protocol state must already be
    /// released via [`uninitialize`](Self::uninitialize)
    fn close(&mut self) -> DriverResult<()>;
    /// Release the protocol configuration state
    fn uninitialize(&mut self) -> DriverResult<()>;

    /// Select the system clock
    fn set_clock(&mut self, rate: ClockRate) -> DriverResult<()>;
    /// Query the current system clock
    fn get_clock(&mut self) -> DriverResult<ClockRate>;
    /// Query chip and library versions
    fn get_version(&mut self) -> DriverResult<Version>;
    /// Software reset of the whole chip
    fn chip_reset(&mut self) -> DriverResult<()>;
    /// Largest packet the device moves in one transaction
    fn get_max_transfer_size(&mut self) -> DriverResult<u16>;

    /// Reset the SPI engine, keeping its configuration
    fn spi_reset(&mut self) -> DriverResult<()>;
    /// Purge rx/tx buffers and reset the transaction state for one
    /// slave-select index (0-3)
    fn spi_reset_transaction(&mut self, spi_idx: u8) -> DriverResult<()>;
    /// Set driving strength of the clock, IO and slave-select pins
    fn spi_set_driving_strength(
        &mut self,
        clk: DriveStrength,
        io: DriveStrength,
        sso: DriveStrength,
    ) -> DriverResult<()>;

    /// Configure the chip as an SPI master
    fn spi_master_init(
        &mut self,
        io_mode: IoMode,
        clk_div: ClkDiv,
        clk_polarity: ClkPolarity,
        clk_phase: ClkPhase,
        sso_map: SsoMap,
    ) -> DriverResult<()>;
    /// Change chip-select polarity
    fn spi_master_set_cs(&mut self, polarity: CsPolarity) -> DriverResult<()>;
    /// Re-target the number of IO lines without a full re-init
    fn spi_master_set_lines(&mut self, io_mode: IoMode) -> DriverResult<()>;
    /// Single-IO read; returns bytes transferred
    fn spi_master_single_read(&mut self, buf: &mut [u8], end_transaction: bool)
        -> DriverResult<u16>;
    /// Single-IO write; returns bytes transferred
    fn spi_master_single_write(&mut self, data: &[u8], end_transaction: bool)
        -> DriverResult<u16>;
    /// Single-IO full-duplex exchange; returns bytes transferred
    fn spi_master_single_read_write(
        &mut self,
        read_buf: &mut [u8],
        write_data: &[u8],
        end_transaction: bool,
    ) -> DriverResult<u16>;
    /// Three-phase multi-IO exchange; returns bytes read in phase 3
    fn spi_master_multi_read_write(
        &mut self,
        read_buf: &mut [u8],
        write_data: &[u8],
        single_write: u8,
        multi_write: u16,
        multi_read: u16,
    ) -> DriverResult<u32>;

    /// Configure the chip as an SPI slave with the default framing
    fn spi_slave_init(&mut self) -> DriverResult<()>;
    /// Configure the chip as an SPI slave with explicit framing
    fn spi_slave_init_ex(&mut self, protocol: IoProtocol) -> DriverResult<()>;
    /// Set clock polarity and phase for slave operation
    fn spi_slave_set_mode(
        &mut self,
        clk_polarity: ClkPolarity,
        clk_phase: ClkPhase,
    ) -> DriverResult<()>;
    /// Bytes currently waiting in the receive queue
    fn spi_slave_get_rx_status(&mut self) -> DriverResult<u16>;
    /// Drain up to `buf.len()` bytes from the receive queue
    fn spi_slave_read(&mut self, buf: &mut [u8]) -> DriverResult<u16>;
    /// Enqueue bytes for transmission; returns bytes accepted
    fn spi_slave_write(&mut self, data: &[u8]) -> DriverResult<u16>;

    /// Configure the chip as an I2C master at the given bus speed
    fn i2c_master_init(&mut self, kbps: u32) -> DriverResult<()>;
    /// Addressed read with START and STOP conditions
    fn i2c_master_read(&mut self, address: u16, buf: &mut [u8]) -> DriverResult<u16>;
    /// Addressed write with START and STOP conditions
    fn i2c_master_write(&mut self, address: u16, data: &[u8]) -> DriverResult<u16>;
    /// Addressed read with caller-selected framing
    fn i2c_master_read_ex(
        &mut self,
        address: u16,
        flags: TransactionFlag,
        buf: &mut [u8],
    ) -> DriverResult<u16>;
    /// Addressed write with caller-selected framing
    fn i2c_master_write_ex(
        &mut self,
        address: u16,
        flags: TransactionFlag,
        data: &[u8],
    ) -> DriverResult<u16>;
    /// Controller status bits
    fn i2c_master_get_status(&mut self) -> DriverResult<ControllerStatus>;
    /// Soft reset of the I2C engine, keeping its configuration
    fn i2c_master_reset(&mut self) -> DriverResult<()>;
    /// Bus-level recovery: clock out nine SCL pulses to release a
    /// slave holding SDA low
    fn i2c_master_reset_bus(&mut self) -> DriverResult<()>;

    /// Configure the chip as an I2C slave (address defaults to 0x40)
    fn i2c_slave_init(&mut self) -> DriverResult<()>;
    /// Reset the I2C slave engine, keeping its configuration
    fn i2c_slave_reset(&mut self) -> DriverResult<()>;
    /// Current slave address
    fn i2c_slave_get_address(&mut self) -> DriverResult<u8>;
    /// Change the slave address
    fn i2c_slave_set_address(&mut self, address: u8) -> DriverResult<()>;
    /// Bytes currently waiting in the receive queue
    fn i2c_slave_get_rx_status(&mut self) -> DriverResult<u16>;
    /// Drain up to `buf.len()` bytes from the receive queue
    fn i2c_slave_read(&mut self, buf: &mut [u8]) -> DriverResult<u16>;
    /// Enqueue bytes for the next master read; returns bytes accepted
    fn i2c_slave_write(&mut self, data: &[u8]) -> DriverResult<u16>;
    /// Enable or disable clock stretching
    fn i2c_slave_set_clock_stretch(&mut self, enable: bool) -> DriverResult<()>;
    /// Byte returned to the master while the tx queue is empty
    /// (effective only with clock stretching disabled)
    fn i2c_slave_set_resp_word(&mut self, word: u8) -> DriverResult<()>;
}
