//! ft4222 - Protocol core for the FTDI FT4222H USB bridge
//!
//! The FT4222H is a USB 2.0 to SPI/I2C bridge: one physical device
//! that can be locked into one of several protocol functions at a
//! time. This crate implements the part that is easy to get wrong:
//! the mode state machine deciding which operations are legal on a
//! handle, the transaction protocols layered on top, and the status
//! taxonomy every native call reports through.
//!
//! The USB transport itself is *not* here. A [`Ft4222Driver`]
//! implementation (one method per native library call) is injected
//! into the handle at open time; `ft4222-dummy` provides an in-memory
//! one for tests and development without hardware.
//!
//! # Modes
//!
//! A freshly opened handle is uninitialized. It transitions into
//! exactly one protocol mode at a time:
//!
//! - SPI master, single IO (`init_spi_master` with [`IoMode::Single`])
//! - SPI master, dual/quad IO (`init_spi_master` with `Dual`/`Quad`)
//! - SPI slave, raw or framed (`init_spi_slave`, `init_spi_slave_ex`)
//! - I2C master (`init_i2c_master`)
//! - I2C slave (`init_i2c_slave`)
//!
//! `uninitialize` returns the handle to the bare state so another
//! protocol can be configured. Every transaction operation checks the
//! mode tag first and fails with a typed fault before the driver is
//! touched when the handle is in the wrong mode.
//!
//! # Example
//!
//! ```
//! use ft4222::{Ft4222, Result};
//! use ft4222::{ClkDiv, ClkPhase, ClkPolarity, IoMode, SsoMap};
//!
//! fn probe() -> Result<()> {
//!     // The driver binding is constructed explicitly and injected;
//!     // swap the in-memory dummy for a real USB binding on hardware
//!     let mut ft = Ft4222::open(ft4222_dummy::DummyFt4222::new())?;
//!     ft.init_spi_master(
//!         IoMode::Single,
//!         ClkDiv::Div8,
//!         ClkPolarity::IdleLow,
//!         ClkPhase::Leading,
//!         SsoMap::SS0,
//!     )?;
//!
//!     // JEDEC ID: one command byte out, three ID bytes back
//!     ft.spi_single_write(&[0x9F], false)?;
//!     let id = ft.spi_single_read(3, true)?;
//!     println!("JEDEC ID: {:02X?}", id);
//!
//!     ft.close()
//! }
//! ```
//!
//! # Errors
//!
//! Every fault carries a canonical [`Ft4222Status`], whether it came
//! from the driver or was detected locally, and classifies as a soft
//! or hard failure through [`Error::classification`]. The split is
//! advisory: callers decide whether a soft failure warrants a
//! reconnect, the crate itself never retries.
//!
//! All calls are synchronous and blocking, and a handle must not be
//! shared between threads mid-operation; exclusive `&mut` access per
//! call enforces the one-transfer-per-handle rule of the physical bus.

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod device;
pub mod error;
pub mod i2c;
pub mod spi;

pub use device::{Ft4222, Mode};
pub use error::{Error, Requirement, Result};

// Re-export the shared contract so callers need only this crate
pub use ft4222_core::{
    pick_clock, Classification, ClkDiv, ClkPhase, ClkPolarity, ClockRate, ControllerStatus,
    CsPolarity, DriveStrength, DriverResult, Ft4222Driver, Ft4222Status, IoMode, IoProtocol,
    SsoMap, TransactionFlag, Version,
};
