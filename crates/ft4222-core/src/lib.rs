//! ft4222-core - Shared contract for the FT4222H protocol core
//!
//! This crate holds everything both the protocol engines and driver
//! implementations need to agree on:
//!
//! - the native status code taxonomy and its soft/hard classification
//!   ([`status`])
//! - the bit-exact configuration value types ([`config`])
//! - the [`driver::Ft4222Driver`] trait, the contract of the native
//!   library boundary
//!
//! The crate contains no I/O of its own: concrete drivers (the USB
//! binding, or `ft4222-dummy` for tests) live elsewhere and are
//! injected into the `ft4222` handle by the caller.

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod config;
pub mod driver;
pub mod status;

pub use config::{
    pick_clock, ClkDiv, ClkPhase, ClkPolarity, ClockRate, ControllerStatus, CsPolarity,
    DriveStrength, IoMode, IoProtocol, SsoMap, TransactionFlag, Version,
};
pub use driver::{DriverResult, Ft4222Driver};
pub use status::{Classification, Ft4222Status};
