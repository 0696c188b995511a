//! I2C transaction engines
//!
//! [`master`] drives addressed transactions with explicit framing
//! control; [`slave`] exposes the chip's addressed receive/transmit
//! queues.

pub mod master;
pub mod slave;

use crate::error::{Error, Result};

/// Widest address the 10-bit I2C extension can carry
const ADDRESS_MAX: u16 = 0x3FF;

pub(crate) fn check_address(op: &'static str, address: u16) -> Result<()> {
    if address > ADDRESS_MAX {
        return Err(Error::InvalidParameter {
            op,
            reason: "address exceeds the 10-bit space",
        });
    }
    Ok(())
}
