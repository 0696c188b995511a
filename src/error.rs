//! Fault type for the protocol engines
//!
//! Every failure is either a non-`Ok` status reported by the driver or
//! a condition the engines detect locally before issuing any native
//! call (wrong mode, uninitialized handle, bad parameters). Both kinds
//! map onto a canonical [`Ft4222Status`] so callers can apply the
//! soft/hard classification uniformly. Nothing here retries: faults are
//! constructed once and propagated.

use ft4222_core::{Classification, Ft4222Status};
use thiserror::Error;

use crate::device::Mode;

/// Result type for all handle and engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Mode requirement an operation failed to meet
///
/// Carried inside [`Error::ModeMismatch`] so the fault names the whole
/// family of acceptable modes, not just one member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Handle must not have a protocol configured yet
    Uninitialized,
    /// Single-IO SPI master
    SpiMasterSingle,
    /// Multi-IO (dual or quad) SPI master
    SpiMasterMulti,
    /// Any SPI master mode
    SpiMaster,
    /// Any SPI mode, master or slave
    Spi,
    /// Any SPI slave mode
    SpiSlave,
    /// I2C master
    I2cMaster,
    /// I2C slave
    I2cSlave,
}

impl Requirement {
    /// Canonical status code for a violation of this requirement
    pub(crate) const fn status(self) -> Ft4222Status {
        match self {
            // An initialized handle can no longer act as the bare
            // capability the transitions consume
            Requirement::Uninitialized => Ft4222Status::InvalidHandle,
            Requirement::SpiMasterSingle => Ft4222Status::IsNotSpiSingleMode,
            Requirement::SpiMasterMulti => Ft4222Status::IsNotSpiMultiMode,
            Requirement::SpiMaster | Requirement::Spi | Requirement::SpiSlave => {
                Ft4222Status::IsNotSpiMode
            }
            Requirement::I2cMaster | Requirement::I2cSlave => Ft4222Status::IsNotI2cMode,
        }
    }
}

impl std::fmt::Display for Requirement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Requirement::Uninitialized => "an uninitialized handle",
            Requirement::SpiMasterSingle => "single-IO SPI master mode",
            Requirement::SpiMasterMulti => "multi-IO SPI master mode",
            Requirement::SpiMaster => "an SPI master mode",
            Requirement::Spi => "an SPI mode",
            Requirement::SpiSlave => "an SPI slave mode",
            Requirement::I2cMaster => "I2C master mode",
            Requirement::I2cSlave => "I2C slave mode",
        };
        f.write_str(name)
    }
}

/// Fault raised by the handle or a transaction engine
#[derive(Debug, Error)]
pub enum Error {
    /// The driver reported a non-`Ok` status
    #[error("{context}: driver reported: {status}")]
    Driver {
        /// Status code from the native call
        status: Ft4222Status,
        /// What the engine was doing when the driver failed
        context: &'static str,
    },

    /// Operation invoked on a handle in the wrong mode; detected
    /// locally, the driver was never called
    #[error("{op}: handle is in {actual} mode but the operation requires {required}")]
    ModeMismatch {
        /// Operation that was attempted
        op: &'static str,
        /// Mode family the operation needs
        required: Requirement,
        /// Mode the handle was actually in
        actual: Mode,
    },

    /// Operation invoked on an uninitialized handle; detected locally
    #[error("{op}: handle has no protocol configured")]
    NotOpened {
        /// Operation that was attempted
        op: &'static str,
    },

    /// Engine precondition violated; detected locally
    #[error("{op}: {reason}")]
    InvalidParameter {
        /// Operation that was attempted
        op: &'static str,
        /// Which precondition failed
        reason: &'static str,
    },
}

impl Error {
    pub(crate) fn driver(status: Ft4222Status, context: &'static str) -> Self {
        Error::Driver { status, context }
    }

    /// Canonical status code for this fault
    ///
    /// Locally-detected faults map onto the status the native library
    /// would have reported for the same violation.
    pub fn status(&self) -> Ft4222Status {
        match self {
            Error::Driver { status, .. } => *status,
            Error::ModeMismatch { required, .. } => required.status(),
            Error::NotOpened { .. } => Ft4222Status::DeviceNotOpened,
            Error::InvalidParameter { .. } => Ft4222Status::InvalidParameter,
        }
    }

    /// Soft/hard classification of this fault
    pub fn classification(&self) -> Classification {
        self.status().classify()
    }

    /// True when the fault was detected locally, before any native call
    pub fn is_local(&self) -> bool {
        !matches!(self, Error::Driver { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_faults_map_to_canonical_statuses() {
        let err = Error::NotOpened { op: "spi_single_read" };
        assert_eq!(err.status(), Ft4222Status::DeviceNotOpened);
        assert_eq!(
            err.classification(),
            Classification::Soft(Ft4222Status::DeviceNotOpened)
        );
        assert!(err.is_local());

        let err = Error::InvalidParameter {
            op: "spi_single_read",
            reason: "read length must be non-zero",
        };
        assert_eq!(
            err.classification(),
            Classification::Hard(Ft4222Status::InvalidParameter)
        );

        let err = Error::ModeMismatch {
            op: "i2c_read",
            required: Requirement::I2cMaster,
            actual: Mode::SpiMasterSingle,
        };
        assert_eq!(err.status(), Ft4222Status::IsNotI2cMode);
        assert!(err.status().is_hard());
    }

    #[test]
    fn test_driver_fault_keeps_status() {
        let err = Error::driver(Ft4222Status::DeviceNotFound, "opening device");
        assert_eq!(err.status(), Ft4222Status::DeviceNotFound);
        assert_eq!(
            err.classification(),
            Classification::Soft(Ft4222Status::DeviceNotFound)
        );
        assert!(!err.is_local());
    }
}
