//! Native status codes and their classification
//!
//! Every call into the native driver reports an `Ft4222Status`. The code
//! space is split in two: the classic FTD2XX range starting at 0 and the
//! LibFT4222 extension range starting at 1000. Both ranges must stay
//! bit-exact with the vendor constants, since the values cross the FFI
//! boundary unchanged.

use core::fmt;

/// Status code reported by the native driver
///
/// The discriminants mirror the vendor's `FT4222_STATUS` values exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Ft4222Status {
    /// Operation completed successfully
    Ok = 0,
    /// Handle is invalid or already consumed
    InvalidHandle = 1,
    /// No matching device connected
    DeviceNotFound = 2,
    /// Device exists but has not been opened
    DeviceNotOpened = 3,
    /// Low-level I/O failure
    IoError = 4,
    /// Driver ran out of internal resources
    InsufficientResources = 5,
    /// A parameter was out of range for the native call
    InvalidParameter = 6,
    /// Requested baud rate is not achievable
    InvalidBaudRate = 7,
    /// Device opened, but not for erase access
    DeviceNotOpenedForErase = 8,
    /// Device opened, but not for write access
    DeviceNotOpenedForWrite = 9,
    /// Write to the device failed
    FailedToWriteDevice = 10,
    /// EEPROM read failed
    EepromReadFailed = 11,
    /// EEPROM write failed
    EepromWriteFailed = 12,
    /// EEPROM erase failed
    EepromEraseFailed = 13,
    /// No EEPROM fitted
    EepromNotPresent = 14,
    /// EEPROM present but blank
    EepromNotProgrammed = 15,
    /// Invalid argument combination
    InvalidArgs = 16,
    /// Operation not supported by this device
    NotSupported = 17,
    /// Unspecified driver failure
    OtherError = 18,
    /// Device list has not been built yet
    DeviceListNotReady = 19,

    /// Chip is not an FT4222H
    DeviceNotSupported = 1000,
    /// Requested system clock is not supported
    ClockNotSupported = 1001,
    /// Vendor command rejected by the chip
    VendorCmdNotSupported = 1002,
    /// Handle is not configured for SPI
    IsNotSpiMode = 1003,
    /// Handle is not configured for I2C
    IsNotI2cMode = 1004,
    /// Handle is not configured for single-IO SPI
    IsNotSpiSingleMode = 1005,
    /// Handle is not configured for multi-IO SPI
    IsNotSpiMultiMode = 1006,
    /// I2C address is malformed
    WrongI2cAddress = 1007,
    /// Function not valid for the current chip mode
    InvalidFunction = 1008,
    /// Null or misaligned pointer handed to the driver
    InvalidPointer = 1009,
    /// Transfer larger than the chip can move in one transaction
    ExceededMaxTransferSize = 1010,
    /// Read from the device failed
    FailedToReadDevice = 1011,
    /// I2C unavailable in the current chip mode
    I2cNotSupportedInThisMode = 1012,
    /// GPIO unavailable in the current chip mode
    GpioNotSupportedInThisMode = 1013,
    /// GPIO port index out of range
    GpioExceededMaxPortNum = 1014,
    /// GPIO write attempted on an input pin
    GpioWriteNotSupported = 1015,
    /// Pull-up requested on a GPIO input
    GpioPullupInvalidInInputMode = 1016,
    /// Pull-down requested on a GPIO input
    GpioPulldownInvalidInInputMode = 1017,
    /// Open-drain requested on a GPIO output
    GpioOpenDrainInvalidInOutputMode = 1018,
    /// Interrupt feature unavailable
    InterruptNotSupported = 1019,
    /// GPIO input feature unavailable
    GpioInputNotSupported = 1020,
    /// Event notification unavailable
    EventNotSupported = 1021,
    /// Function not present in this library revision
    FunctionNotSupported = 1022,
}

/// Severity classification of a status code
///
/// Soft failures are conditions a caller can reasonably react to (the
/// device was unplugged, the handle is already gone). Hard failures are
/// protocol, parameter or resource violations. The split is advisory
/// only: nothing in this crate retries on either kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// The call succeeded
    Success,
    /// Recoverable or expected condition
    Soft(Ft4222Status),
    /// Protocol, parameter or resource violation
    Hard(Ft4222Status),
}

impl Ft4222Status {
    /// Convert a raw native value back into a status code
    ///
    /// Returns `None` for values outside both vendor ranges.
    pub fn from_raw(raw: u32) -> Option<Self> {
        use Ft4222Status::*;
        Some(match raw {
            0 => Ok,
            1 => InvalidHandle,
            2 => DeviceNotFound,
            3 => DeviceNotOpened,
            4 => IoError,
            5 => InsufficientResources,
            6 => InvalidParameter,
            7 => InvalidBaudRate,
            8 => DeviceNotOpenedForErase,
            9 => DeviceNotOpenedForWrite,
            10 => FailedToWriteDevice,
            11 => EepromReadFailed,
            12 => EepromWriteFailed,
            13 => EepromEraseFailed,
            14 => EepromNotPresent,
            15 => EepromNotProgrammed,
            16 => InvalidArgs,
            17 => NotSupported,
            18 => OtherError,
            19 => DeviceListNotReady,
            1000 => DeviceNotSupported,
            1001 => ClockNotSupported,
            1002 => VendorCmdNotSupported,
            1003 => IsNotSpiMode,
            1004 => IsNotI2cMode,
            1005 => IsNotSpiSingleMode,
            1006 => IsNotSpiMultiMode,
            1007 => WrongI2cAddress,
            1008 => InvalidFunction,
            1009 => InvalidPointer,
            1010 => ExceededMaxTransferSize,
            1011 => FailedToReadDevice,
            1012 => I2cNotSupportedInThisMode,
            1013 => GpioNotSupportedInThisMode,
            1014 => GpioExceededMaxPortNum,
            1015 => GpioWriteNotSupported,
            1016 => GpioPullupInvalidInInputMode,
            1017 => GpioPulldownInvalidInInputMode,
            1018 => GpioOpenDrainInvalidInOutputMode,
            1019 => InterruptNotSupported,
            1020 => GpioInputNotSupported,
            1021 => EventNotSupported,
            1022 => FunctionNotSupported,
            _ => return None,
        })
    }

    /// Raw native value of this status code
    pub const fn raw(self) -> u32 {
        self as u32
    }

    /// Classify this status into success, soft failure or hard failure
    pub const fn classify(self) -> Classification {
        use Ft4222Status::*;
        match self {
            Ok => Classification::Success,
            InvalidHandle | DeviceNotFound | DeviceNotOpened => Classification::Soft(self),
            _ => Classification::Hard(self),
        }
    }

    /// True for statuses classified as soft failures
    pub const fn is_soft(self) -> bool {
        matches!(self.classify(), Classification::Soft(_))
    }

    /// True for statuses classified as hard failures
    pub const fn is_hard(self) -> bool {
        matches!(self.classify(), Classification::Hard(_))
    }
}

impl fmt::Display for Ft4222Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Ft4222Status::*;
        let msg = match self {
            Ok => "ok",
            InvalidHandle => "invalid handle",
            DeviceNotFound => "device not found",
            DeviceNotOpened => "device not opened",
            IoError => "I/O error",
            InsufficientResources => "insufficient resources",
            InvalidParameter => "invalid parameter",
            InvalidBaudRate => "invalid baud rate",
            DeviceNotOpenedForErase => "device not opened for erase",
            DeviceNotOpenedForWrite => "device not opened for write",
            FailedToWriteDevice => "failed to write device",
            EepromReadFailed => "EEPROM read failed",
            EepromWriteFailed => "EEPROM write failed",
            EepromEraseFailed => "EEPROM erase failed",
            EepromNotPresent => "EEPROM not present",
            EepromNotProgrammed => "EEPROM not programmed",
            InvalidArgs => "invalid arguments",
            NotSupported => "not supported",
            OtherError => "unspecified driver error",
            DeviceListNotReady => "device list not ready",
            DeviceNotSupported => "device not supported",
            ClockNotSupported => "clock not supported",
            VendorCmdNotSupported => "vendor command not supported",
            IsNotSpiMode => "handle is not in SPI mode",
            IsNotI2cMode => "handle is not in I2C mode",
            IsNotSpiSingleMode => "handle is not in single-IO SPI mode",
            IsNotSpiMultiMode => "handle is not in multi-IO SPI mode",
            WrongI2cAddress => "wrong I2C address",
            InvalidFunction => "invalid function for chip mode",
            InvalidPointer => "invalid pointer",
            ExceededMaxTransferSize => "exceeded maximum transfer size",
            FailedToReadDevice => "failed to read device",
            I2cNotSupportedInThisMode => "I2C not supported in this chip mode",
            GpioNotSupportedInThisMode => "GPIO not supported in this chip mode",
            GpioExceededMaxPortNum => "GPIO port number out of range",
            GpioWriteNotSupported => "GPIO write not supported",
            GpioPullupInvalidInInputMode => "GPIO pull-up invalid in input mode",
            GpioPulldownInvalidInInputMode => "GPIO pull-down invalid in input mode",
            GpioOpenDrainInvalidInOutputMode => "GPIO open-drain invalid in output mode",
            InterruptNotSupported => "interrupt not supported",
            GpioInputNotSupported => "GPIO input not supported",
            EventNotSupported => "event notification not supported",
            FunctionNotSupported => "function not supported by library",
        };
        f.write_str(msg)
    }
}
