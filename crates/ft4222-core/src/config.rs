//! Configuration value types
//!
//! Every enum in this module crosses the FFI boundary, so the
//! discriminants must stay bit-exact with the chip firmware's constants.
//! Helpers are provided where a value has a useful arithmetic meaning
//! (clock ratios, line counts).

use bitflags::bitflags;

/// System clock selection
///
/// The FT4222H derives all protocol clocks from one of four system
/// clocks. The default after power-up is 60 MHz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u32)]
pub enum ClockRate {
    /// 60 MHz system clock
    #[default]
    SysClk60 = 0,
    /// 24 MHz system clock
    SysClk24 = 1,
    /// 48 MHz system clock
    SysClk48 = 2,
    /// 80 MHz system clock
    SysClk80 = 3,
}

impl ClockRate {
    /// Frequency in kHz
    pub const fn khz(self) -> u32 {
        match self {
            ClockRate::SysClk60 => 60_000,
            ClockRate::SysClk24 => 24_000,
            ClockRate::SysClk48 => 48_000,
            ClockRate::SysClk80 => 80_000,
        }
    }
}

/// SPI clock division ratio
///
/// The SPI clock is the system clock divided by a power of two:
/// `spi_clock = sys_clk / divisor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ClkDiv {
    /// Clock passed through undivided
    None = 0,
    /// 1/2 system clock
    Div2 = 1,
    /// 1/4 system clock
    Div4 = 2,
    /// 1/8 system clock
    Div8 = 3,
    /// 1/16 system clock
    Div16 = 4,
    /// 1/32 system clock
    Div32 = 5,
    /// 1/64 system clock
    Div64 = 6,
    /// 1/128 system clock
    Div128 = 7,
    /// 1/256 system clock
    Div256 = 8,
    /// 1/512 system clock
    Div512 = 9,
}

impl ClkDiv {
    /// The actual division ratio (`None` divides by 1)
    pub const fn divisor(self) -> u32 {
        1 << (self as u32)
    }
}

/// Clock polarity: level of the clock line while idle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u32)]
pub enum ClkPolarity {
    /// Clock idles low
    #[default]
    IdleLow = 0,
    /// Clock idles high
    IdleHigh = 1,
}

/// Clock phase: which clock edge samples data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u32)]
pub enum ClkPhase {
    /// Sample on the leading (first) edge
    #[default]
    Leading = 0,
    /// Sample on the trailing (second) edge
    Trailing = 1,
}

/// Number of data lines used for SPI transfers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u32)]
pub enum IoMode {
    /// No IO lines; never a valid master configuration
    None = 0,
    /// Standard SPI on a single line
    #[default]
    Single = 1,
    /// Dual IO: two lines in parallel
    Dual = 2,
    /// Quad IO: four lines in parallel
    Quad = 4,
}

impl IoMode {
    /// Number of data lines this mode drives
    pub const fn lines(self) -> u8 {
        self as u8
    }

    /// True for dual and quad modes
    pub const fn is_multi(self) -> bool {
        matches!(self, IoMode::Dual | IoMode::Quad)
    }
}

bitflags! {
    /// Slave-select output map
    ///
    /// Bit N asserts slave-select line N during master transactions.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SsoMap: u8 {
        /// Slave select line 0
        const SS0 = 1;
        /// Slave select line 1
        const SS1 = 2;
        /// Slave select line 2
        const SS2 = 4;
        /// Slave select line 3
        const SS3 = 8;
    }
}

/// Chip-select polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u32)]
pub enum CsPolarity {
    /// Chip select is active low (conventional)
    #[default]
    ActiveLow = 0,
    /// Chip select is active high
    ActiveHigh = 1,
}

/// SPI slave framing protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u32)]
pub enum IoProtocol {
    /// Framed transfers with acknowledgement (driver default)
    #[default]
    WithProtocol = 0,
    /// Raw byte stream, no framing
    NoProtocol = 1,
    /// Framed transfers without acknowledgement
    NoAck = 2,
}

/// Pin driving strength for the SPI lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u32)]
pub enum DriveStrength {
    /// 4 mA (sufficient unless the wiring demands more)
    #[default]
    Ma4 = 0,
    /// 8 mA
    Ma8 = 1,
    /// 12 mA
    Ma12 = 2,
    /// 16 mA
    Ma16 = 3,
}

bitflags! {
    /// I2C transaction framing flags
    ///
    /// The values mirror the native constants: `REPEATED_START` and
    /// `START_AND_STOP` are composites, and `NONE` is a distinct marker
    /// bit rather than an empty set.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TransactionFlag: u8 {
        /// No explicit condition
        const NONE = 0x80;
        /// Generate a START condition
        const START = 0x02;
        /// Generate a repeated START (no master code in HS mode)
        const REPEATED_START = 0x03;
        /// Generate a STOP condition
        const STOP = 0x04;
        /// START, data, then STOP
        const START_AND_STOP = 0x06;
    }
}

bitflags! {
    /// I2C master controller status bits
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ControllerStatus: u8 {
        /// Controller busy; all other bits are invalid while set
        const CONTROLLER_BUSY = 1 << 0;
        /// Error condition during the last operation
        const ERROR = 1 << 1;
        /// Slave address was not acknowledged
        const SLAVE_ADDR_NACK = 1 << 2;
        /// Data was not acknowledged
        const DATA_NACK = 1 << 3;
        /// Arbitration lost during the last operation
        const ARBITRATION_LOST = 1 << 4;
        /// Controller idle
        const IDLE = 1 << 5;
        /// Bus busy
        const BUS_BUSY = 1 << 6;
    }
}

impl ControllerStatus {
    /// Controller is idle and the status bits are meaningful
    pub const fn is_idle(self) -> bool {
        self.contains(ControllerStatus::IDLE)
    }

    /// The previous transaction was not acknowledged (address or data)
    pub const fn nacked(self) -> bool {
        self.intersects(
            ControllerStatus::SLAVE_ADDR_NACK.union(ControllerStatus::DATA_NACK),
        )
    }
}

/// Chip and library version pair reported by the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Version {
    /// Chip revision word
    pub chip_version: u32,
    /// Native library revision word
    pub dll_version: u32,
}

/// Find the clock configuration closest to a target SPI speed
///
/// Returns the system clock and divider pair giving the highest SPI
/// clock that does not exceed `target_khz`. Falls back to the slowest
/// possible combination when the target is below everything achievable.
pub fn pick_clock(target_khz: u32) -> (ClockRate, ClkDiv) {
    const RATES: [ClockRate; 4] = [
        ClockRate::SysClk60,
        ClockRate::SysClk80,
        ClockRate::SysClk48,
        ClockRate::SysClk24,
    ];
    const DIVS: [ClkDiv; 9] = [
        ClkDiv::Div2,
        ClkDiv::Div4,
        ClkDiv::Div8,
        ClkDiv::Div16,
        ClkDiv::Div32,
        ClkDiv::Div64,
        ClkDiv::Div128,
        ClkDiv::Div256,
        ClkDiv::Div512,
    ];

    let mut best: Option<(ClockRate, ClkDiv)> = None;
    let mut best_khz = 0;

    for &rate in &RATES {
        for &div in &DIVS {
            let speed = rate.khz() / div.divisor();
            if speed <= target_khz && speed > best_khz {
                best = Some((rate, div));
                best_khz = speed;
            }
        }
    }

    best.unwrap_or((ClockRate::SysClk24, ClkDiv::Div512))
}
