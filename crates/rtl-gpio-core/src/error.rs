//! Error types for rtl-gpio-core

use thiserror::Error;

use crate::regs::Block;

/// Core error type shared by all backends
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Pin command string is not of the form `<bit>=<value>`
    #[error("Invalid command string.")]
    InvalidCommand,

    /// Pin number outside 0..7
    #[error("Bit to set out of range. Should be 0..7")]
    BitOutOfRange(i32),

    /// Pin value outside 0..1
    #[error("Value to set out of range. Should be 0..1")]
    ValueOutOfRange(i32),

    /// Enumeration found no supported dongle
    #[error("No supported devices found.")]
    NoDevices,

    /// Selector matched neither an index nor a serial number
    #[error("No matching devices found.")]
    NoMatchingDevice,

    /// Device index beyond the number of attached dongles
    #[error("Device #{0} not found")]
    DeviceNotFound(usize),

    /// Backend failed to open the device
    #[error("Failed to open device: {0}")]
    OpenFailed(String),

    /// Register access failed
    #[error("{block:?} register 0x{addr:04x} access failed: {reason}")]
    Transfer {
        /// Register block
        block: Block,
        /// Register address
        addr: u16,
        /// Backend specific description
        reason: String,
    },

    /// Enumeration failed
    #[error("Device enumeration failed: {0}")]
    Enumeration(String),
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, Error>;
