//! Error types for the RTL2832U USB backend

use rtl_gpio_core::regs::Block;
use thiserror::Error;

/// Result type for USB backend operations
pub type Result<T> = std::result::Result<T, RtlUsbError>;

/// Errors that can occur when talking to an RTL2832U over USB
#[derive(Debug, Error)]
pub enum RtlUsbError {
    /// Listing USB devices failed
    #[error("Failed to enumerate USB devices: {0}")]
    EnumerationFailed(#[source] nusb::Error),

    /// No supported dongle at the requested index
    #[error("No RTL2832U device at index {0}")]
    DeviceNotFound(usize),

    /// Failed to open device
    #[error("Failed to open RTL2832U: {0}")]
    OpenFailed(#[source] nusb::Error),

    /// Failed to claim interface
    #[error("Failed to claim interface {interface}: {source}")]
    ClaimFailed {
        interface: u8,
        #[source]
        source: nusb::Error,
    },

    /// Control transfer failed
    #[error("{block:?} register 0x{addr:04x}: control transfer failed: {source}")]
    TransferFailed {
        block: Block,
        addr: u16,
        #[source]
        source: nusb::transfer::TransferError,
    },
}

impl From<RtlUsbError> for rtl_gpio_core::Error {
    fn from(e: RtlUsbError) -> Self {
        match e {
            RtlUsbError::EnumerationFailed(_) => rtl_gpio_core::Error::Enumeration(e.to_string()),
            RtlUsbError::DeviceNotFound(index) => rtl_gpio_core::Error::DeviceNotFound(index),
            RtlUsbError::OpenFailed(_) | RtlUsbError::ClaimFailed { .. } => {
                rtl_gpio_core::Error::OpenFailed(e.to_string())
            }
            RtlUsbError::TransferFailed {
                block,
                addr,
                ref source,
            } => rtl_gpio_core::Error::Transfer {
                block,
                addr,
                reason: source.to_string(),
            },
        }
    }
}
