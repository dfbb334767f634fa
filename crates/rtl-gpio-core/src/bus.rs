//! Backend trait definitions
//!
//! A backend provides two things: a way to list and open dongles
//! ([`DeviceDriver`]) and, for an opened dongle, raw register access
//! ([`RegisterBus`]). Everything above that lives in [`crate::gpio`].

use crate::device::DeviceInfo;
use crate::error::Result;
use crate::regs::{Block, Width};

/// Raw RTL2832 register access
///
/// Implementations perform exactly one device transaction per call and
/// never retry.
pub trait RegisterBus {
    /// Read a register of the given width
    fn read_reg(&mut self, block: Block, addr: u16, width: Width) -> Result<u16>;

    /// Write a register of the given width
    ///
    /// Bits of `value` above `width` are ignored.
    fn write_reg(&mut self, block: Block, addr: u16, value: u16, width: Width) -> Result<()>;
}

/// Enumerates and opens dongles
pub trait DeviceDriver {
    /// Register bus of an opened device
    type Bus: RegisterBus;

    /// List attached supported devices, in index order
    fn devices(&self) -> Result<Vec<DeviceInfo>>;

    /// Open the device at `index` (as returned by [`DeviceDriver::devices`])
    fn open(&self, index: usize) -> Result<Self::Bus>;
}
