//! RTL2832U USB device implementation
//!
//! [`UsbDriver`] enumerates attached dongles and opens them; [`RtlUsb`] is
//! an opened dongle implementing [`RegisterBus`] with vendor control
//! transfers.

use nusb::transfer::{ControlIn, ControlOut, ControlType, Recipient};
use nusb::{Interface, MaybeFuture};
use rtl_gpio_core::regs::{Block, Width};
use rtl_gpio_core::{DeviceDriver, DeviceInfo, RegisterBus};

use crate::error::{Result, RtlUsbError};
use crate::protocol::*;

/// Enumerates RTL2832U dongles on the host's USB buses
#[derive(Debug, Default, Clone, Copy)]
pub struct UsbDriver;

impl UsbDriver {
    /// Create a driver
    pub fn new() -> Self {
        Self
    }

    /// All attached dongles whose VID/PID is in [`KNOWN_DEVICES`]
    fn supported_devices() -> Result<Vec<(nusb::DeviceInfo, &'static KnownDevice)>> {
        let devices = nusb::list_devices()
            .wait()
            .map_err(RtlUsbError::EnumerationFailed)?
            .filter_map(|d| known_device(d.vendor_id(), d.product_id()).map(|k| (d, k)))
            .collect();
        Ok(devices)
    }

    /// Open the nth supported dongle (0-indexed)
    pub fn open_nth(index: usize) -> Result<RtlUsb> {
        let devices = Self::supported_devices()?;
        let (device_info, known) = devices
            .get(index)
            .ok_or(RtlUsbError::DeviceNotFound(index))?;

        log::info!(
            "Opening {} at bus {} address {}",
            known.name,
            device_info.bus_id(),
            device_info.device_address()
        );

        let device = device_info
            .open()
            .wait()
            .map_err(RtlUsbError::OpenFailed)?;

        log::debug!(
            "Device: VID={:04X} PID={:04X}",
            device_info.vendor_id(),
            device_info.product_id()
        );

        // The DVB-T kernel driver usually owns the interface
        let interface = device
            .detach_and_claim_interface(RTL_INTERFACE)
            .wait()
            .map_err(|source| RtlUsbError::ClaimFailed {
                interface: RTL_INTERFACE,
                source,
            })?;

        log::debug!("Claimed interface {}", RTL_INTERFACE);

        Ok(RtlUsb { interface })
    }
}

impl DeviceDriver for UsbDriver {
    type Bus = RtlUsb;

    fn devices(&self) -> rtl_gpio_core::Result<Vec<DeviceInfo>> {
        let devices = Self::supported_devices()?
            .into_iter()
            .map(|(d, known)| {
                DeviceInfo::new(
                    known.name,
                    d.manufacturer_string().unwrap_or_default(),
                    d.product_string().unwrap_or_default(),
                    d.serial_number().unwrap_or_default(),
                )
            })
            .collect();
        Ok(devices)
    }

    fn open(&self, index: usize) -> rtl_gpio_core::Result<RtlUsb> {
        Ok(Self::open_nth(index)?)
    }
}

/// An opened RTL2832U dongle
pub struct RtlUsb {
    /// Claimed vendor interface
    interface: Interface,
}

impl RtlUsb {
    fn control_read(&self, block: Block, addr: u16, width: Width) -> Result<u16> {
        let data = self
            .interface
            .control_in(
                ControlIn {
                    control_type: ControlType::Vendor,
                    recipient: Recipient::Device,
                    request: RTL_REQUEST,
                    value: addr,
                    index: read_index(block),
                    length: width.bytes() as u16,
                },
                CTRL_TIMEOUT,
            )
            .wait()
            .map_err(|source| RtlUsbError::TransferFailed {
                block,
                addr,
                source,
            })?;

        let value = decode_value(&data);
        log::trace!("read {:?}[0x{:04x}] = 0x{:04x}", block, addr, value);
        Ok(value)
    }

    fn control_write(&self, block: Block, addr: u16, value: u16, width: Width) -> Result<()> {
        let data = encode_value(value, width);
        self.interface
            .control_out(
                ControlOut {
                    control_type: ControlType::Vendor,
                    recipient: Recipient::Device,
                    request: RTL_REQUEST,
                    value: addr,
                    index: write_index(block),
                    data: &data,
                },
                CTRL_TIMEOUT,
            )
            .wait()
            .map_err(|source| RtlUsbError::TransferFailed {
                block,
                addr,
                source,
            })?;

        log::trace!("write {:?}[0x{:04x}] = 0x{:04x}", block, addr, value);
        Ok(())
    }
}

impl RegisterBus for RtlUsb {
    fn read_reg(&mut self, block: Block, addr: u16, width: Width) -> rtl_gpio_core::Result<u16> {
        Ok(self.control_read(block, addr, width)?)
    }

    fn write_reg(
        &mut self,
        block: Block,
        addr: u16,
        value: u16,
        width: Width,
    ) -> rtl_gpio_core::Result<()> {
        Ok(self.control_write(block, addr, value, width)?)
    }
}
