//! rtl-gpio-usb - USB backend for RTL2832U dongles
//!
//! This crate talks to RTL2832U based DVB-T/SDR sticks directly over USB,
//! without librtlsdr. Only register access is implemented: every register
//! read or write is a single vendor control transfer on endpoint 0.
//!
//! # Protocol Overview
//!
//! - `bRequest` is always 0
//! - `wValue` carries the register address
//! - `wIndex` carries the register block in its high byte; bit 4 of the low
//!   byte marks a write
//! - Writes send the value big-endian, reads return it little-endian
//!
//! # Example
//!
//! ```no_run
//! use rtl_gpio_core::{DeviceDriver, Rtl2832};
//! use rtl_gpio_usb::UsbDriver;
//!
//! let driver = UsbDriver::new();
//! let mut dev = Rtl2832::open(driver.open(0)?)?;
//! println!("GPIO: {}", dev.gpio_byte()?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod device;
mod error;
mod protocol;

pub use device::{RtlUsb, UsbDriver};
pub use error::{Result, RtlUsbError};
pub use protocol::{known_device, KnownDevice, KNOWN_DEVICES};
