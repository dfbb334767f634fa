//! rtl-gpio-core - Core library for RTL2832 GPIO access
//!
//! This crate holds everything that does not depend on how the dongle is
//! reached: the RTL2832 register map, the GPIO read-modify-write logic, the
//! device search rules and the pin command syntax.
//!
//! Backends (USB, in-memory emulator) only need to implement [`RegisterBus`]
//! and [`DeviceDriver`].
//!
//! # Example
//!
//! ```ignore
//! use rtl_gpio_core::{DeviceDriver, Rtl2832};
//!
//! fn dump<D: DeviceDriver>(driver: &D) -> rtl_gpio_core::Result<()> {
//!     let bus = driver.open(0)?;
//!     let mut dev = Rtl2832::open(bus)?;
//!     println!("{}", dev.gpio_byte()?);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod bus;
pub mod device;
pub mod error;
pub mod gpio;
pub mod regs;

pub use bus::{DeviceDriver, RegisterBus};
pub use device::{resolve_device, DeviceInfo, DeviceMatch};
pub use error::{Error, Result};
pub use gpio::{GpioByte, GpioPins, PinCommand, PinSetting, Rtl2832};
