//! GPIO read/write command
//!
//! Resolves the selected dongle, opens it, optionally drives one pin and
//! finally reports the whole GPIO byte. Every step that fails ends the
//! command; nothing is retried.

use std::io::{self, Write};

use rtl_gpio_core::{resolve_device, DeviceDriver, GpioByte, PinCommand, Rtl2832};
use thiserror::Error;

/// Errors ending a GPIO command
///
/// The messages are the one-line diagnostics shown to the user.
#[derive(Debug, Error)]
pub enum GpioCommandError {
    /// No device, or no device matching the selector
    #[error(transparent)]
    Search(rtl_gpio_core::Error),

    /// Backend or baseband bring-up failed
    #[error("Failed to open rtlsdr device #{index}.")]
    Open {
        index: usize,
        #[source]
        source: rtl_gpio_core::Error,
    },

    /// Pin or value outside its range
    #[error(transparent)]
    Range(rtl_gpio_core::Error),

    /// Configuring the pin as output failed
    #[error("Error configuring pin {pin} as output. Returned error {source}")]
    SetOutput {
        pin: u8,
        source: rtl_gpio_core::Error,
    },

    /// Driving the pin failed
    #[error("Error setting pin {pin} value")]
    SetBit {
        pin: u8,
        #[source]
        source: rtl_gpio_core::Error,
    },

    /// Reading the GPIO byte failed
    #[error("Error reading GPIO byte. Returned error {source}")]
    ReadByte { source: rtl_gpio_core::Error },

    /// Writing the report failed
    #[error("Failed to write output: {0}")]
    Output(#[from] io::Error),
}

/// Run the GPIO command against `driver`, writing the report to `out`
///
/// Returns the GPIO byte that was reported.
pub fn run_gpio<D: DeviceDriver>(
    driver: &D,
    selector: &str,
    set: Option<PinCommand>,
    out: &mut impl Write,
) -> Result<GpioByte, GpioCommandError> {
    let devices = driver.devices().map_err(GpioCommandError::Search)?;

    if !devices.is_empty() {
        writeln!(out, "Found {} device(s):", devices.len())?;
        for (i, dev) in devices.iter().enumerate() {
            writeln!(out, "  {}:  {}", i, dev)?;
        }
        writeln!(out)?;
    }

    let found = resolve_device(selector, &devices).map_err(GpioCommandError::Search)?;
    let index = found.index();
    log::debug!("Selector {:?} resolved as {:?}", selector, found);
    writeln!(out, "Using device {}: {}", index, devices[index].name)?;

    let mut dev = driver
        .open(index)
        .and_then(Rtl2832::open)
        .map_err(|source| GpioCommandError::Open { index, source })?;

    if let Some(cmd) = set {
        let setting = cmd.validate().map_err(GpioCommandError::Range)?;
        writeln!(out, "Setting {}", setting)?;

        dev.set_gpio_output(setting.pin)
            .map_err(|source| GpioCommandError::SetOutput {
                pin: setting.pin,
                source,
            })?;
        dev.set_gpio_bit(setting.pin, setting.level)
            .map_err(|source| GpioCommandError::SetBit {
                pin: setting.pin,
                source,
            })?;
    }

    let byte = dev
        .gpio_byte()
        .map_err(|source| GpioCommandError::ReadByte { source })?;
    writeln!(out, "GPIO byte is set to: {}", byte)?;

    Ok(byte)
}
