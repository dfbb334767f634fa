//! Device identity and selection
//!
//! A device can be selected either by its index in the enumeration order or
//! by (part of) its USB serial number. The rules are tried in order:
//!
//! 1. the selector is an integer literal naming a valid index
//! 2. the selector equals a serial number
//! 3. the selector is a prefix of a serial number
//! 4. the selector is a suffix of a serial number
//!
//! The first device satisfying the first applicable rule wins.

use std::fmt;

use crate::error::{Error, Result};

/// Identity of one attached dongle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceInfo {
    /// Name from the known-device table
    pub name: String,
    /// USB manufacturer string
    pub manufacturer: String,
    /// USB product string
    pub product: String,
    /// USB serial number string
    pub serial: String,
}

impl DeviceInfo {
    /// Create a device description
    pub fn new(
        name: impl Into<String>,
        manufacturer: impl Into<String>,
        product: impl Into<String>,
        serial: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            manufacturer: manufacturer.into(),
            product: product.into(),
            serial: serial.into(),
        }
    }
}

impl fmt::Display for DeviceInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}, SN: {}",
            self.manufacturer, self.product, self.serial
        )
    }
}

/// How a selector matched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceMatch {
    /// Selector was a device index
    Index(usize),
    /// Selector equals the serial number
    Serial(usize),
    /// Selector is a prefix of the serial number
    SerialPrefix(usize),
    /// Selector is a suffix of the serial number
    SerialSuffix(usize),
}

impl DeviceMatch {
    /// Index of the selected device
    pub fn index(self) -> usize {
        match self {
            DeviceMatch::Index(i)
            | DeviceMatch::Serial(i)
            | DeviceMatch::SerialPrefix(i)
            | DeviceMatch::SerialSuffix(i) => i,
        }
    }
}

/// Resolve a device selector against the attached devices
pub fn resolve_device(selector: &str, devices: &[DeviceInfo]) -> Result<DeviceMatch> {
    if devices.is_empty() {
        return Err(Error::NoDevices);
    }

    if let Some(n) = parse_index(selector) {
        if n >= 0 && (n as u64) < devices.len() as u64 {
            return Ok(DeviceMatch::Index(n as usize));
        }
        log::debug!("Index {} out of range, trying serial numbers", n);
    }

    if let Some(i) = devices.iter().position(|d| d.serial == selector) {
        return Ok(DeviceMatch::Serial(i));
    }
    if let Some(i) = devices.iter().position(|d| d.serial.starts_with(selector)) {
        return Ok(DeviceMatch::SerialPrefix(i));
    }
    if let Some(i) = devices.iter().position(|d| d.serial.ends_with(selector)) {
        return Ok(DeviceMatch::SerialSuffix(i));
    }

    Err(Error::NoMatchingDevice)
}

/// Parse an integer literal the way C's `strtol(s, &end, 0)` does, requiring
/// the whole string to be consumed.
///
/// Accepts leading whitespace, an optional sign, `0x`/`0X` hex, leading-zero
/// octal and plain decimal.
fn parse_index(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, s) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let (radix, digits) = if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        (16, hex)
    } else if s.len() > 1 && s.starts_with('0') {
        (8, &s[1..])
    } else {
        (10, s)
    };

    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }

    let value = i64::from_str_radix(digits, radix).ok()?;
    Some(if negative { -value } else { value })
}
