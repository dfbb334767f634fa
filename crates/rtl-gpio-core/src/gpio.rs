//! GPIO access on top of a [`RegisterBus`]
//!
//! The RTL2832 exposes eight GPIO pins through four system-block registers:
//! an output latch (`GPO`), the sampled pin levels (`GPI`), an output enable
//! mask (`GPOE`) and a direction mask (`GPD`, cleared bit = output).
//! Single-pin operations are read-modify-write on those registers.

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;

use crate::bus::RegisterBus;
use crate::error::{Error, Result};
use crate::regs::{self, Block, Width};

bitflags! {
    /// GPIO pin mask
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct GpioPins: u8 {
        /// GPIO 0
        const GPIO0 = 1 << 0;
        /// GPIO 1
        const GPIO1 = 1 << 1;
        /// GPIO 2
        const GPIO2 = 1 << 2;
        /// GPIO 3
        const GPIO3 = 1 << 3;
        /// GPIO 4
        const GPIO4 = 1 << 4;
        /// GPIO 5
        const GPIO5 = 1 << 5;
        /// GPIO 6
        const GPIO6 = 1 << 6;
        /// GPIO 7
        const GPIO7 = 1 << 7;
    }
}

impl GpioPins {
    /// Mask for a single pin, `None` if `pin > 7`
    pub fn pin(pin: u8) -> Option<Self> {
        (pin < 8).then(|| Self::from_bits_retain(1 << pin))
    }
}

/// A `<bit>=<value>` request as typed by the user
///
/// Parsing only checks the syntax; ranges are checked by
/// [`PinCommand::validate`] so that an out-of-range pin is reported
/// separately from a malformed string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinCommand {
    /// Requested pin number
    pub bit: i32,
    /// Requested pin value
    pub value: i32,
}

impl PinCommand {
    /// Check that `bit` is in 0..=7 and `value` in 0..=1
    pub fn validate(self) -> Result<PinSetting> {
        if !(0..=7).contains(&self.bit) {
            return Err(Error::BitOutOfRange(self.bit));
        }
        if !(0..=1).contains(&self.value) {
            return Err(Error::ValueOutOfRange(self.value));
        }
        Ok(PinSetting {
            pin: self.bit as u8,
            level: self.value == 1,
        })
    }
}

impl FromStr for PinCommand {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (bit, value) = s.split_once('=').ok_or(Error::InvalidCommand)?;
        let bit = bit.parse().map_err(|_| Error::InvalidCommand)?;
        let value = value.parse().map_err(|_| Error::InvalidCommand)?;
        Ok(Self { bit, value })
    }
}

/// A validated pin assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinSetting {
    /// Pin number (0..=7)
    pub pin: u8,
    /// Output level
    pub level: bool,
}

impl fmt::Display for PinSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pin {} to 0b{}", self.pin, self.level as u8)
    }
}

/// Value of the GPIO register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GpioByte(pub u8);

impl GpioByte {
    /// Binary rendering without leading zeros
    pub fn to_binary(self) -> String {
        format!("{:b}", self.0)
    }

    /// Pins currently high
    pub fn pins(self) -> GpioPins {
        GpioPins::from_bits_retain(self.0)
    }
}

impl fmt::Display for GpioByte {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:x} (0b{})", self.0, self.to_binary())
    }
}

/// An opened RTL2832 dongle
///
/// Owns its register bus; the device is released when this is dropped.
pub struct Rtl2832<B: RegisterBus> {
    bus: B,
}

impl<B: RegisterBus> Rtl2832<B> {
    /// Bring up the baseband so the system registers answer
    ///
    /// The first write doubles as a liveness check; if it fails the device
    /// is not usable and the error is returned as is.
    pub fn open(mut bus: B) -> Result<Self> {
        for &(block, addr, value, width) in regs::BASEBAND_INIT {
            bus.write_reg(block, addr, value, width)?;
        }
        log::debug!("RTL2832 baseband powered on");
        Ok(Self { bus })
    }

    /// Configure `pin` as an output
    pub fn set_gpio_output(&mut self, pin: u8) -> Result<()> {
        let mask = mask_for(pin)?;

        let dir = self.read_sys(regs::GPD)?;
        self.write_sys(regs::GPD, dir & !mask.bits())?;

        let enable = self.read_sys(regs::GPOE)?;
        self.write_sys(regs::GPOE, enable | mask.bits())?;

        log::debug!("GPIO{} configured as output", pin);
        Ok(())
    }

    /// Drive `pin` high or low
    pub fn set_gpio_bit(&mut self, pin: u8, level: bool) -> Result<()> {
        let mask = mask_for(pin)?;

        let out = self.read_sys(regs::GPO)?;
        let out = if level {
            out | mask.bits()
        } else {
            out & !mask.bits()
        };
        self.write_sys(regs::GPO, out)?;

        log::debug!("GPIO{} set to {}", pin, level as u8);
        Ok(())
    }

    /// Read the pin levels of all eight GPIOs
    pub fn gpio_byte(&mut self) -> Result<GpioByte> {
        self.read_sys(regs::GPI).map(GpioByte)
    }

    /// Give back the underlying bus
    pub fn into_inner(self) -> B {
        self.bus
    }

    fn read_sys(&mut self, addr: u16) -> Result<u8> {
        let value = self.bus.read_reg(Block::Sys, addr, Width::Byte)?;
        Ok((value & 0xff) as u8)
    }

    fn write_sys(&mut self, addr: u16, value: u8) -> Result<()> {
        self.bus.write_reg(Block::Sys, addr, value as u16, Width::Byte)
    }
}

fn mask_for(pin: u8) -> Result<GpioPins> {
    GpioPins::pin(pin).ok_or(Error::BitOutOfRange(pin as i32))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Minimal register file for exercising the read-modify-write paths
    #[derive(Default)]
    struct Regs {
        values: HashMap<(Block, u16), u16>,
        writes: Vec<(Block, u16, u16)>,
        fail_addr: Option<u16>,
    }

    impl RegisterBus for Regs {
        fn read_reg(&mut self, block: Block, addr: u16, width: Width) -> Result<u16> {
            Ok(self.values.get(&(block, addr)).copied().unwrap_or(0) & width.mask())
        }

        fn write_reg(&mut self, block: Block, addr: u16, value: u16, width: Width) -> Result<()> {
            if self.fail_addr == Some(addr) {
                return Err(Error::Transfer {
                    block,
                    addr,
                    reason: "stall".into(),
                });
            }
            self.values.insert((block, addr), value & width.mask());
            self.writes.push((block, addr, value & width.mask()));
            Ok(())
        }
    }

    #[test]
    fn test_parse_pin_command() {
        for bit in -3..12 {
            for value in -2..4 {
                let cmd: PinCommand = format!("{}={}", bit, value).parse().unwrap();
                assert_eq!(cmd, PinCommand { bit, value });
            }
        }
        assert_eq!(
            "+4=+1".parse::<PinCommand>(),
            Ok(PinCommand { bit: 4, value: 1 })
        );
    }

    #[test]
    fn test_parse_pin_command_rejects_garbage() {
        for s in [
            "", "3", "=", "3=", "=1", "a=1", "3=b", "3:1", "3=1=0", " 3=1", "3 =1", "3= 1", "3=1x",
            "0x3=1", "99999999999=1",
        ] {
            assert_eq!(s.parse::<PinCommand>(), Err(Error::InvalidCommand), "{:?}", s);
        }
    }

    #[test]
    fn test_validate() {
        assert_eq!(
            PinCommand { bit: 7, value: 0 }.validate(),
            Ok(PinSetting { pin: 7, level: false })
        );
        assert_eq!(
            PinCommand { bit: 8, value: 0 }.validate(),
            Err(Error::BitOutOfRange(8))
        );
        assert_eq!(
            PinCommand { bit: -1, value: 1 }.validate(),
            Err(Error::BitOutOfRange(-1))
        );
        assert_eq!(
            PinCommand { bit: 3, value: 2 }.validate(),
            Err(Error::ValueOutOfRange(2))
        );
        // Bit is checked before value
        assert_eq!(
            PinCommand { bit: 9, value: 9 }.validate(),
            Err(Error::BitOutOfRange(9))
        );
    }

    #[test]
    fn test_gpio_byte_format() {
        assert_eq!(GpioByte(0x08).to_string(), "0x8 (0b1000)");
        assert_eq!(GpioByte(0xff).to_string(), "0xff (0b11111111)");
        assert_eq!(GpioByte(0x01).to_string(), "0x1 (0b1)");
        assert_eq!(GpioByte(0x00).to_string(), "0x0 (0b0)");
        assert_eq!(GpioByte(0xa0).pins(), GpioPins::GPIO7 | GpioPins::GPIO5);
    }

    #[test]
    fn test_pin_mask() {
        assert_eq!(GpioPins::pin(0), Some(GpioPins::GPIO0));
        assert_eq!(GpioPins::pin(7), Some(GpioPins::GPIO7));
        assert_eq!(GpioPins::pin(8), None);
        assert_eq!(GpioPins::pin(200), None);
    }

    #[test]
    fn test_open_runs_baseband_init() {
        let dev = Rtl2832::open(Regs::default()).unwrap();
        let bus = dev.into_inner();
        assert_eq!(bus.writes.len(), regs::BASEBAND_INIT.len());
        assert_eq!(bus.writes[0], (Block::Usb, regs::USB_SYSCTL, 0x09));
    }

    #[test]
    fn test_open_fails_on_test_write() {
        let bus = Regs {
            fail_addr: Some(regs::USB_SYSCTL),
            ..Default::default()
        };
        assert!(matches!(
            Rtl2832::open(bus),
            Err(Error::Transfer { addr: regs::USB_SYSCTL, .. })
        ));
    }

    #[test]
    fn test_set_output_preserves_other_pins() {
        let mut bus = Regs::default();
        bus.values.insert((Block::Sys, regs::GPD), 0xff);
        bus.values.insert((Block::Sys, regs::GPOE), 0x01);
        let mut dev = Rtl2832 { bus };

        dev.set_gpio_output(3).unwrap();

        let bus = dev.into_inner();
        assert_eq!(bus.values[&(Block::Sys, regs::GPD)], 0xf7);
        assert_eq!(bus.values[&(Block::Sys, regs::GPOE)], 0x09);
    }

    #[test]
    fn test_set_bit() {
        let mut bus = Regs::default();
        bus.values.insert((Block::Sys, regs::GPO), 0x81);
        let mut dev = Rtl2832 { bus };

        dev.set_gpio_bit(4, true).unwrap();
        dev.set_gpio_bit(0, false).unwrap();

        let bus = dev.into_inner();
        assert_eq!(bus.values[&(Block::Sys, regs::GPO)], 0x90);
    }

    #[test]
    fn test_invalid_pin_touches_nothing() {
        let mut dev = Rtl2832 {
            bus: Regs::default(),
        };
        assert_eq!(dev.set_gpio_output(8), Err(Error::BitOutOfRange(8)));
        assert_eq!(dev.set_gpio_bit(9, true), Err(Error::BitOutOfRange(9)));
        assert!(dev.into_inner().writes.is_empty());
    }

    #[test]
    fn test_gpio_byte_reads_gpi() {
        let mut bus = Regs::default();
        bus.values.insert((Block::Sys, regs::GPI), 0x42);
        bus.values.insert((Block::Sys, regs::GPO), 0xff);
        let mut dev = Rtl2832 { bus };
        assert_eq!(dev.gpio_byte(), Ok(GpioByte(0x42)));
    }
}
