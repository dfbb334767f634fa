//! RTL2832 register map
//!
//! Only the registers needed to bring up the baseband and drive the GPIO
//! pins are listed here. Addresses are the ones used on the vendor control
//! endpoint: a block selector plus a 16-bit address inside that block.

/// Register block selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Block {
    /// Demodulator
    Demod = 0,
    /// USB controller
    Usb = 1,
    /// System control (GPIO lives here)
    Sys = 2,
    /// Tuner
    Tuner = 3,
    /// ROM
    Rom = 4,
    /// IR receiver
    Ir = 5,
    /// I2C master
    Iic = 6,
}

impl Block {
    /// Block number as carried in the high byte of `wIndex`
    pub const fn id(self) -> u8 {
        self as u8
    }
}

/// Register access width
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    /// 8-bit register
    Byte,
    /// 16-bit register
    Word,
}

impl Width {
    /// Number of bytes transferred
    pub const fn bytes(self) -> usize {
        match self {
            Width::Byte => 1,
            Width::Word => 2,
        }
    }

    /// Largest value that fits
    pub const fn mask(self) -> u16 {
        match self {
            Width::Byte => 0x00ff,
            Width::Word => 0xffff,
        }
    }
}

// USB block
/// USB system control
pub const USB_SYSCTL: u16 = 0x2000;
/// Endpoint A control
pub const USB_EPA_CTL: u16 = 0x2148;
/// Endpoint A max packet size
pub const USB_EPA_MAXPKT: u16 = 0x2158;

// System block
/// Demodulator control
pub const DEMOD_CTL: u16 = 0x3000;
/// GPIO output latch
pub const GPO: u16 = 0x3001;
/// GPIO input levels
pub const GPI: u16 = 0x3002;
/// GPIO output enable
pub const GPOE: u16 = 0x3003;
/// GPIO direction (cleared bit = output)
pub const GPD: u16 = 0x3004;
/// Demodulator control 1
pub const DEMOD_CTL_1: u16 = 0x300b;

/// Writes performed at open time to power up the baseband.
///
/// The first entry doubles as the test write that tells whether the
/// device answers vendor requests at all.
pub const BASEBAND_INIT: &[(Block, u16, u16, Width)] = &[
    (Block::Usb, USB_SYSCTL, 0x09, Width::Byte),
    (Block::Usb, USB_EPA_MAXPKT, 0x0002, Width::Word),
    (Block::Usb, USB_EPA_CTL, 0x1002, Width::Word),
    (Block::Sys, DEMOD_CTL_1, 0x22, Width::Byte),
    (Block::Sys, DEMOD_CTL, 0xe8, Width::Byte),
];

/// Returns true for the system-block registers that hold GPIO state
pub fn is_gpio_register(block: Block, addr: u16) -> bool {
    block == Block::Sys && matches!(addr, GPO | GPI | GPOE | GPD)
}
