//! RTL2832U USB protocol constants and request encoding

use std::time::Duration;

use rtl_gpio_core::regs::{Block, Width};

/// Interface carrying the vendor requests
pub const RTL_INTERFACE: u8 = 0;

/// `bRequest` for all register accesses
pub const RTL_REQUEST: u8 = 0;

/// Flag in the low byte of `wIndex` selecting a write
pub const RTL_WRITE_FLAG: u16 = 0x10;

/// Timeout for a single control transfer
pub const CTRL_TIMEOUT: Duration = Duration::from_millis(300);

/// A dongle model known to carry an RTL2832U
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnownDevice {
    /// USB vendor ID
    pub vid: u16,
    /// USB product ID
    pub pid: u16,
    /// Marketing name
    pub name: &'static str,
}

const fn dev(vid: u16, pid: u16, name: &'static str) -> KnownDevice {
    KnownDevice { vid, pid, name }
}

/// All VID/PID pairs recognised as RTL2832U dongles
pub const KNOWN_DEVICES: &[KnownDevice] = &[
    dev(0x0bda, 0x2832, "Generic RTL2832U"),
    dev(0x0bda, 0x2838, "Generic RTL2832U OEM"),
    dev(0x0413, 0x6680, "DigitalNow Quad DVB-T PCI-E card"),
    dev(0x0413, 0x6f0f, "Leadtek WinFast DTV Dongle mini D"),
    dev(0x0458, 0x707f, "Genius TVGo DVB-T03 USB dongle (Ver. B)"),
    dev(0x0ccd, 0x00a9, "Terratec Cinergy T Stick Black (rev 1)"),
    dev(0x0ccd, 0x00b3, "Terratec NOXON DAB/DAB+ USB dongle (rev 1)"),
    dev(0x0ccd, 0x00b4, "Terratec Deutschlandradio DAB Stick"),
    dev(0x0ccd, 0x00b5, "Terratec NOXON DAB Stick - Radio Energy"),
    dev(0x0ccd, 0x00b7, "Terratec Media Broadcast DAB Stick"),
    dev(0x0ccd, 0x00b8, "Terratec BR DAB Stick"),
    dev(0x0ccd, 0x00b9, "Terratec WDR DAB Stick"),
    dev(0x0ccd, 0x00c0, "Terratec MuellerVerlag DAB Stick"),
    dev(0x0ccd, 0x00c6, "Terratec Fraunhofer DAB Stick"),
    dev(0x0ccd, 0x00d3, "Terratec Cinergy T Stick RC (Rev.3)"),
    dev(0x0ccd, 0x00d7, "Terratec T Stick PLUS"),
    dev(0x0ccd, 0x00e0, "Terratec NOXON DAB/DAB+ USB dongle (rev 2)"),
    dev(0x1554, 0x5020, "PixelView PV-DT235U(RN)"),
    dev(0x15f4, 0x0131, "Astrometa DVB-T/DVB-T2"),
    dev(0x15f4, 0x0133, "HanfTek DAB+FM+DVB-T"),
    dev(0x185b, 0x0620, "Compro Videomate U620F"),
    dev(0x185b, 0x0650, "Compro Videomate U650F"),
    dev(0x185b, 0x0680, "Compro Videomate U680F"),
    dev(0x1b80, 0xd393, "GIGABYTE GT-U7300"),
    dev(0x1b80, 0xd394, "DIKOM USB-DVBT HD"),
    dev(0x1b80, 0xd395, "Peak 102569AGPK"),
    dev(0x1b80, 0xd397, "KWorld KW-UB450-T USB DVB-T Pico TV"),
    dev(0x1b80, 0xd398, "Zaapa ZT-MINDVBZP"),
    dev(0x1b80, 0xd39d, "SVEON STV20 DVB-T USB & FM"),
    dev(0x1b80, 0xd3a4, "Twintech UT-40"),
    dev(0x1b80, 0xd3a8, "ASUS U3100MINI_PLUS_V2"),
    dev(0x1b80, 0xd3af, "SVEON STV27 DVB-T USB & FM"),
    dev(0x1b80, 0xd3b0, "SVEON STV21 DVB-T USB & FM"),
    dev(0x1d19, 0x1101, "Dexatek DK DVB-T Dongle (Logilink VG0002A)"),
    dev(0x1d19, 0x1102, "Dexatek DK DVB-T Dongle (MSI DigiVox mini II V3.0)"),
    dev(0x1d19, 0x1103, "Dexatek Technology Ltd. DK 5217 DVB-T Dongle"),
    dev(0x1d19, 0x1104, "MSI DigiVox Micro HD"),
    dev(0x1f4d, 0xa803, "Sweex DVB-T USB"),
    dev(0x1f4d, 0xb803, "GTek T803"),
    dev(0x1f4d, 0xc803, "Lifeview LV5TDeluxe"),
    dev(0x1f4d, 0xd286, "MyGica TD312"),
    dev(0x1f4d, 0xd803, "PROlectrix DV107669"),
];

/// Look up a VID/PID pair in [`KNOWN_DEVICES`]
pub fn known_device(vid: u16, pid: u16) -> Option<&'static KnownDevice> {
    KNOWN_DEVICES.iter().find(|d| d.vid == vid && d.pid == pid)
}

/// `wIndex` for a register read
pub fn read_index(block: Block) -> u16 {
    (block.id() as u16) << 8
}

/// `wIndex` for a register write
pub fn write_index(block: Block) -> u16 {
    read_index(block) | RTL_WRITE_FLAG
}

/// Payload of a register write (big-endian, `width` bytes)
pub fn encode_value(value: u16, width: Width) -> Vec<u8> {
    match width {
        Width::Byte => vec![(value & 0xff) as u8],
        Width::Word => value.to_be_bytes().to_vec(),
    }
}

/// Value of a register read (little-endian, missing bytes are zero)
pub fn decode_value(data: &[u8]) -> u16 {
    let lo = data.first().copied().unwrap_or(0) as u16;
    let hi = data.get(1).copied().unwrap_or(0) as u16;
    (hi << 8) | lo
}
