//! rtl-gpio-dummy - In-memory RTL2832 emulator for testing
//!
//! This crate provides a dummy backend that emulates the RTL2832 register
//! file in memory. It records every register access so tests can check
//! exactly which registers were touched, and it can be told to fail opens
//! or individual register accesses.
//!
//! The GPIO block behaves like the real chip: `GPI` reads back the output
//! latch for pins configured as outputs and the externally applied level
//! for the others.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use rtl_gpio_core::regs::{self, Block, Width};
use rtl_gpio_core::{DeviceDriver, DeviceInfo, Error, RegisterBus, Result};

/// Configuration for one emulated dongle
#[derive(Debug, Clone)]
pub struct DummyConfig {
    /// Identity reported by enumeration
    pub info: DeviceInfo,
    /// Levels applied externally to pins that are not outputs
    pub input_levels: u8,
    /// Register whose every access fails
    pub failing_register: Option<(Block, u16)>,
}

impl Default for DummyConfig {
    fn default() -> Self {
        Self {
            info: DeviceInfo::new(
                "Generic RTL2832U OEM",
                "Realtek",
                "RTL2838UHIDIR",
                "00000001",
            ),
            input_levels: 0,
            failing_register: None,
        }
    }
}

impl DummyConfig {
    /// Set the serial number
    pub fn with_serial(mut self, serial: impl Into<String>) -> Self {
        self.info.serial = serial.into();
        self
    }

    /// Set the externally applied pin levels
    pub fn with_input_levels(mut self, levels: u8) -> Self {
        self.input_levels = levels;
        self
    }

    /// Make every access to one register fail
    pub fn with_failing_register(mut self, block: Block, addr: u16) -> Self {
        self.failing_register = Some((block, addr));
        self
    }
}

/// One recorded register access
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Register read
    Read {
        /// Register block
        block: Block,
        /// Register address
        addr: u16,
    },
    /// Register write
    Write {
        /// Register block
        block: Block,
        /// Register address
        addr: u16,
        /// Value written
        value: u16,
    },
}

impl Access {
    /// Block and address of the access
    pub fn register(&self) -> (Block, u16) {
        match *self {
            Access::Read { block, addr } | Access::Write { block, addr, .. } => (block, addr),
        }
    }

    /// Whether the access changed a GPIO register
    pub fn is_gpio_write(&self) -> bool {
        match *self {
            Access::Write { block, addr, .. } => regs::is_gpio_register(block, addr),
            Access::Read { .. } => false,
        }
    }
}

/// State of one emulated chip
#[derive(Debug)]
struct DummyChip {
    config: DummyConfig,
    registers: HashMap<(Block, u16), u16>,
    accesses: Vec<Access>,
    opens: usize,
}

impl DummyChip {
    fn new(config: DummyConfig) -> Self {
        Self {
            config,
            registers: HashMap::new(),
            accesses: Vec::new(),
            opens: 0,
        }
    }

    fn reg(&self, block: Block, addr: u16) -> u16 {
        self.registers.get(&(block, addr)).copied().unwrap_or(0)
    }

    fn check_fault(&self, block: Block, addr: u16) -> Result<()> {
        if self.config.failing_register == Some((block, addr)) {
            return Err(Error::Transfer {
                block,
                addr,
                reason: "emulated pipe error".into(),
            });
        }
        Ok(())
    }

    fn read(&mut self, block: Block, addr: u16, width: Width) -> Result<u16> {
        self.check_fault(block, addr)?;
        self.accesses.push(Access::Read { block, addr });

        let value = if block == Block::Sys && addr == regs::GPI {
            let outputs = (self.reg(Block::Sys, regs::GPOE) & !self.reg(Block::Sys, regs::GPD)) as u8;
            let latch = self.reg(Block::Sys, regs::GPO) as u8;
            ((latch & outputs) | (self.config.input_levels & !outputs)) as u16
        } else {
            self.reg(block, addr)
        };

        log::trace!("dummy: read {:?}[0x{:04x}] = 0x{:04x}", block, addr, value);
        Ok(value & width.mask())
    }

    fn write(&mut self, block: Block, addr: u16, value: u16, width: Width) -> Result<()> {
        self.check_fault(block, addr)?;
        let value = value & width.mask();
        self.accesses.push(Access::Write { block, addr, value });
        self.registers.insert((block, addr), value);

        log::trace!("dummy: write {:?}[0x{:04x}] = 0x{:04x}", block, addr, value);
        Ok(())
    }
}

/// Shared view of one emulated dongle
///
/// Stays valid after the bus opened from it has been dropped, so tests can
/// inspect what a command did.
#[derive(Debug, Clone)]
pub struct DummyDevice {
    chip: Rc<RefCell<DummyChip>>,
}

impl DummyDevice {
    fn new(config: DummyConfig) -> Self {
        Self {
            chip: Rc::new(RefCell::new(DummyChip::new(config))),
        }
    }

    /// Current value of a register
    pub fn register(&self, block: Block, addr: u16) -> u16 {
        self.chip.borrow().reg(block, addr)
    }

    /// Preset a register
    pub fn set_register(&self, block: Block, addr: u16, value: u16) {
        self.chip.borrow_mut().registers.insert((block, addr), value);
    }

    /// All accesses so far, oldest first
    pub fn accesses(&self) -> Vec<Access> {
        self.chip.borrow().accesses.clone()
    }

    /// Writes that changed GPIO registers
    pub fn gpio_writes(&self) -> Vec<Access> {
        self.accesses()
            .into_iter()
            .filter(Access::is_gpio_write)
            .collect()
    }

    /// How many times the device has been opened
    pub fn open_count(&self) -> usize {
        self.chip.borrow().opens
    }
}

/// Register bus of an opened emulated dongle
#[derive(Debug)]
pub struct DummyBus {
    device: DummyDevice,
}

impl RegisterBus for DummyBus {
    fn read_reg(&mut self, block: Block, addr: u16, width: Width) -> Result<u16> {
        self.device.chip.borrow_mut().read(block, addr, width)
    }

    fn write_reg(&mut self, block: Block, addr: u16, value: u16, width: Width) -> Result<()> {
        self.device.chip.borrow_mut().write(block, addr, value, width)
    }
}

/// Backend handing out emulated dongles
#[derive(Debug, Default)]
pub struct DummyDriver {
    devices: Vec<DummyDevice>,
    fail_open: bool,
}

impl DummyDriver {
    /// Create a driver with no devices attached
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a driver with one default device attached
    pub fn with_default_device() -> Self {
        Self::new().with_device(DummyConfig::default())
    }

    /// Attach another device
    pub fn with_device(mut self, config: DummyConfig) -> Self {
        self.devices.push(DummyDevice::new(config));
        self
    }

    /// Make every open fail
    pub fn failing_open(mut self) -> Self {
        self.fail_open = true;
        self
    }

    /// Inspect the device at `index`
    pub fn device(&self, index: usize) -> Option<DummyDevice> {
        self.devices.get(index).cloned()
    }
}

impl DeviceDriver for DummyDriver {
    type Bus = DummyBus;

    fn devices(&self) -> Result<Vec<DeviceInfo>> {
        Ok(self
            .devices
            .iter()
            .map(|d| d.chip.borrow().config.info.clone())
            .collect())
    }

    fn open(&self, index: usize) -> Result<DummyBus> {
        let device = self.device(index).ok_or(Error::DeviceNotFound(index))?;
        if self.fail_open {
            return Err(Error::OpenFailed("emulated open failure".into()));
        }
        device.chip.borrow_mut().opens += 1;
        log::debug!("dummy: opened device {}", index);
        Ok(DummyBus { device })
    }
}
