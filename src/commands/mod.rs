//! CLI command implementations
//!
//! Commands are generic over [`rtl_gpio_core::DeviceDriver`] so they run the
//! same way against real USB dongles and the in-memory emulator.

mod gpio;

pub use gpio::{run_gpio, GpioCommandError};
