//! rtl_gpio - Read and write the GPIO bits of RTL2832 based receivers
//!
//! Opens one dongle, optionally configures a single GPIO pin as an output
//! and drives it, then reports the whole GPIO byte on stderr.
//!
//! Every failure is reported with a one-line message and exit status 1.

mod cli;
mod commands;

use std::io::{self, Write};

use clap::Parser;
use cli::Cli;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // -h, unknown flags and malformed values all end here
            eprint!("{}", e.render());
            std::process::exit(1);
        }
    };

    // Set log level based on verbosity, RUST_LOG still wins
    let default_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let mut stderr = io::stderr().lock();
    if let Err(e) = run(&cli, &mut stderr) {
        let _ = writeln!(stderr, "{}", e);
        std::process::exit(1);
    }
}

#[cfg(feature = "usb")]
fn run(cli: &Cli, out: &mut impl Write) -> Result<(), Box<dyn std::error::Error>> {
    let driver = rtl_gpio_usb::UsbDriver::new();
    commands::run_gpio(&driver, &cli.device, cli.set, out)?;
    Ok(())
}

#[cfg(not(feature = "usb"))]
fn run(_cli: &Cli, _out: &mut impl Write) -> Result<(), Box<dyn std::error::Error>> {
    Err("rtl_gpio was built without a device backend (enable the `usb` feature)".into())
}
