//! CLI argument parsing

use clap::Parser;
use rtl_gpio_core::PinCommand;

/// Parse a `<bit>=<value>` pin command (ranges are checked later)
fn parse_pin_command(s: &str) -> Result<PinCommand, String> {
    s.parse::<PinCommand>().map_err(|e| e.to_string())
}

#[derive(Parser, Debug)]
#[command(name = "rtl_gpio")]
#[command(
    author,
    about = "rtl_gpio, a tool to read and write the GPIO bits of RTL2832 based DVB-T receivers",
    long_about = None
)]
pub struct Cli {
    /// Configure the specified bit (0..7) as an output and set its value (0..1)
    #[arg(
        short = 's',
        value_name = "BIT=VAL",
        value_parser = parse_pin_command,
        allow_hyphen_values = true
    )]
    pub set: Option<PinCommand>,

    /// Device index or serial number (exact, prefix or suffix)
    #[arg(short = 'd', value_name = "DEVICE_INDEX", default_value = "0")]
    pub device: String,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["rtl_gpio"]).unwrap();
        assert_eq!(cli.device, "0");
        assert!(cli.set.is_none());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_set_and_device() {
        let cli = Cli::try_parse_from(["rtl_gpio", "-s", "3=1", "-d", "00000042"]).unwrap();
        assert_eq!(cli.set, Some(PinCommand { bit: 3, value: 1 }));
        assert_eq!(cli.device, "00000042");
    }

    #[test]
    fn test_out_of_range_values_still_parse() {
        let cli = Cli::try_parse_from(["rtl_gpio", "-s", "9=1"]).unwrap();
        assert_eq!(cli.set, Some(PinCommand { bit: 9, value: 1 }));

        let cli = Cli::try_parse_from(["rtl_gpio", "-s", "-1=0"]).unwrap();
        assert_eq!(cli.set, Some(PinCommand { bit: -1, value: 0 }));
    }

    #[test]
    fn test_invalid_command_string() {
        for bad in ["3", "3:1", "a=b", "3=1x", "=1"] {
            let err = Cli::try_parse_from(["rtl_gpio", "-s", bad]).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::ValueValidation, "{}", bad);
            assert!(err.to_string().contains("Invalid command string."));
        }
    }

    #[test]
    fn test_usage_errors() {
        let err = Cli::try_parse_from(["rtl_gpio", "-h"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);

        let err = Cli::try_parse_from(["rtl_gpio", "-x"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);

        assert!(Cli::try_parse_from(["rtl_gpio", "extra"]).is_err());
        assert!(Cli::try_parse_from(["rtl_gpio", "-s"]).is_err());
    }
}
