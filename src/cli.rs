use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "humidcheck",
    version,
    about = "Absolute humidity checker with location-based weather lookup"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to config.yaml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute absolute humidity once and print it
    Calc {
        /// Temperature in °C
        #[arg(allow_negative_numbers = true)]
        temperature: String,
        /// Relative humidity in percent
        #[arg(allow_negative_numbers = true)]
        humidity: String,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Look up the weather for the current location and compute from it
    Locate {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Run interactive setup
    Init,
    /// Validate config and test connections
    Check,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_calc_with_negative_temperature() {
        let cli = Cli::try_parse_from(["humidcheck", "calc", "-5", "40", "--json"]).unwrap();
        match cli.command {
            Some(Commands::Calc {
                temperature,
                humidity,
                json,
            }) => {
                assert_eq!(temperature, "-5");
                assert_eq!(humidity, "40");
                assert!(json);
            }
            _ => panic!("expected calc"),
        }
    }

    #[test]
    fn no_command_means_tui() {
        let cli = Cli::try_parse_from(["humidcheck", "-vv"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
