use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pumpwise", version, about = "Irrigation pump decision engine")]
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
    /// Decide whether the pump should run (default)
    Check(CheckArgs),
    /// List known crops and their thresholds
    Crops,
    /// List the idle rules in evaluation order
    Rules,
}

#[derive(Args, Debug, Default, Clone)]
pub struct CheckArgs {
    /// City name for the weather lookup
    #[arg(short, long)]
    pub location: Option<String>,

    /// Crop name (unknown crops use the default profile)
    #[arg(long)]
    pub crop: Option<String>,

    /// Soil moisture reading (%)
    #[arg(long)]
    pub soil: Option<f64>,

    /// Tank level reading (%)
    #[arg(long)]
    pub tank: Option<f64>,

    /// Field area (m²)
    #[arg(long, allow_negative_numbers = true)]
    pub area: Option<f64>,

    /// Pump flow rate (L/min)
    #[arg(long, allow_negative_numbers = true)]
    pub flow: Option<f64>,

    /// Tank capacity (L)
    #[arg(long, allow_negative_numbers = true)]
    pub capacity: Option<f64>,

    /// Last-hour rainfall (mm); skips the weather service
    #[arg(long)]
    pub rain: Option<f64>,

    /// Temperature (°C) reported with --rain
    #[arg(long, requires = "rain", allow_negative_numbers = true)]
    pub temp: Option<f64>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_arguments_parse() {
        let cli = Cli::try_parse_from([
            "pumpwise", "check", "--crop", "Wheat", "--soil", "20", "--rain", "0", "--json",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Check(args)) => {
                assert_eq!(args.crop.as_deref(), Some("Wheat"));
                assert_eq!(args.soil, Some(20.0));
                assert_eq!(args.rain, Some(0.0));
                assert!(args.json);
            }
            _ => panic!("expected check subcommand"),
        }
    }

    #[test]
    fn temp_requires_rain() {
        assert!(Cli::try_parse_from(["pumpwise", "check", "--temp", "30"]).is_err());
    }

    #[test]
    fn no_subcommand_is_allowed() {
        let cli = Cli::try_parse_from(["pumpwise", "-vv"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.verbose, 2);
    }
}
