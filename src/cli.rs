use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// BAYSPAR TEX86 calibration.
#[derive(Parser)]
#[command(
    name = "bayspar",
    version,
    about = "Bayesian spatially-varying TEX86 calibration"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Predict sea temperature from TEX86 at a site.
    Seatemp(SeatempArgs),
    /// Predict sea temperature from TEX86 using analog locations.
    SeatempAnalog(SeatempAnalogArgs),
    /// Predict TEX86 from sea temperature at a site.
    Tex(TexArgs),
    /// Predict TEX86 from sea temperature using analog locations.
    TexAnalog(TexAnalogArgs),
}

/// Arguments shared by every subcommand.
#[derive(clap::Args)]
pub struct CommonArgs {
    /// Path to TOML configuration file (defaults to ./bayspar.toml if present).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Input series: one value per line, or comma/whitespace separated.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Write the JSON summary here instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Calibration target (`sst` or `subt`); overrides config.
    #[arg(short, long)]
    pub temptype: Option<String>,

    /// Calibration dataset (JSON) for the chosen temptype; overrides config.
    #[arg(short, long)]
    pub dataset: Option<PathBuf>,

    /// Override global RNG seed from config.
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Percentiles to report, comma separated (e.g. 5,50,95).
    #[arg(short, long, value_delimiter = ',')]
    pub percentiles: Option<Vec<f64>>,

    /// Include the full ensemble in the output.
    #[arg(long)]
    pub include_ensemble: bool,
}

/// Arguments for the `seatemp` subcommand.
#[derive(clap::Args)]
pub struct SeatempArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Site latitude in degrees.
    #[arg(long, allow_negative_numbers = true)]
    pub lat: f64,

    /// Site longitude in degrees, [-180, 360].
    #[arg(long, allow_negative_numbers = true)]
    pub lon: f64,

    /// Prior mean; inferred from nearby modern observations if omitted.
    #[arg(long, allow_negative_numbers = true)]
    pub prior_mean: Option<f64>,

    /// Prior standard deviation.
    #[arg(long, default_value_t = 6.0)]
    pub prior_std: f64,

    /// Number of draws to use from the site's cell.
    #[arg(long)]
    pub ensemble_size: Option<usize>,
}

/// Arguments for the `seatemp-analog` subcommand.
#[derive(clap::Args)]
pub struct SeatempAnalogArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Prior mean.
    #[arg(long, allow_negative_numbers = true)]
    pub prior_mean: f64,

    /// Prior standard deviation.
    #[arg(long, default_value_t = 6.0)]
    pub prior_std: f64,

    /// Search tolerance in TEX86 units.
    #[arg(long)]
    pub tolerance: Option<f64>,

    /// Exact number of draws in the analog pool.
    #[arg(long)]
    pub pool_size: Option<usize>,
}

/// Arguments for the `tex` subcommand.
#[derive(clap::Args)]
pub struct TexArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Site latitude in degrees.
    #[arg(long, allow_negative_numbers = true)]
    pub lat: f64,

    /// Site longitude in degrees, [-180, 360].
    #[arg(long, allow_negative_numbers = true)]
    pub lon: f64,

    /// Number of draws to use from the site's cell.
    #[arg(long)]
    pub ensemble_size: Option<usize>,
}

/// Arguments for the `tex-analog` subcommand.
#[derive(clap::Args)]
pub struct TexAnalogArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Search tolerance in degrees.
    #[arg(long)]
    pub tolerance: Option<f64>,

    /// Exact number of draws in the analog pool.
    #[arg(long)]
    pub pool_size: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_is_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn seatemp_negative_coordinates() {
        let cli = Cli::try_parse_from([
            "bayspar", "seatemp", "-i", "tex.txt", "--lat", "-64.85", "--lon", "-64.2",
        ])
        .unwrap();
        let Command::Seatemp(args) = cli.command else {
            panic!("expected seatemp");
        };
        assert_eq!(args.lat, -64.85);
        assert_eq!(args.lon, -64.2);
        assert_eq!(args.prior_std, 6.0);
        assert!(args.prior_mean.is_none());
    }

    #[test]
    fn percentile_list_and_verbosity() {
        let cli = Cli::try_parse_from([
            "bayspar",
            "-vv",
            "tex-analog",
            "-i",
            "t.txt",
            "--tolerance",
            "5",
            "--percentiles",
            "2.5,50,97.5",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        let Command::TexAnalog(args) = cli.command else {
            panic!("expected tex-analog");
        };
        assert_eq!(args.common.percentiles, Some(vec![2.5, 50.0, 97.5]));
        assert_eq!(args.tolerance, Some(5.0));
    }

    #[test]
    fn analog_requires_prior_mean() {
        assert!(Cli::try_parse_from(["bayspar", "seatemp-analog", "-i", "x"]).is_err());
    }
}
