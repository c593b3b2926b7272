//! `bioprint` command-line client.
//!
//! # Commands
//!
//! - `bioprint viability` - Score process parameters for cell viability
//! - `bioprint quality` - Score print settings for print quality
//! - `bioprint train --config <FILE>` - Train a viability model
//! - `bioprint summary` - Summarize a dataset
//!
//! Results are printed to stdout as JSON. Logs go to stderr and follow
//! `RUST_LOG` (default `info`).

mod dataset;
mod score;
mod train;

use std::path::PathBuf;

use anyhow::Result;
use bioprint_types::{PolymerType, ProcessParameters};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Bioprinting parameter scoring and viability model training
#[derive(Parser, Debug)]
#[command(name = "bioprint")]
#[command(about = "Score bioprinting parameters and train viability models", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Predict cell viability for process parameters
    Viability(ProcessArgs),

    /// Predict print quality for print settings
    Quality {
        /// Polymer blend (e.g. "PLGA-Collagen")
        #[arg(long)]
        polymer: PolymerType,

        /// Layer thickness in mm
        #[arg(long, default_value_t = 0.2)]
        layer_thickness: f64,

        /// Print speed in mm/s
        #[arg(long, default_value_t = 30.0)]
        print_speed: f64,

        /// Extrusion temperature in °C
        #[arg(long, default_value_t = 160.0)]
        temperature: f64,
    },

    /// Train a viability model and print its metrics
    Train {
        /// Model configuration (JSON)
        #[arg(long)]
        config: PathBuf,

        /// Training samples (CSV); the reference dataset when omitted
        #[arg(long)]
        dataset: Option<PathBuf>,

        /// Delay before simulated model types report, in milliseconds
        #[arg(long, default_value_t = 3000)]
        simulated_delay_ms: u64,
    },

    /// Print per-class counts and per-feature statistics
    Summary {
        /// Samples (CSV); the reference dataset when omitted
        #[arg(long)]
        dataset: Option<PathBuf>,
    },
}

/// Process parameters, defaulting to the explorer's reset state.
#[derive(Args, Debug, Clone, Copy)]
struct ProcessArgs {
    /// Cell density in 10⁶ cells/mL
    #[arg(long, default_value_t = 8.0)]
    cell_density: f64,

    /// Nozzle temperature in °C
    #[arg(long, default_value_t = 190.0)]
    temperature: f64,

    /// Print speed in mm/s
    #[arg(long, default_value_t = 30.0)]
    print_speed: f64,

    /// Layer height in mm
    #[arg(long, default_value_t = 0.3)]
    layer_height: f64,

    /// Bioink viscosity in Pa·s
    #[arg(long, default_value_t = 3.0)]
    viscosity: f64,

    /// Crosslink time in seconds
    #[arg(long, default_value_t = 45.0)]
    crosslink_time: f64,
}

impl From<ProcessArgs> for ProcessParameters {
    fn from(args: ProcessArgs) -> Self {
        Self::new(
            args.cell_density,
            args.temperature,
            args.print_speed,
            args.layer_height,
            args.viscosity,
            args.crosslink_time,
        )
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Viability(args) => score::viability(args.into()),
        Commands::Quality {
            polymer,
            layer_thickness,
            print_speed,
            temperature,
        } => score::quality(polymer, layer_thickness, print_speed, temperature).await,
        Commands::Train {
            config,
            dataset,
            simulated_delay_ms,
        } => train::run(&config, dataset.as_deref(), simulated_delay_ms).await,
        Commands::Summary { dataset } => dataset::summary(dataset.as_deref()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn viability_defaults_are_explorer_defaults() {
        let cli = Cli::try_parse_from(["bioprint", "viability"]).unwrap();
        let Commands::Viability(args) = cli.command else {
            panic!("expected viability");
        };
        assert_eq!(ProcessParameters::from(args), ProcessParameters::default());
    }

    #[test]
    fn quality_parses_polymer() {
        let cli = Cli::try_parse_from([
            "bioprint",
            "quality",
            "--polymer",
            "PHA-Chitosan",
            "--temperature",
            "150",
        ])
        .unwrap();
        let Commands::Quality {
            polymer,
            temperature,
            ..
        } = cli.command
        else {
            panic!("expected quality");
        };
        assert_eq!(polymer, PolymerType::PhaChitosan);
        assert!((temperature - 150.0).abs() < f64::EPSILON);
    }

    #[test]
    fn quality_rejects_unknown_polymer() {
        assert!(Cli::try_parse_from(["bioprint", "quality", "--polymer", "Nylon"]).is_err());
    }

    #[test]
    fn train_delay_defaults_to_three_seconds() {
        let cli = Cli::try_parse_from(["bioprint", "train", "--config", "svm.json"]).unwrap();
        let Commands::Train {
            simulated_delay_ms,
            dataset,
            ..
        } = cli.command
        else {
            panic!("expected train");
        };
        assert_eq!(simulated_delay_ms, 3000);
        assert!(dataset.is_none());
    }
}
