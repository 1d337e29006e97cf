use std::error::Error;

use clap::{Parser, Subcommand};
use commands::{
    crossing::{self, CrossingArgs},
    fem::{self, FemArgs},
    min_power::{self, MinPowerArgs},
    radius::{self, RadiusArgs},
    version::{self, VersionArgs},
};
use log::LevelFilter;

mod commands;

#[derive(Parser, Debug)]
#[command(name = "spot-sim", about = "Thermal spot solver for laser-heated VO2 coatings")]
struct Cli {
    /// Log progress of every solve.
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Minimum power against rho for several a/d ratios.
    MinPower(MinPowerArgs),
    /// Power against normalized radius for several rho values.
    Radius(RadiusArgs),
    /// Finite-element comparison batch through an external simulator.
    Fem(FemArgs),
    /// Surface crossing radius of one field export.
    Crossing(CrossingArgs),
    /// Print the tool version.
    Version(VersionArgs),
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let mut logger = env_logger::Builder::from_default_env();
    if cli.verbose {
        logger.filter_level(LevelFilter::Debug);
    } else if std::env::var_os("RUST_LOG").is_none() {
        logger.filter_level(LevelFilter::Info);
    }
    logger.init();

    match cli.command {
        Command::MinPower(args) => min_power::run(&args),
        Command::Radius(args) => radius::run(&args),
        Command::Fem(args) => fem::run(&args),
        Command::Crossing(args) => crossing::run(&args),
        Command::Version(args) => version::run(&args),
    }
}
