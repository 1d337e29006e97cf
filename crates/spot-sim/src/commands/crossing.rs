use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use spot_fem::crossing_from_export;

#[derive(Args, Debug)]
pub struct CrossingArgs {
    /// Field export with an 8-line preamble and `radius height temperature` rows.
    #[arg(long)]
    pub file: PathBuf,
    /// Threshold temperature in kelvin.
    #[arg(long)]
    pub t0: f64,
    /// Absolute tolerance selecting the free-surface rows.
    #[arg(long, default_value_t = 1e-9)]
    pub y_tolerance: f64,
}

/// Prints the crossing radius, or `NaN` when the field never crosses `t0`
/// or the export is missing or malformed.
pub fn run(args: &CrossingArgs) -> Result<(), Box<dyn Error>> {
    let radius = crossing_from_export(&args.file, args.t0, args.y_tolerance);
    println!("{}", radius.unwrap_or(f64::NAN));
    Ok(())
}
