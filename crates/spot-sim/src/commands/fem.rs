use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use spot_core::FemConfig;
use spot_fem::{batch_rho_analysis, CommandSimulator};

use super::{boxed, data_dir, persist_manifest, resolve_config};

#[derive(Args, Debug)]
pub struct FemArgs {
    /// YAML job description; the reference job when omitted.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Root output directory.
    #[arg(long, default_value = ".")]
    pub out: PathBuf,
    /// Executable driving the finite-element model.
    #[arg(long)]
    pub program: PathBuf,
    /// Leading argument passed to the driver before every step.
    #[arg(long = "arg", value_name = "ARG", allow_hyphen_values = true)]
    pub args: Vec<String>,
}

pub fn run(args: &FemArgs) -> Result<(), Box<dyn Error>> {
    let config: FemConfig = resolve_config(args.config.as_deref())?;
    config.validate().map_err(boxed)?;
    let dir = data_dir(&args.out, &config.jobname)?;

    let mut simulator =
        CommandSimulator::connect(&args.program, &args.args, &config.model_path, config.cores)
            .map_err(boxed)?;
    let analyses = batch_rho_analysis(&mut simulator, &config, &dir).map_err(boxed)?;

    let mut outputs = Vec::new();
    for analysis in &analyses {
        outputs.extend(analysis.exports.iter().cloned());
        outputs.push(analysis.table.clone());
        println!("{}", analysis.table.display());
    }
    persist_manifest(&dir, "fem", &config, &outputs)?;
    Ok(())
}
