use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use log::info;
use spot_core::RadiusSweepConfig;
use spot_exp::{radius_table, write_table};

use super::{boxed, data_dir, persist_manifest, resolve_config};

pub const TABLE_FILE: &str = "RAD_POW_ANALYTICAL.txt";

#[derive(Args, Debug)]
pub struct RadiusArgs {
    /// YAML job description; the reference job when omitted.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Root output directory.
    #[arg(long, default_value = ".")]
    pub out: PathBuf,
}

pub fn run(args: &RadiusArgs) -> Result<(), Box<dyn Error>> {
    let config: RadiusSweepConfig = resolve_config(args.config.as_deref())?;
    let table = radius_table(&config).map_err(boxed)?;
    if !table.failures.is_empty() {
        info!("{} cells recorded as NaN", table.failures.len());
    }

    let dir = data_dir(&args.out, &config.jobname)?;
    let path = dir.join(TABLE_FILE);
    write_table(&path, Some(&table.header()), &table.rows()).map_err(boxed)?;
    persist_manifest(&dir, "radius", &config, &[path.clone()])?;
    println!("{}", path.display());
    Ok(())
}
