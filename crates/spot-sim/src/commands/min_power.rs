use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use log::info;
use spot_core::MinPowerConfig;
use spot_exp::{min_power_table, write_table};

use super::{boxed, data_dir, persist_manifest, resolve_config};

pub const TABLE_FILE: &str = "MIN_POWER_AD_RATIOS.txt";

#[derive(Args, Debug)]
pub struct MinPowerArgs {
    /// YAML job description; the reference job when omitted.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Root output directory.
    #[arg(long, default_value = ".")]
    pub out: PathBuf,
}

pub fn run(args: &MinPowerArgs) -> Result<(), Box<dyn Error>> {
    let config: MinPowerConfig = resolve_config(args.config.as_deref())?;
    let table = min_power_table(&config).map_err(boxed)?;
    if !table.failures.is_empty() {
        info!("{} cells recorded as NaN", table.failures.len());
    }

    let dir = data_dir(&args.out, &config.jobname)?;
    let path = dir.join(TABLE_FILE);
    write_table(&path, Some(&table.header()), &table.rows()).map_err(boxed)?;
    persist_manifest(&dir, "min-power", &config, &[path.clone()])?;
    println!("{}", path.display());
    Ok(())
}
