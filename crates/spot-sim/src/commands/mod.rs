pub mod crossing;
pub mod fem;
pub mod min_power;
pub mod radius;
pub mod version;

use std::error::Error;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use spot_core::{load_config, SpotError};
use spot_exp::{build_manifest, ensure_dir, write_manifest, RunManifest};

/// Reads `path` when given, otherwise falls back to the built-in job.
pub fn resolve_config<T>(path: Option<&Path>) -> Result<T, Box<dyn Error>>
where
    T: DeserializeOwned + Default,
{
    match path {
        Some(path) => Ok(load_config(path).map_err(boxed)?),
        None => Ok(T::default()),
    }
}

/// `<out>/<jobname>/Data`, created when missing.
pub fn data_dir(out: &Path, jobname: &str) -> Result<PathBuf, Box<dyn Error>> {
    Ok(ensure_dir(out.join(jobname).join("Data")).map_err(boxed)?)
}

/// Writes `run_manifest.json` into `dir`, listing `outputs` relative to it.
pub fn persist_manifest<T: Serialize>(
    dir: &Path,
    command: &str,
    config: &T,
    outputs: &[PathBuf],
) -> Result<RunManifest, Box<dyn Error>> {
    let mut manifest = build_manifest(command, config).map_err(boxed)?;
    manifest.outputs = outputs
        .iter()
        .map(|path| {
            path.strip_prefix(dir)
                .unwrap_or(path)
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect();
    write_manifest(dir, &manifest).map_err(boxed)?;
    Ok(manifest)
}

pub fn boxed(err: SpotError) -> Box<dyn Error> {
    Box::new(err)
}
