use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use spot_core::{ErrorInfo, RunProvenance, SchemaVersion, SpotError};

use crate::hash::stable_hash_string;
use crate::json::to_canonical_json_bytes;

/// File name of the manifest written next to a run's tables.
pub const MANIFEST_FILE: &str = "run_manifest.json";

/// Reproducibility record of one command invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunManifest {
    /// Manifest schema.
    pub schema_version: SchemaVersion,
    /// Hash, command, timestamp and tool versions.
    pub provenance: RunProvenance,
    /// Resolved configuration the run used.
    pub config: Value,
    /// Tables written by the run, relative to the manifest directory.
    pub outputs: Vec<String>,
}

/// Builds a manifest for `config`, hashing its canonical JSON form.
pub fn build_manifest<T: Serialize>(command: &str, config: &T) -> Result<RunManifest, SpotError> {
    let config = serde_json::to_value(config)
        .map_err(|err| SpotError::Serde(ErrorInfo::new("json-encode", err.to_string())))?;
    let mut tool_versions = BTreeMap::new();
    tool_versions.insert("spot-exp".to_string(), env!("CARGO_PKG_VERSION").to_string());
    Ok(RunManifest {
        schema_version: SchemaVersion::default(),
        provenance: RunProvenance {
            config_hash: stable_hash_string(&config)?,
            command: command.to_string(),
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            tool_versions,
        },
        config,
        outputs: Vec::new(),
    })
}

/// Writes the manifest as canonical JSON into `dir`.
pub fn write_manifest(dir: &Path, manifest: &RunManifest) -> Result<PathBuf, SpotError> {
    let path = dir.join(MANIFEST_FILE);
    let bytes = to_canonical_json_bytes(manifest)?;
    fs::write(&path, bytes).map_err(|err| {
        SpotError::Io(
            ErrorInfo::new("manifest-write", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })?;
    info!("manifest {} written to {}", manifest.provenance.config_hash, path.display());
    Ok(path)
}
