use std::fs::{self, File};
use std::path::{Path, PathBuf};

use csv::{QuoteStyle, WriterBuilder};
use log::info;
use spot_core::{ErrorInfo, SpotError};

use crate::sweep::format_parameter;

fn io_error(code: &str, path: &Path, err: impl ToString) -> SpotError {
    SpotError::Io(
        ErrorInfo::new(code, err.to_string()).with_context("path", path.display().to_string()),
    )
}

/// Creates `path` and its parents if needed and returns it.
pub fn ensure_dir(path: impl AsRef<Path>) -> Result<PathBuf, SpotError> {
    let path = path.as_ref();
    fs::create_dir_all(path).map_err(|err| io_error("create-dir", path, err))?;
    Ok(path.to_path_buf())
}

/// Standard artefact name: `{prefix}_RHO{rho}_P{power}.{suffix}`, or
/// `{prefix}_RHO{rho}.{suffix}` without a power.
pub fn artefact_name(prefix: &str, rho: f64, power: Option<f64>, suffix: &str) -> String {
    match power {
        Some(power) => format!(
            "{prefix}_RHO{}_P{}.{suffix}",
            format_parameter(rho),
            format_parameter(power)
        ),
        None => format!("{prefix}_RHO{}.{suffix}", format_parameter(rho)),
    }
}

/// Writes `rows` as tab-separated values, preceded by `header` when given.
pub fn write_table(path: &Path, header: Option<&str>, rows: &[Vec<f64>]) -> Result<(), SpotError> {
    let file = File::create(path).map_err(|err| io_error("table-create", path, err))?;
    let mut writer = WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .quote_style(QuoteStyle::Never)
        .from_writer(file);
    if let Some(header) = header.filter(|header| !header.is_empty()) {
        writer
            .write_record(header.split('\t'))
            .map_err(|err| io_error("table-write-header", path, err))?;
    }
    for row in rows {
        writer
            .write_record(row.iter().map(|value| value.to_string()))
            .map_err(|err| io_error("table-write-row", path, err))?;
    }
    writer
        .flush()
        .map_err(|err| io_error("table-flush", path, err))?;
    info!("wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}
