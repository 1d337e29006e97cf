use std::fs;
use std::path::Path;

use log::warn;
use spot_core::{ErrorInfo, SpotError};
use spot_exp::{surface_crossing, FieldSample};

/// Header lines preceding the numeric rows of a field export.
pub const EXPORT_PREAMBLE_LINES: usize = 8;

fn malformed(path: &Path, line: usize, message: impl Into<String>) -> SpotError {
    SpotError::Serde(
        ErrorInfo::new("malformed-export", message.into())
            .with_context("path", path.display().to_string())
            .with_context("line", line.to_string()),
    )
}

/// Reads a whitespace-delimited field export with columns `radius height temperature ...`.
pub fn read_field_export(path: &Path) -> Result<Vec<FieldSample>, SpotError> {
    let text = fs::read_to_string(path).map_err(|err| {
        SpotError::Io(
            ErrorInfo::new("export-read", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })?;
    parse_field_export(path, &text)
}

fn parse_field_export(path: &Path, text: &str) -> Result<Vec<FieldSample>, SpotError> {
    let mut samples = Vec::new();
    for (index, line) in text.lines().enumerate().skip(EXPORT_PREAMBLE_LINES) {
        let line_no = index + 1;
        if line.trim().is_empty() {
            continue;
        }
        let values = line
            .split_whitespace()
            .map(|field| {
                field
                    .parse::<f64>()
                    .map_err(|err| malformed(path, line_no, format!("{field:?}: {err}")))
            })
            .collect::<Result<Vec<_>, _>>()?;
        if values.len() < 3 {
            return Err(malformed(path, line_no, "expected radius, height and temperature"));
        }
        samples.push(FieldSample {
            radius: values[0],
            height: values[1],
            temperature: values[2],
        });
    }
    Ok(samples)
}

/// Crossing radius of one export, in export length units.
///
/// A missing or unreadable export is reported as "not found".
pub fn crossing_from_export(path: &Path, threshold: f64, height_tolerance: f64) -> Option<f64> {
    match read_field_export(path) {
        Ok(samples) => surface_crossing(&samples, threshold, height_tolerance),
        Err(err) => {
            warn!("no crossing for {}: {}", path.display(), err);
            None
        }
    }
}
