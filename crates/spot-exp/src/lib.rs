//! Parameter sweeps, normalization and tabular persistence for the thermal spot solver.

#![deny(missing_docs)]

mod axis;
mod crossing;
mod hash;
mod json;
mod manifest;
mod normalize;
mod sweep;
mod table;
mod tsv;

pub use axis::{Spacing, SweepAxis};
pub use crossing::{surface_crossing, FieldSample, SURFACE_RTOL};
pub use hash::stable_hash_string;
pub use json::{from_json_slice, to_canonical_json_bytes};
pub use manifest::{build_manifest, write_manifest, RunManifest, MANIFEST_FILE};
pub use normalize::{
    normalize_crossings, reference_power, substrate_conductivity, Normalization,
    NormalizedPoint, NormalizedResult, NORMALIZED_HEADER,
};
pub use sweep::{
    format_parameter, min_power_table, radius_sweep, radius_table, ratio_sweep, RADIUS_LABEL,
    RHO_LABEL,
};
pub use table::{CellFailure, Column, ResultTable};
pub use tsv::{artefact_name, ensure_dir, write_table};
