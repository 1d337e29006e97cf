//! Finite-element comparison batches for the thermal spot model.
//!
//! The simulator itself is an injected [`FieldSimulator`]; this crate only
//! sequences parameter updates, solves and exports, then turns the exported
//! temperature fields into normalized power/radius tables.

#![deny(missing_docs)]

mod batch;
mod command;
mod export;
mod simulator;

pub use batch::{batch_rho_analysis, laser_powers, run_rho_analysis, FemLayout, RhoAnalysis};
pub use command::{CommandSimulator, PARAM_ENV_PREFIX};
pub use export::{crossing_from_export, read_field_export, EXPORT_PREAMBLE_LINES};
pub use simulator::{
    model_path_with_extension, FieldSimulator, MODEL_EXTENSION, PARAM_BEAM_WIDTH,
    PARAM_LASER_POWER, PARAM_RHO, PARAM_SUBSTRATE_CONDUCTIVITY, PARAM_TRANSITION_TEMPERATURE,
};
