#![deny(missing_docs)]
#![doc = "Core parameters, configuration and error types for the thermal spot solver."]

pub mod config;
pub mod errors;
pub mod params;
pub mod provenance;

pub use config::{
    from_yaml_str, load_config, FailurePolicy, FemConfig, MinPowerConfig, QuadratureOpts,
    RadiusSweepConfig, Scheduler, SolverSettings,
};
pub use errors::{ErrorInfo, SpotError};
pub use params::{
    default_substrate_conductivity, PhysicalParameters, AMBIENT_TEMPERATURE,
    MEAN_SUBSTRATE_CONDUCTIVITY,
};
pub use provenance::{RunProvenance, SchemaVersion};
