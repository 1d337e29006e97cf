//! YAML-configurable job descriptions.
//!
//! Every default mirrors the values the reference jobs were run with; a job
//! file only needs to spell out what it changes.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, SpotError};
use crate::params::PhysicalParameters;

fn config_error(code: &str, message: impl Into<String>) -> SpotError {
    SpotError::Parameter(ErrorInfo::new(code, message.into()))
}

/// Adaptive quadrature tolerances and the per-call work bound.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuadratureOpts {
    /// Relative error target.
    #[serde(default = "default_epsrel")]
    pub epsrel: f64,
    /// Absolute error floor, relevant when the integral is close to zero.
    #[serde(default = "default_epsabs")]
    pub epsabs: f64,
    /// Maximum number of subintervals before the call reports non-convergence.
    #[serde(default = "default_max_subdivisions")]
    pub max_subdivisions: usize,
}

fn default_epsrel() -> f64 {
    1e-10
}

fn default_epsabs() -> f64 {
    1e-14
}

fn default_max_subdivisions() -> usize {
    500
}

impl Default for QuadratureOpts {
    fn default() -> Self {
        Self {
            epsrel: default_epsrel(),
            epsabs: default_epsabs(),
            max_subdivisions: default_max_subdivisions(),
        }
    }
}

impl QuadratureOpts {
    /// Rejects tolerances the adaptive scheme cannot honour.
    pub fn validate(&self) -> Result<(), SpotError> {
        if !(self.epsrel.is_finite() && self.epsrel >= 0.0)
            || !(self.epsabs.is_finite() && self.epsabs >= 0.0)
        {
            return Err(config_error("invalid-tolerance", "tolerances must be finite and non-negative"));
        }
        if self.epsrel == 0.0 && self.epsabs == 0.0 {
            return Err(config_error("invalid-tolerance", "at least one tolerance must be positive"));
        }
        if self.max_subdivisions == 0 {
            return Err(config_error("invalid-subdivisions", "max_subdivisions must be at least 1"));
        }
        Ok(())
    }
}

/// Scheduler configuration controlling sweep execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scheduler {
    /// Number of worker threads; 1 evaluates cells sequentially.
    #[serde(default = "Scheduler::default_parallelism")]
    pub parallelism: usize,
}

impl Scheduler {
    const fn default_parallelism() -> usize {
        1
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self {
            parallelism: Self::default_parallelism(),
        }
    }
}

/// What a sweep does when one cell fails to solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// The sweep returns the first cell error.
    #[default]
    Abort,
    /// The cell becomes NaN and the failure is listed in the table.
    RecordNan,
}

/// Execution settings shared by both analytical sweeps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SolverSettings {
    /// Quadrature tolerances.
    #[serde(default)]
    pub quadrature: QuadratureOpts,
    /// Thread scheduling.
    #[serde(default)]
    pub scheduler: Scheduler,
    /// Cell failure handling.
    #[serde(default)]
    pub on_failure: FailurePolicy,
}

/// Minimum power versus rho for several a/d ratios.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinPowerConfig {
    /// Coating thickness in metres.
    #[serde(default = "default_thickness")]
    pub d: f64,
    /// a/d ratios, one output column each.
    #[serde(default = "default_ad_ratios")]
    pub ad_ratios: Vec<f64>,
    /// Decimal exponent of the smallest rho.
    #[serde(default = "default_log_start")]
    pub log_start: f64,
    /// Decimal exponent of the largest rho.
    #[serde(default = "default_log_stop")]
    pub log_stop: f64,
    /// Number of rho values.
    #[serde(default = "default_log_steps")]
    pub log_steps: usize,
    /// Job name used for the output directory.
    #[serde(default = "default_min_power_job")]
    pub jobname: String,
    /// Solver execution settings.
    #[serde(default)]
    pub solver: SolverSettings,
}

fn default_thickness() -> f64 {
    100e-9
}

fn default_ad_ratios() -> Vec<f64> {
    vec![1.0, 5.0, 10.0]
}

fn default_log_start() -> f64 {
    -2.0
}

fn default_log_stop() -> f64 {
    2.0
}

fn default_log_steps() -> usize {
    10_000
}

fn default_min_power_job() -> String {
    "Example_Name".to_string()
}

impl Default for MinPowerConfig {
    fn default() -> Self {
        Self {
            d: default_thickness(),
            ad_ratios: default_ad_ratios(),
            log_start: default_log_start(),
            log_stop: default_log_stop(),
            log_steps: default_log_steps(),
            jobname: default_min_power_job(),
            solver: SolverSettings::default(),
        }
    }
}

impl MinPowerConfig {
    /// Validates the sweep grid and every derived beam width.
    pub fn validate(&self) -> Result<(), SpotError> {
        self.solver.quadrature.validate()?;
        if self.ad_ratios.is_empty() {
            return Err(config_error("empty-ratios", "at least one a/d ratio is required"));
        }
        if self.log_steps == 0 {
            return Err(config_error("empty-axis", "log_steps must be at least 1"));
        }
        if !self.log_start.is_finite() || !self.log_stop.is_finite() {
            return Err(config_error("invalid-axis", "log exponents must be finite"));
        }
        validate_axis(self.log_start, self.log_stop, self.log_steps)?;
        for ratio in &self.ad_ratios {
            PhysicalParameters::new(self.d * ratio, self.d, 1.0)
                .map_err(|err| err.with_context("ad_ratio", ratio.to_string()))?;
        }
        validate_jobname(&self.jobname)
    }
}

/// Normalized power versus normalized radius for several rho values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadiusSweepConfig {
    /// Gaussian beam width parameter in metres.
    #[serde(default = "default_beam_width")]
    pub a: f64,
    /// Coating thickness in metres.
    #[serde(default = "default_thickness")]
    pub d: f64,
    /// Transition temperature in kelvin, recorded in the manifest.
    #[serde(default = "default_transition_temperature")]
    pub t0: f64,
    /// Smallest normalized radius.
    #[serde(default)]
    pub r_min: f64,
    /// Largest normalized radius.
    #[serde(default = "default_r_max")]
    pub r_max: f64,
    /// Number of radius points.
    #[serde(default = "default_r_steps")]
    pub r_steps: usize,
    /// rho values, one output column each.
    #[serde(default = "default_rho_values")]
    pub rho_values: Vec<f64>,
    /// Job name used for the output directory.
    #[serde(default = "default_radius_job")]
    pub jobname: String,
    /// Solver execution settings.
    #[serde(default)]
    pub solver: SolverSettings,
}

fn default_beam_width() -> f64 {
    1000e-9
}

fn default_transition_temperature() -> f64 {
    341.0
}

fn default_r_max() -> f64 {
    5.0
}

fn default_r_steps() -> usize {
    100
}

fn default_rho_values() -> Vec<f64> {
    vec![0.5]
}

fn default_radius_job() -> String {
    "analytical_job".to_string()
}

impl Default for RadiusSweepConfig {
    fn default() -> Self {
        Self {
            a: default_beam_width(),
            d: default_thickness(),
            t0: default_transition_temperature(),
            r_min: 0.0,
            r_max: default_r_max(),
            r_steps: default_r_steps(),
            rho_values: default_rho_values(),
            jobname: default_radius_job(),
            solver: SolverSettings::default(),
        }
    }
}

impl RadiusSweepConfig {
    /// Validates geometry, radius grid and every rho.
    pub fn validate(&self) -> Result<(), SpotError> {
        self.solver.quadrature.validate()?;
        if self.rho_values.is_empty() {
            return Err(config_error("empty-rho", "at least one rho value is required"));
        }
        if self.r_steps == 0 {
            return Err(config_error("empty-axis", "r_steps must be at least 1"));
        }
        if !self.r_min.is_finite() || !self.r_max.is_finite() {
            return Err(config_error("invalid-axis", "radius bounds must be finite"));
        }
        validate_axis(self.r_min, self.r_max, self.r_steps)?;
        for rho in &self.rho_values {
            PhysicalParameters::new(self.a, self.d, *rho)?.with_t0(self.t0)?;
        }
        validate_jobname(&self.jobname)
    }
}

/// Finite-element comparison batch driven through an external simulator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FemConfig {
    /// Gaussian beam width parameter in metres.
    #[serde(default = "default_fem_beam_width")]
    pub a: f64,
    /// Transition temperature in kelvin; the crossing threshold.
    #[serde(default = "default_transition_temperature")]
    pub t0: f64,
    /// Model file handed to the simulator, `.mph` appended when missing.
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,
    /// rho values, one comparison table each.
    #[serde(default = "default_rho_values")]
    pub rho_values: Vec<f64>,
    /// Smallest laser power in watts.
    #[serde(default)]
    pub power_min: f64,
    /// Largest laser power in watts.
    #[serde(default = "default_power_max")]
    pub power_max: f64,
    /// Number of laser powers.
    #[serde(default = "default_power_steps")]
    pub power_steps: usize,
    /// Cores offered to the simulator.
    #[serde(default = "default_cores")]
    pub cores: usize,
    /// Substrate conductivity override; `((3.6 + 6) / 2) / rho` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub k_sub: Option<f64>,
    /// Study solved for every power.
    #[serde(default = "default_study")]
    pub study: String,
    /// Plot exported after every solve.
    #[serde(default = "default_plot")]
    pub plot: String,
    /// Absolute tolerance selecting the free-surface rows of an export.
    #[serde(default = "default_y_tolerance")]
    pub y_tolerance: f64,
    /// Metres per export length unit (the exporter writes nanometres).
    #[serde(default = "default_export_length_scale")]
    pub export_length_scale: f64,
    /// Job name used for the output directory.
    #[serde(default = "default_fem_job")]
    pub jobname: String,
}

fn default_fem_beam_width() -> f64 {
    1e-7
}

fn default_model_path() -> PathBuf {
    PathBuf::from("250000x250000nm_SYMMETRIC_MIN500_NARROW10")
}

fn default_power_max() -> f64 {
    0.0075
}

fn default_power_steps() -> usize {
    3
}

fn default_cores() -> usize {
    24
}

fn default_study() -> String {
    "Study 1".to_string()
}

fn default_plot() -> String {
    "Plot 1".to_string()
}

fn default_y_tolerance() -> f64 {
    1e-9
}

fn default_export_length_scale() -> f64 {
    1e-9
}

fn default_fem_job() -> String {
    "Test123".to_string()
}

impl Default for FemConfig {
    fn default() -> Self {
        Self {
            a: default_fem_beam_width(),
            t0: default_transition_temperature(),
            model_path: default_model_path(),
            rho_values: default_rho_values(),
            power_min: 0.0,
            power_max: default_power_max(),
            power_steps: default_power_steps(),
            cores: default_cores(),
            k_sub: None,
            study: default_study(),
            plot: default_plot(),
            y_tolerance: default_y_tolerance(),
            export_length_scale: default_export_length_scale(),
            jobname: default_fem_job(),
        }
    }
}

impl FemConfig {
    /// Validates the batch before the simulator is started.
    pub fn validate(&self) -> Result<(), SpotError> {
        if !self.a.is_finite() || self.a <= 0.0 {
            return Err(config_error("invalid-beam-width", "a must be positive and finite"));
        }
        if !self.t0.is_finite() || self.t0 <= 0.0 {
            return Err(config_error("invalid-t0", "t0 must be a positive temperature"));
        }
        if self.rho_values.is_empty() {
            return Err(config_error("empty-rho", "at least one rho value is required"));
        }
        for rho in &self.rho_values {
            if !rho.is_finite() || *rho <= 0.0 {
                return Err(config_error("invalid-rho", "rho must be finite and positive")
                    .with_context("rho", rho.to_string()));
            }
        }
        if self.power_steps == 0 {
            return Err(config_error("empty-axis", "power_steps must be at least 1"));
        }
        if !self.power_min.is_finite() || !self.power_max.is_finite() {
            return Err(config_error("invalid-axis", "power bounds must be finite"));
        }
        validate_axis(self.power_min, self.power_max, self.power_steps)?;
        if let Some(k_sub) = self.k_sub {
            if !k_sub.is_finite() || k_sub <= 0.0 {
                return Err(config_error("invalid-k-sub", "k_sub must be positive and finite"));
            }
        }
        if self.cores == 0 {
            return Err(config_error("invalid-cores", "cores must be at least 1"));
        }
        if !self.y_tolerance.is_finite() || self.y_tolerance < 0.0 {
            return Err(config_error("invalid-y-tolerance", "y_tolerance must be non-negative"));
        }
        if !self.export_length_scale.is_finite() || self.export_length_scale <= 0.0 {
            return Err(config_error("invalid-length-scale", "export_length_scale must be positive"));
        }
        validate_jobname(&self.jobname)
    }
}

fn validate_axis(start: f64, stop: f64, count: usize) -> Result<(), SpotError> {
    if count > 1 && stop <= start {
        return Err(config_error("non-ascending-axis", "axis must run from low to high")
            .with_context("start", start.to_string())
            .with_context("stop", stop.to_string()));
    }
    Ok(())
}

fn validate_jobname(jobname: &str) -> Result<(), SpotError> {
    if jobname.trim().is_empty() {
        return Err(config_error("empty-jobname", "jobname must not be empty"));
    }
    if jobname.contains(['/', '\\']) {
        return Err(config_error("invalid-jobname", "jobname must be a single path component")
            .with_context("jobname", jobname));
    }
    Ok(())
}

/// Parses a job description from YAML text.
pub fn from_yaml_str<T: DeserializeOwned>(text: &str) -> Result<T, SpotError> {
    serde_yaml::from_str(text)
        .map_err(|err| SpotError::Serde(ErrorInfo::new("yaml-deserialize", err.to_string())))
}

/// Reads and parses a YAML job file.
pub fn load_config<T: DeserializeOwned>(path: &Path) -> Result<T, SpotError> {
    let text = fs::read_to_string(path).map_err(|err| {
        SpotError::Io(
            ErrorInfo::new("config-read", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })?;
    from_yaml_str(&text).map_err(|err| err.with_context("path", path.display().to_string()))
}
