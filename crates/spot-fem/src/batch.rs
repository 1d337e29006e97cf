use std::path::{Path, PathBuf};

use log::info;
use serde::{Deserialize, Serialize};
use spot_core::{FemConfig, SpotError};
use spot_exp::{
    artefact_name, ensure_dir, format_parameter, normalize_crossings, write_table, Normalization,
    NormalizedResult, SweepAxis, NORMALIZED_HEADER,
};

use crate::export::crossing_from_export;
use crate::simulator::{
    FieldSimulator, PARAM_BEAM_WIDTH, PARAM_LASER_POWER, PARAM_RHO, PARAM_SUBSTRATE_CONDUCTIVITY,
    PARAM_TRANSITION_TEMPERATURE,
};

/// Directory layout of a comparison batch below `<out>/<jobname>/Data`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FemLayout {
    data_dir: PathBuf,
}

impl FemLayout {
    /// Layout rooted at a job's data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Root data directory.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// `RAWSOLVED/RHO_{rho}`, holding the raw field exports of one rho.
    pub fn raw_dir(&self, rho: f64) -> PathBuf {
        self.data_dir
            .join("RAWSOLVED")
            .join(format!("RHO_{}", format_parameter(rho)))
    }

    /// Raw export of one (rho, power) solve.
    pub fn export_path(&self, rho: f64, power: f64) -> PathBuf {
        self.raw_dir(rho)
            .join(artefact_name("SOLVED", rho, Some(power), "txt"))
    }

    /// `PLOTDATA/RAD_POW_RHO{rho}_COMSOL.txt`, the normalized table of one rho.
    pub fn plot_path(&self, rho: f64) -> PathBuf {
        self.data_dir
            .join("PLOTDATA")
            .join(format!("RAD_POW_RHO{}_COMSOL.txt", format_parameter(rho)))
    }
}

/// Outcome of one rho of a comparison batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RhoAnalysis {
    /// Contrast ratio.
    pub rho: f64,
    /// Normalized power and radius per laser power.
    pub result: NormalizedResult,
    /// Raw export written for each laser power.
    pub exports: Vec<PathBuf>,
    /// Normalized table.
    pub table: PathBuf,
}

/// Laser powers of a batch, linearly spaced.
pub fn laser_powers(config: &FemConfig) -> Result<SweepAxis, SpotError> {
    SweepAxis::linear(config.power_min, config.power_max, config.power_steps)
}

/// Solves every laser power for one rho, then scans, normalizes and writes its table.
///
/// Simulator failures abort; an export that is missing or malformed becomes a
/// missing radius in the table.
pub fn run_rho_analysis<S>(
    simulator: &mut S,
    config: &FemConfig,
    rho: f64,
    layout: &FemLayout,
) -> Result<RhoAnalysis, SpotError>
where
    S: FieldSimulator + ?Sized,
{
    let normalization = Normalization::new(
        rho,
        config.a,
        config.t0,
        config.k_sub,
        config.export_length_scale,
    )?;
    let powers = laser_powers(config)?;
    let with_rho = |err: SpotError| err.with_context("rho", format_parameter(rho));

    simulator
        .set_parameter(PARAM_BEAM_WIDTH, config.a)
        .map_err(with_rho)?;
    simulator
        .set_parameter(PARAM_TRANSITION_TEMPERATURE, config.t0)
        .map_err(with_rho)?;
    simulator
        .set_parameter(PARAM_SUBSTRATE_CONDUCTIVITY, normalization.k_sub)
        .map_err(with_rho)?;
    simulator.set_parameter(PARAM_RHO, rho).map_err(with_rho)?;

    ensure_dir(layout.raw_dir(rho))?;
    let mut exports = Vec::with_capacity(powers.len());
    for power in powers.values() {
        let with_cell = |err: SpotError| with_rho(err).with_context("p_laser", power.to_string());
        info!("rho={} p_laser={}: solving {}", rho, power, config.study);
        simulator
            .set_parameter(PARAM_LASER_POWER, *power)
            .map_err(with_cell)?;
        simulator.build_and_solve(&config.study).map_err(with_cell)?;
        let path = layout.export_path(rho, *power);
        simulator
            .export_field(&config.plot, &path)
            .map_err(with_cell)?;
        exports.push(path);
    }

    let raw_radii: Vec<Option<f64>> = exports
        .iter()
        .map(|path| crossing_from_export(path, config.t0, config.y_tolerance))
        .collect();
    let result = normalize_crossings(&normalization, powers.values(), &raw_radii)?;

    ensure_dir(layout.data_dir.join("PLOTDATA"))?;
    let table = layout.plot_path(rho);
    write_table(&table, Some(NORMALIZED_HEADER), &result.rows())?;
    let found = raw_radii.iter().filter(|radius| radius.is_some()).count();
    info!(
        "rho={}: P_ref={} crossings found for {}/{} powers",
        rho,
        result.p_ref,
        found,
        raw_radii.len()
    );

    Ok(RhoAnalysis {
        rho,
        result,
        exports,
        table,
    })
}

/// Runs [`run_rho_analysis`] for every configured rho, in order.
pub fn batch_rho_analysis<S>(
    simulator: &mut S,
    config: &FemConfig,
    data_dir: &Path,
) -> Result<Vec<RhoAnalysis>, SpotError>
where
    S: FieldSimulator + ?Sized,
{
    config.validate()?;
    let layout = FemLayout::new(ensure_dir(data_dir)?);
    let mut analyses = Vec::with_capacity(config.rho_values.len());
    for rho in &config.rho_values {
        analyses.push(run_rho_analysis(&mut *simulator, config, *rho, &layout)?);
    }
    Ok(analyses)
}
