use log::{info, warn};
use rayon::prelude::*;
use spot_core::{
    ErrorInfo, FailurePolicy, MinPowerConfig, PhysicalParameters, RadiusSweepConfig, Scheduler,
    SolverSettings, SpotError,
};
use spot_int::{Integrand, IntegralSolver};

use crate::axis::SweepAxis;
use crate::table::{CellFailure, Column, ResultTable};

/// Header label of the rho axis in minimum-power tables.
pub const RHO_LABEL: &str = "rho";
/// Header label of the normalized radius axis in radius tables.
pub const RADIUS_LABEL: &str = "radius_norm";

fn sweep_error(code: &str, message: impl Into<String>) -> SpotError {
    SpotError::Parameter(ErrorInfo::new(code, message.into()))
}

/// Formats a parameter the way it appears in headers and file names.
pub fn format_parameter(value: f64) -> String {
    format!("{value}")
}

/// One prepared cell: the solver inputs for a single (row, column) pair.
#[derive(Debug, Clone, Copy)]
struct Cell {
    integrand: Integrand,
    params: PhysicalParameters,
}

/// Minimum power against log-spaced rho, one column per a/d ratio.
///
/// For every ratio the beam width is `a = d · ratio` and the simplified
/// integrand is solved at each rho of `rho_axis`.
pub fn ratio_sweep(
    d: f64,
    ad_ratios: &[f64],
    rho_axis: &SweepAxis,
    settings: &SolverSettings,
) -> Result<ResultTable, SpotError> {
    if ad_ratios.is_empty() {
        return Err(sweep_error("empty-ratios", "at least one a/d ratio is required"));
    }
    let mut cells = Vec::with_capacity(ad_ratios.len() * rho_axis.len());
    for ratio in ad_ratios {
        let a = d * ratio;
        for rho in rho_axis.values() {
            let params = PhysicalParameters::new(a, d, *rho)
                .map_err(|err| err.with_context("ad_ratio", format_parameter(*ratio)))?;
            cells.push(Cell {
                integrand: Integrand::Simplified,
                params,
            });
        }
    }
    let labels = ad_ratios
        .iter()
        .map(|ratio| format!("power_min_ad{}", format_parameter(*ratio)))
        .collect();
    info!(
        "ratio sweep: {} rho values x {} a/d ratios",
        rho_axis.len(),
        ad_ratios.len()
    );
    run_grid(RHO_LABEL, rho_axis, ad_ratios, labels, cells, settings)
}

/// Power against linearly spaced normalized radius, one column per rho.
///
/// Every normalized radius `R_norm` is solved at the physical radius
/// `R = R_norm · a` with the full integrand.
pub fn radius_sweep(
    a: f64,
    d: f64,
    rho_values: &[f64],
    radius_axis: &SweepAxis,
    settings: &SolverSettings,
) -> Result<ResultTable, SpotError> {
    if rho_values.is_empty() {
        return Err(sweep_error("empty-rho", "at least one rho value is required"));
    }
    let mut cells = Vec::with_capacity(rho_values.len() * radius_axis.len());
    for rho in rho_values {
        let params = PhysicalParameters::new(a, d, *rho)?;
        for radius_norm in radius_axis.values() {
            cells.push(Cell {
                integrand: Integrand::Full {
                    radius: radius_norm * a,
                },
                params,
            });
        }
    }
    let labels = rho_values
        .iter()
        .map(|rho| format!("power_rho{}", format_parameter(*rho)))
        .collect();
    info!(
        "radius sweep: {} radii x {} rho values",
        radius_axis.len(),
        rho_values.len()
    );
    run_grid(RADIUS_LABEL, radius_axis, rho_values, labels, cells, settings)
}

/// Runs the ratio sweep described by a job configuration.
pub fn min_power_table(config: &MinPowerConfig) -> Result<ResultTable, SpotError> {
    config.validate()?;
    let axis = SweepAxis::logarithmic(config.log_start, config.log_stop, config.log_steps)?;
    ratio_sweep(config.d, &config.ad_ratios, &axis, &config.solver)
}

/// Runs the radius sweep described by a job configuration.
pub fn radius_table(config: &RadiusSweepConfig) -> Result<ResultTable, SpotError> {
    config.validate()?;
    let axis = SweepAxis::linear(config.r_min, config.r_max, config.r_steps)?;
    radius_sweep(config.a, config.d, &config.rho_values, &axis, &config.solver)
}

// Cells are laid out column-major: all rows of column 0, then column 1, ...
fn run_grid(
    axis_label: &str,
    axis: &SweepAxis,
    parameters: &[f64],
    labels: Vec<String>,
    cells: Vec<Cell>,
    settings: &SolverSettings,
) -> Result<ResultTable, SpotError> {
    let solver = IntegralSolver::new(settings.quadrature)?;
    let rows = axis.len();
    let solve = |cell: &Cell| solver.solve(cell.integrand, &cell.params).map(|s| s.power);

    let outcomes = evaluate(&cells, &settings.scheduler, settings.on_failure, solve)?;

    let mut columns: Vec<Column> = labels
        .into_iter()
        .zip(parameters)
        .map(|(label, parameter)| Column {
            label,
            parameter: *parameter,
            values: Vec::with_capacity(rows),
        })
        .collect();
    let mut failures = Vec::new();
    for (index, outcome) in outcomes.into_iter().enumerate() {
        let (column, row) = (index / rows, index % rows);
        let value = match outcome {
            Ok(value) => value,
            Err(error) => {
                let failure = CellFailure {
                    row,
                    column,
                    axis_value: axis.values()[row],
                    parameter: parameters[column],
                    error,
                };
                warn!(
                    "{}={} {}: recorded NaN ({})",
                    axis_label, failure.axis_value, columns[column].label, failure.error
                );
                failures.push(failure);
                f64::NAN
            }
        };
        columns[column].values.push(value);
    }

    Ok(ResultTable {
        axis_label: axis_label.to_string(),
        axis: axis.values().to_vec(),
        columns,
        failures,
    })
}

/// Evaluates every cell in order. Under [`FailurePolicy::Abort`] the first
/// failing cell (in cell order) is returned as the error; otherwise failures
/// are handed back per cell. Parameter errors always abort.
fn evaluate<F>(
    cells: &[Cell],
    scheduler: &Scheduler,
    policy: FailurePolicy,
    solve: F,
) -> Result<Vec<Result<f64, SpotError>>, SpotError>
where
    F: Fn(&Cell) -> Result<f64, SpotError> + Sync,
{
    let outcomes: Vec<Result<f64, SpotError>> = if scheduler.parallelism <= 1 {
        let mut outcomes = Vec::with_capacity(cells.len());
        for cell in cells {
            let outcome = solve(cell);
            if let Err(err) = &outcome {
                if policy == FailurePolicy::Abort || !err.is_numerical() {
                    return Err(err.clone());
                }
            }
            outcomes.push(outcome);
        }
        outcomes
    } else {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(scheduler.parallelism)
            .build()
            .map_err(|err| {
                SpotError::Environment(ErrorInfo::new("thread-pool", err.to_string()))
            })?;
        let mut indexed: Vec<(usize, Result<f64, SpotError>)> = pool.install(|| {
            cells
                .par_iter()
                .enumerate()
                .map(|(index, cell)| (index, solve(cell)))
                .collect()
        });
        indexed.sort_by_key(|(index, _)| *index);
        let outcomes: Vec<_> = indexed.into_iter().map(|(_, outcome)| outcome).collect();
        let fatal = outcomes
            .iter()
            .filter_map(|outcome| outcome.as_ref().err())
            .find(|err| policy == FailurePolicy::Abort || !err.is_numerical());
        if let Some(err) = fatal {
            return Err(err.clone());
        }
        outcomes
    };
    Ok(outcomes)
}
