use log::debug;
use serde::{Deserialize, Serialize};
use spot_core::{ErrorInfo, PhysicalParameters, QuadratureOpts, SpotError};

use crate::kernel::Integrand;
use crate::quadrature::{integrate_semi_infinite, QuadratureResult};

fn solver_error(code: &str, message: impl Into<String>) -> SpotError {
    SpotError::Numerical(ErrorInfo::new(code, message.into()))
}

/// Power obtained from one converged integral.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    /// Reciprocal of the integral.
    pub power: f64,
    /// Quadrature details behind the reciprocal.
    pub quadrature: QuadratureResult,
}

/// Integrates a kernel over `[0, ∞)` and inverts the result.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct IntegralSolver {
    opts: QuadratureOpts,
}

impl IntegralSolver {
    /// Builds a solver after checking the tolerances.
    pub fn new(opts: QuadratureOpts) -> Result<Self, SpotError> {
        opts.validate()?;
        Ok(Self { opts })
    }

    /// Quadrature settings in use.
    pub fn opts(&self) -> &QuadratureOpts {
        &self.opts
    }

    /// Solves one integral, returning the reciprocal with its quadrature record.
    pub fn solve(
        &self,
        integrand: Integrand,
        params: &PhysicalParameters,
    ) -> Result<Solution, SpotError> {
        params.validate()?;
        if let Integrand::Full { radius } = integrand {
            if !radius.is_finite() {
                return Err(SpotError::Parameter(
                    ErrorInfo::new("invalid-radius", "radius must be finite")
                        .with_context("radius", radius.to_string()),
                ));
            }
        }

        let quadrature = integrate_semi_infinite(|xi| integrand.eval(xi, params), &self.opts)
            .map_err(|err| with_cell_context(err, integrand, params))?;
        if quadrature.value == 0.0 {
            return Err(with_cell_context(
                solver_error("zero-integral", "integral vanished, reciprocal undefined"),
                integrand,
                params,
            ));
        }
        let power = 1.0 / quadrature.value;
        if !power.is_finite() {
            return Err(with_cell_context(
                solver_error("non-finite-reciprocal", "reciprocal of the integral overflowed")
                    .with_context("integral", quadrature.value.to_string()),
                integrand,
                params,
            ));
        }
        debug!(
            "solved {:?} rho={} a={} d={}: integral={} err={} subdivisions={}",
            integrand, params.rho, params.a, params.d, quadrature.value, quadrature.abs_error,
            quadrature.subdivisions
        );
        Ok(Solution { power, quadrature })
    }

    /// Power at physical radius `radius` from the full integrand.
    pub fn solve_full(&self, radius: f64, params: &PhysicalParameters) -> Result<f64, SpotError> {
        self.solve(Integrand::Full { radius }, params)
            .map(|solution| solution.power)
    }

    /// Minimum power from the simplified integrand.
    pub fn solve_simplified(&self, params: &PhysicalParameters) -> Result<f64, SpotError> {
        self.solve(Integrand::Simplified, params)
            .map(|solution| solution.power)
    }
}

fn with_cell_context(err: SpotError, integrand: Integrand, params: &PhysicalParameters) -> SpotError {
    let err = err
        .with_context("a", params.a.to_string())
        .with_context("d", params.d.to_string())
        .with_context("rho", params.rho.to_string());
    match integrand {
        Integrand::Full { radius } => err.with_context("radius", radius.to_string()),
        Integrand::Simplified => err.with_context("integrand", "simplified"),
    }
}
