//! Physical parameters of a coated sample under Gaussian illumination.

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, SpotError};

/// Ambient temperature of the substrate far from the spot, in kelvin.
pub const AMBIENT_TEMPERATURE: f64 = 293.15;

/// Mean of the substrate conductivity bounds (3.6 and 6 W/m/K) used by the
/// default substrate conductivity `k_sub = mean / rho`.
pub const MEAN_SUBSTRATE_CONDUCTIVITY: f64 = (3.6 + 6.0) / 2.0;

fn parameter_error(code: &str, message: impl Into<String>) -> SpotError {
    SpotError::Parameter(ErrorInfo::new(code, message.into()))
}

/// Geometry and contrast of one coating/substrate configuration.
///
/// `a` and `d` are lengths in metres, `rho` is dimensionless and `t0` is the
/// optional transition temperature in kelvin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicalParameters {
    /// Gaussian beam width parameter.
    pub a: f64,
    /// Coating thickness.
    pub d: f64,
    /// Optical-thermal contrast ratio between coating and substrate.
    pub rho: f64,
    /// Transition temperature of the coating.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub t0: Option<f64>,
}

impl PhysicalParameters {
    /// Builds a validated parameter set without a transition temperature.
    pub fn new(a: f64, d: f64, rho: f64) -> Result<Self, SpotError> {
        let params = Self { a, d, rho, t0: None };
        params.validate()?;
        Ok(params)
    }

    /// Returns a copy carrying the provided transition temperature.
    pub fn with_t0(mut self, t0: f64) -> Result<Self, SpotError> {
        self.t0 = Some(t0);
        self.validate()?;
        Ok(self)
    }

    /// Returns a copy with `rho` replaced, revalidated.
    pub fn with_rho(mut self, rho: f64) -> Result<Self, SpotError> {
        self.rho = rho;
        self.validate()?;
        Ok(self)
    }

    /// Thickness to beam width ratio `d / a` entering the hyperbolic tangent.
    pub fn thickness_ratio(&self) -> f64 {
        self.d / self.a
    }

    /// Checks every invariant required before an integral is evaluated.
    ///
    /// `rho <= -1` is rejected: `1 + rho·tanh(x)` vanishes for some `x >= 0`
    /// (or in the limit for `rho = -1`), which puts a pole on the integration path.
    /// `-1 < rho <= 0` is rejected too: the contrast factor changes sign and the
    /// integral can pass through zero, so the reciprocal is not a power.
    pub fn validate(&self) -> Result<(), SpotError> {
        if !self.a.is_finite() || self.a <= 0.0 {
            return Err(parameter_error("invalid-beam-width", "a must be positive and finite")
                .with_context("a", self.a.to_string()));
        }
        if !self.d.is_finite() || self.d <= 0.0 {
            return Err(parameter_error("invalid-thickness", "d must be positive and finite")
                .with_context("d", self.d.to_string()));
        }
        if !self.rho.is_finite() {
            return Err(parameter_error("invalid-rho", "rho must be finite")
                .with_context("rho", self.rho.to_string()));
        }
        if self.rho <= -1.0 {
            return Err(SpotError::Parameter(
                ErrorInfo::new("singular-rho", "rho <= -1 places a pole on the integration path")
                    .with_context("rho", self.rho.to_string())
                    .with_hint("physical contrast ratios are positive"),
            ));
        }
        if self.rho <= 0.0 {
            return Err(parameter_error("non-positive-rho", "rho must be positive")
                .with_context("rho", self.rho.to_string()));
        }
        if let Some(t0) = self.t0 {
            if !t0.is_finite() || t0 <= 0.0 {
                return Err(parameter_error("invalid-t0", "t0 must be a positive temperature")
                    .with_context("t0", t0.to_string()));
            }
        }
        Ok(())
    }
}

/// Default substrate conductivity for a contrast ratio, `((3.6 + 6) / 2) / rho`.
pub fn default_substrate_conductivity(rho: f64) -> f64 {
    MEAN_SUBSTRATE_CONDUCTIVITY / rho
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_conductivity_matches_mean_over_rho() {
        assert!((default_substrate_conductivity(0.5) - 9.6).abs() < 1e-12);
        assert!((default_substrate_conductivity(1.0) - 4.8).abs() < 1e-12);
    }

    #[test]
    fn thickness_ratio_is_d_over_a() {
        let params = PhysicalParameters::new(1e-6, 1e-7, 0.5).expect("valid");
        assert!((params.thickness_ratio() - 0.1).abs() < 1e-12);
    }
}
