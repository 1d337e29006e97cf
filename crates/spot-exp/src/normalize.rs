use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use spot_core::{default_substrate_conductivity, ErrorInfo, SpotError, AMBIENT_TEMPERATURE};

/// Header of a normalized comparison table.
pub const NORMALIZED_HEADER: &str = "q_norm\tr_norm";

fn normalize_error(code: &str, message: impl Into<String>) -> SpotError {
    SpotError::Parameter(ErrorInfo::new(code, message.into()))
}

/// Substrate conductivity, the override when present, else `((3.6 + 6) / 2) / rho`.
pub fn substrate_conductivity(rho: f64, k_sub: Option<f64>) -> f64 {
    k_sub.unwrap_or_else(|| default_substrate_conductivity(rho))
}

/// `P_ref = rho · k_sub · (t0 − 293.15) · 2π · a`.
pub fn reference_power(rho: f64, k_sub: f64, t0: f64, a: f64) -> f64 {
    rho * k_sub * (t0 - AMBIENT_TEMPERATURE) * 2.0 * PI * a
}

/// Inputs shared by every row of one rho's comparison.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Normalization {
    /// Contrast ratio of the batch.
    pub rho: f64,
    /// Beam width in metres.
    pub a: f64,
    /// Transition temperature in kelvin.
    pub t0: f64,
    /// Substrate conductivity used for `P_ref`.
    pub k_sub: f64,
    /// Metres per raw radius unit.
    pub length_scale: f64,
}

impl Normalization {
    /// Resolves the substrate conductivity and checks that `P_ref` is usable.
    pub fn new(
        rho: f64,
        a: f64,
        t0: f64,
        k_sub: Option<f64>,
        length_scale: f64,
    ) -> Result<Self, SpotError> {
        let normalization = Self {
            rho,
            a,
            t0,
            k_sub: substrate_conductivity(rho, k_sub),
            length_scale,
        };
        let p_ref = normalization.reference_power();
        if !p_ref.is_finite() || p_ref == 0.0 {
            return Err(normalize_error("degenerate-reference-power", "P_ref must be finite and non-zero")
                .with_context("rho", rho.to_string())
                .with_context("t0", t0.to_string())
                .with_context("a", a.to_string()));
        }
        if !length_scale.is_finite() || length_scale <= 0.0 {
            return Err(normalize_error("invalid-length-scale", "length scale must be positive"));
        }
        Ok(normalization)
    }

    /// Reference power of this batch.
    pub fn reference_power(&self) -> f64 {
        reference_power(self.rho, self.k_sub, self.t0, self.a)
    }
}

/// One laser power with its detected spot radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedPoint {
    /// Laser power in watts.
    pub power: f64,
    /// `power / P_ref`.
    pub power_norm: f64,
    /// Crossing radius in metres, `None` when the threshold was never crossed.
    pub radius: Option<f64>,
    /// `|radius / a|`, `None` when the radius is.
    pub radius_norm: Option<f64>,
}

/// Normalized comparison curve for one rho.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedResult {
    /// Normalization inputs.
    pub normalization: Normalization,
    /// Reference power.
    pub p_ref: f64,
    /// Points in laser-power order.
    pub points: Vec<NormalizedPoint>,
}

impl NormalizedResult {
    /// Rows `[q_norm, r_norm]`; a missing radius is written as NaN.
    pub fn rows(&self) -> Vec<Vec<f64>> {
        self.points
            .iter()
            .map(|point| vec![point.power_norm, point.radius_norm.unwrap_or(f64::NAN)])
            .collect()
    }

    /// Normalized powers.
    pub fn power_norm(&self) -> Vec<f64> {
        self.points.iter().map(|point| point.power_norm).collect()
    }

    /// Normalized radii.
    pub fn radius_norm(&self) -> Vec<Option<f64>> {
        self.points.iter().map(|point| point.radius_norm).collect()
    }
}

/// Normalizes laser powers and raw crossing radii (in export units).
pub fn normalize_crossings(
    normalization: &Normalization,
    powers: &[f64],
    raw_radii: &[Option<f64>],
) -> Result<NormalizedResult, SpotError> {
    if powers.len() != raw_radii.len() {
        return Err(normalize_error("length-mismatch", "one radius is required per power")
            .with_context("powers", powers.len().to_string())
            .with_context("radii", raw_radii.len().to_string()));
    }
    let p_ref = normalization.reference_power();
    let points = powers
        .iter()
        .zip(raw_radii)
        .map(|(power, raw)| {
            let radius = raw.map(|r| r * normalization.length_scale);
            NormalizedPoint {
                power: *power,
                power_norm: power / p_ref,
                radius,
                radius_norm: radius.map(|r| (r / normalization.a).abs()),
            }
        })
        .collect();
    Ok(NormalizedResult {
        normalization: *normalization,
        p_ref,
        points,
    })
}
