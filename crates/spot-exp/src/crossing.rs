use serde::{Deserialize, Serialize};

/// Relative part of the surface selection tolerance, scaled by the surface height.
pub const SURFACE_RTOL: f64 = 1e-5;

/// One node of an exported temperature field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldSample {
    /// Radial coordinate.
    pub radius: f64,
    /// Height coordinate; the free surface is the maximum.
    pub height: f64,
    /// Temperature in kelvin.
    pub temperature: f64,
}

/// Radius at which the free-surface temperature first exceeds `threshold`.
///
/// Samples within `height_tolerance + SURFACE_RTOL·|top|` of the largest
/// height `top` form the surface.
/// Negative radii are dropped, the remaining samples are visited in ascending
/// temperature order and the radius of the first one hotter than `threshold`
/// is returned. `None` means no surface sample is hotter than the threshold.
pub fn surface_crossing(
    samples: &[FieldSample],
    threshold: f64,
    height_tolerance: f64,
) -> Option<f64> {
    let top = samples
        .iter()
        .map(|sample| sample.height)
        .filter(|height| height.is_finite())
        .max_by(f64::total_cmp)?;

    let tolerance = height_tolerance + SURFACE_RTOL * top.abs();
    let mut surface: Vec<&FieldSample> = samples
        .iter()
        .filter(|sample| (sample.height - top).abs() <= tolerance)
        .filter(|sample| sample.radius >= 0.0)
        .collect();
    surface.sort_by(|lhs, rhs| lhs.temperature.total_cmp(&rhs.temperature));

    surface
        .into_iter()
        .find(|sample| sample.temperature > threshold)
        .map(|sample| sample.radius)
}
