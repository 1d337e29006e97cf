use serde::{Deserialize, Serialize};
use spot_core::{ErrorInfo, SpotError};

/// How the axis values were generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Spacing {
    /// Evenly spaced values between two endpoints.
    Linear,
    /// Powers of ten with evenly spaced exponents.
    Logarithmic,
}

/// Ordered primary-axis values of a sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepAxis {
    spacing: Spacing,
    values: Vec<f64>,
}

fn axis_error(code: &str, message: impl Into<String>) -> SpotError {
    SpotError::Parameter(ErrorInfo::new(code, message.into()))
}

fn linspace(start: f64, stop: f64, count: usize) -> Result<Vec<f64>, SpotError> {
    if count == 0 {
        return Err(axis_error("empty-axis", "an axis needs at least one point"));
    }
    if !start.is_finite() || !stop.is_finite() {
        return Err(axis_error("invalid-axis", "axis bounds must be finite")
            .with_context("start", start.to_string())
            .with_context("stop", stop.to_string()));
    }
    if count == 1 {
        return Ok(vec![start]);
    }
    if stop <= start {
        return Err(axis_error("non-ascending-axis", "axis must run from low to high")
            .with_context("start", start.to_string())
            .with_context("stop", stop.to_string())
            .with_context("count", count.to_string()));
    }
    let step = (stop - start) / (count - 1) as f64;
    let mut values: Vec<f64> = (0..count).map(|i| start + step * i as f64).collect();
    // Pin the endpoint so it is exact regardless of accumulated rounding.
    values[count - 1] = stop;
    Ok(values)
}

impl SweepAxis {
    /// `count` evenly spaced values from `start` to `stop`, both included.
    pub fn linear(start: f64, stop: f64, count: usize) -> Result<Self, SpotError> {
        Ok(Self {
            spacing: Spacing::Linear,
            values: linspace(start, stop, count)?,
        })
    }

    /// `count` values from `10^start_exp` to `10^stop_exp` with evenly spaced exponents.
    pub fn logarithmic(start_exp: f64, stop_exp: f64, count: usize) -> Result<Self, SpotError> {
        let values = linspace(start_exp, stop_exp, count)?
            .into_iter()
            .map(|exp| 10f64.powf(exp))
            .collect();
        Ok(Self {
            spacing: Spacing::Logarithmic,
            values,
        })
    }

    /// Spacing used to generate the axis.
    pub fn spacing(&self) -> Spacing {
        self.spacing
    }

    /// Axis values in generation order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when the axis holds no points.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
