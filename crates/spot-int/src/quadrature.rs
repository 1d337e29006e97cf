//! Globally adaptive 7/15-point Gauss–Kronrod quadrature on `[0, ∞)`.
//!
//! The half line is mapped onto `[0, 1)` with `x = t / (1 - t)`. The interval
//! with the largest error estimate is bisected until the summed estimate meets
//! `max(epsabs, epsrel·|I|)` or the subdivision cap is reached, in which case
//! the call fails instead of returning the current approximation.

use serde::{Deserialize, Serialize};
use spot_core::{ErrorInfo, QuadratureOpts, SpotError};

const XGK: [f64; 8] = [
    0.991_455_371_120_812_639_206_854_697_526_329,
    0.949_107_912_342_758_524_526_189_684_047_851,
    0.864_864_423_359_769_072_789_712_788_640_926,
    0.741_531_185_599_394_439_863_864_773_280_788,
    0.586_087_235_467_691_130_294_144_845_693_013,
    0.405_845_151_377_397_166_906_606_412_076_961,
    0.207_784_955_007_898_467_600_689_403_773_245,
    0.0,
];

const WGK: [f64; 8] = [
    0.022_935_322_010_529_224_963_732_008_058_970,
    0.063_092_092_629_978_553_290_700_663_189_204,
    0.104_790_010_322_250_183_839_876_322_541_518,
    0.140_653_259_715_525_918_745_189_590_510_238,
    0.169_004_726_639_267_902_826_583_426_598_550,
    0.190_350_578_064_785_409_913_256_402_421_014,
    0.204_432_940_075_298_892_414_161_999_234_649,
    0.209_482_141_084_727_828_012_999_174_891_714,
];

// Gauss weights for the odd Kronrod abscissae XGK[1], XGK[3], XGK[5], XGK[7].
const WG: [f64; 4] = [
    0.129_484_966_168_869_693_270_611_432_679_082,
    0.279_705_391_489_276_667_901_467_771_423_780,
    0.381_830_050_505_118_944_950_369_775_488_975,
    0.417_959_183_673_469_387_755_102_040_816_327,
];

fn quadrature_error(code: &str, message: impl Into<String>) -> SpotError {
    SpotError::Numerical(ErrorInfo::new(code, message.into()))
}

/// Converged quadrature estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuadratureResult {
    /// Integral estimate.
    pub value: f64,
    /// Summed absolute error estimate.
    pub abs_error: f64,
    /// Number of subintervals in the final partition.
    pub subdivisions: usize,
    /// Number of integrand evaluations.
    pub evaluations: usize,
}

#[derive(Debug, Clone, Copy)]
struct Segment {
    lower: f64,
    upper: f64,
    value: f64,
    error: f64,
}

/// Integrates `f` over `[0, ∞)`.
pub fn integrate_semi_infinite<F>(f: F, opts: &QuadratureOpts) -> Result<QuadratureResult, SpotError>
where
    F: Fn(f64) -> f64,
{
    opts.validate()?;
    let mapped = |t: f64| {
        let s = 1.0 - t;
        f(t / s) / (s * s)
    };

    let mut evaluations = 0;
    let mut segments = vec![kronrod(&mapped, 0.0, 1.0, &mut evaluations)?];
    loop {
        let value: f64 = segments.iter().map(|seg| seg.value).sum();
        let error: f64 = segments.iter().map(|seg| seg.error).sum();
        let target = opts.epsabs.max(opts.epsrel * value.abs());
        if error <= target {
            return Ok(QuadratureResult {
                value,
                abs_error: error,
                subdivisions: segments.len(),
                evaluations,
            });
        }
        if segments.len() >= opts.max_subdivisions {
            return Err(SpotError::Numerical(
                ErrorInfo::new("quadrature-no-convergence", "subdivision limit reached")
                    .with_context("subdivisions", segments.len().to_string())
                    .with_context("estimate", value.to_string())
                    .with_context("abs_error", error.to_string())
                    .with_hint("raise max_subdivisions or relax epsrel"),
            ));
        }

        let worst = segments
            .iter()
            .enumerate()
            .max_by(|(_, lhs), (_, rhs)| lhs.error.total_cmp(&rhs.error))
            .map(|(idx, _)| idx)
            .unwrap_or(0);
        let seg = segments.swap_remove(worst);
        let mid = 0.5 * (seg.lower + seg.upper);
        if mid <= seg.lower || mid >= seg.upper {
            return Err(quadrature_error(
                "quadrature-roundoff",
                "interval cannot be bisected further in double precision",
            )
            .with_context("lower", seg.lower.to_string()));
        }
        segments.push(kronrod(&mapped, seg.lower, mid, &mut evaluations)?);
        segments.push(kronrod(&mapped, mid, seg.upper, &mut evaluations)?);
    }
}

fn kronrod<F>(f: &F, lower: f64, upper: f64, evaluations: &mut usize) -> Result<Segment, SpotError>
where
    F: Fn(f64) -> f64,
{
    let centre = 0.5 * (lower + upper);
    let half = 0.5 * (upper - lower);
    let mut kronrod_sum = 0.0;
    let mut gauss_sum = 0.0;
    for (idx, (&node, &weight)) in XGK.iter().zip(WGK.iter()).enumerate() {
        let pair = [centre - half * node, centre + half * node];
        let samples = if node == 0.0 { &pair[..1] } else { &pair[..] };
        for &x in samples {
            let value = f(x);
            *evaluations += 1;
            if !value.is_finite() {
                return Err(quadrature_error("non-finite-integrand", "integrand is not finite")
                    .with_context("t", x.to_string()));
            }
            kronrod_sum += weight * value;
            if idx % 2 == 1 {
                gauss_sum += WG[idx / 2] * value;
            }
        }
    }
    let value = kronrod_sum * half;
    let error = ((kronrod_sum - gauss_sum) * half).abs();
    Ok(Segment {
        lower,
        upper,
        value,
        error,
    })
}
