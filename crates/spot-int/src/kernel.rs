use scilib::math::bessel;
use serde::{Deserialize, Serialize};
use spot_core::PhysicalParameters;

/// Which integrand the solver evaluates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Integrand {
    /// Radial response at physical radius `radius` (metres).
    Full {
        /// Distance from the spot centre.
        radius: f64,
    },
    /// Spot-centre response used for the minimum power.
    Simplified,
}

impl Integrand {
    /// Evaluates the selected integrand at `xi`.
    pub fn eval(&self, xi: f64, params: &PhysicalParameters) -> f64 {
        match *self {
            Integrand::Full { radius } => {
                full_integrand(xi, radius, params.a, params.d, params.rho)
            }
            Integrand::Simplified => simplified_integrand(xi, params.a, params.d, params.rho),
        }
    }
}

/// Coating/substrate contrast `(rho + tanh(xi·d/a)) / (1 + rho·tanh(xi·d/a))`.
pub fn contrast_factor(xi: f64, a: f64, d: f64, rho: f64) -> f64 {
    let t = (xi * d / a).tanh();
    (rho + t) / (1.0 + rho * t)
}

/// Gaussian envelope `exp(-xi²/8)` of the heating profile in transform space.
pub fn gaussian_envelope(xi: f64) -> f64 {
    (-xi * xi / 8.0).exp()
}

/// `((rho + tanh(xi·d/a)) / (1 + rho·tanh(xi·d/a))) · J0(xi·R/a) · exp(-xi²/8)`.
pub fn full_integrand(xi: f64, radius: f64, a: f64, d: f64, rho: f64) -> f64 {
    let envelope = gaussian_envelope(xi);
    // Past underflow the Bessel factor is irrelevant and may not be finite for huge arguments.
    if envelope == 0.0 {
        return 0.0;
    }
    contrast_factor(xi, a, d, rho) * j0(xi * radius / a) * envelope
}

/// `((rho + tanh(xi·d/a)) / (1 + rho·tanh(xi·d/a))) · exp(-xi²/8)`.
pub fn simplified_integrand(xi: f64, a: f64, d: f64, rho: f64) -> f64 {
    let envelope = gaussian_envelope(xi);
    if envelope == 0.0 {
        return 0.0;
    }
    contrast_factor(xi, a, d, rho) * envelope
}

/// Above this argument the Hankel expansion replaces the power series,
/// whose alternating terms cancel badly for large `x`.
const HANKEL_CROSSOVER: f64 = 12.0;

fn j0(x: f64) -> f64 {
    let x = x.abs();
    if x == 0.0 {
        return 1.0;
    }
    if x < HANKEL_CROSSOVER {
        return bessel::j_n(0, x);
    }
    j0_hankel(x)
}

// J0(x) = sqrt(2/(πx)) · (P cos χ − Q sin χ), χ = x − π/4, with the
// asymptotic series truncated at its smallest term.
fn j0_hankel(x: f64) -> f64 {
    let mut term = 1.0_f64;
    let mut p = 1.0;
    let mut q = 0.0;
    for k in 1..40 {
        let odd = (2 * k - 1) as f64;
        let next = term * (-odd * odd) / (8.0 * k as f64 * x);
        if next.abs() >= term.abs() || next.abs() < f64::EPSILON * 1e-3 {
            break;
        }
        term = next;
        let sign = if (k / 2) % 2 == 0 { 1.0 } else { -1.0 };
        if k % 2 == 0 {
            p += sign * term;
        } else {
            q += sign * term;
        }
    }
    let chi = x - std::f64::consts::FRAC_PI_4;
    (2.0 / (std::f64::consts::PI * x)).sqrt() * (p * chi.cos() - q * chi.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contrast_is_rho_at_origin_and_one_far_out() {
        assert!((contrast_factor(0.0, 1.0, 1.0, 0.25) - 0.25).abs() < 1e-15);
        assert!((contrast_factor(50.0, 1.0, 1.0, 0.25) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn bessel_matches_reference_values_across_crossover() {
        assert_eq!(j0(0.0), 1.0);
        assert!((j0(12.0) - 0.047_689_310_796_833_54).abs() < 1e-11);
        assert!((j0(20.0) - 0.167_024_664_340_583_2).abs() < 1e-13);
        assert_eq!(j0(-20.0), j0(20.0));
    }

    #[test]
    fn envelope_underflow_short_circuits() {
        assert_eq!(full_integrand(1e200, 1.0, 1.0, 1.0, 0.5), 0.0);
        assert_eq!(simplified_integrand(1e200, 1.0, 1.0, 0.5), 0.0);
    }
}
