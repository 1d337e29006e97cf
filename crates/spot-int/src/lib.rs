#![deny(missing_docs)]
#![doc = "Integrand kernels, adaptive semi-infinite quadrature and the reciprocal integral solver."]

/// Closed-form integrands of the thin-coating heat transfer model.
pub mod kernel;
/// Adaptive Gauss–Kronrod quadrature on the half line.
pub mod quadrature;
/// Integral solver returning the reciprocal power.
pub mod solver;

pub use kernel::{
    contrast_factor, full_integrand, gaussian_envelope, simplified_integrand, Integrand,
};
pub use quadrature::{integrate_semi_infinite, QuadratureResult};
pub use solver::{IntegralSolver, Solution};
