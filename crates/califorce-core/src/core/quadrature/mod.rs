//! # Numerical Quadrature
//!
//! Adaptive Gauss–Kronrod integration used for the radial in-plane wavevector integrals.
//!
//! - [`gauss_kronrod`] - the 7-point Gauss / 15-point Kronrod rule with a QUADPACK-style
//!   error estimate
//! - [`adaptive`] - global adaptive bisection on finite and semi-infinite intervals
//!
//! Integrands are fallible (`Fn(f64) -> Result<f64, E>`); their errors propagate unchanged
//! as long as `E: From<QuadratureError>`, so callers pick the error type of their layer.

pub mod adaptive;
pub mod gauss_kronrod;

pub use adaptive::{QuadratureConfig, QuadratureResult, integrate, integrate_to_infinity};
pub use gauss_kronrod::{RuleEstimate, gauss_kronrod_15};

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum QuadratureError {
    #[error("Integrand returned a non-finite value {value} at x = {x}")]
    NonFinite { x: f64, value: f64 },
    #[error(
        "Maximum number of subintervals ({limit}) reached; estimate {value} has error {error}"
    )]
    MaxSubdivisions { limit: usize, value: f64, error: f64 },
    #[error("Subinterval [{a}, {b}] cannot be bisected further in floating point")]
    Roundoff { a: f64, b: f64 },
}
