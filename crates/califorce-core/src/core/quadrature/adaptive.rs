use super::QuadratureError;
use super::gauss_kronrod::{RuleEstimate, gauss_kronrod_15};
use serde::Deserialize;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use tracing::trace;

/// Tolerances for adaptive integration. The defaults are the customary QUADPACK `qagi`
/// settings: `epsabs = epsrel = 1.49e-8` with at most 50 subintervals.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct QuadratureConfig {
    pub epsabs: f64,
    pub epsrel: f64,
    pub limit: usize,
}

impl Default for QuadratureConfig {
    fn default() -> Self {
        Self {
            epsabs: 1.49e-8,
            epsrel: 1.49e-8,
            limit: 50,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadratureResult {
    pub value: f64,
    pub error: f64,
    pub subintervals: usize,
}

#[derive(Debug, Clone, Copy)]
struct Subinterval {
    a: f64,
    b: f64,
    estimate: RuleEstimate,
}

impl PartialEq for Subinterval {
    fn eq(&self, other: &Self) -> bool {
        self.estimate.error == other.estimate.error
    }
}
impl Eq for Subinterval {}

impl PartialOrd for Subinterval {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Subinterval {
    fn cmp(&self, other: &Self) -> Ordering {
        self.estimate
            .error
            .partial_cmp(&other.estimate.error)
            .unwrap_or(Ordering::Equal)
    }
}

/// Integrates `f` over the finite interval `[a, b]` by global adaptive bisection: the
/// subinterval with the largest error estimate is split until the summed error drops
/// below `max(epsabs, epsrel·|value|)`.
pub fn integrate<F, E>(f: F, a: f64, b: f64, config: &QuadratureConfig) -> Result<QuadratureResult, E>
where
    F: Fn(f64) -> Result<f64, E>,
    E: From<QuadratureError>,
{
    let first = gauss_kronrod_15(&f, a, b)?;
    let mut heap = BinaryHeap::new();
    heap.push(Subinterval { a, b, estimate: first });

    let mut value = first.value;
    let mut error = first.error;

    while error > config.epsabs.max(config.epsrel * value.abs()) {
        if heap.len() >= config.limit {
            return Err(QuadratureError::MaxSubdivisions {
                limit: config.limit,
                value,
                error,
            }
            .into());
        }

        let Some(worst) = heap.pop() else {
            break;
        };

        let mid = 0.5 * (worst.a + worst.b);
        if mid == worst.a || mid == worst.b {
            return Err(QuadratureError::Roundoff {
                a: worst.a,
                b: worst.b,
            }
            .into());
        }

        let left = gauss_kronrod_15(&f, worst.a, mid)?;
        let right = gauss_kronrod_15(&f, mid, worst.b)?;

        value += left.value + right.value - worst.estimate.value;
        error += left.error + right.error - worst.estimate.error;

        heap.push(Subinterval {
            a: worst.a,
            b: mid,
            estimate: left,
        });
        heap.push(Subinterval {
            a: mid,
            b: worst.b,
            estimate: right,
        });
    }

    // Re-sum from the panels so the running updates leave no cancellation residue.
    let value: f64 = heap.iter().map(|s| s.estimate.value).sum();
    let error: f64 = heap.iter().map(|s| s.estimate.error).sum();
    trace!(value, error, subintervals = heap.len(), "Adaptive quadrature converged.");

    Ok(QuadratureResult {
        value,
        error,
        subintervals: heap.len(),
    })
}

/// Integrates `f` over `[a, ∞)` through the substitution `x = a + (1 − t)/t`,
/// `t ∈ (0, 1]`. The Kronrod abscissae never touch `t = 0`.
pub fn integrate_to_infinity<F, E>(
    f: F,
    a: f64,
    config: &QuadratureConfig,
) -> Result<QuadratureResult, E>
where
    F: Fn(f64) -> Result<f64, E>,
    E: From<QuadratureError>,
{
    let transformed = |t: f64| -> Result<f64, E> {
        let x = a + (1.0 - t) / t;
        Ok(f(x)? / (t * t))
    };
    integrate(transformed, 0.0, 1.0, config)
}
