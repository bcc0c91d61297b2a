//! Padé spectrum decomposition (PSD) of the Bose function.
//!
//! The `[N−1/N]` decomposition approximates
//!
//! ```text
//! 1/(1 − e^{−x}) ≈ 1/x + 1/2 + Σ_j 2·η_j·x / (x² + ξ_j²),   j = 1..N
//! ```
//!
//! with poles `ξ_j` and residues `η_j` obtained from the eigenvalues of two symmetric
//! tridiagonal matrices. Low-lying poles converge to the Matsubara values `2πj` with unit
//! residues, while the few high poles absorb the tail of the Matsubara series. Used as
//! node set of the frequency summation, `N` poles replace a much longer Matsubara sum.

use nalgebra::DMatrix;
use std::cmp::Ordering;
use thiserror::Error;
use tracing::{instrument, trace};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NodeError {
    #[error("Node set has {xi} abscissas but {eta} weights")]
    LengthMismatch { xi: usize, eta: usize },
    #[error("Node generator returned {produced} nodes for requested order {requested}")]
    WrongOrder { requested: usize, produced: usize },
    #[error("Padé decomposition of order {order} is not representable in f64")]
    Decomposition { order: usize },
}

/// Paired abscissas `ξ_i` and weights `η_i` of equal length.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NodeSet {
    xi: Vec<f64>,
    eta: Vec<f64>,
}

impl NodeSet {
    pub fn new(xi: Vec<f64>, eta: Vec<f64>) -> Result<Self, NodeError> {
        if xi.len() != eta.len() {
            return Err(NodeError::LengthMismatch {
                xi: xi.len(),
                eta: eta.len(),
            });
        }
        Ok(Self { xi, eta })
    }

    pub fn len(&self) -> usize {
        self.xi.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xi.is_empty()
    }

    pub fn xi(&self) -> &[f64] {
        &self.xi
    }

    pub fn eta(&self) -> &[f64] {
        &self.eta
    }

    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.xi.iter().copied().zip(self.eta.iter().copied())
    }
}

/// Produces a node set of exactly the requested order.
pub trait NodeGenerator: Sync {
    fn generate(&self, order: usize) -> Result<NodeSet, NodeError>;
}

impl<F> NodeGenerator for F
where
    F: Fn(usize) -> Result<NodeSet, NodeError> + Sync,
{
    fn generate(&self, order: usize) -> Result<NodeSet, NodeError> {
        self(order)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PadeSpectrumDecomposition;

impl NodeGenerator for PadeSpectrumDecomposition {
    #[instrument(level = "debug", skip(self), name = "psd_nodes")]
    fn generate(&self, order: usize) -> Result<NodeSet, NodeError> {
        if order == 0 {
            return Ok(NodeSet::default());
        }

        let size = order
            .checked_mul(2)
            .ok_or(NodeError::Decomposition { order })?;
        let b = bose_coefficients(size);
        let xi = smallest_poles(&b, order);
        let zeta = smallest_poles(&b[1..], order - 1);

        let prefactor = order as f64 * b[order] / 2.0;
        let eta: Vec<f64> = xi
            .iter()
            .enumerate()
            .map(|(j, &xi_j)| {
                // Interleave numerator and denominator factors; the full products overflow
                // long before the ratio does.
                let others = xi
                    .iter()
                    .enumerate()
                    .filter(|&(k, _)| k != j)
                    .map(|(_, &xi_k)| xi_k);
                zeta.iter().zip(others).fold(prefactor, |acc, (&zeta_k, xi_k)| {
                    acc * (zeta_k * zeta_k - xi_j * xi_j) / (xi_k * xi_k - xi_j * xi_j)
                })
            })
            .collect();

        if xi.iter().chain(eta.iter()).any(|v| !v.is_finite()) {
            return Err(NodeError::Decomposition { order });
        }

        trace!(first_pole = xi[0], last_pole = xi[order - 1], "PSD nodes generated.");
        NodeSet::new(xi, eta)
    }
}

fn bose_coefficients(count: usize) -> Vec<f64> {
    (1..=count).map(|m| (2 * m + 1) as f64).collect()
}

/// The `count` smallest poles `2/λ` over the largest eigenvalues `λ` of the symmetric
/// tridiagonal matrix with off-diagonal entries `1/sqrt(b_m·b_{m+1})`, ascending.
fn smallest_poles(b: &[f64], count: usize) -> Vec<f64> {
    if count == 0 {
        return Vec::new();
    }

    let n = b.len();
    let matrix = DMatrix::from_fn(n, n, |i, j| {
        if i + 1 == j || j + 1 == i {
            1.0 / (b[i] * b[j]).sqrt()
        } else {
            0.0
        }
    });

    let mut eigenvalues: Vec<f64> = matrix.symmetric_eigenvalues().iter().copied().collect();
    eigenvalues.sort_by(|a, b| b.partial_cmp(a).unwrap_or(Ordering::Equal));

    eigenvalues
        .into_iter()
        .take(count)
        .map(|lambda| 2.0 / lambda)
        .collect()
}
