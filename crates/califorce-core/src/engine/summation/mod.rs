//! Thermal frequency sums.
//!
//! Both strategies evaluate a per-frequency function `F(k0)` on a discrete set of vacuum
//! wavenumbers and return `0.5·k_B·T·Σ 2·w_n·F(k0_n)`, with TE and TM accumulated
//! separately. The zero-frequency term is not included.
//!
//! - [`psd`] - Padé spectrum decomposition nodes with an a priori order
//! - [`msd`] - Matsubara frequencies `n·K` with a relative stopping rule

pub mod msd;
pub mod psd;

pub use msd::{MatsubaraTerms, msd_sum, msd_sum_with};
pub use psd::{psd_sum, psd_sum_with};
