//! # CaLiForce Core Library
//!
//! Finite-temperature Casimir free energy, pressure and pressure gradient between two
//! parallel planar surfaces separated by a medium, following the Lifshitz formula.
//!
//! ## Architectural Philosophy
//!
//! The library keeps the same three-layer split throughout:
//!
//! - **[`core`]: The Foundation.** Stateless physics and numerics: physical constants,
//!   the polarization-resolved [`core::term::PolarizationTerm`], optical capability traits,
//!   the radial wavevector integrands, adaptive Gauss–Kronrod quadrature, and the Padé
//!   spectrum decomposition node generator.
//!
//! - **[`engine`]: The Summation Engine.** Converts a per-wavenumber contribution into a
//!   thermal sum, either by Padé spectrum decomposition (`psd_sum`) or by direct Matsubara
//!   summation with a relative stopping rule (`msd_sum`). It also hosts the semi-infinite
//!   radial quadrature wrapper (`k0_func_*`), configuration, errors and progress reporting.
//!
//! - **[`workflows`]: The Public API.** Complete calculations of the free energy, pressure
//!   and pressure gradient per unit area for a pair of plates under a
//!   [`engine::config::CalculationConfig`].

pub mod core;
pub mod engine;
pub mod workflows;
