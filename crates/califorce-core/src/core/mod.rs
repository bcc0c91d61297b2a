//! # Core Module
//!
//! Stateless physics and numerics shared by every calculation in CaLiForce.
//!
//! ## Overview
//!
//! Nothing in this layer knows about temperatures or summation strategies. It provides
//! the pieces the engine assembles into a thermal sum: the per-wavevector integrand of
//! the Lifshitz formula, a quadrature to integrate it, and a node generator for the
//! frequency sum.
//!
//! ## Architecture
//!
//! - **Physical Constants** ([`constants`]) - CODATA values and the derived Matsubara scales
//! - **Polarization Bookkeeping** ([`term`]) - The TE/TM pair every intermediate result carries
//! - **Optical Capabilities** ([`optics`]) - Reflection and permittivity traits with closure impls
//! - **Radial Integrands** ([`integrand`]) - Energy, pressure and pressure gradient kernels
//! - **Quadrature** ([`quadrature`]) - Adaptive Gauss–Kronrod on finite and semi-infinite intervals
//! - **Frequency Nodes** ([`psd`]) - Padé spectrum decomposition of the Bose function

pub mod constants;
pub mod integrand;
pub mod optics;
pub mod psd;
pub mod quadrature;
pub mod term;
