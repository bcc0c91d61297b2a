//! # Engine Module
//!
//! Turns per-frequency contributions into accuracy-controlled thermal sums.
//!
//! ## Overview
//!
//! The engine owns everything that depends on temperature and accuracy targets. A
//! per-frequency function (usually a radial integral from [`wavenumber`]) is handed to one
//! of two summation strategies, which decide where to evaluate it and how many times.
//!
//! ## Architecture
//!
//! - **Per-Frequency Integrals** ([`wavenumber`]) - Semi-infinite radial quadrature at fixed `k0`
//! - **Summation Strategies** ([`summation`]) - Padé spectrum decomposition and Matsubara sums
//! - **Truncation Heuristics** ([`heuristics`]) - PSD order estimate and MSD stopping rule
//! - **Configuration** ([`config`]) - Strategy selection, tolerances, TOML loading
//! - **Physical State** ([`state`]) - Temperature, separation and accuracy target
//! - **Progress Monitoring** ([`progress`]) - Optional callbacks for long calculations
//! - **Error Handling** ([`error`]) - Engine-level error type wrapping the core failures
//!
//! ## Parallelism
//!
//! With the `parallel` feature the PSD strategy and fixed-count Matsubara sums evaluate
//! their terms on the rayon pool. Terms are reduced in index order afterwards, so results
//! do not depend on scheduling.

pub mod config;
pub mod error;
pub mod heuristics;
pub mod progress;
pub mod state;
pub mod summation;
pub mod wavenumber;
