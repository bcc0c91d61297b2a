//! # Workflows Module
//!
//! Top-level entry points for complete Casimir calculations.
//!
//! ## Overview
//!
//! A workflow takes a plate configuration and a
//! [`CalculationConfig`](crate::engine::config::CalculationConfig), evaluates the static
//! Matsubara term, runs the configured summation strategy for the rest, and returns both
//! parts separately so callers can inspect the thermal and quantum contributions.
//!
//! ## Architecture
//!
//! - **Casimir Workflow** ([`casimir`]) - Free energy, pressure and pressure gradient per
//!   unit area between two parallel plates.

pub mod casimir;
