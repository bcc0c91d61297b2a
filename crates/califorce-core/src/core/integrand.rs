//! Radial in-plane wavevector integrands of the Lifshitz formula.
//!
//! For a fixed vacuum wavenumber `k0` every observable is built from the round-trip factor
//! `g = r_L·r_R·exp(−2κd)` with `κ = sqrt(ε·k0² + k²)`:
//!
//! | observable        | kernel                                  |
//! |-------------------|-----------------------------------------|
//! | free energy       | `k/2π · log1p(−g)`                      |
//! | pressure          | `−2kκ/2π · g/(1 − g)`                   |
//! | pressure gradient | `4kκ²/2π · g/(1 − g)²`                  |
//!
//! As `g → 1` (perfect reflectors at small `κd`) the pressure and gradient kernels lose
//! precision and the logarithm diverges. Nothing is regularized here: an argument with
//! `g ≥ 1` is a domain error for the caller to handle.

use super::optics::{ReflectionCoefficient, ReflectionPair};
use super::term::{Polarization, PolarizationTerm};
use std::f64::consts::PI;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum IntegrandError {
    #[error("Domain error in {quantity}: {value} (k0 = {k0}, k = {k})")]
    Domain {
        quantity: &'static str,
        value: f64,
        k0: f64,
        k: f64,
    },
    #[error("Non-finite {polarization} reflection coefficient at k0 = {k0}, k = {k}")]
    NonFinite {
        polarization: Polarization,
        k0: f64,
        k: f64,
    },
}

/// The physical quantity a radial integrand contributes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Observable {
    FreeEnergy,
    Pressure,
    PressureGradient,
}

impl Observable {
    pub fn name(&self) -> &'static str {
        match self {
            Observable::FreeEnergy => "free energy",
            Observable::Pressure => "pressure",
            Observable::PressureGradient => "pressure gradient",
        }
    }

    /// Applies this observable's kernel to a precomputed round-trip factor `g`.
    /// Returns `None` when `g` lies outside the kernel's domain.
    #[inline]
    pub fn kernel(&self, k: f64, kappa: f64, g: f64) -> Option<f64> {
        match self {
            Observable::FreeEnergy => energy_kernel(k, g),
            Observable::Pressure => pressure_kernel(k, kappa, g),
            Observable::PressureGradient => pressure_gradient_kernel(k, kappa, g),
        }
    }
}

#[inline]
pub fn decay_constant(k: f64, k0: f64, epsm: f64) -> Option<f64> {
    let kappa_squared = epsm * k0 * k0 + k * k;
    if kappa_squared >= 0.0 {
        Some(kappa_squared.sqrt())
    } else {
        None
    }
}

#[inline]
pub fn round_trip_factor(r_left: f64, r_right: f64, kappa: f64, d: f64) -> f64 {
    r_left * r_right * (-2.0 * kappa * d).exp()
}

#[inline]
pub fn energy_kernel(k: f64, g: f64) -> Option<f64> {
    if g < 1.0 {
        Some(k / (2.0 * PI) * (-g).ln_1p())
    } else {
        None
    }
}

#[inline]
pub fn pressure_kernel(k: f64, kappa: f64, g: f64) -> Option<f64> {
    let denominator = 1.0 - g;
    if denominator != 0.0 {
        Some(-2.0 * k * kappa / (2.0 * PI) * g / denominator)
    } else {
        None
    }
}

#[inline]
pub fn pressure_gradient_kernel(k: f64, kappa: f64, g: f64) -> Option<f64> {
    let denominator = 1.0 - g;
    if denominator != 0.0 {
        Some(4.0 * k * kappa * kappa / (2.0 * PI) * g / (denominator * denominator))
    } else {
        None
    }
}

/// Evaluates the TE and TM integrands of `observable` at in-plane wavevector `k`.
///
/// `epsm` is the medium permittivity already evaluated at `k0`. The two polarizations go
/// through separate round-trip factors and kernels; they share only `κ`.
pub fn k_integrand<L, R>(
    observable: Observable,
    k: f64,
    k0: f64,
    d: f64,
    epsm: f64,
    r_left: &L,
    r_right: &R,
) -> Result<PolarizationTerm, IntegrandError>
where
    L: ReflectionCoefficient + ?Sized,
    R: ReflectionCoefficient + ?Sized,
{
    let kappa = decay_constant(k, k0, epsm).ok_or(IntegrandError::Domain {
        quantity: "kappa squared",
        value: epsm * k0 * k0 + k * k,
        k0,
        k,
    })?;

    let left = r_left.reflect(k0, k);
    let right = r_right.reflect(k0, k);
    check_finite(&left, k0, k)?;
    check_finite(&right, k0, k)?;

    let g_te = round_trip_factor(left.te, right.te, kappa, d);
    let g_tm = round_trip_factor(left.tm, right.tm, kappa, d);
    let te = apply_kernel(observable, Polarization::Te, k, k0, kappa, g_te)?;
    let tm = apply_kernel(observable, Polarization::Tm, k, k0, kappa, g_tm)?;

    Ok(PolarizationTerm::new(te, tm))
}

pub fn k_integrand_energy<L, R>(
    k: f64,
    k0: f64,
    d: f64,
    epsm: f64,
    r_left: &L,
    r_right: &R,
) -> Result<PolarizationTerm, IntegrandError>
where
    L: ReflectionCoefficient + ?Sized,
    R: ReflectionCoefficient + ?Sized,
{
    k_integrand(Observable::FreeEnergy, k, k0, d, epsm, r_left, r_right)
}

pub fn k_integrand_pressure<L, R>(
    k: f64,
    k0: f64,
    d: f64,
    epsm: f64,
    r_left: &L,
    r_right: &R,
) -> Result<PolarizationTerm, IntegrandError>
where
    L: ReflectionCoefficient + ?Sized,
    R: ReflectionCoefficient + ?Sized,
{
    k_integrand(Observable::Pressure, k, k0, d, epsm, r_left, r_right)
}

pub fn k_integrand_pressuregradient<L, R>(
    k: f64,
    k0: f64,
    d: f64,
    epsm: f64,
    r_left: &L,
    r_right: &R,
) -> Result<PolarizationTerm, IntegrandError>
where
    L: ReflectionCoefficient + ?Sized,
    R: ReflectionCoefficient + ?Sized,
{
    k_integrand(Observable::PressureGradient, k, k0, d, epsm, r_left, r_right)
}

#[inline]
fn apply_kernel(
    observable: Observable,
    polarization: Polarization,
    k: f64,
    k0: f64,
    kappa: f64,
    g: f64,
) -> Result<f64, IntegrandError> {
    observable
        .kernel(k, kappa, g)
        .ok_or(IntegrandError::Domain {
            quantity: match polarization {
                Polarization::Te => "TE round-trip factor",
                Polarization::Tm => "TM round-trip factor",
            },
            value: g,
            k0,
            k,
        })
}

fn check_finite(pair: &ReflectionPair, k0: f64, k: f64) -> Result<(), IntegrandError> {
    if !pair.tm.is_finite() {
        return Err(IntegrandError::NonFinite {
            polarization: Polarization::Tm,
            k0,
            k,
        });
    }
    if !pair.te.is_finite() {
        return Err(IntegrandError::NonFinite {
            polarization: Polarization::Te,
            k0,
            k,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::optics::ConstantReflection;

    const TOLERANCE: f64 = 1e-15;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    #[test]
    fn energy_integrand_matches_direct_logarithm_away_from_singularity() {
        let plate = ConstantReflection::uniform(0.5);
        let term = k_integrand_energy(1.0, 1.0, 1.0, 1.0, &plate, &plate).unwrap();

        let direct = (1.0 - 0.25 * (-2.0 * 2.0_f64.sqrt()).exp()).ln() / (2.0 * PI);
        assert!(f64_approx_equal(term.te, direct));
        assert!(f64_approx_equal(term.tm, direct));
        assert!(f64_approx_equal(term.te, -0.002_369_291_204_681_420_6));
    }

    #[test]
    fn energy_kernel_keeps_precision_for_tiny_round_trip_factor() {
        let g = 1e-18;
        let value = energy_kernel(2.0 * PI, g).unwrap();
        assert!(((value + 1e-18) / 1e-18).abs() < 1e-12);
        assert!(value < 0.0);
    }

    #[test]
    fn pressure_is_negative_and_gradient_positive_for_strong_reflectors() {
        let plate = ConstantReflection::uniform(0.9);
        for &d in &[1e-9, 1e-6, 1.0] {
            for &k in &[1e-3, 0.5, 10.0, 100.0] {
                let k_scaled = k / d;
                let pressure = k_integrand_pressure(k_scaled, 0.0, d, 1.0, &plate, &plate).unwrap();
                let gradient =
                    k_integrand_pressuregradient(k_scaled, 0.0, d, 1.0, &plate, &plate).unwrap();
                assert!(pressure.te < 0.0 && pressure.tm < 0.0, "k = {k_scaled}, d = {d}");
                assert!(gradient.te > 0.0 && gradient.tm > 0.0, "k = {k_scaled}, d = {d}");
            }
        }
    }

    #[test]
    fn pressure_integrand_matches_closed_form() {
        let plate = ConstantReflection::uniform(0.9);
        let (k, k0, d, epsm): (f64, f64, f64, f64) = (0.7, 0.4, 1.3, 2.0);
        let kappa = (epsm * k0 * k0 + k * k).sqrt();
        let g = 0.81 * (-2.0 * kappa * d).exp();

        let pressure = k_integrand_pressure(k, k0, d, epsm, &plate, &plate).unwrap();
        let gradient = k_integrand_pressuregradient(k, k0, d, epsm, &plate, &plate).unwrap();

        assert!(f64_approx_equal(pressure.te, -k * kappa / PI * g / (1.0 - g)));
        assert!(f64_approx_equal(
            gradient.tm,
            2.0 * k * kappa * kappa / PI * g / ((1.0 - g) * (1.0 - g))
        ));
    }

    #[test]
    fn varying_te_reflectivity_changes_only_te_component() {
        let right = ConstantReflection::new(0.6, 0.6);
        let base = ConstantReflection::new(0.8, 0.3);
        let changed = ConstantReflection::new(0.8, -0.9);

        for observable in [
            Observable::FreeEnergy,
            Observable::Pressure,
            Observable::PressureGradient,
        ] {
            let a = k_integrand(observable, 0.8, 0.2, 1.1, 1.5, &base, &right).unwrap();
            let b = k_integrand(observable, 0.8, 0.2, 1.1, 1.5, &changed, &right).unwrap();
            assert_eq!(a.tm, b.tm, "{}", observable.name());
            assert_ne!(a.te, b.te, "{}", observable.name());
        }
    }

    #[test]
    fn reflection_functions_receive_k0_and_k() {
        let left = |k0: f64, k: f64| {
            assert_eq!((k0, k), (0.25, 3.0));
            ReflectionPair::new(0.1, 0.2)
        };
        let right = ConstantReflection::uniform(1.0);
        k_integrand_energy(3.0, 0.25, 1.0, 1.0, &left, &right).unwrap();
    }

    #[test]
    fn negative_kappa_squared_is_a_domain_error() {
        let plate = ConstantReflection::uniform(0.5);
        let result = k_integrand_energy(0.1, 1.0, 1.0, -1.0, &plate, &plate);
        assert!(matches!(
            result,
            Err(IntegrandError::Domain {
                quantity: "kappa squared",
                ..
            })
        ));
    }

    #[test]
    fn round_trip_factor_of_one_is_a_domain_error_for_every_observable() {
        let plate = ConstantReflection::uniform(1.0);
        for observable in [
            Observable::FreeEnergy,
            Observable::Pressure,
            Observable::PressureGradient,
        ] {
            let result = k_integrand(observable, 0.0, 0.0, 1.0, 1.0, &plate, &plate);
            assert!(matches!(result, Err(IntegrandError::Domain { .. })));
        }
    }

    #[test]
    fn energy_with_round_trip_factor_above_one_is_a_domain_error() {
        assert_eq!(energy_kernel(1.0, 1.5), None);
        assert!(pressure_kernel(1.0, 1.0, 1.5).is_some());
    }

    #[test]
    fn non_finite_reflection_is_reported_with_its_polarization() {
        let left = |_k0: f64, _k: f64| ReflectionPair::new(0.5, f64::NAN);
        let right = ConstantReflection::uniform(0.5);
        let result = k_integrand_pressure(1.0, 1.0, 1.0, 1.0, &left, &right);
        assert!(matches!(
            result,
            Err(IntegrandError::NonFinite {
                polarization: Polarization::Te,
                ..
            })
        ));
    }

    #[test]
    fn round_trip_factor_decays_with_separation() {
        let near = round_trip_factor(0.9, 0.9, 1.0, 0.1);
        let far = round_trip_factor(0.9, 0.9, 1.0, 1.0);
        assert!(near > far);
        assert!(f64_approx_equal(round_trip_factor(0.9, 0.9, 1.0, 0.0), 0.81));
    }

    #[test]
    fn decay_constant_combines_medium_and_in_plane_parts() {
        assert_eq!(decay_constant(3.0, 2.0, 4.0), Some(5.0));
        assert_eq!(decay_constant(0.0, 1.0, -1.0), None);
    }
}
