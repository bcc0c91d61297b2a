//! Per-frequency contributions: the radial integrand integrated over `k ∈ [0, ∞)` at
//! fixed vacuum wavenumber `k0`.

use super::error::EngineError;
use crate::core::constants::SPEED_OF_LIGHT;
use crate::core::integrand::{Observable, k_integrand};
use crate::core::optics::{Permittivity, ReflectionCoefficient};
use crate::core::quadrature::{QuadratureConfig, integrate_to_infinity};
use crate::core::term::{Polarization, PolarizationTerm};
use tracing::{instrument, trace};

/// Integrates the TE and TM integrands of `observable` over the in-plane wavevector.
///
/// The medium permittivity is evaluated once, at `omega = k0·c`. The integration runs in
/// the dimensionless variable `t = k·d` and each polarization gets its own adaptive
/// quadrature. Any integrand or quadrature failure is returned as is.
#[instrument(level = "trace", skip_all, fields(observable = observable.name(), k0 = k0))]
pub fn k0_func<P, L, R>(
    observable: Observable,
    k0: f64,
    d: f64,
    epsm: &P,
    r_left: &L,
    r_right: &R,
    config: &QuadratureConfig,
) -> Result<PolarizationTerm, EngineError>
where
    P: Permittivity + ?Sized,
    L: ReflectionCoefficient + ?Sized,
    R: ReflectionCoefficient + ?Sized,
{
    let epsm = epsm.permittivity(k0 * SPEED_OF_LIGHT);

    let integrate_component = |polarization: Polarization| -> Result<f64, EngineError> {
        let integrand = |t: f64| -> Result<f64, EngineError> {
            let term = k_integrand(observable, t / d, k0, d, epsm, r_left, r_right)?;
            Ok(term.component(polarization) / d)
        };
        let result = integrate_to_infinity(integrand, 0.0, config)?;
        trace!(
            %polarization,
            value = result.value,
            error = result.error,
            subintervals = result.subintervals,
            "Radial integral converged."
        );
        Ok(result.value)
    };

    let te = integrate_component(Polarization::Te)?;
    let tm = integrate_component(Polarization::Tm)?;
    Ok(PolarizationTerm::new(te, tm))
}

pub fn k0_func_energy<P, L, R>(
    k0: f64,
    d: f64,
    epsm: &P,
    r_left: &L,
    r_right: &R,
) -> Result<PolarizationTerm, EngineError>
where
    P: Permittivity + ?Sized,
    L: ReflectionCoefficient + ?Sized,
    R: ReflectionCoefficient + ?Sized,
{
    k0_func(
        Observable::FreeEnergy,
        k0,
        d,
        epsm,
        r_left,
        r_right,
        &QuadratureConfig::default(),
    )
}

pub fn k0_func_pressure<P, L, R>(
    k0: f64,
    d: f64,
    epsm: &P,
    r_left: &L,
    r_right: &R,
) -> Result<PolarizationTerm, EngineError>
where
    P: Permittivity + ?Sized,
    L: ReflectionCoefficient + ?Sized,
    R: ReflectionCoefficient + ?Sized,
{
    k0_func(
        Observable::Pressure,
        k0,
        d,
        epsm,
        r_left,
        r_right,
        &QuadratureConfig::default(),
    )
}

pub fn k0_func_pressuregradient<P, L, R>(
    k0: f64,
    d: f64,
    epsm: &P,
    r_left: &L,
    r_right: &R,
) -> Result<PolarizationTerm, EngineError>
where
    P: Permittivity + ?Sized,
    L: ReflectionCoefficient + ?Sized,
    R: ReflectionCoefficient + ?Sized,
{
    k0_func(
        Observable::PressureGradient,
        k0,
        d,
        epsm,
        r_left,
        r_right,
        &QuadratureConfig::default(),
    )
}
