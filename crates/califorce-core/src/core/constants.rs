//! Physical constants in SI units (CODATA 2018 exact values).

use std::f64::consts::PI;

/// Boltzmann constant (J/K).
pub const BOLTZMANN: f64 = 1.380_649e-23;

/// Reduced Planck constant (J·s).
pub const HBAR: f64 = 1.054_571_817e-34;

/// Speed of light in vacuum (m/s).
pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;

/// Wavenumber of the first Matsubara frequency, `2π·k_B·T/(ħc)`, in 1/m.
#[inline]
pub fn matsubara_wavenumber(temperature: f64) -> f64 {
    2.0 * PI * BOLTZMANN * temperature / (HBAR * SPEED_OF_LIGHT)
}

/// Dimensionless `4π·k_B·T·L/(ħc)`, twice the first Matsubara wavenumber times the separation.
#[inline]
pub fn effective_temperature(temperature: f64, separation: f64) -> f64 {
    4.0 * PI * BOLTZMANN / HBAR / SPEED_OF_LIGHT * temperature * separation
}

/// Thermal energy `k_B·T` (J).
#[inline]
pub fn thermal_energy(temperature: f64) -> f64 {
    BOLTZMANN * temperature
}
