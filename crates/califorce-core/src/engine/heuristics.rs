//! Truncation rules for the frequency sum: an a priori node count for the Padé
//! decomposition and an a posteriori stopping rule for direct Matsubara summation.

use crate::core::constants::effective_temperature;
use crate::core::term::PolarizationTerm;

/// Smallest node count the PSD strategy ever uses.
pub const MIN_PSD_ORDER: usize = 5;

/// Number of PSD nodes needed for relative accuracy `epsrel`:
/// `max(ceil((1 − 1.5·log10|epsrel|) / sqrt(Teff)), 5)` with `Teff = 4π·k_B·T·L/(ħc)`.
///
/// Colder or closer configurations (small `Teff`) need more nodes. An `epsrel` of zero
/// saturates to `usize::MAX`.
pub fn psd_order(temperature: f64, separation: f64, epsrel: f64) -> usize {
    let teff = effective_temperature(temperature, separation);
    let estimate = ((1.0 - 1.5 * epsrel.abs().log10()) / teff.sqrt()).ceil();
    (estimate as usize).max(MIN_PSD_ORDER)
}

/// Stopping rule for direct Matsubara summation.
///
/// Each component of the latest `term` is compared against the running total summed over
/// both polarizations, `|term.te / Σ| < epsrel` and `|term.tm / Σ| < epsrel`. A term that
/// is exactly zero in both channels adds nothing and stops the sum. Any NaN keeps it going.
pub fn term_below_tolerance(term: &PolarizationTerm, running: &PolarizationTerm, epsrel: f64) -> bool {
    if term.te == 0.0 && term.tm == 0.0 {
        return true;
    }
    let total = running.total();
    (term.te / total).abs() < epsrel && (term.tm / total).abs() < epsrel
}
