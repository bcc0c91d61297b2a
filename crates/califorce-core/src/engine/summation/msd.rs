use crate::core::constants::{matsubara_wavenumber, thermal_energy};
use crate::core::term::PolarizationTerm;
use crate::engine::error::EngineError;
use crate::engine::heuristics::term_below_tolerance;
use crate::engine::progress::{Progress, ProgressReporter};
use tracing::{debug, instrument, trace, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Lazily evaluates `func(n·K)` for `n = 1, 2, ...`, up to `nmax` when given.
///
/// Without a bound the iterator never ends on its own.
pub struct MatsubaraTerms<F> {
    func: F,
    wavenumber: f64,
    next_index: usize,
    nmax: Option<usize>,
}

impl<F> MatsubaraTerms<F>
where
    F: Fn(f64) -> Result<PolarizationTerm, EngineError>,
{
    pub fn new(func: F, wavenumber: f64, nmax: Option<usize>) -> Self {
        Self {
            func,
            wavenumber,
            next_index: 1,
            nmax,
        }
    }
}

impl<F> Iterator for MatsubaraTerms<F>
where
    F: Fn(f64) -> Result<PolarizationTerm, EngineError>,
{
    type Item = (usize, Result<PolarizationTerm, EngineError>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.nmax.is_some_and(|nmax| self.next_index > nmax) {
            return None;
        }
        let n = self.next_index;
        self.next_index += 1;
        Some((n, (self.func)(self.wavenumber * n as f64)))
    }
}

/// Finite-frequency sum over the Matsubara wavenumbers `n·K`, `n ≥ 1`.
///
/// With `nmax` exactly `nmax` terms are evaluated. Without it terms are added until
/// [`term_below_tolerance`] holds for the latest one; a series that never satisfies the
/// rule keeps this call running indefinitely.
pub fn msd_sum<F>(
    temperature: f64,
    separation: f64,
    func: F,
    epsrel: f64,
    nmax: Option<usize>,
) -> Result<PolarizationTerm, EngineError>
where
    F: Fn(f64) -> Result<PolarizationTerm, EngineError> + Sync,
{
    msd_sum_with(
        temperature,
        separation,
        func,
        epsrel,
        nmax,
        &ProgressReporter::new(),
    )
}

#[instrument(skip_all, name = "msd_sum", fields(temperature = temperature, separation = separation))]
pub fn msd_sum_with<F>(
    temperature: f64,
    separation: f64,
    func: F,
    epsrel: f64,
    nmax: Option<usize>,
    reporter: &ProgressReporter,
) -> Result<PolarizationTerm, EngineError>
where
    F: Fn(f64) -> Result<PolarizationTerm, EngineError> + Sync,
{
    let wavenumber = matsubara_wavenumber(temperature);
    reporter.report(Progress::TaskStart {
        total_steps: nmax.map(|n| n as u64),
    });

    let (sum, steps) = match nmax {
        Some(nmax) => (
            fixed_count_sum(&func, wavenumber, epsrel, nmax, reporter)?,
            nmax,
        ),
        None => adaptive_sum(&func, wavenumber, epsrel, reporter)?,
    };

    reporter.report(Progress::TaskFinish {
        steps: steps as u64,
    });
    Ok(sum * (0.5 * thermal_energy(temperature)))
}

fn adaptive_sum<F>(
    func: &F,
    wavenumber: f64,
    epsrel: f64,
    reporter: &ProgressReporter,
) -> Result<(PolarizationTerm, usize), EngineError>
where
    F: Fn(f64) -> Result<PolarizationTerm, EngineError>,
{
    let mut sum = PolarizationTerm::default();
    for (n, term) in MatsubaraTerms::new(func, wavenumber, None) {
        let term = term?;
        sum += term * 2.0;
        trace!(n, te = term.te, tm = term.tm, "Matsubara term evaluated.");
        reporter.report(Progress::TaskIncrement { index: n, term });

        if term_below_tolerance(&term, &sum, epsrel) {
            debug!(terms = n, epsrel, "Matsubara sum converged.");
            return Ok((sum, n));
        }
    }
    Ok((sum, 0))
}

fn fixed_count_sum<F>(
    func: &F,
    wavenumber: f64,
    epsrel: f64,
    nmax: usize,
    reporter: &ProgressReporter,
) -> Result<PolarizationTerm, EngineError>
where
    F: Fn(f64) -> Result<PolarizationTerm, EngineError> + Sync,
{
    let indices: Vec<usize> = (1..=nmax).collect();

    #[cfg(not(feature = "parallel"))]
    let iterator = indices.iter();

    #[cfg(feature = "parallel")]
    let iterator = indices.par_iter();

    let terms: Vec<PolarizationTerm> = iterator
        .map(|&n| {
            let term = func(wavenumber * n as f64)?;
            trace!(n, te = term.te, tm = term.tm, "Matsubara term evaluated.");
            reporter.report(Progress::TaskIncrement { index: n, term });
            Ok(term)
        })
        .collect::<Result<Vec<_>, EngineError>>()?;

    let sum: PolarizationTerm = terms.iter().map(|&term| term * 2.0).sum();

    if let Some(last) = terms
        .last()
        .filter(|last| !term_below_tolerance(last, &sum, epsrel))
    {
        warn!(
            nmax,
            epsrel,
            te = last.te,
            tm = last.tm,
            "Last Matsubara term is still above the relative tolerance."
        );
    }
    Ok(sum)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::BOLTZMANN;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const TEMPERATURE: f64 = 300.0;
    const SEPARATION: f64 = 1e-6;

    fn relative_error(value: f64, expected: f64) -> f64 {
        ((value - expected) / expected).abs()
    }

    fn geometric(ratio: f64) -> impl Fn(f64) -> Result<PolarizationTerm, EngineError> + Sync {
        let wavenumber = matsubara_wavenumber(TEMPERATURE);
        move |k0: f64| {
            let n = (k0 / wavenumber).round();
            let value = ratio.powf(n);
            Ok(PolarizationTerm::new(value, value))
        }
    }

    fn geometric_closed_form(ratio: f64) -> f64 {
        0.5 * BOLTZMANN * TEMPERATURE * 2.0 * ratio / (1.0 - ratio)
    }

    /// With equal TE and TM terms the stopping rule compares each term against four times
    /// the running per-polarization sum, so the truncated tail stays below
    /// `4·epsrel·r/(1 − r)` relative to the limit.
    fn geometric_truncation_bound(ratio: f64, epsrel: f64) -> f64 {
        4.0 * epsrel * ratio / (1.0 - ratio)
    }

    #[test]
    fn geometric_series_terminates_at_closed_form() {
        for &(ratio, epsrel) in &[(0.5, 1e-10), (0.3, 1e-8), (0.5, 1e-8), (0.9, 1e-8)] {
            let result = msd_sum(TEMPERATURE, SEPARATION, geometric(ratio), epsrel, None).unwrap();
            let expected = geometric_closed_form(ratio);
            let bound = geometric_truncation_bound(ratio, epsrel);
            assert!(relative_error(result.te, expected) < bound, "{ratio}");
            assert!(relative_error(result.tm, expected) < bound, "{ratio}");
        }
    }

    #[test]
    fn stopping_rule_determines_number_of_terms() {
        let calls = AtomicUsize::new(0);
        let series = geometric(0.5);
        let func = |k0: f64| {
            calls.fetch_add(1, Ordering::SeqCst);
            series(k0)
        };
        msd_sum(TEMPERATURE, SEPARATION, func, 1e-10, None).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 32);
    }

    #[test]
    fn explicit_nmax_evaluates_exactly_nmax_terms() {
        for &epsrel in &[1.0, 1e-14] {
            let calls = AtomicUsize::new(0);
            let series = geometric(0.5);
            let func = |k0: f64| {
                calls.fetch_add(1, Ordering::SeqCst);
                series(k0)
            };
            msd_sum(TEMPERATURE, SEPARATION, func, epsrel, Some(9)).unwrap();
            assert_eq!(calls.load(Ordering::SeqCst), 9);
        }
    }

    #[test]
    fn explicit_nmax_sums_partial_series() {
        let result = msd_sum(TEMPERATURE, SEPARATION, geometric(0.5), 1e-8, Some(3)).unwrap();
        let expected = 0.5 * BOLTZMANN * TEMPERATURE * 2.0 * (0.5 + 0.25 + 0.125);
        assert!(relative_error(result.te, expected) < 1e-14);
    }

    #[test]
    fn zero_nmax_gives_zero() {
        let result = msd_sum(TEMPERATURE, SEPARATION, geometric(0.5), 1e-8, Some(0)).unwrap();
        assert_eq!(result, PolarizationTerm::default());
    }

    #[test]
    fn result_is_finite_for_bounded_function() {
        let func = |k0: f64| -> Result<PolarizationTerm, EngineError> {
            let value = (-k0 * SEPARATION).exp();
            Ok(PolarizationTerm::new(value, 2.0 * value))
        };
        let result = msd_sum(TEMPERATURE, SEPARATION, func, 1e-8, None).unwrap();
        assert!(result.is_finite());
    }

    #[test]
    fn identically_zero_function_stops_after_first_term() {
        let calls = AtomicUsize::new(0);
        let func = |_k0: f64| -> Result<PolarizationTerm, EngineError> {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(PolarizationTerm::default())
        };
        let result = msd_sum(TEMPERATURE, SEPARATION, func, 1e-8, None).unwrap();
        assert_eq!(result, PolarizationTerm::default());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn matsubara_terms_visit_integer_multiples_of_wavenumber() {
        let func = |k0: f64| -> Result<PolarizationTerm, EngineError> {
            Ok(PolarizationTerm::new(k0, -k0))
        };
        let terms: Vec<(usize, PolarizationTerm)> = MatsubaraTerms::new(func, 2.5, Some(3))
            .map(|(n, term)| (n, term.unwrap()))
            .collect();
        assert_eq!(
            terms,
            vec![
                (1, PolarizationTerm::new(2.5, -2.5)),
                (2, PolarizationTerm::new(5.0, -5.0)),
                (3, PolarizationTerm::new(7.5, -7.5)),
            ]
        );
    }

    #[test]
    fn unbounded_matsubara_terms_keep_going() {
        let func = |_k0: f64| -> Result<PolarizationTerm, EngineError> {
            Ok(PolarizationTerm::new(1.0, 1.0))
        };
        assert_eq!(MatsubaraTerms::new(func, 1.0, None).take(1000).count(), 1000);
    }

    #[test]
    fn components_are_accumulated_independently() {
        let series = geometric(0.4);
        let func = |k0: f64| -> Result<PolarizationTerm, EngineError> {
            let term = series(k0)?;
            Ok(PolarizationTerm::new(term.te, 0.0))
        };
        let result = msd_sum(TEMPERATURE, SEPARATION, func, 1e-8, None).unwrap();
        assert_eq!(result.tm, 0.0);
        assert!(relative_error(result.te, geometric_closed_form(0.4)) < 1e-7);
    }

    #[test]
    fn function_errors_stop_the_adaptive_sum() {
        let func = |k0: f64| -> Result<PolarizationTerm, EngineError> {
            Err(EngineError::FrequencyFunction {
                k0,
                reason: "no data".to_string(),
            })
        };
        let result = msd_sum(TEMPERATURE, SEPARATION, func, 1e-8, None);
        assert!(matches!(result, Err(EngineError::FrequencyFunction { .. })));
    }

    #[test]
    fn reporter_sees_unknown_length_for_adaptive_sum() {
        let started = AtomicUsize::new(usize::MAX);
        let finished = AtomicUsize::new(0);
        let reporter = ProgressReporter::with_callback(Box::new(|event| match event {
            Progress::TaskStart { total_steps } => {
                started.store(total_steps.map_or(0, |s| s as usize), Ordering::SeqCst)
            }
            Progress::TaskFinish { steps } => finished.store(steps as usize, Ordering::SeqCst),
            _ => {}
        }));
        msd_sum_with(TEMPERATURE, SEPARATION, geometric(0.5), 1e-10, None, &reporter).unwrap();
        assert_eq!(started.load(Ordering::SeqCst), 0);
        assert_eq!(finished.load(Ordering::SeqCst), 32);
    }
}
