use crate::core::constants::{matsubara_wavenumber, thermal_energy};
use crate::core::psd::{NodeError, NodeGenerator, PadeSpectrumDecomposition};
use crate::core::term::PolarizationTerm;
use crate::engine::error::EngineError;
use crate::engine::heuristics::psd_order;
use crate::engine::progress::{Progress, ProgressReporter};
use std::f64::consts::PI;
use tracing::{debug, instrument, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Finite-frequency sum over Padé spectrum decomposition nodes.
///
/// Without an explicit `order` the node count comes from
/// [`psd_order`](crate::engine::heuristics::psd_order). Exactly `order` evaluations of
/// `func` are made, at `k0 = K·xi_i/2π`.
pub fn psd_sum<F>(
    temperature: f64,
    separation: f64,
    func: F,
    epsrel: f64,
    order: Option<usize>,
) -> Result<PolarizationTerm, EngineError>
where
    F: Fn(f64) -> Result<PolarizationTerm, EngineError> + Sync,
{
    psd_sum_with(
        &PadeSpectrumDecomposition,
        temperature,
        separation,
        func,
        epsrel,
        order,
        &ProgressReporter::new(),
    )
}

/// [`psd_sum`] with an injected node generator and progress reporter.
#[instrument(skip_all, name = "psd_sum", fields(temperature = temperature, separation = separation))]
pub fn psd_sum_with<G, F>(
    generator: &G,
    temperature: f64,
    separation: f64,
    func: F,
    epsrel: f64,
    order: Option<usize>,
    reporter: &ProgressReporter,
) -> Result<PolarizationTerm, EngineError>
where
    G: NodeGenerator + ?Sized,
    F: Fn(f64) -> Result<PolarizationTerm, EngineError> + Sync,
{
    let order = match order {
        Some(order) => order,
        None => {
            let order = psd_order(temperature, separation, epsrel);
            debug!(order, epsrel, "PSD order chosen from heuristic.");
            order
        }
    };

    let nodes = generator.generate(order)?;
    if nodes.len() != order {
        return Err(NodeError::WrongOrder {
            requested: order,
            produced: nodes.len(),
        }
        .into());
    }

    let wavenumber = matsubara_wavenumber(temperature);
    let pairs: Vec<(f64, f64)> = nodes.iter().collect();
    reporter.report(Progress::TaskStart {
        total_steps: Some(order as u64),
    });

    #[cfg(not(feature = "parallel"))]
    let iterator = pairs.iter().enumerate();

    #[cfg(feature = "parallel")]
    let iterator = pairs.par_iter().enumerate();

    let weighted: Vec<PolarizationTerm> = iterator
        .map(|(index, &(xi, eta))| {
            let term = func(wavenumber * xi / (2.0 * PI))?;
            trace!(index, xi, te = term.te, tm = term.tm, "PSD term evaluated.");
            reporter.report(Progress::TaskIncrement { index, term });
            Ok(term * (2.0 * eta))
        })
        .collect::<Result<Vec<_>, EngineError>>()?;

    // Sequential reduction in node order keeps the result independent of thread count.
    let sum: PolarizationTerm = weighted.into_iter().sum();
    reporter.report(Progress::TaskFinish {
        steps: order as u64,
    });

    Ok(sum * (0.5 * thermal_energy(temperature)))
}
