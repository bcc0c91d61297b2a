use crate::core::constants::thermal_energy;
use crate::core::integrand::Observable;
use crate::core::optics::{Permittivity, ReflectionCoefficient};
use crate::core::psd::PadeSpectrumDecomposition;
use crate::core::term::PolarizationTerm;
use crate::engine::config::{CalculationConfig, SummationStrategy};
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::summation::{msd_sum_with, psd_sum_with};
use crate::engine::wavenumber::k0_func;
use tracing::{info, instrument};

/// Two parallel plates and the medium filling the gap between them.
#[derive(Debug, Clone)]
pub struct Plates<L, R, M> {
    pub left: L,
    pub right: R,
    pub medium: M,
}

impl<L, R, M> Plates<L, R, M>
where
    L: ReflectionCoefficient,
    R: ReflectionCoefficient,
    M: Permittivity,
{
    pub fn new(left: L, right: R, medium: M) -> Self {
        Self {
            left,
            right,
            medium,
        }
    }
}

/// A Casimir quantity per unit area, split into the static (`n = 0`) term and the
/// finite-frequency sum.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CasimirResult {
    pub zero_frequency: PolarizationTerm,
    pub finite_frequency: PolarizationTerm,
}

impl CasimirResult {
    pub fn total(&self) -> PolarizationTerm {
        self.zero_frequency + self.finite_frequency
    }

    /// Both contributions summed over both polarizations.
    pub fn sum(&self) -> f64 {
        self.total().total()
    }
}

/// Free energy per unit area (J/m²).
pub fn free_energy<L, R, M>(
    plates: &Plates<L, R, M>,
    config: &CalculationConfig,
) -> Result<CasimirResult, EngineError>
where
    L: ReflectionCoefficient,
    R: ReflectionCoefficient,
    M: Permittivity,
{
    run(
        Observable::FreeEnergy,
        plates,
        config,
        &ProgressReporter::new(),
    )
}

/// Pressure (N/m²). Negative values are attractive.
pub fn pressure<L, R, M>(
    plates: &Plates<L, R, M>,
    config: &CalculationConfig,
) -> Result<CasimirResult, EngineError>
where
    L: ReflectionCoefficient,
    R: ReflectionCoefficient,
    M: Permittivity,
{
    run(Observable::Pressure, plates, config, &ProgressReporter::new())
}

/// Derivative of the pressure with respect to separation (N/m³).
pub fn pressure_gradient<L, R, M>(
    plates: &Plates<L, R, M>,
    config: &CalculationConfig,
) -> Result<CasimirResult, EngineError>
where
    L: ReflectionCoefficient,
    R: ReflectionCoefficient,
    M: Permittivity,
{
    run(
        Observable::PressureGradient,
        plates,
        config,
        &ProgressReporter::new(),
    )
}

/// Evaluates `observable` for `plates`: `kT/2·F(0)` plus the finite-frequency sum of
/// the configured strategy, where `F(k0)` is the radial integral at vacuum wavenumber `k0`.
#[instrument(skip_all, name = "casimir_workflow", fields(observable = observable.name()))]
pub fn run<L, R, M>(
    observable: Observable,
    plates: &Plates<L, R, M>,
    config: &CalculationConfig,
    reporter: &ProgressReporter,
) -> Result<CasimirResult, EngineError>
where
    L: ReflectionCoefficient,
    R: ReflectionCoefficient,
    M: Permittivity,
{
    let state = &config.state;
    let per_frequency = |k0: f64| {
        k0_func(
            observable,
            k0,
            state.separation,
            &plates.medium,
            &plates.left,
            &plates.right,
            &config.quadrature,
        )
    };

    // === Phase 1: Static term ===
    reporter.report(Progress::PhaseStart {
        name: "Zero Frequency",
    });
    info!(
        temperature = state.temperature,
        separation = state.separation,
        "Evaluating the zero-frequency contribution."
    );
    let zero_frequency = per_frequency(0.0)? * (0.5 * thermal_energy(state.temperature));
    reporter.report(Progress::PhaseFinish);

    // === Phase 2: Finite-frequency sum ===
    reporter.report(Progress::PhaseStart {
        name: "Finite Frequencies",
    });
    info!(
        strategy = config.strategy.name(),
        epsrel = state.epsrel,
        "Summing finite-frequency contributions."
    );
    let finite_frequency = match config.strategy {
        SummationStrategy::Psd { order } => psd_sum_with(
            &PadeSpectrumDecomposition,
            state.temperature,
            state.separation,
            &per_frequency,
            state.epsrel,
            order,
            reporter,
        )?,
        SummationStrategy::Msd { nmax } => msd_sum_with(
            state.temperature,
            state.separation,
            &per_frequency,
            state.epsrel,
            nmax,
            reporter,
        )?,
    };
    reporter.report(Progress::PhaseFinish);

    let result = CasimirResult {
        zero_frequency,
        finite_frequency,
    };
    info!(
        te = result.total().te,
        tm = result.total().tm,
        "Casimir {} calculation complete.",
        observable.name()
    );
    reporter.report(Progress::Message(format!(
        "Casimir {} (TE + TM): {:e}",
        observable.name(),
        result.sum()
    )));
    Ok(result)
}
