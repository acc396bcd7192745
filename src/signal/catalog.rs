//! Named signals with a declared duration, and batch classification.
//!
//! Catalog signals are compiled from their display formula through the same
//! lexer and parser as user input. A formula that fails to compile is kept
//! as a failed entry: batch analysis reports a [`ComputationError`] for it
//! and carries on with the other signals.

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, warn};

use crate::common::{ComputationError, Error, Result};
use crate::config::AnalysisOptions;
use crate::formula::{FormulaProgram, compile};

use super::classify::{ClassificationResult, EnergyClass, SignalDurationKind, classify};
use super::decompose::{Decomposition, STANDARD_DECOMPOSITIONS};
use super::integrate::{IntegrationMethod, average_power, integrate_energy};
use super::sampling::TimeGrid;

use super::classify::SignalDurationKind::{Finite, Infinite};

/// Signals of the teaching dashboard, in display order.
const STANDARD_SIGNALS: &[(&str, &str, SignalDurationKind)] = &[
    ("x1(t)", "2*rect(2*t-1)", Finite),
    ("x2(t)", "sin(pi*t)*rect(t/2)", Finite),
    ("x3(t)", "tri(2*t)", Finite),
    ("x4(t)", "u(t-2)", Infinite),
    ("x5(t)", "u(3-t)", Infinite),
    ("x6(t)", "2*delta(t+1)-delta(t-2)+delta(t)-2*delta(t-1)", Finite),
    ("x7(t)", "rect((t-1)/2)-rect((t+1)/2)", Finite),
    ("x8(t)", "tri(t-1)-tri(t+1)", Finite),
    ("x9(t)", "rect(t/2)-tri(t)", Finite),
    // Decays fast enough to be negligible outside the observation window.
    ("x10(t)", "exp(-t)*u(t-2)", Finite),
    ("x11(t)", "sin(4*pi)", Infinite),
    ("x12(t)", "ramp(t+1)-2*ramp(t)+ramp(t-1)", Finite),
];

/// A registered signal.
#[derive(Debug, Clone)]
pub struct CatalogSignal {
    name: String,
    display_formula: String,
    duration: SignalDurationKind,
    program: std::result::Result<FormulaProgram, Error>,
    decomposition: Option<Decomposition>,
}

impl CatalogSignal {
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn display_formula(&self) -> &str {
        &self.display_formula
    }

    #[inline]
    pub fn duration(&self) -> SignalDurationKind {
        self.duration
    }

    /// The compiled program, or the error that prevented compiling it.
    pub fn program(&self) -> std::result::Result<&FormulaProgram, &Error> {
        self.program.as_ref()
    }

    pub fn is_valid(&self) -> bool {
        self.program.is_ok()
    }

    /// Steps expressing the signal in elementary signals, if known.
    pub fn decomposition(&self) -> Option<&Decomposition> {
        self.decomposition.as_ref()
    }
}

/// Ordered collection of named signals.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    signals: Vec<CatalogSignal>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The twelve signals `x1(t)` to `x12(t)` of the dashboard.
    pub fn standard() -> Self {
        let mut catalog = Self::new();
        for &(name, formula, duration) in STANDARD_SIGNALS {
            catalog.register(name, formula, duration);
        }
        for &(name, combination, steps) in STANDARD_DECOMPOSITIONS {
            match Decomposition::compile(combination, steps.iter().copied()) {
                Ok(decomposition) => {
                    catalog.set_decomposition(name, decomposition);
                },
                Err(error) => warn!(signal = name, error = %error, "decomposition not compiled"),
            }
        }
        catalog
    }

    /// Attach a decomposition to the signal called `name`.
    ///
    /// Returns false if there is no such signal. Registering the signal
    /// again drops its decomposition.
    pub fn set_decomposition(&mut self, name: &str, decomposition: Decomposition) -> bool {
        match self.signals.iter_mut().find(|s| s.name == name) {
            Some(signal) => {
                signal.decomposition = Some(decomposition);
                true
            },
            None => false,
        }
    }

    /// Compile and add a signal, replacing any signal with the same name
    /// in place.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        formula: impl Into<String>,
        duration: SignalDurationKind,
    ) -> &CatalogSignal {
        let name = name.into();
        let display_formula = formula.into();
        let program = compile(&display_formula);
        let signal = CatalogSignal {
            name,
            display_formula,
            duration,
            program,
            decomposition: None,
        };

        let index = match self.signals.iter().position(|s| s.name == signal.name) {
            Some(index) => {
                self.signals[index] = signal;
                index
            },
            None => {
                self.signals.push(signal);
                self.signals.len() - 1
            },
        };
        &self.signals[index]
    }

    pub fn get(&self, name: &str) -> Option<&CatalogSignal> {
        self.signals.iter().find(|s| s.name == name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CatalogSignal> {
        self.signals.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.signals.iter().map(|s| s.name.as_str())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.signals.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a CatalogSignal;
    type IntoIter = std::slice::Iter<'a, CatalogSignal>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Classification of one catalog signal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalReport {
    pub name: String,
    pub display_formula: String,
    pub duration: SignalDurationKind,
    /// Windowed energy for finite signals, `+∞` for infinite ones, `NaN` on error
    pub energy: f64,
    pub average_power: f64,
    pub class: EnergyClass,
    #[serde(skip)]
    pub error: Option<ComputationError>,
}

impl SignalReport {
    fn from_result(signal: &CatalogSignal, result: ClassificationResult) -> Self {
        Self {
            name: signal.name.clone(),
            display_formula: signal.display_formula.clone(),
            duration: signal.duration,
            energy: result.energy,
            average_power: result.average_power,
            class: result.label,
            error: None,
        }
    }

    fn failed(signal: &CatalogSignal, error: ComputationError) -> Self {
        Self {
            error: Some(error),
            ..Self::from_result(signal, ClassificationResult::failed())
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Aggregates over a batch.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct BatchSummary {
    /// Signals labelled as finite-energy
    pub energy_count: usize,
    /// Signals labelled as finite or infinite power
    pub power_count: usize,
    pub error_count: usize,
    /// Smallest finite energy, `None` if no energy is finite
    pub min_energy: Option<f64>,
    pub max_energy: Option<f64>,
}

impl BatchSummary {
    pub fn from_reports(reports: &[SignalReport]) -> Self {
        let mut summary = Self::default();
        for report in reports {
            match report.class {
                EnergyClass::FiniteEnergy => summary.energy_count += 1,
                EnergyClass::FinitePower | EnergyClass::InfinitePower => summary.power_count += 1,
                EnergyClass::ComputationError => summary.error_count += 1,
            }
            if report.energy.is_finite() {
                let e = report.energy;
                summary.min_energy = Some(summary.min_energy.map_or(e, |m| m.min(e)));
                summary.max_energy = Some(summary.max_energy.map_or(e, |m| m.max(e)));
            }
        }
        summary
    }
}

/// Per-signal results in catalog order, plus their summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchReport {
    pub results: Vec<SignalReport>,
    pub summary: BatchSummary,
}

impl BatchReport {
    pub fn get(&self, name: &str) -> Option<&SignalReport> {
        self.results.iter().find(|r| r.name == name)
    }
}

/// Classify every catalog signal over `[t_start, t_end]` on the default
/// 1000-point grid.
///
/// An invalid interval fails the whole call. A signal that cannot be
/// computed is reported as [`EnergyClass::ComputationError`] and does not
/// affect the others.
pub fn analyze_all(
    catalog: &Catalog,
    method: IntegrationMethod,
    t_start: f64,
    t_end: f64,
) -> Result<BatchReport> {
    let options = AnalysisOptions::catalog()
        .with_interval(t_start, t_end)
        .with_method(method);
    analyze_all_with(catalog, &options)
}

/// Classify every catalog signal with explicit options.
///
/// The declared duration of each signal overrides `options.duration`.
pub fn analyze_all_with(catalog: &Catalog, options: &AnalysisOptions) -> Result<BatchReport> {
    let grid = TimeGrid::from_options(options)?;
    debug!(
        signals = catalog.len(),
        samples = grid.len(),
        method = %options.method,
        "analyzing catalog"
    );

    let results: Vec<SignalReport> = if options.use_parallel {
        catalog
            .signals
            .par_iter()
            .map(|signal| analyze_signal(signal, &grid, options))
            .collect()
    } else {
        catalog
            .signals
            .iter()
            .map(|signal| analyze_signal(signal, &grid, options))
            .collect()
    };

    let summary = BatchSummary::from_reports(&results);
    Ok(BatchReport { results, summary })
}

fn analyze_signal(signal: &CatalogSignal, grid: &TimeGrid, options: &AnalysisOptions) -> SignalReport {
    match measure(signal, grid, options) {
        Ok(result) => SignalReport::from_result(signal, result),
        Err(error) => {
            warn!(signal = %signal.name, error = %error, "catalog signal could not be analyzed");
            SignalReport::failed(signal, error)
        },
    }
}

fn measure(
    signal: &CatalogSignal,
    grid: &TimeGrid,
    options: &AnalysisOptions,
) -> std::result::Result<ClassificationResult, ComputationError> {
    let program = signal
        .program()
        .map_err(|err| ComputationError::new(&signal.name, err.to_string()))?;
    let values = program.evaluate_series_with(grid.times(), options);

    let result = match signal.duration {
        Finite => {
            let energy = integrate_energy(&values, grid.dt(), options.method);
            classify(Finite, energy, 0.0)
        },
        Infinite => {
            let power = average_power(&values, grid.t_start(), grid.t_end())
                .map_err(|err| ComputationError::new(&signal.name, err.to_string()))?;
            classify(Infinite, f64::INFINITY, power)
        },
    };
    Ok(result)
}
