//! Sampling, integration and energy/power classification of signals.
//!
//! This module consumes compiled formulas and turns their sampled values
//! into energies, average powers and classification labels:
//!
//! - [`sampling`]: uniform time grids and sample series
//! - [`integrate`]: trapezoidal and Simpson quadrature of `|x(t)|²`
//! - [`classify`]: duration-driven energy/power decision
//! - [`catalog`]: named signals and batch classification
//! - [`decompose`]: catalog signals expressed in elementary signals
//! - [`analysis`]: one-call analysis of a user formula

pub mod analysis;
pub mod catalog;
pub mod classify;
pub mod decompose;
pub mod derivative;
pub mod format;
pub mod integrate;
pub mod sampling;

pub use analysis::{FormulaAnalysis, analyze_formula, analyze_program, window_energy, window_power};
pub use catalog::{
    BatchReport, BatchSummary, Catalog, CatalogSignal, SignalReport, analyze_all, analyze_all_with,
};
pub use classify::{
    ClassificationResult, ClassifierState, EnergyClass, SignalDurationKind, classify,
    classify_by_magnitude,
};
pub use decompose::{
    Combination, Decomposition, DecompositionSamples, DecompositionStep, sample_decomposition,
};
pub use derivative::{DEFAULT_STEP, derivative, derivative_series, second_derivative};
pub use format::format_energy;
pub use integrate::{
    IntegrationMethod, average_power, average_power_with, integrate_energy, simpson_energy,
    trapezoidal_energy,
};
pub use sampling::{PlotPoint, SampleSeries, TimeGrid, check_grid, check_interval, linspace};
