//! One-call analysis of a user formula.

use tracing::debug;

use crate::common::Result;
use crate::config::AnalysisOptions;
use crate::formula::{FormulaProgram, compile_with};

use super::classify::{ClassificationResult, EnergyClass, classify, classify_by_magnitude};
use super::integrate::{average_power, integrate_energy, trapezoidal_energy};
use super::sampling::{PlotPoint, SampleSeries, TimeGrid};

/// Everything computed for one formula over one observation window.
#[derive(Debug, Clone, PartialEq)]
pub struct FormulaAnalysis {
    pub program: FormulaProgram,
    pub series: SampleSeries,
    /// Energy of the sampled window, always the numeric value
    pub window_energy: f64,
    /// Average power over the window: the trapezoidal estimate, or energy
    /// over span when the magnitude heuristic decides the label
    pub average_power: f64,
    pub classification: ClassificationResult,
}

impl FormulaAnalysis {
    #[inline]
    pub fn label(&self) -> EnergyClass {
        self.classification.label
    }

    /// Chart points, with `None` where the formula is not finite.
    pub fn plot_points(&self) -> Vec<PlotPoint> {
        self.series.plot_points()
    }
}

/// Compile `source` and analyze it over the window of `options`.
///
/// The options are checked first, then the formula is compiled; nothing is
/// evaluated unless both succeed.
///
/// # Examples
///
/// ```rust
/// use sigform::{AnalysisOptions, EnergyClass, analyze_formula};
///
/// let options = AnalysisOptions::new().with_interval(-10.0, 10.0).with_sample_count(1000);
/// let analysis = analyze_formula("sin(t)", &options)?;
/// assert_eq!(analysis.label(), EnergyClass::FinitePower);
/// assert!((analysis.average_power - 0.5).abs() < 0.05);
/// # Ok::<(), sigform::Error>(())
/// ```
pub fn analyze_formula(source: &str, options: &AnalysisOptions) -> Result<FormulaAnalysis> {
    options.validate()?;
    let program = compile_with(source, options.max_nodes)?;
    analyze_program(&program, options)
}

/// Analyze an already compiled program, e.g. one held in a
/// [`FormulaCache`](crate::formula::FormulaCache).
pub fn analyze_program(program: &FormulaProgram, options: &AnalysisOptions) -> Result<FormulaAnalysis> {
    let grid = TimeGrid::from_options(options)?;
    let series = SampleSeries::sample(program, &grid, options);

    let window_energy = integrate_energy(series.values(), grid.dt(), options.method);

    // Under the heuristic, power is energy over span.
    let (power, classification) = match options.magnitude_heuristic {
        Some(threshold) => {
            let power = window_energy / grid.span();
            (power, classify_by_magnitude(window_energy, power, threshold))
        },
        None => {
            let power = average_power(series.values(), grid.t_start(), grid.t_end())?;
            (power, classify(options.duration, window_energy, power))
        },
    };

    debug!(
        formula = program.source(),
        samples = grid.len(),
        energy = window_energy,
        power,
        label = %classification.label,
        "analyzed formula"
    );

    Ok(FormulaAnalysis {
        program: program.clone(),
        series,
        window_energy,
        average_power: power,
        classification,
    })
}

/// Trapezoidal energy of `program` sampled on `sample_count` points of
/// `[t_start, t_end]`.
pub fn window_energy(
    program: &FormulaProgram,
    t_start: f64,
    t_end: f64,
    sample_count: usize,
) -> Result<f64> {
    let grid = TimeGrid::new(t_start, t_end, sample_count)?;
    let values = program.evaluate_series(grid.times());
    Ok(trapezoidal_energy(&values, grid.dt()))
}

/// Average power of `program` sampled on `sample_count` points of
/// `[t_start, t_end]`.
pub fn window_power(
    program: &FormulaProgram,
    t_start: f64,
    t_end: f64,
    sample_count: usize,
) -> Result<f64> {
    let grid = TimeGrid::new(t_start, t_end, sample_count)?;
    let values = program.evaluate_series(grid.times());
    Ok(average_power(&values, t_start, t_end)?)
}
