//! Decomposition of catalog signals into elementary signals.
//!
//! A decomposition is an ordered list of steps, each a formula compiled
//! through the same pipeline as user input. The steps either build the
//! signal by successive transformations (the last step is the signal) or
//! are additive components whose sum is the signal.

use serde::Serialize;

use crate::common::Result;
use crate::config::AnalysisOptions;
use crate::formula::{FormulaProgram, compile};

use super::catalog::CatalogSignal;
use super::sampling::{PlotPoint, SampleSeries, TimeGrid};

/// How the steps of a decomposition give back the signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Combination {
    /// Each step transforms the previous one; the last step is the signal.
    Sequence,
    /// The steps are components added together.
    Sum,
}

use self::Combination::{Sequence, Sum};

type StepTable = &'static [(&'static str, &'static str)];

/// Decompositions of the standard catalog, keyed by signal name.
pub(crate) const STANDARD_DECOMPOSITIONS: &[(&str, Combination, StepTable)] = &[
    (
        "x1(t)",
        Sequence,
        &[
            ("rect(t): centred on 0, width 1", "rect(t)"),
            ("Time compression: rect(2t) has width 1/2", "rect(2t)"),
            ("Shift: rect(2t-1) = rect(2(t-0.5)) is centred on t = 0.5", "rect(2t-1)"),
            ("Amplification: 2 rect(2t-1)", "2rect(2t-1)"),
        ],
    ),
    (
        "x2(t)",
        Sequence,
        &[
            ("rect(t/2): window of width 2 centred on 0", "rect(t/2)"),
            ("sin(πt): sinusoid of frequency 1/2", "sin(pi*t)"),
            ("Product: windowed sinusoid", "sin(pi*t)*rect(t/2)"),
        ],
    ),
    (
        "x3(t)",
        Sequence,
        &[
            ("tri(t): triangle of width 2 centred on 0", "tri(t)"),
            ("Compression: tri(2t) has width 1", "tri(2t)"),
        ],
    ),
    (
        "x4(t)",
        Sequence,
        &[
            ("u(t): unit step at t = 0", "u(t)"),
            ("Shift: u(t-2) starts at t = 2", "u(t-2)"),
        ],
    ),
    (
        "x5(t)",
        Sequence,
        &[
            ("u(t): unit step", "u(t)"),
            ("Reversal: u(-t)", "u(-t)"),
            ("Shift: u(3-t) = u(-(t-3)) is active for t <= 3", "u(3-t)"),
        ],
    ),
    (
        "x6(t)",
        Sum,
        &[
            ("2δ(t+1): impulse of weight 2 at t = -1", "2delta(t+1)"),
            ("-δ(t-2): negative impulse at t = 2", "-delta(t-2)"),
            ("δ(t): impulse at t = 0", "delta(t)"),
            ("-2δ(t-1): impulse of weight -2 at t = 1", "-2delta(t-1)"),
        ],
    ),
    (
        "x7(t)",
        Sequence,
        &[
            ("rect((t-1)/2): rectangle of width 2 centred on t = 1", "rect((t-1)/2)"),
            ("rect((t+1)/2): rectangle of width 2 centred on t = -1", "rect((t+1)/2)"),
            ("Difference of the two rectangles", "rect((t-1)/2) - rect((t+1)/2)"),
        ],
    ),
    (
        "x8(t)",
        Sequence,
        &[
            ("tri(t-1): triangle centred on t = 1", "tri(t-1)"),
            ("tri(t+1): triangle centred on t = -1", "tri(t+1)"),
            ("Difference: tri(t-1) - tri(t+1)", "tri(t-1) - tri(t+1)"),
        ],
    ),
    (
        "x9(t)",
        Sequence,
        &[
            ("rect(t/2): rectangle of width 2", "rect(t/2)"),
            ("tri(t): triangle of width 2", "tri(t)"),
            ("Difference: rect(t/2) - tri(t)", "rect(t/2) - tri(t)"),
        ],
    ),
    (
        "x10(t)",
        Sequence,
        &[
            ("u(t-2): step starting at t = 2", "u(t-2)"),
            ("exp(-t): decaying exponential", "exp(-t)"),
            ("Product: exp(-t) u(t-2)", "exp(-t)*u(t-2)"),
        ],
    ),
    (
        "x12(t)",
        Sequence,
        &[
            ("ramp(t+1): ramp starting at t = -1", "ramp(t+1)"),
            ("-2 ramp(t): inverted ramp of slope 2 at t = 0", "-2ramp(t)"),
            ("ramp(t-1): ramp starting at t = 1", "ramp(t-1)"),
            ("Sum: ramp(t+1) - 2 ramp(t) + ramp(t-1) = tri(t)", "ramp(t+1) - 2ramp(t) + ramp(t-1)"),
        ],
    ),
];

/// One step of a decomposition.
#[derive(Debug, Clone, PartialEq)]
pub struct DecompositionStep {
    description: String,
    program: FormulaProgram,
}

impl DecompositionStep {
    #[inline]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The step formula as written.
    #[inline]
    pub fn formula(&self) -> &str {
        self.program.source()
    }

    #[inline]
    pub fn program(&self) -> &FormulaProgram {
        &self.program
    }
}

/// Ordered steps expressing a signal in elementary signals.
#[derive(Debug, Clone, PartialEq)]
pub struct Decomposition {
    combination: Combination,
    steps: Vec<DecompositionStep>,
}

impl Decomposition {
    /// Compile `(description, formula)` steps.
    ///
    /// Fails on the first step that does not compile.
    pub fn compile<I, D, F>(combination: Combination, steps: I) -> Result<Self>
    where
        I: IntoIterator<Item = (D, F)>,
        D: Into<String>,
        F: AsRef<str>,
    {
        let steps = steps
            .into_iter()
            .map(|(description, formula)| {
                Ok(DecompositionStep {
                    description: description.into(),
                    program: compile(formula.as_ref())?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { combination, steps })
    }

    #[inline]
    pub fn combination(&self) -> Combination {
        self.combination
    }

    #[inline]
    pub fn steps(&self) -> &[DecompositionStep] {
        &self.steps
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Sample every step on `grid`, in step order.
    pub fn sample_steps(&self, grid: &TimeGrid, options: &AnalysisOptions) -> Vec<SampleSeries> {
        self.steps
            .iter()
            .map(|step| SampleSeries::sample(&step.program, grid, options))
            .collect()
    }

    /// Values the steps give back for the whole signal at each instant of
    /// `ts`. An empty decomposition recombines to zero.
    pub fn recombine(&self, ts: &[f64], options: &AnalysisOptions) -> Vec<f64> {
        match (self.combination, self.steps.last()) {
            (_, None) => vec![0.0; ts.len()],
            (Sequence, Some(last)) => last.program.evaluate_series_with(ts, options),
            (Sum, Some(_)) => {
                let mut total = vec![0.0; ts.len()];
                for step in &self.steps {
                    let values = step.program.evaluate_series_with(ts, options);
                    for (acc, v) in total.iter_mut().zip(values) {
                        *acc += v;
                    }
                }
                total
            },
        }
    }
}

/// A signal and each of its steps sampled on the same grid, for
/// superposition on one chart.
#[derive(Debug, Clone, PartialEq)]
pub struct DecompositionSamples {
    pub original: SampleSeries,
    pub steps: Vec<SampleSeries>,
}

impl DecompositionSamples {
    /// Chart points of the original signal.
    pub fn original_points(&self) -> Vec<PlotPoint> {
        self.original.plot_points()
    }

    /// Chart points of step `index`, if there is such a step.
    pub fn step_points(&self, index: usize) -> Option<Vec<PlotPoint>> {
        self.steps.get(index).map(SampleSeries::plot_points)
    }
}

/// Sample a catalog signal and its decomposition over the window of
/// `options`.
///
/// Returns `Ok(None)` when the signal has no decomposition, and the compile
/// error when the signal itself failed to compile.
pub fn sample_decomposition(
    signal: &CatalogSignal,
    options: &AnalysisOptions,
) -> Result<Option<DecompositionSamples>> {
    let Some(decomposition) = signal.decomposition() else {
        return Ok(None);
    };
    let program = signal.program().map_err(Clone::clone)?;
    let grid = TimeGrid::from_options(options)?;

    Ok(Some(DecompositionSamples {
        original: SampleSeries::sample(program, &grid, options),
        steps: decomposition.sample_steps(&grid, options),
    }))
}
