//! Uniform time grids and sampled signal values.

use serde::{Deserialize, Serialize};

use crate::common::PreconditionError;
use crate::config::AnalysisOptions;
use crate::formula::FormulaProgram;

/// Smallest grid that has a step.
pub const MIN_GRID_SAMPLES: usize = 2;

/// `n` evenly spaced points from `start` to `end`, both included.
///
/// `linspace(a, b, 1)` is `[a]` and `linspace(a, b, 0)` is empty.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        },
    }
}

/// Validate the bounds of an observation window.
///
/// Both bounds must be finite, `t_end` must exceed `t_start`, and the span
/// itself must be representable.
pub fn check_interval(t_start: f64, t_end: f64) -> Result<(), PreconditionError> {
    if !t_start.is_finite() || !t_end.is_finite() {
        return Err(PreconditionError::NonFiniteBound { t_start, t_end });
    }
    if t_end <= t_start {
        return Err(PreconditionError::EmptyInterval { t_start, t_end });
    }
    if !(t_end - t_start).is_finite() {
        return Err(PreconditionError::SpanOverflow { t_start, t_end });
    }
    Ok(())
}

/// Validate an observation window and its sample count.
///
/// Checked in order: the interval (see [`check_interval`]), non-zero count,
/// and at least [`MIN_GRID_SAMPLES`] points.
pub fn check_grid(t_start: f64, t_end: f64, sample_count: usize) -> Result<(), PreconditionError> {
    check_interval(t_start, t_end)?;
    if sample_count == 0 {
        return Err(PreconditionError::ZeroSamples);
    }
    if sample_count < MIN_GRID_SAMPLES {
        return Err(PreconditionError::TooFewSamples {
            required: MIN_GRID_SAMPLES,
            found: sample_count,
        });
    }
    Ok(())
}

/// A validated uniform grid over `[t_start, t_end]`.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeGrid {
    t_start: f64,
    t_end: f64,
    times: Vec<f64>,
}

impl TimeGrid {
    pub fn new(t_start: f64, t_end: f64, sample_count: usize) -> Result<Self, PreconditionError> {
        check_grid(t_start, t_end, sample_count)?;
        Ok(Self {
            t_start,
            t_end,
            times: linspace(t_start, t_end, sample_count),
        })
    }

    pub fn from_options(options: &AnalysisOptions) -> Result<Self, PreconditionError> {
        Self::new(options.t_start, options.t_end, options.sample_count)
    }

    #[inline]
    pub fn t_start(&self) -> f64 {
        self.t_start
    }

    #[inline]
    pub fn t_end(&self) -> f64 {
        self.t_end
    }

    #[inline]
    pub fn span(&self) -> f64 {
        self.t_end - self.t_start
    }

    /// Distance between adjacent points.
    #[inline]
    pub fn dt(&self) -> f64 {
        self.span() / (self.times.len() - 1) as f64
    }

    #[inline]
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Always false: a grid holds at least two points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }
}

/// One point of a plot. Non-finite samples have no plot point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotPoint {
    pub t: f64,
    pub value: Option<f64>,
}

/// Values of a formula on a time grid, index-aligned with the times.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSeries {
    times: Vec<f64>,
    values: Vec<f64>,
}

impl SampleSeries {
    /// Evaluate `program` on every point of `grid`.
    pub fn sample(program: &FormulaProgram, grid: &TimeGrid, options: &AnalysisOptions) -> Self {
        let values = program.evaluate_series_with(grid.times(), options);
        Self {
            times: grid.times().to_vec(),
            values,
        }
    }

    #[inline]
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `(t, value)` pairs in grid order.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.times.iter().copied().zip(self.values.iter().copied())
    }

    /// Number of samples that are neither `NaN` nor infinite.
    pub fn finite_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_finite()).count()
    }

    /// Points for a chart, with `None` where the value is not finite.
    pub fn plot_points(&self) -> Vec<PlotPoint> {
        self.iter()
            .map(|(t, value)| PlotPoint {
                t,
                value: value.is_finite().then_some(value),
            })
            .collect()
    }
}
