//! Configuration types for formula analysis.
//!
//! This module defines the options that control sampling, integration and
//! classification of a formula, plus the parallelism knobs shared by the
//! evaluator and the batch analyzer.
use serde::{Deserialize, Serialize};

use crate::common::PreconditionError;
use crate::formula::parser::DEFAULT_MAX_NODES;
use crate::signal::classify::SignalDurationKind;
use crate::signal::integrate::IntegrationMethod;
use crate::signal::sampling::check_grid;

/// Minimum number of samples to justify parallel evaluation overhead.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 256;

/// Threshold used by the legacy magnitude heuristic.
pub const LEGACY_MAGNITUDE_THRESHOLD: f64 = 1e10;

/// Options for analyzing a formula over an observation window.
///
/// # Examples
///
/// ```rust
/// use sigform::{AnalysisOptions, IntegrationMethod};
///
/// // Create with defaults
/// let options = AnalysisOptions::default();
///
/// // Or customize
/// let options = AnalysisOptions::new()
///     .with_interval(-10.0, 10.0)
///     .with_sample_count(1000)
///     .with_method(IntegrationMethod::Simpson);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisOptions {
    /// Start of the observation window
    pub t_start: f64,
    /// End of the observation window, must be greater than `t_start`
    pub t_end: f64,
    /// Number of uniformly spaced samples, endpoints included
    pub sample_count: usize,
    /// Quadrature rule used for the energy integral
    pub method: IntegrationMethod,
    /// Declared duration of the signal
    pub duration: SignalDurationKind,
    /// Whether large sample sets may be evaluated on the rayon pool
    pub use_parallel: bool,
    /// Smallest input size evaluated in parallel
    pub parallel_threshold: usize,
    /// Upper bound on AST nodes accepted by the parser
    pub max_nodes: usize,
    /// Opt into the legacy magnitude heuristic with the given threshold
    pub magnitude_heuristic: Option<f64>,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            t_start: -5.0,
            t_end: 5.0,
            sample_count: 500,
            method: IntegrationMethod::Trapezoidal,
            duration: SignalDurationKind::Infinite,
            use_parallel: true,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            max_nodes: DEFAULT_MAX_NODES,
            magnitude_heuristic: None,
        }
    }
}

impl AnalysisOptions {
    /// Create a new `AnalysisOptions` with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults of the catalog batch view: `[-10, 10]` with 1000 samples.
    pub fn catalog() -> Self {
        Self {
            t_start: -10.0,
            t_end: 10.0,
            sample_count: 1000,
            ..Self::default()
        }
    }

    /// Set the observation window.
    #[inline]
    pub fn with_interval(mut self, t_start: f64, t_end: f64) -> Self {
        self.t_start = t_start;
        self.t_end = t_end;
        self
    }

    /// Set the number of samples.
    #[inline]
    pub fn with_sample_count(mut self, sample_count: usize) -> Self {
        self.sample_count = sample_count;
        self
    }

    /// Set the integration method.
    #[inline]
    pub fn with_method(mut self, method: IntegrationMethod) -> Self {
        self.method = method;
        self
    }

    /// Declare the duration of the analyzed signal.
    ///
    /// User formulas default to [`SignalDurationKind::Infinite`].
    #[inline]
    pub fn with_duration(mut self, duration: SignalDurationKind) -> Self {
        self.duration = duration;
        self
    }

    /// Enable or disable parallel evaluation.
    #[inline]
    pub fn with_parallel(mut self, use_parallel: bool) -> Self {
        self.use_parallel = use_parallel;
        self
    }

    /// Set the smallest input size evaluated in parallel.
    #[inline]
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Set the AST node bound.
    #[inline]
    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = max_nodes;
        self
    }

    /// Classify with the legacy magnitude heuristic instead of the declared duration.
    ///
    /// This is a heuristic, not a classification law: a large but finite
    /// windowed energy is reported as a power signal.
    #[inline]
    pub fn with_magnitude_heuristic(mut self, threshold: Option<f64>) -> Self {
        self.magnitude_heuristic = threshold;
        self
    }

    /// Observation window length.
    #[inline]
    pub fn span(&self) -> f64 {
        self.t_end - self.t_start
    }

    /// Whether an input of `len` items should go to the rayon pool.
    #[inline]
    pub fn should_parallelize(&self, len: usize) -> bool {
        self.use_parallel && len >= self.parallel_threshold
    }

    /// Check the window and sample count before anything is computed.
    pub fn validate(&self) -> Result<(), PreconditionError> {
        check_grid(self.t_start, self.t_end, self.sample_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_custom_signal_view() {
        let options = AnalysisOptions::default();
        assert_eq!(options.t_start, -5.0);
        assert_eq!(options.t_end, 5.0);
        assert_eq!(options.sample_count, 500);
        assert_eq!(options.method, IntegrationMethod::Trapezoidal);
        assert_eq!(options.duration, SignalDurationKind::Infinite);
        assert!(options.magnitude_heuristic.is_none());
        assert!(options.validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_windows() {
        assert_eq!(
            AnalysisOptions::new().with_interval(1.0, 1.0).validate(),
            Err(PreconditionError::EmptyInterval {
                t_start: 1.0,
                t_end: 1.0
            })
        );
        assert!(matches!(
            AnalysisOptions::new()
                .with_interval(0.0, f64::INFINITY)
                .validate(),
            Err(PreconditionError::NonFiniteBound { .. })
        ));
        assert_eq!(
            AnalysisOptions::new().with_sample_count(0).validate(),
            Err(PreconditionError::ZeroSamples)
        );
    }

    #[test]
    fn parallel_threshold_gates_the_pool() {
        let options = AnalysisOptions::new().with_parallel_threshold(10);
        assert!(!options.should_parallelize(9));
        assert!(options.should_parallelize(10));
        assert!(!options.with_parallel(false).should_parallelize(1000));
    }
}
