//! Sigform - signal formula evaluation and energy/power classification
//!
//! This library turns a time-domain signal formula typed by a user, such as
//! `2*sin(pi*t)*rect(t/2)`, into samples over an observation window, and
//! classifies the signal as an energy or power signal by numerical
//! integration.
//!
//! # Features
//!
//! - **Closed grammar**: formulas are lexed, parsed and interpreted; no user
//!   input ever reaches a general execution facility
//! - **Domain signals**: `rect`, `tri`, `u`, `ramp` and a Gaussian `delta`,
//!   plus the usual real functions and the constants `pi` and `e`
//! - **Quadrature**: composite trapezoidal and Simpson rules
//! - **Classification**: decided by the declared duration of the signal
//! - **Batch analysis**: the teaching catalog `x1(t)` to `x12(t)`, analyzed
//!   in parallel with per-signal failure isolation
//!
//! # Example - Analyzing a formula
//!
//! ```rust
//! use sigform::{AnalysisOptions, EnergyClass, analyze_formula, format_energy};
//!
//! # fn main() -> Result<(), sigform::Error> {
//! let options = AnalysisOptions::new()
//!     .with_interval(-10.0, 10.0)
//!     .with_sample_count(1000);
//!
//! let analysis = analyze_formula("2*sin(3t) + cos(t)", &options)?;
//! assert_eq!(analysis.label(), EnergyClass::FinitePower);
//! println!("{}: P = {}", analysis.label(), format_energy(analysis.average_power));
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Classifying the catalog
//!
//! ```rust
//! use sigform::{Catalog, IntegrationMethod, analyze_all};
//!
//! # fn main() -> Result<(), sigform::Error> {
//! let report = analyze_all(&Catalog::standard(), IntegrationMethod::Simpson, -10.0, 10.0)?;
//! for signal in &report.results {
//!     println!("{} = {}: {}", signal.name, signal.display_formula, signal.class);
//! }
//! assert_eq!(report.summary.energy_count + report.summary.power_count, 12);
//! # Ok(())
//! # }
//! ```

/// Error types shared by every stage
pub mod common;

/// Analysis options
pub mod config;

/// Formula lexing, parsing and evaluation
///
/// The `formula` module compiles text into a [`FormulaProgram`] and
/// evaluates it for scalar or sampled `t`.
pub mod formula;

/// Sampling, integration and classification
pub mod signal;

pub use common::{ComputationError, Error, LexError, ParseError, PreconditionError, Result};
pub use config::AnalysisOptions;
pub use formula::{FormulaCache, FormulaProgram, compile, validate_formula};
pub use signal::{
    BatchReport, Catalog, ClassificationResult, EnergyClass, FormulaAnalysis, IntegrationMethod,
    PlotPoint, SignalDurationKind, analyze_all, analyze_formula, format_energy,
};
