//! Composite quadrature of the squared magnitude of sampled values.
//!
//! Every rule here integrates `|x(t)|²` over a uniform grid of step `dt`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::common::PreconditionError;
use crate::signal::sampling::check_interval;

/// Quadrature rule for the energy integral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum IntegrationMethod {
    #[default]
    #[serde(rename = "trapeze")]
    Trapezoidal,
    #[serde(rename = "simpson")]
    Simpson,
}

impl IntegrationMethod {
    /// Selector string used at the boundary.
    pub fn as_str(self) -> &'static str {
        match self {
            IntegrationMethod::Trapezoidal => "trapeze",
            IntegrationMethod::Simpson => "simpson",
        }
    }
}

impl fmt::Display for IntegrationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IntegrationMethod {
    type Err = PreconditionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "trapeze" | "trapezoidal" => Ok(IntegrationMethod::Trapezoidal),
            "simpson" => Ok(IntegrationMethod::Simpson),
            other => Err(PreconditionError::UnknownMethod(other.to_string())),
        }
    }
}

#[inline]
fn squared(v: f64) -> f64 {
    v * v
}

/// Composite trapezoidal rule over adjacent pairs.
pub fn trapezoidal_energy(values: &[f64], dt: f64) -> f64 {
    values
        .windows(2)
        .map(|w| ((squared(w[0]) + squared(w[1])) / 2.0) * dt)
        .sum()
}

/// Composite Simpson rule over consecutive pairs of intervals.
///
/// With an even number of samples the last interval is closed with a
/// trapezoid. Fewer than three samples fall back to the trapezoidal rule.
pub fn simpson_energy(values: &[f64], dt: f64) -> f64 {
    let n = values.len();
    if n < 3 {
        return trapezoidal_energy(values, dt);
    }

    let mut energy = 0.0;
    let mut i = 0;
    while i + 2 < n {
        let (a, b, c) = (values[i], values[i + 1], values[i + 2]);
        energy += ((squared(a) + 4.0 * squared(b) + squared(c)) * dt) / 3.0;
        i += 2;
    }

    if n % 2 == 0 {
        energy += ((squared(values[n - 2]) + squared(values[n - 1])) * dt) / 2.0;
    }

    energy
}

/// Energy of the sampled window with the selected rule.
pub fn integrate_energy(values: &[f64], dt: f64, method: IntegrationMethod) -> f64 {
    match method {
        IntegrationMethod::Trapezoidal => trapezoidal_energy(values, dt),
        IntegrationMethod::Simpson => simpson_energy(values, dt),
    }
}

/// Average power of the samples over `[t_start, t_end]`, trapezoidal rule.
///
/// The step is `(t_end - t_start) / values.len()`, i.e. one interval per
/// sample rather than per gap.
pub fn average_power(values: &[f64], t_start: f64, t_end: f64) -> Result<f64, PreconditionError> {
    average_power_with(values, t_start, t_end, IntegrationMethod::Trapezoidal)
}

/// Average power of the samples over `[t_start, t_end]` with the given rule.
pub fn average_power_with(
    values: &[f64],
    t_start: f64,
    t_end: f64,
    method: IntegrationMethod,
) -> Result<f64, PreconditionError> {
    check_interval(t_start, t_end)?;
    if values.is_empty() {
        return Err(PreconditionError::ZeroSamples);
    }

    let span = t_end - t_start;
    let dt = span / values.len() as f64;
    Ok(integrate_energy(values, dt, method) / span)
}
