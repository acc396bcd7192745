//! Elementary signals of the registry.
//!
//! Boundaries are exclusive where the textbook definitions are ambiguous:
//! `rect(±0.5) = 0` and `tri(±1) = 0`, while `u(0) = 1`.

use std::f64::consts::PI;

/// Width of the Gaussian used to approximate the Dirac impulse.
///
/// A true Dirac is not representable on a sample grid; every impulse in a
/// formula is this same Gaussian, whose area is 1.
pub const DELTA_EPSILON: f64 = 0.01;

/// Unit rectangle: 1 for `|t| < 0.5`, else 0.
#[inline]
pub fn rect(t: f64) -> f64 {
    if t.abs() < 0.5 { 1.0 } else { 0.0 }
}

/// Unit triangle: `1 - |t|` for `|t| < 1`, else 0.
#[inline]
pub fn tri(t: f64) -> f64 {
    let a = t.abs();
    if a < 1.0 { 1.0 - a } else { 0.0 }
}

/// Heaviside step: 1 for `t >= 0`, else 0.
#[inline]
pub fn step(t: f64) -> f64 {
    if t >= 0.0 { 1.0 } else { 0.0 }
}

/// Ramp: `t` for `t > 0`, else 0.
#[inline]
pub fn ramp(t: f64) -> f64 {
    if t > 0.0 { t } else { 0.0 }
}

/// Gaussian approximation of the Dirac impulse with width [`DELTA_EPSILON`].
#[inline]
pub fn delta(t: f64) -> f64 {
    let eps = DELTA_EPSILON;
    (1.0 / (eps * (2.0 * PI).sqrt())) * (-0.5 * (t / eps).powi(2)).exp()
}
