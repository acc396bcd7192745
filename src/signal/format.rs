//! Human-readable rendering of energies and powers.

/// Magnitudes outside `[SMALL, LARGE]` are rendered in exponential form.
const SMALL: f64 = 0.001;
const LARGE: f64 = 1000.0;

/// Render an energy or power value for display.
///
/// Non-finite values render as `∞` and exact zero as `0`. Magnitudes below
/// 0.001 or above 1000 use exponential notation with three fractional
/// digits and an explicit exponent sign (`1.235e+5`); everything else uses
/// three decimals.
pub fn format_energy(energy: f64) -> String {
    if !energy.is_finite() {
        return "∞".to_string();
    }
    if energy == 0.0 {
        return "0".to_string();
    }

    let magnitude = energy.abs();
    if magnitude < SMALL || magnitude > LARGE {
        exponential(energy)
    } else {
        format!("{:.3}", energy)
    }
}

fn exponential(value: f64) -> String {
    let rendered = format!("{:.3e}", value);
    match rendered.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        },
        _ => rendered,
    }
}
