//! Energy/power classification of a sampled signal.
//!
//! The decision depends on the declared duration of the signal, not on the
//! numbers alone: a finite-duration signal is an energy signal whatever its
//! windowed energy, and an infinite-duration signal has infinite energy by
//! construction, so only its average power decides the label.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Declared support of a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalDurationKind {
    /// Zero or negligible outside a bounded interval.
    Finite,
    /// Extends over the whole real line.
    Infinite,
}

/// Classification label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnergyClass {
    FiniteEnergy,
    FinitePower,
    InfinitePower,
    ComputationError,
}

impl EnergyClass {
    pub fn label(self) -> &'static str {
        match self {
            EnergyClass::FiniteEnergy => "Finite-energy signal",
            EnergyClass::FinitePower => "Finite average power signal",
            EnergyClass::InfinitePower => "Infinite power signal",
            EnergyClass::ComputationError => "Computation error",
        }
    }
}

impl fmt::Display for EnergyClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of one classification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Windowed energy for finite signals, `+∞` for infinite ones
    pub energy: f64,
    /// Zero for finite signals, windowed average power for infinite ones
    pub average_power: f64,
    pub label: EnergyClass,
}

impl ClassificationResult {
    /// Result of an item whose evaluation failed.
    pub fn failed() -> Self {
        Self {
            energy: f64::NAN,
            average_power: f64::NAN,
            label: EnergyClass::ComputationError,
        }
    }
}

/// States of the single classification decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifierState {
    EvaluatingFinite,
    EvaluatingInfinite,
    FiniteEnergyResult,
    FinitePowerResult,
    InfinitePowerResult,
}

impl ClassifierState {
    /// Initial state for a signal of the given duration.
    pub fn start(duration: SignalDurationKind) -> Self {
        match duration {
            SignalDurationKind::Finite => ClassifierState::EvaluatingFinite,
            SignalDurationKind::Infinite => ClassifierState::EvaluatingInfinite,
        }
    }

    /// Take the decision. Result states are terminal and map to themselves.
    pub fn advance(self, average_power: f64) -> Self {
        match self {
            ClassifierState::EvaluatingFinite => ClassifierState::FiniteEnergyResult,
            ClassifierState::EvaluatingInfinite if average_power.is_finite() => {
                ClassifierState::FinitePowerResult
            },
            ClassifierState::EvaluatingInfinite => ClassifierState::InfinitePowerResult,
            terminal => terminal,
        }
    }

    pub fn is_terminal(self) -> bool {
        self.label().is_some()
    }

    /// Label of a result state, `None` while still evaluating.
    pub fn label(self) -> Option<EnergyClass> {
        match self {
            ClassifierState::FiniteEnergyResult => Some(EnergyClass::FiniteEnergy),
            ClassifierState::FinitePowerResult => Some(EnergyClass::FinitePower),
            ClassifierState::InfinitePowerResult => Some(EnergyClass::InfinitePower),
            ClassifierState::EvaluatingFinite | ClassifierState::EvaluatingInfinite => None,
        }
    }
}

/// Classify a signal from its windowed energy and average power.
///
/// For [`SignalDurationKind::Finite`] the windowed energy is kept and the
/// power is reported as 0. For [`SignalDurationKind::Infinite`] the energy
/// is `+∞` regardless of `window_energy`.
pub fn classify(
    duration: SignalDurationKind,
    window_energy: f64,
    average_power: f64,
) -> ClassificationResult {
    let state = ClassifierState::start(duration).advance(average_power);
    match state.label() {
        Some(EnergyClass::FiniteEnergy) => ClassificationResult {
            energy: window_energy,
            average_power: 0.0,
            label: EnergyClass::FiniteEnergy,
        },
        Some(label) => ClassificationResult {
            energy: f64::INFINITY,
            average_power,
            label,
        },
        None => ClassificationResult::failed(),
    }
}

/// Threshold heuristic from the legacy custom-signal view.
///
/// This is not a classification law: a large but finite windowed energy is
/// labelled as a power signal. Energy finite and below `threshold` gives
/// [`EnergyClass::FiniteEnergy`], else power finite and below `threshold`
/// gives [`EnergyClass::FinitePower`], else [`EnergyClass::InfinitePower`].
pub fn classify_by_magnitude(energy: f64, average_power: f64, threshold: f64) -> ClassificationResult {
    let label = if energy.is_finite() && energy < threshold {
        EnergyClass::FiniteEnergy
    } else if average_power.is_finite() && average_power < threshold {
        EnergyClass::FinitePower
    } else {
        EnergyClass::InfinitePower
    };
    ClassificationResult {
        energy,
        average_power,
        label,
    }
}
