//! Statevector → scalar → {Red, Yellow, Green}.

use crate::core::{ChromaError, GREEN_THRESHOLD, RED_THRESHOLD, StateVector};
use crate::validation::expectation_z;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The three chromatic zones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChromaticCategory {
    /// Scalar below -0.33.
    Red,
    /// Scalar in [-0.33, 0.33].
    Yellow,
    /// Scalar above 0.33.
    Green,
}

impl ChromaticCategory {
    /// Buckets `s`; both Yellow edges are inclusive. NaN is treated as 0.
    pub fn from_scalar(s: f64) -> Self {
        if s < RED_THRESHOLD {
            ChromaticCategory::Red
        } else if s > GREEN_THRESHOLD {
            ChromaticCategory::Green
        } else {
            ChromaticCategory::Yellow
        }
    }
}

impl fmt::Display for ChromaticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChromaticCategory::Red => "Red",
            ChromaticCategory::Yellow => "Yellow",
            ChromaticCategory::Green => "Green",
        };
        f.write_str(name)
    }
}

/// How a statevector is reduced to the scalar that gets bucketed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StateReduction {
    /// ⟨Z⟩ on the qubit at this register position. Uses every amplitude.
    ExpectationZ {
        /// Register position, 0 being the most significant bit.
        qubit: usize,
    },
    /// Real part of a single basis amplitude.
    RealPart {
        /// Basis-state index.
        index: usize,
    },
}

impl Default for StateReduction {
    /// ⟨Z⟩ on the amplitude qubit (position 3). For the encoder circuit this is
    /// `cos(rπ)·cos(gπ)·cos(bπ)·cos(aπ)`.
    fn default() -> Self {
        StateReduction::ExpectationZ { qubit: 3 }
    }
}

impl StateReduction {
    /// Reduces `state` to a real scalar.
    pub fn reduce(&self, state: &StateVector) -> Result<f64, ChromaError> {
        match *self {
            StateReduction::ExpectationZ { qubit } => expectation_z(state, qubit),
            StateReduction::RealPart { index } => state.amplitude(index).map(|c| c.re).ok_or_else(|| {
                ChromaError::ReferenceViolation {
                    message: format!("Basis index {} out of range for dimension {}", index, state.dim()),
                }
            }),
        }
    }
}

/// Reduces a statevector with a fixed `StateReduction` and buckets the result.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChromaticClassifier {
    reduction: StateReduction,
}

impl ChromaticClassifier {
    /// Creates a classifier using `reduction`.
    pub fn new(reduction: StateReduction) -> Self {
        Self { reduction }
    }

    /// The reduction in use.
    pub fn reduction(&self) -> StateReduction {
        self.reduction
    }

    /// Scalar for `state` under the configured reduction.
    pub fn scalar(&self, state: &StateVector) -> Result<f64, ChromaError> {
        self.reduction.reduce(state)
    }

    /// Category for `state`.
    pub fn classify(&self, state: &StateVector) -> Result<ChromaticCategory, ChromaError> {
        Ok(ChromaticCategory::from_scalar(self.scalar(state)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::ColorCode;
    use crate::encoding::QuantumStateEncoder;
    use crate::sentiment::Amplitude;
    use std::f64::consts::PI;

    #[test]
    fn test_bins() {
        assert_eq!(ChromaticCategory::from_scalar(-0.5), ChromaticCategory::Red);
        assert_eq!(ChromaticCategory::from_scalar(0.0), ChromaticCategory::Yellow);
        assert_eq!(ChromaticCategory::from_scalar(0.33), ChromaticCategory::Yellow);
        assert_eq!(ChromaticCategory::from_scalar(-0.33), ChromaticCategory::Yellow);
        assert_eq!(ChromaticCategory::from_scalar(0.34), ChromaticCategory::Green);
        assert_eq!(ChromaticCategory::from_scalar(-0.34), ChromaticCategory::Red);
    }

    #[test]
    fn test_nan_is_yellow() {
        assert_eq!(ChromaticCategory::from_scalar(f64::NAN), ChromaticCategory::Yellow);
    }

    #[test]
    fn test_expectation_matches_closed_form() {
        let encoder = QuantumStateEncoder::new();
        let classifier = ChromaticClassifier::default();
        for (hex, polarity) in [("#3498DB", 0.2), ("#FF8800", -0.7), ("#102030", 0.9), ("#FFFFFF", 0.0)] {
            let color: ColorCode = hex.parse().unwrap();
            let amplitude = Amplitude::from_polarity(polarity);
            let state = encoder.encode(&color, amplitude).unwrap();

            let [r, g, b] = color.normalized();
            let expected = (r * PI).cos() * (g * PI).cos() * (b * PI).cos() * (amplitude.value() * PI).cos();
            let s = classifier.scalar(&state).unwrap();
            assert!((s - expected).abs() < 1e-9, "{hex}: {s} vs {expected}");
        }
    }

    #[test]
    fn test_real_part_reduction() {
        let state = QuantumStateEncoder::new()
            .encode(&ColorCode::new(0, 0, 0), Amplitude::from_polarity(-1.0))
            .unwrap();
        let classifier = ChromaticClassifier::new(StateReduction::RealPart { index: 0 });
        assert!((classifier.scalar(&state).unwrap() - 1.0).abs() < 1e-12);
        assert_eq!(classifier.classify(&state).unwrap(), ChromaticCategory::Green);

        let out_of_range = StateReduction::RealPart { index: 16 };
        assert!(out_of_range.reduce(&state).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(ChromaticCategory::Yellow.to_string(), "Yellow");
    }
}
