// src/validation/mod.rs

//! Checks and observables computed over a `StateVector`.

use crate::core::{ChromaError, StateVector};

const DEFAULT_NORM_TOLERANCE: f64 = 1e-9;

/// Checks that the sum of squared magnitudes is 1 within `tolerance`
/// (defaults to 1e-9).
///
/// # Returns
/// * `Ok(())` if normalized within tolerance.
/// * `Err(ChromaError::Incoherence)` otherwise.
pub fn check_normalization(state: &StateVector, tolerance: Option<f64>) -> Result<(), ChromaError> {
    let effective_tolerance = tolerance.unwrap_or(DEFAULT_NORM_TOLERANCE);
    let norm_sq = state.norm_sqr();
    if (norm_sq - 1.0).abs() > effective_tolerance || !norm_sq.is_finite() {
        Err(ChromaError::Incoherence {
            message: format!(
                "State vector normalization failed. Sum(|c_i|^2) = {} (Deviation > {})",
                norm_sq, effective_tolerance
            ),
        })
    } else {
        Ok(())
    }
}

/// Born-rule probability of every basis state.
pub fn probabilities(state: &StateVector) -> Vec<f64> {
    state.amplitudes().iter().map(|c| c.norm_sqr()).collect()
}

/// Expectation value of Pauli-Z on the qubit at register position `qubit`
/// (0 is the most significant bit).
///
/// Every basis state contributes `+|c_k|²` when the qubit reads 0 and
/// `-|c_k|²` when it reads 1, so the whole vector takes part and the result
/// lies in [-1, 1] for a normalized state.
pub fn expectation_z(state: &StateVector, qubit: usize) -> Result<f64, ChromaError> {
    let num_qubits = state.num_qubits();
    if qubit >= num_qubits {
        return Err(ChromaError::ReferenceViolation {
            message: format!("Qubit position {} out of range for a {}-qubit state", qubit, num_qubits),
        });
    }
    let mask = 1usize << (num_qubits - 1 - qubit);

    Ok(state
        .amplitudes()
        .iter()
        .enumerate()
        .map(|(k, c)| if k & mask == 0 { c.norm_sqr() } else { -c.norm_sqr() })
        .sum())
}
