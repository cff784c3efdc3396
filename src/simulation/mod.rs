// src/simulation/mod.rs

//! Runs a `Circuit` on a simulated register and returns the final statevector.
//!
//! No measurement is performed: the full amplitude vector of the composed
//! unitary applied to |0…0⟩ is handed back to the caller.

pub(crate) mod engine;

use crate::circuits::Circuit;
use crate::core::{ChromaError, StateVector};
use crate::validation::check_normalization;
use engine::SimulationEngine;
use log::debug;

/// Entry point for circuit execution.
#[derive(Debug, Clone)]
pub struct Simulator {
    /// Tolerance for the post-run normalization check; `None` skips the check.
    norm_tolerance: Option<f64>,
}

impl Default for Simulator {
    fn default() -> Self {
        Self { norm_tolerance: Some(1e-9) }
    }
}

impl Simulator {
    /// Creates a new Simulator that validates normalization after each run.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the normalization tolerance, or disables the check with `None`.
    pub fn with_norm_tolerance(mut self, tolerance: Option<f64>) -> Self {
        self.norm_tolerance = tolerance;
        self
    }

    /// Applies every operation of `circuit`, in order, to |0…0⟩.
    ///
    /// # Returns
    /// * `Ok(StateVector)` of dimension `2^N` for the N qubits in the circuit.
    /// * `Err(ChromaError)` for an empty circuit, an invalid gate, or a final
    ///   state that fails the normalization check.
    pub fn run(&self, circuit: &Circuit) -> Result<StateVector, ChromaError> {
        if circuit.is_empty() {
            return Err(ChromaError::InvalidOperation {
                message: "Cannot simulate an empty circuit".to_string(),
            });
        }

        let mut engine = SimulationEngine::init(circuit.qubits())?;
        for op in circuit.operations() {
            engine.apply_operation(op)?;
        }

        let state = engine.into_state();
        if let Some(tolerance) = self.norm_tolerance {
            check_normalization(&state, Some(tolerance))?;
        }
        debug!("simulated {} operations on {} qubits", circuit.len(), state.num_qubits());
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::engine::SimulationEngine;
    use super::*;
    use crate::core::QubitId;
    use crate::operations::Operation;
    use num_complex::Complex;
    use num_traits::Zero;
    use std::collections::HashSet;
    use std::f64::consts::{FRAC_1_SQRT_2, PI};

    const TEST_TOLERANCE: f64 = 1e-9;

    fn qid(id: u64) -> QubitId {
        QubitId(id)
    }

    /// Asserts two complex vectors agree component-wise within `tolerance`.
    fn assert_complex_vec_approx_equal(
        actual: &[Complex<f64>],
        expected: &[Complex<f64>],
        tolerance: f64,
        context: &str,
    ) {
        assert_eq!(actual.len(), expected.len(), "Vector length mismatch - {}", context);
        for i in 0..actual.len() {
            let dist_sq = (actual[i] - expected[i]).norm_sqr();
            assert!(
                dist_sq < tolerance * tolerance,
                "Vector mismatch at index {} - Actual: {}, Expected: {}, DistSq: {:.3e}, Context: {}",
                i, actual[i], expected[i], dist_sq, context
            );
        }
    }

    fn engine_for(ids: &[u64]) -> Result<SimulationEngine, ChromaError> {
        let set: HashSet<QubitId> = ids.iter().map(|id| qid(*id)).collect();
        SimulationEngine::init(&set)
    }

    #[test]
    fn test_init_is_all_zero_state() -> Result<(), ChromaError> {
        let engine = engine_for(&[0, 1, 2])?;
        let state = engine.get_state();
        assert_eq!(state.dim(), 8);
        assert_eq!(state.amplitude(0), Some(Complex::new(1.0, 0.0)));
        assert!(state.amplitudes()[1..].iter().all(|c| c.is_zero()));
        Ok(())
    }

    #[test]
    fn test_init_rejects_empty_register() {
        let result = SimulationEngine::init(&HashSet::new());
        assert!(matches!(result, Err(ChromaError::InvalidOperation { .. })));
    }

    #[test]
    fn test_ry_half_turn_gives_equal_superposition() -> Result<(), ChromaError> {
        let mut engine = engine_for(&[0])?;
        engine.apply_operation(&Operation::RotateY { target: qid(0), theta: PI / 2.0 })?;

        let expected = vec![Complex::new(FRAC_1_SQRT_2, 0.0), Complex::new(FRAC_1_SQRT_2, 0.0)];
        assert_complex_vec_approx_equal(engine.get_state().amplitudes(), &expected, TEST_TOLERANCE, "RY(pi/2)|0>");
        Ok(())
    }

    #[test]
    fn test_ry_acts_on_most_significant_bit_for_lowest_id() -> Result<(), ChromaError> {
        // RY(pi) on q0 of a 2-qubit register: |00> -> |10> (index 2)
        let mut engine = engine_for(&[0, 1])?;
        engine.apply_operation(&Operation::RotateY { target: qid(0), theta: PI })?;

        let mut expected = vec![Complex::zero(); 4];
        expected[2] = Complex::new(1.0, 0.0);
        assert_complex_vec_approx_equal(engine.get_state().amplitudes(), &expected, TEST_TOLERANCE, "RY(pi) on q0");
        Ok(())
    }

    #[test]
    fn test_cnot_flips_target_when_control_set() -> Result<(), ChromaError> {
        let mut engine = engine_for(&[0, 1])?;
        let mut start = vec![Complex::zero(); 4];
        start[2] = Complex::new(1.0, 0.0); // |10>
        engine.set_state(StateVector::new(start))?;

        engine.apply_operation(&Operation::ControlledNot { control: qid(0), target: qid(1) })?;

        let mut expected = vec![Complex::zero(); 4];
        expected[3] = Complex::new(1.0, 0.0); // |11>
        assert_complex_vec_approx_equal(engine.get_state().amplitudes(), &expected, TEST_TOLERANCE, "CNOT |10>");
        Ok(())
    }

    #[test]
    fn test_cnot_with_reversed_roles() -> Result<(), ChromaError> {
        // Control q1, target q0: |01> -> |11>
        let mut engine = engine_for(&[0, 1])?;
        let mut start = vec![Complex::zero(); 4];
        start[1] = Complex::new(1.0, 0.0);
        engine.set_state(StateVector::new(start))?;

        engine.apply_operation(&Operation::ControlledNot { control: qid(1), target: qid(0) })?;

        let mut expected = vec![Complex::zero(); 4];
        expected[3] = Complex::new(1.0, 0.0);
        assert_complex_vec_approx_equal(engine.get_state().amplitudes(), &expected, TEST_TOLERANCE, "CNOT q1->q0");
        Ok(())
    }

    #[test]
    fn test_cnot_on_non_adjacent_qubits_in_three_qubit_register() -> Result<(), ChromaError> {
        // Control q0, target q2, spectator q1 in |1>: |110> -> |111>
        let mut engine = engine_for(&[0, 1, 2])?;
        let mut start = vec![Complex::zero(); 8];
        start[0b110] = Complex::new(1.0, 0.0);
        engine.set_state(StateVector::new(start))?;

        engine.apply_operation(&Operation::ControlledNot { control: qid(0), target: qid(2) })?;

        let mut expected = vec![Complex::zero(); 8];
        expected[0b111] = Complex::new(1.0, 0.0);
        assert_complex_vec_approx_equal(engine.get_state().amplitudes(), &expected, TEST_TOLERANCE, "CNOT q0->q2");
        Ok(())
    }

    #[test]
    fn test_bell_pair_from_ry_and_cnot() -> Result<(), ChromaError> {
        let mut engine = engine_for(&[0, 1])?;
        engine.apply_operation(&Operation::RotateY { target: qid(0), theta: PI / 2.0 })?;
        engine.apply_operation(&Operation::ControlledNot { control: qid(0), target: qid(1) })?;

        let s = Complex::new(FRAC_1_SQRT_2, 0.0);
        let expected = vec![s, Complex::zero(), Complex::zero(), s];
        assert_complex_vec_approx_equal(engine.get_state().amplitudes(), &expected, TEST_TOLERANCE, "Bell pair");
        Ok(())
    }

    #[test]
    fn test_cnot_same_qubit_rejected() -> Result<(), ChromaError> {
        let mut engine = engine_for(&[0, 1])?;
        let result = engine.apply_operation(&Operation::ControlledNot { control: qid(1), target: qid(1) });
        assert!(matches!(result, Err(ChromaError::InvalidOperation { .. })));
        Ok(())
    }

    #[test]
    fn test_unknown_qubit_is_reference_violation() -> Result<(), ChromaError> {
        let mut engine = engine_for(&[0])?;
        let result = engine.apply_operation(&Operation::RotateY { target: qid(7), theta: 1.0 });
        assert!(matches!(result, Err(ChromaError::ReferenceViolation { .. })));
        Ok(())
    }

    #[test]
    fn test_non_finite_angle_rejected() -> Result<(), ChromaError> {
        let mut engine = engine_for(&[0])?;
        let result = engine.apply_operation(&Operation::RotateY { target: qid(0), theta: f64::NAN });
        assert!(matches!(result, Err(ChromaError::InvalidOperation { .. })));
        Ok(())
    }
}
