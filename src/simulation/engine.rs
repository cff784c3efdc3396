// src/simulation/engine.rs
use crate::core::{ChromaError, QubitId, StateVector};
use crate::operations::Operation;
use log::trace;
use num_complex::Complex;
use num_traits::{One, Zero};
use std::collections::{HashMap, HashSet};

/// Evolves a `2^N` statevector gate by gate.
/// (Internal visibility)
pub(crate) struct SimulationEngine {
    /// Maps qubit ids to their position (0..N-1); position 0 is the most significant bit.
    qubit_indices: HashMap<QubitId, usize>,
    /// Current register state.
    global_state: StateVector,
    /// Number of simulated qubits (N).
    num_qubits: usize,
}

impl SimulationEngine {
    /// Initializes the engine with every qubit in |0⟩.
    pub(crate) fn init(qubit_ids: &HashSet<QubitId>) -> Result<Self, ChromaError> {
        if qubit_ids.is_empty() {
            return Err(ChromaError::InvalidOperation {
                message: "Cannot initialize simulation engine with zero qubits".to_string(),
            });
        }

        let num_qubits = qubit_ids.len();
        let dim = 1usize.checked_shl(num_qubits as u32).ok_or_else(|| ChromaError::SimulationError {
            message: "Number of qubits too large, resulting state vector dimension overflows usize.".to_string(),
        })?;

        // Sort ids so index assignment does not depend on HashSet iteration order.
        let mut sorted_ids: Vec<QubitId> = qubit_ids.iter().cloned().collect();
        sorted_ids.sort();
        let qubit_indices: HashMap<QubitId, usize> =
            sorted_ids.into_iter().enumerate().map(|(index, id)| (id, index)).collect();

        let mut initial_vec = vec![Complex::zero(); dim];
        initial_vec[0] = Complex::one();

        Ok(Self {
            qubit_indices,
            global_state: StateVector::new(initial_vec),
            num_qubits,
        })
    }

    #[cfg(test)]
    pub(crate) fn set_state(&mut self, state: StateVector) -> Result<(), ChromaError> {
        if state.dim() != self.global_state.dim() {
            Err(ChromaError::SimulationError {
                message: format!(
                    "Cannot set state: provided dimension {} does not match engine dimension {}",
                    state.dim(),
                    self.global_state.dim()
                ),
            })
        } else {
            self.global_state = state;
            Ok(())
        }
    }

    #[cfg(test)]
    pub(crate) fn get_state(&self) -> &StateVector {
        &self.global_state
    }

    pub(crate) fn into_state(self) -> StateVector {
        self.global_state
    }

    /// Applies a single operation to the global state.
    pub(crate) fn apply_operation(&mut self, op: &Operation) -> Result<(), ChromaError> {
        match op {
            Operation::RotateY { target, theta } => {
                if !theta.is_finite() {
                    return Err(ChromaError::InvalidOperation {
                        message: format!("Rotation angle for {} is not finite: {}", target, theta),
                    });
                }
                let target_idx = self.get_qubit_index(target)?;
                trace!("RY({:.6}) on {}", theta, target);
                self.apply_single_qubit_gate(target_idx, &ry_matrix(*theta))?;
            }
            Operation::ControlledNot { control, target } => {
                let control_idx = self.get_qubit_index(control)?;
                let target_idx = self.get_qubit_index(target)?;
                if control_idx == target_idx {
                    return Err(ChromaError::InvalidOperation {
                        message: "Control and target qubits cannot be the same for controlled operation".to_string(),
                    });
                }
                trace!("CNOT {} -> {}", control, target);
                self.apply_two_qubit_gate(control_idx, target_idx, &cnot_matrix())?;
            }
        }
        Ok(())
    }

    fn get_qubit_index(&self, qubit: &QubitId) -> Result<usize, ChromaError> {
        self.qubit_indices.get(qubit).copied().ok_or_else(|| ChromaError::ReferenceViolation {
            message: format!("Qubit {} not found in simulation context", qubit),
        })
    }

    /// Bit position of qubit `idx` inside a basis-state index.
    fn bit_position(&self, idx: usize) -> usize {
        self.num_qubits - 1 - idx
    }

    /// Applies a 2x2 matrix to one qubit of the register.
    fn apply_single_qubit_gate(&mut self, target_idx: usize, matrix: &[[Complex<f64>; 2]; 2]) -> Result<(), ChromaError> {
        let k = self.bit_position(target_idx);
        let k_mask: usize = 1 << k;
        let lower_mask = k_mask - 1;
        let upper_mask = !((k_mask << 1) - 1);

        let dim = self.global_state.dim();
        let amplitudes = self.global_state.amplitudes();
        let mut new_vec = vec![Complex::zero(); dim];

        // Pairs of basis states that differ only in the target bit.
        for i in 0..dim / 2 {
            let i0 = ((i << 1) & upper_mask) | (i & lower_mask);
            let i1 = i0 | k_mask;

            if i1 >= dim {
                return Err(ChromaError::SimulationError {
                    message: format!(
                        "Calculated index out of bounds during single qubit gate application. i0={}, i1={}, dim={}",
                        i0, i1, dim
                    ),
                });
            }

            let psi_0 = amplitudes[i0];
            let psi_1 = amplitudes[i1];
            new_vec[i0] = matrix[0][0] * psi_0 + matrix[0][1] * psi_1;
            new_vec[i1] = matrix[1][0] * psi_0 + matrix[1][1] * psi_1;
        }

        self.global_state = StateVector::new(new_vec);
        Ok(())
    }

    /// Applies a 4x4 matrix to two qubits of the register.
    /// Matrix rows and columns are ordered |idx1 idx2⟩ = |00⟩, |01⟩, |10⟩, |11⟩.
    fn apply_two_qubit_gate(
        &mut self,
        idx1: usize,
        idx2: usize,
        matrix: &[[Complex<f64>; 4]; 4],
    ) -> Result<(), ChromaError> {
        if idx1 == idx2 {
            return Err(ChromaError::InvalidOperation {
                message: "Target indices for a two-qubit gate cannot be the same".to_string(),
            });
        }

        let dim = self.global_state.dim();
        let mask1: usize = 1 << self.bit_position(idx1);
        let mask2: usize = 1 << self.bit_position(idx2);
        let amplitudes = self.global_state.amplitudes();
        let mut new_vec = vec![Complex::zero(); dim];

        // Every base index with both addressed bits cleared spans one 4-dim subspace.
        for base in (0..dim).filter(|i| i & (mask1 | mask2) == 0) {
            let indices = [base, base | mask2, base | mask1, base | mask1 | mask2];

            let psi = indices.map(|i| amplitudes[i]);
            for (row, &out_idx) in indices.iter().enumerate() {
                new_vec[out_idx] = (0..4).map(|col| matrix[row][col] * psi[col]).sum();
            }
        }

        self.global_state = StateVector::new(new_vec);
        Ok(())
    }
}

/// Y rotation: `[[cos(θ/2), -sin(θ/2)], [sin(θ/2), cos(θ/2)]]`.
fn ry_matrix(theta: f64) -> [[Complex<f64>; 2]; 2] {
    let (sin_a, cos_a) = (theta / 2.0).sin_cos();
    [
        [Complex::new(cos_a, 0.0), Complex::new(-sin_a, 0.0)],
        [Complex::new(sin_a, 0.0), Complex::new(cos_a, 0.0)],
    ]
}

/// CNOT in the |control, target⟩ basis.
fn cnot_matrix() -> [[Complex<f64>; 4]; 4] {
    let o = Complex::one();
    let z = Complex::zero();
    [
        [o, z, z, z],
        [z, o, z, z],
        [z, z, z, o],
        [z, z, o, z],
    ]
}
