// src/operations/mod.rs

//! Gate operations applied to a qubit register.
//!
//! The chromatic encoding only needs two kinds of gate: a parameterized
//! rotation about the Y axis and a controlled-NOT. Both are unitary, so any
//! sequence of them keeps the statevector normalized.

use crate::core::QubitId;

/// A single gate in a `Circuit`.
#[derive(Debug, Clone, PartialEq)] // f64 parameters rule out Eq
pub enum Operation {
    /// Rotation about the Y axis of the target's Bloch sphere.
    ///
    /// Matrix: `[[cos(θ/2), -sin(θ/2)], [sin(θ/2), cos(θ/2)]]`.
    /// Applied to |0⟩ it yields `cos(θ/2)|0⟩ + sin(θ/2)|1⟩`.
    RotateY {
        /// The qubit being rotated.
        target: QubitId,
        /// Rotation angle in radians.
        theta: f64,
    },

    /// Flips `target` on the basis states where `control` is |1⟩.
    ControlledNot {
        /// The qubit whose value conditions the flip.
        control: QubitId,
        /// The qubit that is flipped.
        target: QubitId,
    },
}

impl Operation {
    /// Returns every qubit the operation touches, control first.
    pub fn involved_qubits(&self) -> Vec<QubitId> {
        match self {
            Operation::RotateY { target, .. } => vec![*target],
            Operation::ControlledNot { control, target } => vec![*control, *target],
        }
    }
}
