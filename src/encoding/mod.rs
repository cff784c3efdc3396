//! Encodes a color and an amplitude into a 4-qubit statevector.
//!
//! Circuit, qubit 0 on top:
//!
//! ```text
//! q0: ──RY(rπ)──@──────────────
//!               │
//! q1: ──RY(gπ)──X──@───────────
//!                  │
//! q2: ──RY(bπ)─────X──@────────
//!                     │
//! q3: ──RY(aπ)────────X────────
//! ```

use crate::circuits::{Circuit, CircuitBuilder};
use crate::color::ColorCode;
use crate::core::{ChromaError, PI, QubitId, StateVector};
use crate::sentiment::Amplitude;
use crate::simulation::Simulator;
use log::debug;

/// Qubit carrying the red channel.
pub const RED_QUBIT: QubitId = QubitId(0);
/// Qubit carrying the green channel.
pub const GREEN_QUBIT: QubitId = QubitId(1);
/// Qubit carrying the blue channel.
pub const BLUE_QUBIT: QubitId = QubitId(2);
/// Qubit carrying the sentiment amplitude.
pub const AMPLITUDE_QUBIT: QubitId = QubitId(3);

/// Deterministic color + amplitude → statevector encoder.
#[derive(Debug, Clone, Default)]
pub struct QuantumStateEncoder {
    simulator: Simulator,
}

impl QuantumStateEncoder {
    /// Creates an encoder backed by a default `Simulator`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the encoding circuit: one Y rotation per qubit, then the
    /// CNOT chain (0,1), (1,2), (2,3).
    pub fn circuit(&self, color: &ColorCode, amplitude: Amplitude) -> Circuit {
        let [r, g, b] = color.normalized();
        CircuitBuilder::new()
            .ry(RED_QUBIT, r * PI)
            .ry(GREEN_QUBIT, g * PI)
            .ry(BLUE_QUBIT, b * PI)
            .ry(AMPLITUDE_QUBIT, amplitude.value() * PI)
            .cnot(RED_QUBIT, GREEN_QUBIT)
            .cnot(GREEN_QUBIT, BLUE_QUBIT)
            .cnot(BLUE_QUBIT, AMPLITUDE_QUBIT)
            .build()
    }

    /// Returns the 16-amplitude statevector for `color` and `amplitude`.
    pub fn encode(&self, color: &ColorCode, amplitude: Amplitude) -> Result<StateVector, ChromaError> {
        let circuit = self.circuit(color, amplitude);
        debug!("encoding {} with amplitude {}\n{}", color, amplitude, circuit);
        self.simulator.run(&circuit)
    }
}
