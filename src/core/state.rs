// src/core/state.rs

use num_complex::Complex;
use std::fmt;

/// The full complex-amplitude vector of an N-qubit register.
///
/// Length is always `2^N`. Index `k` is the basis state whose binary digits
/// give the qubit values, with qubit 0 in the most significant position.
/// Produced fresh by every simulation run; callers only get read access.
#[derive(Debug, Clone, PartialEq)] // Avoid Eq for floating-point complex numbers
pub struct StateVector {
    amplitudes: Vec<Complex<f64>>,
}

impl StateVector {
    /// Wraps a raw amplitude vector. Normalization is checked by `validation`,
    /// not here.
    pub(crate) fn new(amplitudes: Vec<Complex<f64>>) -> Self {
        Self { amplitudes }
    }

    /// Read-only access to the amplitudes.
    pub fn amplitudes(&self) -> &[Complex<f64>] {
        &self.amplitudes
    }

    /// Number of basis states (`2^N`).
    pub fn dim(&self) -> usize {
        self.amplitudes.len()
    }

    /// Number of qubits the vector describes.
    pub fn num_qubits(&self) -> usize {
        self.amplitudes.len().trailing_zeros() as usize
    }

    /// Amplitude of basis state `index`, if in range.
    pub fn amplitude(&self, index: usize) -> Option<Complex<f64>> {
        self.amplitudes.get(index).copied()
    }

    /// Sum of squared magnitudes.
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(|c| c.norm_sqr()).sum()
    }
}

impl fmt::Display for StateVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "State[")?;
        for (i, c) in self.amplitudes.iter().enumerate() {
            write!(f, "{}{:.4}", if i > 0 { ", " } else { "" }, c)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::Zero;

    #[test]
    fn test_dimensions() {
        let mut amps = vec![Complex::zero(); 16];
        amps[0] = Complex::new(1.0, 0.0);
        let state = StateVector::new(amps);
        assert_eq!(state.dim(), 16);
        assert_eq!(state.num_qubits(), 4);
        assert_eq!(state.amplitude(0), Some(Complex::new(1.0, 0.0)));
        assert_eq!(state.amplitude(16), None);
        assert!((state.norm_sqr() - 1.0).abs() < 1e-12);
    }
}
