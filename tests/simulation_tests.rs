// tests/simulation_tests.rs

use chromatiq::{
    Amplitude, ChromaError, ChromaticCategory, ChromaticClassifier, Circuit, CircuitBuilder, ColorCode, QubitId,
    QuantumStateEncoder, Simulator, StateReduction, check_normalization, expectation_z,
};
use std::f64::consts::PI;

const TOLERANCE: f64 = 1e-9;

fn qid(id: u64) -> QubitId {
    QubitId(id)
}

fn color(hex: &str) -> ColorCode {
    hex.parse().expect("test color must parse")
}

#[test]
fn test_empty_circuit_is_rejected() {
    let result = Simulator::new().run(&Circuit::new());
    assert!(matches!(result, Err(ChromaError::InvalidOperation { .. })));
}

#[test]
fn test_encoder_preserves_norm_across_inputs() -> Result<(), ChromaError> {
    let encoder = QuantumStateEncoder::new();
    let colors = ["#000000", "#FFFFFF", "#3498DB", "#FF0000", "#00FF00", "#0000FF", "#7F7F7F", "#ADD8E6", "#90EE90"];
    let polarities = [-1.0, -0.37, 0.0, 0.6, 1.0];

    for hex in colors {
        for polarity in polarities {
            let state = encoder.encode(&color(hex), Amplitude::from_polarity(polarity))?;
            assert_eq!(state.dim(), 16, "{hex}");
            assert!((state.norm_sqr() - 1.0).abs() < TOLERANCE, "{hex} / {polarity}: norm {}", state.norm_sqr());
            check_normalization(&state, Some(TOLERANCE))?;
        }
    }
    Ok(())
}

#[test]
fn test_encoder_is_deterministic() -> Result<(), ChromaError> {
    let encoder = QuantumStateEncoder::new();
    let c = color("#3498DB");
    let a = Amplitude::from_polarity(0.25);

    let first = encoder.encode(&c, a)?;
    let second = QuantumStateEncoder::new().encode(&c, a)?;
    for (x, y) in first.amplitudes().iter().zip(second.amplitudes()) {
        assert!((x - y).norm() < TOLERANCE);
    }
    Ok(())
}

#[test]
fn test_green_with_amplitude_point_eight_statevector() -> Result<(), ChromaError> {
    // q1 = |1>, q3 = cos(0.4pi)|0> + sin(0.4pi)|1>. The chain turns
    // |0100>,|0101> into |0111>,|0110>.
    let state = QuantumStateEncoder::new().encode(&color("#00FF00"), Amplitude::from_polarity(0.6))?;
    let amps = state.amplitudes();

    let (sin_a, cos_a) = (0.4 * PI).sin_cos();
    assert!((amps[0b0111].re - cos_a).abs() < TOLERANCE);
    assert!((amps[0b0110].re - sin_a).abs() < TOLERANCE);
    for (k, c) in amps.iter().enumerate() {
        if k != 0b0110 && k != 0b0111 {
            assert!(c.norm() < TOLERANCE, "index {k} should be empty, got {c}");
        }
    }

    let s = expectation_z(&state, 3)?;
    assert!((s - (sin_a * sin_a - cos_a * cos_a)).abs() < TOLERANCE);
    Ok(())
}

#[test]
fn test_amplitude_only_rotation_lands_on_last_qubit() -> Result<(), ChromaError> {
    // Black color, amplitude 1.0: q3 rotated by pi -> |0001>
    let state = QuantumStateEncoder::new().encode(&color("#000000"), Amplitude::from_polarity(1.0))?;
    assert!((state.amplitudes()[1].re - 1.0).abs() < TOLERANCE);
    assert_eq!(ChromaticClassifier::default().classify(&state)?, ChromaticCategory::Red);
    Ok(())
}

#[test]
fn test_classifier_examples_on_encoded_states() -> Result<(), ChromaError> {
    let encoder = QuantumStateEncoder::new();
    let classifier = ChromaticClassifier::default();

    // Neutral amplitude 0.5 puts q3 on the equator: <Z3> = 0
    let neutral = encoder.encode(&color("#000000"), Amplitude::from_polarity(0.0))?;
    assert!(classifier.scalar(&neutral)?.abs() < TOLERANCE);
    assert_eq!(classifier.classify(&neutral)?, ChromaticCategory::Yellow);

    // Full red flips the parity: <Z3> = -1
    let red = encoder.encode(&color("#FF0000"), Amplitude::from_polarity(-1.0))?;
    assert_eq!(classifier.classify(&red)?, ChromaticCategory::Red);

    let green = encoder.encode(&color("#00FF00"), Amplitude::from_polarity(0.6))?;
    assert_eq!(classifier.classify(&green)?, ChromaticCategory::Green);
    Ok(())
}

#[test]
fn test_alternative_reduction_uses_designated_amplitude() -> Result<(), ChromaError> {
    let state = QuantumStateEncoder::new().encode(&color("#00FF00"), Amplitude::from_polarity(0.6))?;
    let classifier = ChromaticClassifier::new(StateReduction::RealPart { index: 0b0110 });
    assert!((classifier.scalar(&state)? - (0.4 * PI).sin()).abs() < TOLERANCE);
    assert_eq!(classifier.classify(&state)?, ChromaticCategory::Green);
    Ok(())
}

#[test]
fn test_cnot_chain_on_three_qubits() -> Result<(), ChromaError> {
    let circuit = CircuitBuilder::new()
        .ry(qid(0), PI)
        .cnot(qid(0), qid(1))
        .cnot(qid(1), qid(2))
        .build();
    let state = Simulator::new().run(&circuit)?;
    assert_eq!(state.dim(), 8);
    assert!((state.amplitudes()[0b111].re - 1.0).abs() < TOLERANCE);
    Ok(())
}

#[test]
fn test_sparse_qubit_ids_are_compacted() -> Result<(), ChromaError> {
    // Ids 5 and 9 form a 2-qubit register; 5 is the most significant bit.
    let circuit = CircuitBuilder::new().ry(qid(5), PI).cnot(qid(5), qid(9)).build();
    let state = Simulator::new().run(&circuit)?;
    assert_eq!(state.dim(), 4);
    assert!((state.amplitudes()[3].re - 1.0).abs() < TOLERANCE);
    Ok(())
}

#[test]
fn test_encoder_circuit_display() {
    let circuit = QuantumStateEncoder::new().circuit(&color("#3498DB"), Amplitude::from_polarity(0.0));
    let drawn = circuit.to_string();
    assert!(drawn.starts_with("chromatiq::Circuit[7 operations on 4 qubits]"));
    assert_eq!(drawn.matches("RY").count(), 4);
    assert_eq!(drawn.matches('@').count(), 3);
}
