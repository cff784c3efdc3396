// src/lib.rs

//! `chromatiq` - chromatic quantum zones
//!
//! Maps an emotion to a color through a text-generation collaborator, encodes
//! the color and a sentiment amplitude into a simulated 4-qubit statevector,
//! and buckets that state into a Red, Yellow or Green zone.

pub mod core;
pub mod operations;
pub mod circuits;
pub mod simulation;
pub mod validation;
pub mod color;
pub mod sentiment;
pub mod encoding;
pub mod classify;
pub mod stress;
pub mod collaborator;
pub mod config;
pub mod pipeline;

// Re-export the most common types for easier top-level use
pub use crate::core::{ChromaError, QubitId, StateVector};
pub use operations::Operation;
pub use circuits::{Circuit, CircuitBuilder};
pub use simulation::Simulator;
pub use validation::{check_normalization, expectation_z, probabilities};
pub use color::{ColorCode, ColorResolver};
pub use sentiment::{Amplitude, AmplitudeEstimator, LexiconAnalyzer, SentimentAnalyzer};
pub use encoding::QuantumStateEncoder;
pub use classify::{ChromaticCategory, ChromaticClassifier, StateReduction};
pub use stress::{StressAnalyzer, StressRecord, StressRecordScore, extract_stress_score, load_records};
pub use collaborator::{ChatClient, ChatConfig, TextGenerator};
pub use config::ClockConfig;
pub use pipeline::{BatchReport, ClockState, EmotionPipeline, LogPresenter, Presenter, TickOutcome};

// Example 1: Encoding a color and classifying it
// A pure green color with amplitude 0.8 (sentiment polarity 0.6).
/// ```
/// use chromatiq::{Amplitude, ChromaticCategory, ChromaticClassifier, ColorCode, QuantumStateEncoder, ChromaError};
///
/// let color: ColorCode = "#00FF00".parse()?;
/// let amplitude = Amplitude::from_polarity(0.6);
///
/// let state = QuantumStateEncoder::new().encode(&color, amplitude)?;
/// assert_eq!(state.dim(), 16);
///
/// // <Z> on qubit 3 = cos(0) * cos(pi) * cos(0) * cos(0.8 pi) ~= 0.809
/// let classifier = ChromaticClassifier::default();
/// let s = classifier.scalar(&state)?;
/// assert!((s - 0.809_016_994_374_947_4).abs() < 1e-9);
/// assert_eq!(classifier.classify(&state)?, ChromaticCategory::Green);
/// # Ok::<(), ChromaError>(())
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item

// Example 2: Building and running a circuit directly
// RY(pi/2) then CNOT prepares (|00> + |11>)/sqrt(2).
/// ```
/// use chromatiq::{CircuitBuilder, QubitId, Simulator, ChromaError};
/// use std::f64::consts::{FRAC_1_SQRT_2, PI};
///
/// let circuit = CircuitBuilder::new()
///     .ry(QubitId(0), PI / 2.0)
///     .cnot(QubitId(0), QubitId(1))
///     .build();
/// println!("{}", circuit);
///
/// let state = Simulator::new().run(&circuit)?;
/// let amps = state.amplitudes();
/// assert!((amps[0].re - FRAC_1_SQRT_2).abs() < 1e-12);
/// assert!(amps[1].norm() < 1e-12);
/// assert!(amps[2].norm() < 1e-12);
/// assert!((amps[3].re - FRAC_1_SQRT_2).abs() < 1e-12);
/// # Ok::<(), ChromaError>(())
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item
