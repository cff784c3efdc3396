// src/core/mod.rs

//! Core data structures and types

pub mod error;
pub mod state;

pub use error::{ChromaError, QubitId};
pub use state::StateVector;

pub mod constants;
pub use constants::chroma_constants::{
    CHANNEL_MAX, DEFAULT_STRESS, GREEN_THRESHOLD, NUM_QUBITS, PI, RED_THRESHOLD,
};
