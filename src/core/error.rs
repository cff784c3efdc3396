//! Error handling logic

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Identifier for a simulated qubit.
/// Qubits are ordered by id; the lowest id maps to the most significant bit
/// of a basis-state index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QubitId(pub u64);

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

/// Error types raised by the simulator, the collaborators and the pipeline.
///
/// A pattern that is missing from collaborator output (no hex color, no
/// decimal stress figure) is not represented here. Those outcomes travel as
/// data: `Option<ColorCode>` and the default stress score.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChromaError {
    /// State vector lost its unit norm.
    #[error("Incoherence Violation: {message}")]
    Incoherence {
        /// Incoherence failure message
        message: String,
    },

    /// A qubit referenced by an operation is not part of the simulation.
    #[error("Reference Violation: {message}")]
    ReferenceViolation {
        /// ReferenceViolation failure message
        message: String,
    },

    /// An operation is inconsistent with the circuit it is applied to.
    #[error("Invalid Operation: {message}")]
    InvalidOperation {
        /// InvalidOperation failure message
        message: String,
    },

    /// General error encountered during the simulation process itself.
    #[error("Simulation Process Error: {message}")]
    SimulationError {
        /// SimulationError failure message
        message: String,
    },

    /// Text that does not hold a `#RRGGBB` color.
    #[error("Invalid color code: {input:?}")]
    InvalidColor {
        /// The rejected input
        input: String,
    },

    /// The text-generation collaborator could not be reached or answered with an error.
    #[error("Collaborator unavailable: {message}")]
    CollaboratorUnavailable {
        /// Transport or service failure message
        message: String,
    },

    /// The collaborator did not answer within the configured timeout.
    #[error("Collaborator timed out: {message}")]
    CollaboratorTimeout {
        /// Timeout message
        message: String,
    },

    /// A configuration file or value that cannot be used.
    #[error("Configuration error: {message}")]
    Config {
        /// Read, parse or range failure message
        message: String,
    },

    /// The stored-records source does not exist.
    #[error("Missing input: {} not found", path.display())]
    MissingInput {
        /// Path that was looked up
        path: PathBuf,
    },

    /// The stored-records source exists but could not be read or parsed.
    #[error("Malformed records: {message}")]
    MalformedRecords {
        /// Read or parse failure message
        message: String,
    },
}

impl ChromaError {
    /// True for failures of the text-generation collaborator.
    pub fn is_collaborator(&self) -> bool {
        matches!(
            self,
            ChromaError::CollaboratorUnavailable { .. } | ChromaError::CollaboratorTimeout { .. }
        )
    }
}

impl From<reqwest::Error> for ChromaError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ChromaError::CollaboratorTimeout { message: err.to_string() }
        } else {
            ChromaError::CollaboratorUnavailable { message: err.to_string() }
        }
    }
}

impl From<serde_json::Error> for ChromaError {
    fn from(err: serde_json::Error) -> Self {
        ChromaError::MalformedRecords { message: err.to_string() }
    }
}
