//! Constants shared by the encoder and the classifier.

/// Constants for the chromatic encoding.
pub mod chroma_constants {
    /// Rotation scale: a normalized channel of 1.0 rotates by π.
    pub const PI: f64 = std::f64::consts::PI;
    /// Largest value of an 8-bit color channel.
    pub const CHANNEL_MAX: f64 = 255.0;
    /// Number of qubits in the chromatic register (R, G, B, amplitude).
    pub const NUM_QUBITS: usize = 4;
    /// Lower edge of the Yellow zone (inclusive).
    pub const RED_THRESHOLD: f64 = -0.33;
    /// Upper edge of the Yellow zone (inclusive).
    pub const GREEN_THRESHOLD: f64 = 0.33;
    /// Stress score used when no decimal figure is found in collaborator output.
    pub const DEFAULT_STRESS: f64 = 0.5;
}
