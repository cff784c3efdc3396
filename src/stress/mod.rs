//! Stored text records and their collaborator-estimated stress scores.

use crate::collaborator::{TextGenerator, stress_prompt};
use crate::core::{ChromaError, DEFAULT_STRESS};
use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::Path;
use std::sync::{Arc, OnceLock};

static STRESS_FIGURE: OnceLock<Regex> = OnceLock::new();

fn stress_figure_pattern() -> &'static Regex {
    STRESS_FIGURE.get_or_init(|| Regex::new(r"\b([0-9]\.[0-9])\b").expect("stress figure regex must compile"))
}

/// One stored record. Extra fields in the source are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StressRecord {
    /// Free text written by or about an employee.
    pub text: String,
}

/// The score attached to one record, in arrival order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StressRecordScore {
    /// Position of the record in the source.
    pub index: usize,
    /// The record text.
    pub text: String,
    /// Extracted stress figure, or 0.5 when the reply held none.
    pub score: f64,
}

/// Loads records from a JSON array of `{"text": ...}` objects.
///
/// A missing file is `ChromaError::MissingInput`; unreadable or malformed
/// content is `ChromaError::MalformedRecords`.
pub fn load_records(path: &Path) -> Result<Vec<StressRecord>, ChromaError> {
    let raw = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ChromaError::MissingInput { path: path.to_path_buf() },
        _ => ChromaError::MalformedRecords {
            message: format!("{}: {}", path.display(), e),
        },
    })?;
    let records: Vec<StressRecord> = serde_json::from_str(&raw)?;
    debug!("loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

/// First standalone ASCII `d.d` figure in `reply`, or 0.5 if there is none.
pub fn extract_stress_score(reply: &str) -> f64 {
    stress_figure_pattern()
        .captures(reply)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(DEFAULT_STRESS)
}

/// Asks the collaborator for a stress description and extracts a figure from it.
#[derive(Clone)]
pub struct StressAnalyzer {
    generator: Arc<dyn TextGenerator>,
    system_prompt: String,
}

impl StressAnalyzer {
    /// Creates an analyzer that frames requests with `system_prompt`.
    pub fn new(generator: Arc<dyn TextGenerator>, system_prompt: impl Into<String>) -> Self {
        Self {
            generator,
            system_prompt: system_prompt.into(),
        }
    }

    /// Stress score for `text`. Only collaborator failures are errors.
    pub async fn score(&self, text: &str) -> Result<f64, ChromaError> {
        let reply = self.generator.complete(&self.system_prompt, &stress_prompt(text)).await?;
        Ok(extract_stress_score(&reply))
    }
}
