//! Runtime configuration for the chromatic clock.

use crate::collaborator::{ChatConfig, DEFAULT_SYSTEM_PROMPT};
use crate::core::ChromaError;
use chrono::TimeDelta;
use log::warn;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Settings for the pipeline, its collaborator client and the driver.
///
/// Layered as defaults → optional JSON file → `CHROMATIQ_*` environment →
/// command-line flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    /// Chat-completions base URL.
    pub api_base: String,
    /// Bearer token for the collaborator.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Model name.
    pub model: String,
    /// System instruction sent with every request.
    pub system_prompt: String,
    /// Emotion label fed to the tick cycle.
    pub emotion: String,
    /// JSON array of `{"text": ...}` records for the batch cycle.
    pub records_path: PathBuf,
    /// Pause between the end of one tick and the start of the next.
    pub tick_interval_ms: u64,
    /// Collaborator request timeout.
    pub request_timeout_ms: u64,
    /// Retries for rate-limited or failing collaborator calls.
    pub max_retries: u32,
    /// First retry delay.
    pub backoff_base_ms: u64,
    /// Retry delay cap.
    pub backoff_max_ms: u64,
    /// Working time after which a break is due.
    pub break_interval_secs: u64,
    /// How far ahead of "now" the next break is announced.
    pub break_lead_secs: u64,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.openai.com/v1".to_string(),
            api_key: None,
            model: "gpt-4-turbo".to_string(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            emotion: "happy".to_string(),
            records_path: PathBuf::from("employee.json"),
            tick_interval_ms: 1_000,
            request_timeout_ms: 30_000,
            max_retries: 3,
            backoff_base_ms: 500,
            backoff_max_ms: 8_000,
            break_interval_secs: 2 * 60 * 60,
            break_lead_secs: 60 * 60,
        }
    }
}

impl ClockConfig {
    /// Optional JSON file, then the process environment, then a range check.
    pub fn load(file: Option<&Path>) -> Result<Self, ChromaError> {
        Self::load_with(file, |key| std::env::var(key).ok())
    }

    /// `load` with an explicit variable lookup.
    pub fn load_with<F>(file: Option<&Path>, lookup: F) -> Result<Self, ChromaError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(lookup);
        config.validate()?;
        Ok(config)
    }

    /// Reads a JSON config file; absent keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ChromaError> {
        let raw = std::fs::read_to_string(path).map_err(|e| ChromaError::Config {
            message: format!("cannot read {}: {}", path.display(), e),
        })?;
        let config: Self = serde_json::from_str(&raw).map_err(|e| ChromaError::Config {
            message: format!("cannot parse {}: {}", path.display(), e),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the clock cannot represent.
    pub fn validate(&self) -> Result<(), ChromaError> {
        seconds("break_interval_secs", self.break_interval_secs)?;
        seconds("break_lead_secs", self.break_lead_secs)?;
        Ok(())
    }

    /// Overlays variables returned by `lookup`. Unparseable numbers are
    /// logged and ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("CHROMATIQ_API_BASE") {
            self.api_base = v;
        }
        if let Some(v) = lookup("CHROMATIQ_API_KEY").or_else(|| lookup("OPENAI_API_KEY")) {
            self.api_key = Some(v);
        }
        if let Some(v) = lookup("CHROMATIQ_MODEL") {
            self.model = v;
        }
        if let Some(v) = lookup("CHROMATIQ_EMOTION") {
            self.emotion = v;
        }
        if let Some(v) = lookup("CHROMATIQ_RECORDS") {
            self.records_path = PathBuf::from(v);
        }
        parse_into(&lookup, "CHROMATIQ_TICK_MS", &mut self.tick_interval_ms);
        parse_into(&lookup, "CHROMATIQ_TIMEOUT_MS", &mut self.request_timeout_ms);
        parse_into(&lookup, "CHROMATIQ_MAX_RETRIES", &mut self.max_retries);
    }

    /// Pause between ticks.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Break interval as a `chrono` duration, saturating at `TimeDelta::MAX`.
    pub fn break_interval(&self) -> TimeDelta {
        seconds("break_interval_secs", self.break_interval_secs).unwrap_or(TimeDelta::MAX)
    }

    /// Break lead as a `chrono` duration, saturating at `TimeDelta::MAX`.
    pub fn break_lead(&self) -> TimeDelta {
        seconds("break_lead_secs", self.break_lead_secs).unwrap_or(TimeDelta::MAX)
    }

    /// Settings for `ChatClient`.
    pub fn chat(&self) -> ChatConfig {
        ChatConfig {
            api_base: self.api_base.clone(),
            api_key: self.api_key.clone(),
            model: self.model.clone(),
            timeout: Duration::from_millis(self.request_timeout_ms),
            max_retries: self.max_retries,
            backoff_base: Duration::from_millis(self.backoff_base_ms),
            backoff_max: Duration::from_millis(self.backoff_max_ms),
        }
    }
}

fn seconds(key: &str, secs: u64) -> Result<TimeDelta, ChromaError> {
    i64::try_from(secs)
        .ok()
        .and_then(TimeDelta::try_seconds)
        .ok_or_else(|| ChromaError::Config {
            message: format!("{} = {} is out of range", key, secs),
        })
}

fn parse_into<F, T>(lookup: &F, key: &str, slot: &mut T)
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    if let Some(raw) = lookup(key) {
        match raw.trim().parse() {
            Ok(v) => *slot = v,
            Err(_) => warn!("ignoring {}={:?}: not a number", key, raw),
        }
    }
}
