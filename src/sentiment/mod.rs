//! Free text → sentiment polarity → rotation amplitude.

mod lexicon;

use log::trace;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

/// Scores how positive or negative a text is.
pub trait SentimentAnalyzer: Send + Sync {
    /// Polarity in [-1, 1]. Text with nothing to analyze scores 0.
    fn polarity(&self, text: &str) -> f64;
}

struct Tables {
    polarity: HashMap<&'static str, f64>,
    intensifiers: HashMap<&'static str, f64>,
}

static TABLES: OnceLock<Tables> = OnceLock::new();

fn tables() -> &'static Tables {
    TABLES.get_or_init(|| Tables {
        polarity: lexicon::POLARITY.iter().copied().collect(),
        intensifiers: lexicon::INTENSIFIERS.iter().copied().collect(),
    })
}

/// Rule-based analyzer over a fixed word lexicon.
///
/// Each lexicon word found yields its polarity, scaled by any intensifiers
/// before it and by -0.5 if a negation precedes it. The text's polarity is
/// the mean of those scores, clamped to [-1, 1]. No network access.
#[derive(Debug, Default, Clone, Copy)]
pub struct LexiconAnalyzer;

impl LexiconAnalyzer {
    /// Creates the analyzer.
    pub fn new() -> Self {
        Self
    }
}

fn is_negation(token: &str) -> bool {
    lexicon::NEGATIONS.contains(&token) || token.ends_with("n't")
}

impl SentimentAnalyzer for LexiconAnalyzer {
    fn polarity(&self, text: &str) -> f64 {
        let tables = tables();
        let lowered = text.to_lowercase().replace('\u{2019}', "'");
        let tokens = lowered
            .split(|c: char| !(c.is_alphanumeric() || c == '\''))
            .filter(|t| !t.is_empty());

        let mut scores = Vec::new();
        let mut modifier = 1.0;
        let mut negated = false;

        for token in tokens {
            if is_negation(token) {
                negated = true;
            } else if let Some(factor) = tables.intensifiers.get(token) {
                modifier *= factor;
            } else if let Some(polarity) = tables.polarity.get(token) {
                let mut score = polarity * modifier;
                if negated {
                    score *= lexicon::NEGATION_FACTOR;
                }
                scores.push(score.clamp(-1.0, 1.0));
                modifier = 1.0;
                negated = false;
            }
        }

        if scores.is_empty() {
            return 0.0;
        }
        let mean = scores.iter().sum::<f64>() / scores.len() as f64;
        trace!("polarity {:.3} from {} lexicon hits", mean, scores.len());
        mean.clamp(-1.0, 1.0)
    }
}

/// A rotation amplitude in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Amplitude(f64);

impl Amplitude {
    /// Maps polarity in [-1, 1] to `(polarity + 1) / 2`.
    /// Out-of-range input is clamped and NaN counts as neutral.
    pub fn from_polarity(polarity: f64) -> Self {
        let polarity = if polarity.is_nan() { 0.0 } else { polarity.clamp(-1.0, 1.0) };
        Self((polarity + 1.0) / 2.0)
    }

    /// The raw value.
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for Amplitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.0)
    }
}

/// Turns text into an `Amplitude` through a sentiment analyzer.
#[derive(Clone)]
pub struct AmplitudeEstimator {
    analyzer: Arc<dyn SentimentAnalyzer>,
}

impl Default for AmplitudeEstimator {
    fn default() -> Self {
        Self::new(Arc::new(LexiconAnalyzer::new()))
    }
}

impl AmplitudeEstimator {
    /// Wraps `analyzer`.
    pub fn new(analyzer: Arc<dyn SentimentAnalyzer>) -> Self {
        Self { analyzer }
    }

    /// Amplitude for `text`; never fails.
    pub fn estimate(&self, text: &str) -> Amplitude {
        Amplitude::from_polarity(self.analyzer.polarity(text))
    }
}
