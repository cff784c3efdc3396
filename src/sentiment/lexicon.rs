// src/sentiment/lexicon.rs

//! Word tables for `LexiconAnalyzer`.

/// Polarity in [-1, 1] for sentiment-bearing words.
pub(crate) const POLARITY: &[(&str, f64)] = &[
    // positive
    ("happy", 0.8),
    ("happiness", 0.8),
    ("joy", 0.8),
    ("joyful", 0.8),
    ("glad", 0.5),
    ("good", 0.7),
    ("great", 0.8),
    ("excellent", 1.0),
    ("wonderful", 1.0),
    ("amazing", 0.6),
    ("awesome", 1.0),
    ("love", 0.5),
    ("lovely", 0.5),
    ("calm", 0.3),
    ("relaxed", 0.3),
    ("content", 0.4),
    ("excited", 0.4),
    ("hopeful", 0.5),
    ("proud", 0.8),
    ("grateful", 0.6),
    ("peaceful", 0.5),
    ("nice", 0.6),
    ("fine", 0.4),
    ("fun", 0.3),
    ("energetic", 0.5),
    ("confident", 0.5),
    ("satisfied", 0.5),
    ("optimistic", 0.5),
    ("cheerful", 0.7),
    ("rested", 0.4),
    // negative
    ("sad", -0.5),
    ("unhappy", -0.6),
    ("angry", -0.5),
    ("furious", -0.8),
    ("bad", -0.7),
    ("terrible", -1.0),
    ("awful", -1.0),
    ("horrible", -1.0),
    ("worst", -1.0),
    ("hate", -0.8),
    ("fear", -0.6),
    ("afraid", -0.6),
    ("scared", -0.6),
    ("anxious", -0.5),
    ("worried", -0.4),
    ("nervous", -0.3),
    ("stressed", -0.6),
    ("stressful", -0.6),
    ("tired", -0.4),
    ("exhausted", -0.4),
    ("overwhelmed", -0.5),
    ("frustrated", -0.6),
    ("upset", -0.5),
    ("lonely", -0.5),
    ("miserable", -0.9),
    ("depressed", -0.7),
    ("bored", -0.5),
    ("annoyed", -0.4),
    ("disappointed", -0.6),
    ("burned", -0.3),
    ("sick", -0.7),
    ("hurt", -0.5),
];

/// Multipliers applied to the next sentiment word.
pub(crate) const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("really", 1.3),
    ("so", 1.3),
    ("extremely", 1.5),
    ("incredibly", 1.5),
    ("totally", 1.4),
    ("completely", 1.4),
    ("quite", 1.1),
    ("pretty", 1.1),
    ("slightly", 0.5),
    ("somewhat", 0.6),
    ("barely", 0.4),
    ("little", 0.6),
];

/// Words that reverse and dampen the next sentiment word.
pub(crate) const NEGATIONS: &[&str] = &["not", "no", "never", "nor", "cannot", "without"];

/// Factor applied to a negated sentiment word.
pub(crate) const NEGATION_FACTOR: f64 = -0.5;
