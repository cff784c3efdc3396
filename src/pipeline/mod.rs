// src/pipeline/mod.rs

//! The orchestrator: a tick cycle that publishes a chromatic category and a
//! batch cycle that scores stored records for stress.
//!
//! Nothing here is fatal. Collaborator failures and a missing records source
//! are logged and the affected cycle is skipped; the next one retries.

mod state;

pub use state::{BreakSchedule, ClockState, phase_at};

use crate::classify::{ChromaticCategory, ChromaticClassifier};
use crate::collaborator::TextGenerator;
use crate::color::{ColorCode, ColorResolver};
use crate::config::ClockConfig;
use crate::core::ChromaError;
use crate::encoding::QuantumStateEncoder;
use crate::sentiment::{Amplitude, AmplitudeEstimator, SentimentAnalyzer};
use crate::stress::{StressAnalyzer, StressRecordScore, load_records};
use chrono::{DateTime, Local};
use log::{debug, info, warn};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// What a single tick produced.
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// A category was derived and published.
    Published {
        /// The new category.
        category: ChromaticCategory,
        /// The scalar it was bucketed from.
        scalar: f64,
    },
    /// The collaborator named no color; the previous category stays.
    NoColor,
    /// A stage failed; the previous category stays.
    Skipped {
        /// The failure.
        error: ChromaError,
    },
}

/// Summary of one batch pass.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BatchReport {
    /// Records that received a score.
    pub processed: usize,
    /// Records skipped because the collaborator failed.
    pub failed: usize,
    /// Source-level condition (missing or malformed input), if any.
    pub condition: Option<ChromaError>,
}

/// Display boundary: receives the state after every tick.
pub trait Presenter {
    /// Shows `state`.
    fn present(&mut self, state: &ClockState);
}

/// Presents through the `log` facade; repeats go to `debug`.
#[derive(Debug, Default)]
pub struct LogPresenter {
    last_line: Option<String>,
}

impl Presenter for LogPresenter {
    fn present(&mut self, state: &ClockState) {
        let line = format!(
            "Chromatic State: {} | Next Break: {}",
            state.category_label(),
            state.breaks().next_break_label()
        );
        if self.last_line.as_deref() == Some(line.as_str()) {
            debug!("{} | phase {:.3}", line, state.phase());
        } else {
            info!("{} | phase {:.3}", line, state.phase());
            self.last_line = Some(line);
        }
    }
}

/// Runs ColorResolver → AmplitudeEstimator → QuantumStateEncoder →
/// ChromaticClassifier per tick and owns the resulting `ClockState`.
pub struct EmotionPipeline {
    resolver: ColorResolver,
    estimator: AmplitudeEstimator,
    encoder: QuantumStateEncoder,
    classifier: ChromaticClassifier,
    stress: StressAnalyzer,
    emotion: String,
    records_path: PathBuf,
    tick_interval: Duration,
    state: ClockState,
}

impl EmotionPipeline {
    /// Wires the pipeline to `generator` with the lexicon sentiment analyzer
    /// and the default ⟨Z⟩ reduction.
    pub fn new(generator: Arc<dyn TextGenerator>, config: &ClockConfig) -> Self {
        let breaks = BreakSchedule::new(Local::now(), config.break_interval(), config.break_lead());
        Self {
            resolver: ColorResolver::new(generator.clone(), config.system_prompt.clone()),
            estimator: AmplitudeEstimator::default(),
            encoder: QuantumStateEncoder::new(),
            classifier: ChromaticClassifier::default(),
            stress: StressAnalyzer::new(generator, config.system_prompt.clone()),
            emotion: config.emotion.clone(),
            records_path: config.records_path.clone(),
            tick_interval: config.tick_interval(),
            state: ClockState::new(breaks),
        }
    }

    /// Replaces the sentiment analyzer.
    pub fn with_analyzer(mut self, analyzer: Arc<dyn SentimentAnalyzer>) -> Self {
        self.estimator = AmplitudeEstimator::new(analyzer);
        self
    }

    /// Replaces the classifier.
    pub fn with_classifier(mut self, classifier: ChromaticClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Read access for the display layer.
    pub fn state(&self) -> &ClockState {
        &self.state
    }

    /// Emotion label used by the tick cycle.
    pub fn emotion(&self) -> &str {
        &self.emotion
    }

    /// One tick at the current wall-clock time.
    pub async fn tick(&mut self) -> TickOutcome {
        self.tick_at(Local::now()).await
    }

    /// One tick at `now`. Updates phase and break schedule, then runs the
    /// pipeline for the configured emotion.
    pub async fn tick_at(&mut self, now: DateTime<Local>) -> TickOutcome {
        self.state.phase = phase_at(&now);
        self.state.last_tick = Some(now);
        if self.state.breaks.update(now) {
            info!("break recorded, next break at {}", self.state.breaks.next_break_label());
        }

        let emotion = self.emotion.clone();
        let derived = self.derive(&emotion).await;
        match derived {
            Ok(Some((color, amplitude, scalar, category))) => {
                self.state.category = Some(category);
                self.state.last_color = Some(color);
                self.state.last_amplitude = Some(amplitude);
                self.state.last_scalar = Some(scalar);
                self.state.ticks_completed += 1;
                debug!("{} → {} (amplitude {}, scalar {:.4}) → {}", emotion, color, amplitude, scalar, category);
                TickOutcome::Published { category, scalar }
            }
            Ok(None) => {
                self.state.ticks_without_color += 1;
                info!("no color resolved for {:?}; keeping {}", emotion, self.state.category_label());
                TickOutcome::NoColor
            }
            Err(error) => {
                self.state.ticks_skipped += 1;
                warn!("Error updating quantum state: {}", error);
                TickOutcome::Skipped { error }
            }
        }
    }

    /// Color → amplitude → statevector → category for `emotion`.
    async fn derive(
        &self,
        emotion: &str,
    ) -> Result<Option<(ColorCode, Amplitude, f64, ChromaticCategory)>, ChromaError> {
        let Some(color) = self.resolver.resolve(emotion).await? else {
            return Ok(None);
        };
        let amplitude = self.estimator.estimate(emotion);
        let state = self.encoder.encode(&color, amplitude)?;
        let scalar = self.classifier.scalar(&state)?;
        Ok(Some((color, amplitude, scalar, ChromaticCategory::from_scalar(scalar))))
    }

    /// Batch cycle over the configured records source.
    pub async fn process_records(&mut self) -> BatchReport {
        let path = self.records_path.clone();
        self.process_records_from(&path).await
    }

    /// Batch cycle over `path`. Replaces the stored scores on success.
    pub async fn process_records_from(&mut self, path: &Path) -> BatchReport {
        let records = match load_records(path) {
            Ok(records) => records,
            Err(condition) => {
                warn!("{}; no records processed", condition);
                return BatchReport {
                    condition: Some(condition),
                    ..BatchReport::default()
                };
            }
        };

        let mut report = BatchReport::default();
        let mut scores = Vec::with_capacity(records.len());
        for (index, record) in records.into_iter().enumerate() {
            match self.stress.score(&record.text).await {
                Ok(score) => {
                    debug!("record {} stress {:.1}", index, score);
                    scores.push(StressRecordScore { index, text: record.text, score });
                    report.processed += 1;
                }
                Err(e) => {
                    warn!("record {} skipped: {}", index, e);
                    report.failed += 1;
                }
            }
        }

        info!("batch scored {} records ({} skipped)", report.processed, report.failed);
        self.state.stress_scores = scores;
        report
    }

    /// Ticks until `shutdown` resolves. The interval is slept after each
    /// pass completes, so a slow pass delays the next one and passes never
    /// overlap. Shutdown is observed between passes.
    pub async fn run_until<P, F>(&mut self, presenter: &mut P, shutdown: F)
    where
        P: Presenter,
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        loop {
            self.tick().await;
            presenter.present(&self.state);
            tokio::select! {
                biased;
                _ = &mut shutdown => break,
                _ = tokio::time::sleep(self.tick_interval) => {}
            }
        }
        info!(
            "clock stopped after {} published, {} without color, {} skipped ticks",
            self.state.ticks_completed, self.state.ticks_without_color, self.state.ticks_skipped
        );
    }
}
