// src/pipeline/state.rs

use crate::classify::ChromaticCategory;
use crate::color::ColorCode;
use crate::core::PI;
use crate::sentiment::Amplitude;
use crate::stress::StressRecordScore;
use chrono::{DateTime, Duration, Local, Timelike};
use std::fmt;

/// Clock phase for a wall-clock time: `(hour + minute/60) · π/12`.
pub fn phase_at<T: Timelike>(time: &T) -> f64 {
    (f64::from(time.hour()) + f64::from(time.minute()) / 60.0) * PI / 12.0
}

/// Tracks when the last break happened and announces the next one.
#[derive(Debug, Clone, PartialEq)]
pub struct BreakSchedule {
    last_break: DateTime<Local>,
    next_break: Option<DateTime<Local>>,
    interval: Duration,
    lead: Duration,
}

impl BreakSchedule {
    /// Starts counting from `start`; no break is announced yet.
    pub fn new(start: DateTime<Local>, interval: Duration, lead: Duration) -> Self {
        Self {
            last_break: start,
            next_break: None,
            interval,
            lead,
        }
    }

    /// Records a break once `interval` has elapsed since the last one and
    /// announces the next at `now + lead`. Returns whether a break was recorded.
    /// A lead past the representable range leaves no break announced.
    pub fn update(&mut self, now: DateTime<Local>) -> bool {
        if now.signed_duration_since(self.last_break) >= self.interval {
            self.last_break = now;
            self.next_break = now.checked_add_signed(self.lead);
            true
        } else {
            false
        }
    }

    /// Time of the last recorded break.
    pub fn last_break(&self) -> DateTime<Local> {
        self.last_break
    }

    /// Announced next break, if any.
    pub fn next_break(&self) -> Option<DateTime<Local>> {
        self.next_break
    }

    /// `HH:MM` of the next break, `--:--` before one is announced.
    pub fn next_break_label(&self) -> String {
        self.next_break
            .map(|t| t.format("%H:%M").to_string())
            .unwrap_or_else(|| "--:--".to_string())
    }
}

/// Everything the display layer reads. Written only by `EmotionPipeline`.
#[derive(Debug, Clone)]
pub struct ClockState {
    pub(crate) category: Option<ChromaticCategory>,
    pub(crate) phase: f64,
    pub(crate) last_color: Option<ColorCode>,
    pub(crate) last_amplitude: Option<Amplitude>,
    pub(crate) last_scalar: Option<f64>,
    pub(crate) last_tick: Option<DateTime<Local>>,
    pub(crate) stress_scores: Vec<StressRecordScore>,
    pub(crate) breaks: BreakSchedule,
    pub(crate) ticks_completed: u64,
    pub(crate) ticks_without_color: u64,
    pub(crate) ticks_skipped: u64,
}

impl ClockState {
    pub(crate) fn new(breaks: BreakSchedule) -> Self {
        Self {
            category: None,
            phase: 0.0,
            last_color: None,
            last_amplitude: None,
            last_scalar: None,
            last_tick: None,
            stress_scores: Vec::new(),
            breaks,
            ticks_completed: 0,
            ticks_without_color: 0,
            ticks_skipped: 0,
        }
    }

    /// Last successfully published category; `None` until the first one.
    pub fn category(&self) -> Option<ChromaticCategory> {
        self.category
    }

    /// Category name, or `Unknown` before the first successful tick.
    pub fn category_label(&self) -> String {
        self.category.map(|c| c.to_string()).unwrap_or_else(|| "Unknown".to_string())
    }

    /// Clock phase of the latest tick.
    pub fn phase(&self) -> f64 {
        self.phase
    }

    /// Color behind the latest category.
    pub fn last_color(&self) -> Option<ColorCode> {
        self.last_color
    }

    /// Amplitude behind the latest category.
    pub fn last_amplitude(&self) -> Option<Amplitude> {
        self.last_amplitude
    }

    /// Scalar the latest category was derived from.
    pub fn last_scalar(&self) -> Option<f64> {
        self.last_scalar
    }

    /// Start time of the latest tick, successful or not.
    pub fn last_tick(&self) -> Option<DateTime<Local>> {
        self.last_tick
    }

    /// Per-record scores from the latest batch.
    pub fn stress_scores(&self) -> &[StressRecordScore] {
        &self.stress_scores
    }

    /// Break schedule as of the latest tick.
    pub fn breaks(&self) -> &BreakSchedule {
        &self.breaks
    }

    /// Ticks that published a category.
    pub fn ticks_completed(&self) -> u64 {
        self.ticks_completed
    }

    /// Ticks whose collaborator reply held no color.
    pub fn ticks_without_color(&self) -> u64 {
        self.ticks_without_color
    }

    /// Ticks aborted by an error.
    pub fn ticks_skipped(&self) -> u64 {
        self.ticks_skipped
    }
}

impl fmt::Display for ClockState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Chromatic State: {} | phase {:.3} | Next Break: {}",
            self.category_label(),
            self.phase,
            self.breaks.next_break_label()
        )
    }
}
