//! Time windows of one analysis run.
//!
//! Boundaries are derived once from a single `now` and shared by every skill
//! in the run, so two skills never see windows that differ by the time it
//! took to analyze the first one.

use super::{ScoreRecord, WindowLengths};
use crate::domain::foundation::Timestamp;

/// Window boundaries for one analysis run.
///
/// - all: `created_at >= baseline_start`
/// - recent: `created_at >= recent_start`
/// - baseline (between-period): `baseline_start <= created_at < recent_start`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisWindows {
    pub now: Timestamp,
    pub recent_start: Timestamp,
    pub baseline_start: Timestamp,
}

impl AnalysisWindows {
    pub fn at(now: Timestamp, lengths: &WindowLengths) -> Self {
        Self {
            now,
            recent_start: now.minus_days(i64::from(lengths.recent_days)),
            baseline_start: now.minus_days(i64::from(lengths.baseline_days)),
        }
    }

    pub fn in_recent(&self, at: &Timestamp) -> bool {
        *at >= self.recent_start
    }

    pub fn in_between_period(&self, at: &Timestamp) -> bool {
        *at >= self.baseline_start && *at < self.recent_start
    }
}

/// The three record sets of one run, fetched once and reused for every skill.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreWindows {
    /// Full baseline-length lookback.
    pub all: Vec<ScoreRecord>,
    /// Short recent window.
    pub recent: Vec<ScoreRecord>,
    /// Lookback minus the recent window.
    pub baseline: Vec<ScoreRecord>,
}

impl ScoreWindows {
    pub fn new(all: Vec<ScoreRecord>, recent: Vec<ScoreRecord>, baseline: Vec<ScoreRecord>) -> Self {
        Self { all, recent, baseline }
    }

    /// Splits a lookback set (already limited to `created_at >= baseline_start`)
    /// into the three windows.
    pub fn split(all: Vec<ScoreRecord>, bounds: &AnalysisWindows) -> Self {
        let recent = all
            .iter()
            .filter(|r| bounds.in_recent(&r.created_at))
            .cloned()
            .collect();
        let baseline = all
            .iter()
            .filter(|r| bounds.in_between_period(&r.created_at))
            .cloned()
            .collect();
        Self { all, recent, baseline }
    }
}
