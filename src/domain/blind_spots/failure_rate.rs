//! Failure Rate Calculator - how often a skill's criteria fail.

use serde::{Deserialize, Serialize};

use super::{CriterionPolarity, ScoreRecord, SkillCriteria};

/// Relevant and failing response counts for one skill or criterion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureTally {
    /// Responses containing at least one of the criteria.
    pub total: u32,
    /// Relevant responses where at least one criterion failed.
    pub failures: u32,
}

impl FailureTally {
    pub fn new(total: u32, failures: u32) -> Self {
        Self { total, failures }
    }

    /// Failure ratio, or `None` without relevant responses.
    pub fn rate(&self) -> Option<f64> {
        if self.total == 0 {
            None
        } else {
            Some(f64::from(self.failures) / f64::from(self.total))
        }
    }

    pub fn has_data(&self) -> bool {
        self.total > 0
    }

    fn record(&mut self, outcome: RecordOutcome) {
        match outcome {
            RecordOutcome::Irrelevant => {}
            RecordOutcome::Passed => self.total += 1,
            RecordOutcome::Failed => {
                self.total += 1;
                self.failures += 1;
            }
        }
    }
}

/// How one response fared against a criteria set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// The response carries none of the criteria.
    Irrelevant,
    Passed,
    Failed,
}

/// Rounds a rate to two decimals, clamped to `[0, 1]`.
pub fn round_rate(rate: f64) -> f64 {
    ((rate * 100.0).round() / 100.0).clamp(0.0, 1.0)
}

/// Stateless failure counting over score records.
pub struct FailureRateCalculator;

impl FailureRateCalculator {
    /// Evaluates one response.
    ///
    /// A single failing criterion fails the whole response: a falsy positive
    /// criterion or a truthy negative criterion. Criteria missing from the
    /// response are ignored.
    pub fn evaluate(record: &ScoreRecord, criteria: &SkillCriteria) -> RecordOutcome {
        let mut relevant = false;
        let mut failed = false;

        for (criterion, polarity) in criteria.iter() {
            let Some(value) = record.scores.get(criterion) else {
                continue;
            };
            relevant = true;
            let truthy = value.is_truthy();
            let criterion_failed = match polarity {
                CriterionPolarity::Positive => !truthy,
                CriterionPolarity::Negative => truthy,
            };
            if criterion_failed {
                failed = true;
                break;
            }
        }

        match (relevant, failed) {
            (false, _) => RecordOutcome::Irrelevant,
            (true, true) => RecordOutcome::Failed,
            (true, false) => RecordOutcome::Passed,
        }
    }

    /// Counts relevant and failing responses.
    ///
    /// Empty input yields `{total: 0, failures: 0}`.
    pub fn tally<'a, I>(records: I, criteria: &SkillCriteria) -> FailureTally
    where
        I: IntoIterator<Item = &'a ScoreRecord>,
    {
        let mut tally = FailureTally::default();
        for record in records {
            tally.record(Self::evaluate(record, criteria));
        }
        tally
    }

    /// Tallies per drill phase, phases in first-encountered order.
    ///
    /// Responses without a phase are skipped, as are phases with no
    /// relevant responses.
    pub fn tally_by_phase<'a, I>(records: I, criteria: &SkillCriteria) -> Vec<(String, FailureTally)>
    where
        I: IntoIterator<Item = &'a ScoreRecord>,
    {
        let mut phases: Vec<(String, FailureTally)> = Vec::new();
        for record in records {
            let Some(phase) = record.phase() else {
                continue;
            };
            let outcome = Self::evaluate(record, criteria);
            if outcome == RecordOutcome::Irrelevant {
                continue;
            }
            match phases.iter_mut().find(|(p, _)| p == phase) {
                Some((_, tally)) => tally.record(outcome),
                None => {
                    let mut tally = FailureTally::default();
                    tally.record(outcome);
                    phases.push((phase.to_string(), tally));
                }
            }
        }
        phases
    }
}
