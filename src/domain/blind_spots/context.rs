//! Context Finder - which drill phase a skill's failures concentrate in.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::config::MIN_CONTEXT_SAMPLES;
use super::{round_rate, BlindSpotConfig, FailureRateCalculator, RecordOutcome, ScoreRecord, SkillCriteria};

/// Failure rate of a skill within one drill phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextBreakdown {
    pub phase: String,
    pub rate: f64,
    pub total: u32,
    /// Practice mode recommended for this phase, if one is mapped.
    pub practice_mode: Option<String>,
}

pub struct ContextFinder;

impl ContextFinder {
    /// Phase with the most failing responses (raw count, not rate).
    ///
    /// `lens` is either a single criterion (see
    /// [`CriterionPolarity::criteria_for`](super::CriterionPolarity::criteria_for))
    /// or a whole skill. Phases are counted in scan order and sorted stably,
    /// so a tie goes to the phase seen first. `None` when nothing failed.
    pub fn most_failing_phase<'a, I>(records: I, lens: &SkillCriteria) -> Option<String>
    where
        I: IntoIterator<Item = &'a ScoreRecord>,
    {
        let mut counts: Vec<(&str, u32)> = Vec::new();
        for record in records {
            let Some(phase) = record.phase() else {
                continue;
            };
            if FailureRateCalculator::evaluate(record, lens) != RecordOutcome::Failed {
                continue;
            }
            match counts.iter_mut().find(|(p, _)| *p == phase) {
                Some((_, count)) => *count += 1,
                None => counts.push((phase, 1)),
            }
        }

        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts.first().map(|(phase, _)| (*phase).to_string())
    }

    /// Per-phase failure rates for phases with at least three relevant
    /// responses, highest rate first.
    pub fn breakdown<'a, I>(
        records: I,
        criteria: &SkillCriteria,
        config: &BlindSpotConfig,
    ) -> Vec<ContextBreakdown>
    where
        I: IntoIterator<Item = &'a ScoreRecord>,
    {
        let mut entries: Vec<ContextBreakdown> = FailureRateCalculator::tally_by_phase(records, criteria)
            .into_iter()
            .filter(|(_, tally)| tally.total >= MIN_CONTEXT_SAMPLES)
            .filter_map(|(phase, tally)| {
                let rate = round_rate(tally.rate()?);
                let practice_mode = config.practice_mode_for(&phase).map(str::to_string);
                Some(ContextBreakdown {
                    phase,
                    rate,
                    total: tally.total,
                    practice_mode,
                })
            })
            .collect();

        entries.sort_by(|a, b| b.rate.partial_cmp(&a.rate).unwrap_or(Ordering::Equal));
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::blind_spots::{CriterionPolarity, SkillDefinition, Thresholds, WindowLengths};
    use crate::domain::foundation::{SessionId, Timestamp, UserId};
    use std::collections::HashMap;

    fn record(phase: &str) -> ScoreRecord {
        ScoreRecord::new(UserId::new("user-1").unwrap(), SessionId::new(), Timestamp::now())
            .with_phase(phase)
    }

    fn criteria() -> SkillCriteria {
        SkillCriteria::new(["clear_ask"], ["rambling"])
    }

    fn config() -> BlindSpotConfig {
        let mut modes = HashMap::new();
        modes.insert("pushback".to_string(), Some("objection-handling".to_string()));
        modes.insert("opening".to_string(), None);
        BlindSpotConfig::new(
            Thresholds::default(),
            WindowLengths::default(),
            vec![SkillDefinition::new("clarity", "Clarity", criteria())],
        )
        .with_practice_modes(modes)
    }

    #[test]
    fn picks_phase_with_most_failures() {
        let records = vec![
            record("opening").with_score("clear_ask", false),
            record("pushback").with_score("clear_ask", false),
            record("pushback").with_score("rambling", true),
            record("closing").with_score("clear_ask", true),
        ];
        assert_eq!(
            ContextFinder::most_failing_phase(&records, &criteria()),
            Some("pushback".to_string())
        );
    }

    #[test]
    fn counts_raw_failures_not_rates() {
        // opening: 2 failures out of 10, pushback: 1 failure out of 1
        let mut records: Vec<ScoreRecord> = (0..8)
            .map(|_| record("opening").with_score("clear_ask", true))
            .collect();
        records.push(record("opening").with_score("clear_ask", false));
        records.push(record("opening").with_score("clear_ask", false));
        records.push(record("pushback").with_score("clear_ask", false));

        assert_eq!(
            ContextFinder::most_failing_phase(&records, &criteria()),
            Some("opening".to_string())
        );
    }

    #[test]
    fn tie_goes_to_first_seen_phase() {
        let records = vec![
            record("closing").with_score("clear_ask", false),
            record("opening").with_score("clear_ask", false),
        ];
        assert_eq!(
            ContextFinder::most_failing_phase(&records, &criteria()),
            Some("closing".to_string())
        );
    }

    #[test]
    fn single_criterion_lens_ignores_other_criteria() {
        let records = vec![
            record("opening").with_score("rambling", true),
            record("closing").with_score("clear_ask", false),
        ];
        let lens = CriterionPolarity::Positive.criteria_for("clear_ask");
        assert_eq!(
            ContextFinder::most_failing_phase(&records, &lens),
            Some("closing".to_string())
        );
    }

    #[test]
    fn none_without_failures() {
        let records = vec![record("opening").with_score("clear_ask", true)];
        assert_eq!(ContextFinder::most_failing_phase(&records, &criteria()), None);
        assert_eq!(ContextFinder::most_failing_phase(&Vec::new(), &criteria()), None);
    }

    #[test]
    fn breakdown_requires_three_samples_and_sorts_by_rate() {
        let mut records = Vec::new();
        // opening: 3 samples, 1 failure -> 0.33
        records.push(record("opening").with_score("clear_ask", false));
        records.push(record("opening").with_score("clear_ask", true));
        records.push(record("opening").with_score("clear_ask", true));
        // pushback: 4 samples, 3 failures -> 0.75
        for _ in 0..3 {
            records.push(record("pushback").with_score("rambling", true));
        }
        records.push(record("pushback").with_score("rambling", false));
        // closing: 2 samples only
        records.push(record("closing").with_score("clear_ask", false));
        records.push(record("closing").with_score("clear_ask", false));

        let breakdown = ContextFinder::breakdown(&records, &criteria(), &config());
        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown[0].phase, "pushback");
        assert_eq!(breakdown[0].rate, 0.75);
        assert_eq!(breakdown[0].total, 4);
        assert_eq!(breakdown[0].practice_mode.as_deref(), Some("objection-handling"));
        assert_eq!(breakdown[1].phase, "opening");
        assert_eq!(breakdown[1].rate, 0.33);
        assert_eq!(breakdown[1].practice_mode, None);
    }

    #[test]
    fn breakdown_serializes_camel_case() {
        let entry = ContextBreakdown {
            phase: "pushback".to_string(),
            rate: 0.5,
            total: 4,
            practice_mode: None,
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert!(json.get("practiceMode").unwrap().is_null());
    }
}
