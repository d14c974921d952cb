//! Week-by-week failure rates for the trends chart.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use super::{round_rate, BlindSpotConfig, FailureRateCalculator, ScoreRecord};
use crate::domain::foundation::Timestamp;

/// One ISO week, Monday 00:00 UTC inclusive to the next Monday exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeekRange {
    pub start: Timestamp,
    pub end: Timestamp,
}

impl WeekRange {
    pub fn containing(at: Timestamp) -> Self {
        let start = at.start_of_week();
        Self {
            start,
            end: start.plus_days(7),
        }
    }

    /// The `weeks` weeks ending with the one containing `now`, oldest first.
    pub fn ending_at(now: Timestamp, weeks: u32) -> Vec<Self> {
        let current = Self::containing(now);
        (0..i64::from(weeks))
            .rev()
            .map(|back| {
                let start = current.start.minus_days(back * 7);
                Self {
                    start,
                    end: start.plus_days(7),
                }
            })
            .collect()
    }

    pub fn contains(&self, at: &Timestamp) -> bool {
        *at >= self.start && *at < self.end
    }

    pub fn label(&self) -> String {
        self.start.iso_week_label()
    }
}

/// Per-skill failure rates of one week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklySkillTrend {
    /// ISO week label such as `2026-W42`.
    pub week: String,
    pub week_start: Timestamp,
    /// Skill key to rounded failure rate; `None` when the week has no responses.
    pub data: Option<BTreeMap<String, f64>>,
    pub sessions: u32,
    pub responses: u32,
}

impl WeeklySkillTrend {
    /// Summarizes the records of `week`. Records outside the week are ignored.
    ///
    /// Skills with no relevant responses that week are left out of `data`.
    pub fn summarize(week: WeekRange, records: &[ScoreRecord], config: &BlindSpotConfig) -> Self {
        let in_week: Vec<&ScoreRecord> = records.iter().filter(|r| week.contains(&r.created_at)).collect();
        let sessions: HashSet<_> = in_week.iter().map(|r| r.session_id).collect();

        let data = if in_week.is_empty() {
            None
        } else {
            let rates = config
                .skills()
                .iter()
                .filter_map(|skill| {
                    let tally = FailureRateCalculator::tally(in_week.iter().copied(), &skill.criteria);
                    tally.rate().map(|rate| (skill.key.clone(), round_rate(rate)))
                })
                .collect();
            Some(rates)
        };

        Self {
            week: week.label(),
            week_start: week.start,
            data,
            sessions: u32::try_from(sessions.len()).unwrap_or(u32::MAX),
            responses: u32::try_from(in_week.len()).unwrap_or(u32::MAX),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::blind_spots::{SkillCriteria, SkillDefinition, Thresholds, WindowLengths};
    use crate::domain::foundation::{SessionId, UserId};
    use chrono::{DateTime, Utc};

    fn at(rfc3339: &str) -> Timestamp {
        Timestamp::from_datetime(DateTime::parse_from_rfc3339(rfc3339).unwrap().with_timezone(&Utc))
    }

    fn config() -> BlindSpotConfig {
        BlindSpotConfig::new(
            Thresholds::default(),
            WindowLengths::default(),
            vec![
                SkillDefinition::new("clarity", "Clarity", SkillCriteria::only_positive("clear_ask")),
                SkillDefinition::new("brevity", "Brevity", SkillCriteria::only_negative("rambling")),
            ],
        )
    }

    #[test]
    fn weeks_end_with_current_week() {
        // Wednesday
        let weeks = WeekRange::ending_at(at("2026-10-21T15:00:00Z"), 3);

        assert_eq!(weeks.len(), 3);
        assert_eq!(weeks[2].start, at("2026-10-19T00:00:00Z"));
        assert_eq!(weeks[0].start, at("2026-10-05T00:00:00Z"));
        assert_eq!(weeks[0].end, weeks[1].start);
        assert_eq!(weeks[2].label(), "2026-W43");
    }

    #[test]
    fn week_end_is_exclusive() {
        let week = WeekRange::containing(at("2026-10-21T15:00:00Z"));
        assert!(week.contains(&at("2026-10-19T00:00:00Z")));
        assert!(!week.contains(&at("2026-10-26T00:00:00Z")));
    }

    #[test]
    fn empty_week_has_null_data() {
        let week = WeekRange::containing(at("2026-10-21T15:00:00Z"));
        let trend = WeeklySkillTrend::summarize(week, &[], &config());

        assert_eq!(trend.data, None);
        assert_eq!(trend.sessions, 0);
        assert_eq!(trend.responses, 0);
        assert!(serde_json::to_value(&trend).unwrap()["data"].is_null());
    }

    #[test]
    fn week_rates_per_skill() {
        let user = UserId::new("user-1").unwrap();
        let session_a = SessionId::new();
        let session_b = SessionId::new();
        let when = at("2026-10-20T09:00:00Z");
        let records = vec![
            ScoreRecord::new(user.clone(), session_a, when).with_score("clear_ask", false),
            ScoreRecord::new(user.clone(), session_a, when).with_score("clear_ask", true),
            ScoreRecord::new(user.clone(), session_b, when).with_score("clear_ask", true),
            ScoreRecord::new(user.clone(), session_b, when).with_score("unrelated", true),
            // previous week
            ScoreRecord::new(user, session_b, at("2026-10-18T23:59:59Z")).with_score("rambling", true),
        ];

        let week = WeekRange::containing(when);
        let trend = WeeklySkillTrend::summarize(week, &records, &config());
        let data = trend.data.unwrap();

        assert_eq!(data.get("clarity"), Some(&0.33));
        assert!(!data.contains_key("brevity"));
        assert_eq!(trend.sessions, 2);
        assert_eq!(trend.responses, 4);
    }
}
