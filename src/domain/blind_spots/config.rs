//! Skill criteria configuration consumed by the analyzer.
//!
//! Built once at startup (see `crate::config::load_blind_spot_config`) and
//! shared read-only behind an `Arc`. Tests construct it directly.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// Growth-edge floor: the worst skill is only reported above this rate.
pub const GROWTH_EDGE_FLOOR: f64 = 0.05;

/// Baseline samples required before a direction can be judged.
pub const MIN_BASELINE_SAMPLES: u32 = 3;

/// Samples a drill phase needs to appear in a context breakdown.
pub const MIN_CONTEXT_SAMPLES: u32 = 3;

/// Classification thresholds and data-sufficiency minimums.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Failure rate at or above which a skill is a blind spot.
    #[serde(default = "default_blind_spot")]
    pub blind_spot: f64,
    /// Minimum rate drop that counts as improvement.
    #[serde(default = "default_improvement")]
    pub improvement: f64,
    /// Minimum rate rise that counts as slipping.
    #[serde(default = "default_regression")]
    pub regression: f64,
    /// Relevant responses a skill (or criterion) needs before it is analyzed.
    #[serde(default = "default_minimum_responses")]
    pub minimum_responses: u32,
    /// Completed sessions a user needs before any analysis runs.
    #[serde(default = "default_minimum_sessions")]
    pub minimum_sessions: u32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            blind_spot: default_blind_spot(),
            improvement: default_improvement(),
            regression: default_regression(),
            minimum_responses: default_minimum_responses(),
            minimum_sessions: default_minimum_sessions(),
        }
    }
}

fn default_blind_spot() -> f64 {
    0.6
}

fn default_improvement() -> f64 {
    0.2
}

fn default_regression() -> f64 {
    0.15
}

fn default_minimum_responses() -> u32 {
    5
}

fn default_minimum_sessions() -> u32 {
    5
}

/// Lengths of the recent and baseline lookback windows, in days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowLengths {
    #[serde(rename = "recent", default = "default_recent_days")]
    pub recent_days: u32,
    #[serde(rename = "baseline", default = "default_baseline_days")]
    pub baseline_days: u32,
}

impl Default for WindowLengths {
    fn default() -> Self {
        Self {
            recent_days: default_recent_days(),
            baseline_days: default_baseline_days(),
        }
    }
}

/// Longest accepted analysis window, in days.
pub const MAX_WINDOW_DAYS: u32 = 3650;

fn default_recent_days() -> u32 {
    7
}

fn default_baseline_days() -> u32 {
    30
}

/// Positive and negative rubric criteria of one skill.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillCriteria {
    /// Truthy means success.
    #[serde(default)]
    pub positive: Vec<String>,
    /// Truthy means failure.
    #[serde(default)]
    pub negative: Vec<String>,
}

impl SkillCriteria {
    pub fn new<P, N>(positive: P, negative: N) -> Self
    where
        P: IntoIterator,
        P::Item: Into<String>,
        N: IntoIterator,
        N::Item: Into<String>,
    {
        Self {
            positive: positive.into_iter().map(Into::into).collect(),
            negative: negative.into_iter().map(Into::into).collect(),
        }
    }

    /// Criteria set for a single positive criterion.
    pub fn only_positive(criterion: &str) -> Self {
        Self {
            positive: vec![criterion.to_string()],
            negative: Vec::new(),
        }
    }

    /// Criteria set for a single negative criterion.
    pub fn only_negative(criterion: &str) -> Self {
        Self {
            positive: Vec::new(),
            negative: vec![criterion.to_string()],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.positive.is_empty() && self.negative.is_empty()
    }

    /// Positive criteria first, then negative, in configuration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, CriterionPolarity)> {
        self.positive
            .iter()
            .map(|c| (c.as_str(), CriterionPolarity::Positive))
            .chain(
                self.negative
                    .iter()
                    .map(|c| (c.as_str(), CriterionPolarity::Negative)),
            )
    }
}

/// Whether a truthy value means success or failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CriterionPolarity {
    Positive,
    Negative,
}

impl CriterionPolarity {
    /// Single-criterion set with this polarity.
    pub fn criteria_for(self, criterion: &str) -> SkillCriteria {
        match self {
            CriterionPolarity::Positive => SkillCriteria::only_positive(criterion),
            CriterionPolarity::Negative => SkillCriteria::only_negative(criterion),
        }
    }
}

/// A coachable skill and its static presentation metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillDefinition {
    /// Configuration key, e.g. `clarity`.
    #[serde(skip)]
    pub key: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub target: String,
    #[serde(default)]
    pub tips: Vec<String>,
    #[serde(flatten)]
    pub criteria: SkillCriteria,
}

impl SkillDefinition {
    pub fn new(key: impl Into<String>, name: impl Into<String>, criteria: SkillCriteria) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            description: String::new(),
            target: String::new(),
            tips: Vec::new(),
            criteria,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = target.into();
        self
    }

    pub fn with_tips<I>(mut self, tips: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.tips = tips.into_iter().map(Into::into).collect();
        self
    }
}

/// Everything the analyzer reads from configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct BlindSpotConfig {
    pub thresholds: Thresholds,
    pub windows: WindowLengths,
    skills: Vec<SkillDefinition>,
    criteria_labels: HashMap<String, String>,
    practice_modes: HashMap<String, Option<String>>,
}

impl BlindSpotConfig {
    /// Creates a configuration. Skills are analyzed in the given order.
    pub fn new(thresholds: Thresholds, windows: WindowLengths, skills: Vec<SkillDefinition>) -> Self {
        Self {
            thresholds,
            windows,
            skills,
            criteria_labels: HashMap::new(),
            practice_modes: HashMap::new(),
        }
    }

    pub fn with_criteria_labels(mut self, labels: HashMap<String, String>) -> Self {
        self.criteria_labels = labels;
        self
    }

    pub fn with_practice_modes(mut self, modes: HashMap<String, Option<String>>) -> Self {
        self.practice_modes = modes;
        self
    }

    /// Skills in configuration order.
    pub fn skills(&self) -> &[SkillDefinition] {
        &self.skills
    }

    pub fn skill(&self, key: &str) -> Option<&SkillDefinition> {
        self.skills.iter().find(|s| s.key == key)
    }

    /// Human-readable label, falling back to the raw criterion key.
    pub fn criterion_label<'a>(&'a self, criterion: &'a str) -> &'a str {
        self.criteria_labels
            .get(criterion)
            .map(String::as_str)
            .unwrap_or(criterion)
    }

    /// Recommended practice mode slug for a drill phase, if mapped.
    pub fn practice_mode_for(&self, phase: &str) -> Option<&str> {
        self.practice_modes.get(phase).and_then(|m| m.as_deref())
    }

    /// Checks thresholds, windows and skill definitions.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let t = &self.thresholds;
        for (field, value) in [
            ("thresholds.blind_spot", t.blind_spot),
            ("thresholds.improvement", t.improvement),
            ("thresholds.regression", t.regression),
        ] {
            if !(value > 0.0 && value < 1.0) {
                return Err(ValidationError::invalid_format(
                    field,
                    format!("must be strictly between 0 and 1, got {}", value),
                ));
            }
        }
        if t.minimum_responses == 0 {
            return Err(ValidationError::out_of_range("thresholds.minimum_responses", 1, i32::MAX, 0));
        }
        if t.minimum_sessions == 0 {
            return Err(ValidationError::out_of_range("thresholds.minimum_sessions", 1, i32::MAX, 0));
        }
        for (field, days) in [
            ("windows.recent", self.windows.recent_days),
            ("windows.baseline", self.windows.baseline_days),
        ] {
            if days == 0 || days > MAX_WINDOW_DAYS {
                return Err(ValidationError::out_of_range(
                    field,
                    1,
                    MAX_WINDOW_DAYS as i32,
                    i32::try_from(days).unwrap_or(i32::MAX),
                ));
            }
        }
        if self.windows.baseline_days <= self.windows.recent_days {
            return Err(ValidationError::invalid_format(
                "windows.baseline",
                "must be longer than the recent window",
            ));
        }
        if self.skills.is_empty() {
            return Err(ValidationError::empty_field("skill_criteria"));
        }

        let mut seen = HashSet::new();
        for skill in &self.skills {
            if skill.key.trim().is_empty() {
                return Err(ValidationError::empty_field("skill_criteria.<key>"));
            }
            if !seen.insert(skill.key.as_str()) {
                return Err(ValidationError::invalid_format(
                    format!("skill_criteria.{}", skill.key),
                    "duplicate skill key",
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BlindSpotConfig {
        BlindSpotConfig::new(
            Thresholds::default(),
            WindowLengths::default(),
            vec![
                SkillDefinition::new("clarity", "Clarity", SkillCriteria::new(["clear_ask"], ["rambling"])),
                SkillDefinition::new("brevity", "Brevity", SkillCriteria::new(Vec::<String>::new(), ["over_length"])),
            ],
        )
    }

    #[test]
    fn defaults_match_documented_values() {
        let t = Thresholds::default();
        assert_eq!(t.blind_spot, 0.6);
        assert_eq!(t.improvement, 0.2);
        assert_eq!(t.regression, 0.15);
        assert_eq!(t.minimum_responses, 5);
        assert_eq!(t.minimum_sessions, 5);

        let w = WindowLengths::default();
        assert_eq!((w.recent_days, w.baseline_days), (7, 30));
    }

    #[test]
    fn valid_config_passes() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn skills_keep_configuration_order() {
        let config = sample();
        let keys: Vec<_> = config.skills().iter().map(|s| s.key.as_str()).collect();
        assert_eq!(keys, vec!["clarity", "brevity"]);
        assert!(config.skill("brevity").is_some());
        assert!(config.skill("ownership").is_none());
    }

    #[test]
    fn criterion_label_falls_back_to_key() {
        let mut labels = HashMap::new();
        labels.insert("clear_ask".to_string(), "Made a clear ask".to_string());
        let config = sample().with_criteria_labels(labels);

        assert_eq!(config.criterion_label("clear_ask"), "Made a clear ask");
        assert_eq!(config.criterion_label("rambling"), "rambling");
    }

    #[test]
    fn practice_mode_lookup_handles_null_mapping() {
        let mut modes = HashMap::new();
        modes.insert("opening".to_string(), Some("first-impressions".to_string()));
        modes.insert("wrap_up".to_string(), None);
        let config = sample().with_practice_modes(modes);

        assert_eq!(config.practice_mode_for("opening"), Some("first-impressions"));
        assert_eq!(config.practice_mode_for("wrap_up"), None);
        assert_eq!(config.practice_mode_for("unknown"), None);
    }

    #[test]
    fn rejects_threshold_outside_unit_interval() {
        for bad in [0.0, 1.0, -0.2, 1.5, f64::NAN] {
            let mut config = sample();
            config.thresholds.blind_spot = bad;
            assert!(config.validate().is_err(), "{} should be rejected", bad);
        }
    }

    #[test]
    fn rejects_zero_minimums() {
        let mut config = sample();
        config.thresholds.minimum_responses = 0;
        assert!(config.validate().is_err());

        let mut config = sample();
        config.thresholds.minimum_sessions = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_baseline_not_longer_than_recent() {
        let mut config = sample();
        config.windows = WindowLengths { recent_days: 14, baseline_days: 14 };
        assert!(config.validate().is_err());
    }

    #[test]
    fn skill_without_criteria_is_not_a_config_error() {
        let config = BlindSpotConfig::new(
            Thresholds::default(),
            WindowLengths::default(),
            vec![SkillDefinition::new("empty", "Empty", SkillCriteria::default())],
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_windows_longer_than_ten_years() {
        let mut config = sample();
        config.windows = WindowLengths { recent_days: 7, baseline_days: 4_000_000_000 };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("windows.baseline"));

        config.windows = WindowLengths { recent_days: MAX_WINDOW_DAYS + 1, baseline_days: MAX_WINDOW_DAYS + 2 };
        assert!(config.validate().is_err());

        config.windows = WindowLengths { recent_days: 7, baseline_days: MAX_WINDOW_DAYS };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_duplicate_skill_keys() {
        let criteria = SkillCriteria::only_positive("clear_ask");
        let config = BlindSpotConfig::new(
            Thresholds::default(),
            WindowLengths::default(),
            vec![
                SkillDefinition::new("clarity", "Clarity", criteria.clone()),
                SkillDefinition::new("clarity", "Clarity again", criteria),
            ],
        );
        assert!(config.validate().is_err());
    }

    #[test]
    fn criteria_iterate_positive_then_negative() {
        let criteria = SkillCriteria::new(["a", "b"], ["c"]);
        let polarities: Vec<_> = criteria.iter().collect();
        assert_eq!(
            polarities,
            vec![
                ("a", CriterionPolarity::Positive),
                ("b", CriterionPolarity::Positive),
                ("c", CriterionPolarity::Negative),
            ]
        );
    }
}
