//! Insights configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;
use crate::application::{DEFAULT_HISTORY_WEEKS, MAX_HISTORY_WEEKS};

/// Where the skill catalog lives and how much history the API serves.
#[derive(Debug, Clone, Deserialize)]
pub struct InsightsConfig {
    /// YAML skill catalog, see `config/skills.yaml`
    #[serde(default = "default_skills_path")]
    pub skills_path: PathBuf,

    /// Weeks returned by the history endpoint when none are requested
    #[serde(default = "default_history_weeks")]
    pub history_weeks: u32,

    /// Upper bound on requested history weeks
    #[serde(default = "default_max_history_weeks")]
    pub max_history_weeks: u32,
}

impl InsightsConfig {
    /// Clamps a requested week count into `1..=max_history_weeks`.
    pub fn history_weeks_for(&self, requested: Option<u32>) -> u32 {
        requested
            .unwrap_or(self.history_weeks)
            .clamp(1, self.max_history_weeks.max(1))
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.skills_path.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("PRACTICE_COACH__INSIGHTS__SKILLS_PATH"));
        }
        if self.max_history_weeks == 0 || self.max_history_weeks > MAX_HISTORY_WEEKS {
            return Err(ValidationError::InvalidHistoryWeeks(format!(
                "max_history_weeks must be between 1 and {}, got {}",
                MAX_HISTORY_WEEKS, self.max_history_weeks
            )));
        }
        if self.history_weeks == 0 || self.history_weeks > self.max_history_weeks {
            return Err(ValidationError::InvalidHistoryWeeks(format!(
                "history_weeks must be between 1 and {}, got {}",
                self.max_history_weeks, self.history_weeks
            )));
        }
        Ok(())
    }
}

impl Default for InsightsConfig {
    fn default() -> Self {
        Self {
            skills_path: default_skills_path(),
            history_weeks: default_history_weeks(),
            max_history_weeks: default_max_history_weeks(),
        }
    }
}

fn default_skills_path() -> PathBuf {
    PathBuf::from("config/skills.yaml")
}

fn default_history_weeks() -> u32 {
    DEFAULT_HISTORY_WEEKS
}

fn default_max_history_weeks() -> u32 {
    52
}
