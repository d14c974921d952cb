//! Skill Trend Classifier - which way a skill's failure rate is heading.

use serde::{Deserialize, Serialize};

use super::config::{Thresholds, MIN_BASELINE_SAMPLES};
use super::round_rate;

/// Direction of a skill's failure rate, recent window vs the period before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillTrend {
    /// Not enough earlier responses to judge direction.
    New,
    Improving,
    /// Bad in both windows without meaningful progress.
    Stuck,
    Stable,
    Slipping,
}

impl SkillTrend {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkillTrend::New => "new",
            SkillTrend::Improving => "improving",
            SkillTrend::Stuck => "stuck",
            SkillTrend::Stable => "stable",
            SkillTrend::Slipping => "slipping",
        }
    }

    /// Classifies a skill. First matching rule wins:
    ///
    /// 1. fewer than 3 baseline samples: `New`
    /// 2. both rates at or above the blind spot threshold: `Improving` if the
    ///    drop reaches the improvement threshold, else `Stuck`
    /// 3. drop reaches the improvement threshold: `Improving`
    /// 4. rise reaches the regression threshold: `Slipping`
    /// 5. otherwise `Stable`
    ///
    /// Rates are expected already rounded to two decimals; the delta is
    /// rounded the same way so a 0.50 to 0.30 drop compares as exactly 0.20.
    pub fn classify(
        current_rate: f64,
        baseline_rate: f64,
        baseline_sample_size: u32,
        thresholds: &Thresholds,
    ) -> Self {
        if baseline_sample_size < MIN_BASELINE_SAMPLES {
            return SkillTrend::New;
        }

        let delta = round_delta(baseline_rate - current_rate);

        let chronically_bad =
            current_rate >= thresholds.blind_spot && baseline_rate >= thresholds.blind_spot;
        if chronically_bad {
            return if delta >= thresholds.improvement {
                SkillTrend::Improving
            } else {
                SkillTrend::Stuck
            };
        }

        if delta >= thresholds.improvement {
            SkillTrend::Improving
        } else if delta <= -thresholds.regression {
            SkillTrend::Slipping
        } else {
            SkillTrend::Stable
        }
    }
}

impl std::fmt::Display for SkillTrend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn round_delta(delta: f64) -> f64 {
    if delta < 0.0 {
        -round_rate(-delta)
    } else {
        round_rate(delta)
    }
}
