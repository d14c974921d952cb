//! Skill Analysis Assembler - one structured analysis per skill.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::{
    round_rate, BlindSpotConfig, ContextBreakdown, ContextFinder, CriterionPolarity,
    FailureRateCalculator, ScoreWindows, SkillDefinition, SkillTrend,
};

/// A criterion failing at or above the blind spot threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailingCriterion {
    pub criterion: String,
    pub label: String,
    pub polarity: CriterionPolarity,
    pub rate: f64,
    pub total: u32,
}

/// Analysis of one skill for one user.
///
/// Only exists when the skill has at least `minimum_responses` relevant
/// responses in the lookback window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillAnalysis {
    pub skill: String,
    pub name: String,
    pub description: String,
    pub target: String,
    pub tips: Vec<String>,
    pub trend: SkillTrend,
    pub current_rate: f64,
    pub baseline_rate: f64,
    /// Relevant responses in the full lookback window.
    pub sample_size: u32,
    /// Relevant responses in the between-period.
    pub baseline_sample_size: u32,
    pub primary_issue: Option<String>,
    pub primary_issue_label: Option<String>,
    pub failing_criteria: Vec<FailingCriterion>,
    pub context: Option<String>,
    pub context_breakdown: Vec<ContextBreakdown>,
    pub recommended_practice_mode: Option<String>,
}

impl SkillAnalysis {
    pub fn is_blind_spot(&self, blind_spot_threshold: f64) -> bool {
        self.current_rate >= blind_spot_threshold
    }

    pub fn is_improving(&self) -> bool {
        self.trend == SkillTrend::Improving
    }

    pub fn is_slipping(&self) -> bool {
        self.trend == SkillTrend::Slipping
    }

    /// Drop in failure rate from the between-period to now.
    pub fn improvement(&self) -> f64 {
        self.baseline_rate - self.current_rate
    }
}

pub struct SkillAnalysisAssembler;

impl SkillAnalysisAssembler {
    /// Builds the analysis of `skill` from the run's record windows.
    ///
    /// Returns `None` when the skill lacks enough relevant responses; such
    /// skills are left out of every output rather than reported as zero.
    pub fn assemble(
        skill: &SkillDefinition,
        windows: &ScoreWindows,
        config: &BlindSpotConfig,
    ) -> Option<SkillAnalysis> {
        let thresholds = &config.thresholds;
        let criteria = &skill.criteria;

        let all = FailureRateCalculator::tally(&windows.all, criteria);
        if all.total < thresholds.minimum_responses {
            return None;
        }
        let recent = FailureRateCalculator::tally(&windows.recent, criteria);
        let baseline = FailureRateCalculator::tally(&windows.baseline, criteria);

        let current_rate = round_rate(recent.rate().or(all.rate()).unwrap_or(0.0));
        // No earlier data means no detectable change, not improvement from zero.
        let baseline_rate = baseline.rate().map(round_rate).unwrap_or(current_rate);

        let trend = SkillTrend::classify(current_rate, baseline_rate, baseline.total, thresholds);

        let failing_criteria = Self::failing_criteria(skill, windows, config);
        let primary = failing_criteria.first();

        let lens = match primary {
            Some(failing) => Some(failing.polarity.criteria_for(&failing.criterion)),
            None if current_rate >= thresholds.blind_spot => Some(criteria.clone()),
            None => None,
        };
        let context = lens.and_then(|lens| ContextFinder::most_failing_phase(&windows.all, &lens));
        let recommended_practice_mode = context
            .as_deref()
            .and_then(|phase| config.practice_mode_for(phase))
            .map(str::to_string);
        let primary_issue = primary.map(|f| f.criterion.clone());
        let primary_issue_label = primary.map(|f| f.label.clone());

        Some(SkillAnalysis {
            skill: skill.key.clone(),
            name: skill.name.clone(),
            description: skill.description.clone(),
            target: skill.target.clone(),
            tips: skill.tips.clone(),
            trend,
            current_rate,
            baseline_rate,
            sample_size: all.total,
            baseline_sample_size: baseline.total,
            primary_issue,
            primary_issue_label,
            context_breakdown: ContextFinder::breakdown(&windows.all, criteria, config),
            failing_criteria,
            context,
            recommended_practice_mode,
        })
    }

    /// Criteria with enough samples failing at or above the threshold,
    /// highest rate first (ties keep configuration order).
    fn failing_criteria(
        skill: &SkillDefinition,
        windows: &ScoreWindows,
        config: &BlindSpotConfig,
    ) -> Vec<FailingCriterion> {
        let thresholds = &config.thresholds;
        let mut failing: Vec<FailingCriterion> = skill
            .criteria
            .iter()
            .filter_map(|(criterion, polarity)| {
                let tally = FailureRateCalculator::tally(&windows.all, &polarity.criteria_for(criterion));
                if tally.total < thresholds.minimum_responses {
                    return None;
                }
                let raw = tally.rate()?;
                (raw >= thresholds.blind_spot).then(|| FailingCriterion {
                    criterion: criterion.to_string(),
                    label: config.criterion_label(criterion).to_string(),
                    polarity,
                    rate: round_rate(raw),
                    total: tally.total,
                })
            })
            .collect();

        failing.sort_by(|a, b| b.rate.partial_cmp(&a.rate).unwrap_or(Ordering::Equal));
        failing
    }
}
