//! Blind Spot Analyzer - partitions and headline insights over every skill.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::config::GROWTH_EDGE_FLOOR;
use super::{BlindSpotConfig, ScoreWindows, SkillAnalysis, SkillAnalysisAssembler, SkillTrend};
use crate::domain::foundation::Timestamp;

/// Result of one analysis run for one user.
///
/// Per-skill content is flattened in only when it was computed, so an
/// insufficient-data analysis carries no `blindSpots` key at all while a
/// computed one reports absent picks as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlindSpotAnalysis {
    pub has_enough_data: bool,
    pub total_sessions: u32,
    pub total_responses: u32,
    #[serde(flatten)]
    pub insights: Option<SkillInsights>,
    pub analyzed_at: Timestamp,
}

/// Per-skill content of an analysis with enough data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillInsights {
    pub blind_spots: Vec<SkillAnalysis>,
    pub improving: Vec<SkillAnalysis>,
    pub stable: Vec<SkillAnalysis>,
    pub slipping: Vec<SkillAnalysis>,
    /// Every analyzed skill, lowest failure rate first.
    pub all_skills: Vec<SkillAnalysis>,
    pub biggest_gap: Option<String>,
    pub biggest_win: Option<String>,
    pub growth_edge: Option<String>,
}

impl BlindSpotAnalysis {
    /// Analysis for a user below the session minimum: counts only.
    pub fn insufficient_data(total_sessions: u32, total_responses: u32, analyzed_at: Timestamp) -> Self {
        Self {
            has_enough_data: false,
            total_sessions,
            total_responses,
            insights: None,
            analyzed_at,
        }
    }

    pub fn blind_spot_count(&self) -> usize {
        self.insights.as_ref().map_or(0, |i| i.blind_spots.len())
    }

    pub fn improving_count(&self) -> usize {
        self.insights.as_ref().map_or(0, |i| i.improving.len())
    }

    pub fn slipping_count(&self) -> usize {
        self.insights.as_ref().map_or(0, |i| i.slipping.len())
    }

    pub fn skills_tracked(&self) -> usize {
        self.insights.as_ref().map_or(0, |i| i.all_skills.len())
    }

    /// Analysis of one skill, if it was analyzed.
    pub fn skill(&self, key: &str) -> Option<&SkillAnalysis> {
        self.insights
            .as_ref()?
            .all_skills
            .iter()
            .find(|s| s.skill == key)
    }
}

pub struct BlindSpotAnalyzer;

impl BlindSpotAnalyzer {
    /// Builds a full analysis from the run's record windows.
    ///
    /// Skills are assembled in configuration order, which is also the
    /// tie-break order for every pick.
    pub fn analyze(
        total_sessions: u32,
        total_responses: u32,
        windows: &ScoreWindows,
        config: &BlindSpotConfig,
        analyzed_at: Timestamp,
    ) -> BlindSpotAnalysis {
        let analyses: Vec<SkillAnalysis> = config
            .skills()
            .iter()
            .filter_map(|skill| SkillAnalysisAssembler::assemble(skill, windows, config))
            .collect();

        BlindSpotAnalysis {
            has_enough_data: true,
            total_sessions,
            total_responses,
            insights: Some(Self::summarize(analyses, config)),
            analyzed_at,
        }
    }

    /// Partitions and picks over already assembled skill analyses.
    pub fn summarize(analyses: Vec<SkillAnalysis>, config: &BlindSpotConfig) -> SkillInsights {
        let threshold = config.thresholds.blind_spot;

        let blind_spots = select(&analyses, |a| a.is_blind_spot(threshold));
        let improving = select(&analyses, |a| a.is_improving() && !a.is_blind_spot(threshold));
        let slipping = select(&analyses, SkillAnalysis::is_slipping);
        let stable = select(&analyses, |a| a.trend == SkillTrend::Stable && !a.is_blind_spot(threshold));

        let biggest_gap = first_max(blind_spots.iter(), |a| a.current_rate).map(|a| a.skill.clone());
        let growth_edge = first_max(analyses.iter(), |a| a.current_rate)
            .filter(|a| a.current_rate > GROWTH_EDGE_FLOOR)
            .map(|a| a.skill.clone());
        let biggest_win = first_max(analyses.iter().filter(|a| a.is_improving()), SkillAnalysis::improvement)
            .map(|a| a.skill.clone());

        let mut all_skills = analyses;
        all_skills.sort_by(|a, b| a.current_rate.partial_cmp(&b.current_rate).unwrap_or(Ordering::Equal));

        SkillInsights {
            blind_spots,
            improving,
            stable,
            slipping,
            all_skills,
            biggest_gap,
            biggest_win,
            growth_edge,
        }
    }
}

fn select<F>(analyses: &[SkillAnalysis], keep: F) -> Vec<SkillAnalysis>
where
    F: Fn(&SkillAnalysis) -> bool,
{
    analyses.iter().filter(|a| keep(a)).cloned().collect()
}

/// First element with the strictly greatest key.
fn first_max<'a, I, F>(items: I, key: F) -> Option<&'a SkillAnalysis>
where
    I: IntoIterator<Item = &'a SkillAnalysis>,
    F: Fn(&SkillAnalysis) -> f64,
{
    let mut best: Option<(&SkillAnalysis, f64)> = None;
    for item in items {
        let value = key(item);
        match best {
            Some((_, current)) if value <= current => {}
            _ => best = Some((item, value)),
        }
    }
    best.map(|(item, _)| item)
}
