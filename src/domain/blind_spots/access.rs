//! Access gate over an analysis: data sufficiency and subscription tier.

use serde::{Deserialize, Serialize};

use super::BlindSpotAnalysis;

/// Which view of the analysis a user may see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessState {
    InsufficientData,
    Locked,
    Unlocked,
}

impl AccessState {
    /// Data sufficiency is checked first; tier only matters once there is
    /// something to show.
    pub fn resolve(has_enough_data: bool, has_pro_access: bool) -> Self {
        match (has_enough_data, has_pro_access) {
            (false, _) => AccessState::InsufficientData,
            (true, false) => AccessState::Locked,
            (true, true) => AccessState::Unlocked,
        }
    }
}

/// Counts-only projection shown to users without pro access.
///
/// Never names a skill, criterion, tip or context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlindSpotTeaser {
    pub has_enough_data: bool,
    pub blind_spot_count: u32,
    pub improving_count: u32,
    pub slipping_count: u32,
    pub has_improvements: bool,
    pub skills_tracked: u32,
    pub total_sessions: u32,
    pub total_responses: u32,
}

impl BlindSpotTeaser {
    pub fn from_analysis(analysis: &BlindSpotAnalysis) -> Self {
        let improving_count = count(analysis.improving_count());
        Self {
            has_enough_data: analysis.has_enough_data,
            blind_spot_count: count(analysis.blind_spot_count()),
            improving_count,
            slipping_count: count(analysis.slipping_count()),
            has_improvements: improving_count > 0,
            skills_tracked: count(analysis.skills_tracked()),
            total_sessions: analysis.total_sessions,
            total_responses: analysis.total_responses,
        }
    }
}

/// An analysis as a given user is allowed to see it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum GatedBlindSpotAnalysis {
    #[serde(rename_all = "camelCase")]
    InsufficientData {
        total_sessions: u32,
        total_responses: u32,
        sessions_remaining: u32,
    },
    #[serde(rename_all = "camelCase")]
    Locked {
        teaser: BlindSpotTeaser,
        /// Why full insights are unavailable, phrased for the user.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        upgrade_message: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    Unlocked { analysis: BlindSpotAnalysis },
}

impl GatedBlindSpotAnalysis {
    /// Wraps `analysis` in the view allowed by `has_pro_access`.
    pub fn gate(analysis: BlindSpotAnalysis, has_pro_access: bool, minimum_sessions: u32) -> Self {
        match AccessState::resolve(analysis.has_enough_data, has_pro_access) {
            AccessState::InsufficientData => GatedBlindSpotAnalysis::InsufficientData {
                total_sessions: analysis.total_sessions,
                total_responses: analysis.total_responses,
                sessions_remaining: sessions_remaining(minimum_sessions, analysis.total_sessions),
            },
            AccessState::Locked => GatedBlindSpotAnalysis::Locked {
                teaser: BlindSpotTeaser::from_analysis(&analysis),
                upgrade_message: None,
            },
            AccessState::Unlocked => GatedBlindSpotAnalysis::Unlocked { analysis },
        }
    }

    /// Attaches an upgrade message to a locked view. Other views are unchanged.
    pub fn with_upgrade_message(mut self, message: Option<String>) -> Self {
        if let GatedBlindSpotAnalysis::Locked { upgrade_message, .. } = &mut self {
            *upgrade_message = message;
        }
        self
    }

    pub fn state(&self) -> AccessState {
        match self {
            GatedBlindSpotAnalysis::InsufficientData { .. } => AccessState::InsufficientData,
            GatedBlindSpotAnalysis::Locked { .. } => AccessState::Locked,
            GatedBlindSpotAnalysis::Unlocked { .. } => AccessState::Unlocked,
        }
    }
}

/// Gate-aware summary polled by the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlindSpotStatus {
    pub has_enough_data: bool,
    pub has_pro_access: bool,
    pub can_access_full_insights: bool,
    pub show_teaser: bool,
    pub total_sessions: u32,
    pub minimum_sessions: u32,
    pub sessions_until_insights: u32,
    pub blind_spot_count: u32,
}

impl BlindSpotStatus {
    pub fn new(analysis: &BlindSpotAnalysis, has_pro_access: bool, minimum_sessions: u32) -> Self {
        Self {
            has_enough_data: analysis.has_enough_data,
            has_pro_access,
            can_access_full_insights: analysis.has_enough_data && has_pro_access,
            show_teaser: should_show_teaser(analysis, has_pro_access),
            total_sessions: analysis.total_sessions,
            minimum_sessions,
            sessions_until_insights: sessions_remaining(minimum_sessions, analysis.total_sessions),
            blind_spot_count: count(analysis.blind_spot_count()),
        }
    }
}

/// True when there is a blind spot to upsell to a user without pro access.
pub fn should_show_teaser(analysis: &BlindSpotAnalysis, has_pro_access: bool) -> bool {
    !has_pro_access && analysis.has_enough_data && analysis.blind_spot_count() > 0
}

/// Sessions still needed before insights unlock, never negative.
pub fn sessions_remaining(minimum_sessions: u32, total_sessions: u32) -> u32 {
    minimum_sessions.saturating_sub(total_sessions)
}

fn count(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}
