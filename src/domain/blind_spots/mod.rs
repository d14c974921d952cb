//! Blind spot analysis: recurring weaknesses across practice responses.
//!
//! Components, leaf first:
//!
//! - [`ScoreValue`] / [`ScoreRecord`] - scored responses as stored
//! - [`BlindSpotConfig`] - skills, criteria, thresholds and windows
//! - [`FailureRateCalculator`] - relevant and failing response counts
//! - [`SkillTrend`] - direction of a skill's failure rate
//! - [`ContextFinder`] - drill phase where failures concentrate
//! - [`SkillAnalysisAssembler`] - one [`SkillAnalysis`] per skill
//! - [`BlindSpotAnalyzer`] - partitions and headline picks
//! - [`GatedBlindSpotAnalysis`] - data sufficiency and tier gating
//! - [`WeeklySkillTrend`] - week-by-week history
//!
//! Everything here is synchronous and pure; the application layer fetches
//! records and feeds them in.

mod access;
mod analysis;
mod config;
mod context;
mod failure_rate;
mod history;
mod score_record;
mod score_value;
mod skill_analysis;
mod trend;
mod windows;

pub use access::{
    sessions_remaining, should_show_teaser, AccessState, BlindSpotStatus, BlindSpotTeaser,
    GatedBlindSpotAnalysis,
};
pub use analysis::{BlindSpotAnalysis, BlindSpotAnalyzer, SkillInsights};
pub use config::{
    BlindSpotConfig, CriterionPolarity, SkillCriteria, SkillDefinition, Thresholds, WindowLengths,
    GROWTH_EDGE_FLOOR, MAX_WINDOW_DAYS, MIN_BASELINE_SAMPLES, MIN_CONTEXT_SAMPLES,
};
pub use context::{ContextBreakdown, ContextFinder};
pub use failure_rate::{round_rate, FailureRateCalculator, FailureTally, RecordOutcome};
pub use history::{WeekRange, WeeklySkillTrend};
pub use score_record::{ScoreRecord, ScoreSheet};
pub use score_value::{is_truthy, ScoreValue};
pub use skill_analysis::{FailingCriterion, SkillAnalysis, SkillAnalysisAssembler};
pub use trend::SkillTrend;
pub use windows::{AnalysisWindows, ScoreWindows};
