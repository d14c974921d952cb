//! BlindSpotService - Query side of the blind spot engine.
//!
//! Fetches a user's score records once per run, hands them to the pure
//! domain analyzer and applies the access gate on top.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::blind_spots::{
    should_show_teaser, AnalysisWindows, BlindSpotAnalysis, BlindSpotAnalyzer, BlindSpotConfig,
    BlindSpotStatus, BlindSpotTeaser, GatedBlindSpotAnalysis, ScoreWindows, WeekRange,
    WeeklySkillTrend,
};
use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::ports::{AccessChecker, AccessDeniedReason, AccessResult, ScoreRecordReader};

/// Default number of weeks in the history report.
pub const DEFAULT_HISTORY_WEEKS: u32 = 8;

/// Upper bound on the weeks covered by one history report.
pub const MAX_HISTORY_WEEKS: u32 = 520;

/// Entry point for every blind spot query.
///
/// Holds only shared, immutable state, so one instance serves concurrent
/// requests and background jobs alike.
#[derive(Clone)]
pub struct BlindSpotService {
    scores: Arc<dyn ScoreRecordReader>,
    access_checker: Arc<dyn AccessChecker>,
    config: Arc<BlindSpotConfig>,
}

impl BlindSpotService {
    pub fn new(
        scores: Arc<dyn ScoreRecordReader>,
        access_checker: Arc<dyn AccessChecker>,
        config: Arc<BlindSpotConfig>,
    ) -> Self {
        Self {
            scores,
            access_checker,
            config,
        }
    }

    pub fn config(&self) -> &BlindSpotConfig {
        &self.config
    }

    /// Full analysis of `user_id` as of now.
    pub async fn analyze(&self, user_id: &UserId) -> Result<BlindSpotAnalysis, DomainError> {
        self.analyze_at(user_id, Timestamp::now()).await
    }

    /// Full analysis of `user_id` with windows ending at `now`.
    ///
    /// `now` is read once; every skill in the run shares the same window
    /// boundaries.
    pub async fn analyze_at(&self, user_id: &UserId, now: Timestamp) -> Result<BlindSpotAnalysis, DomainError> {
        let (total_sessions, total_responses) = tokio::try_join!(
            self.scores.count_completed_sessions(user_id),
            self.scores.count_responses(user_id),
        )?;

        let minimum_sessions = self.config.thresholds.minimum_sessions;
        if total_sessions < minimum_sessions {
            debug!(
                user_id = %user_id,
                total_sessions,
                minimum_sessions,
                "Not enough completed sessions for blind spot analysis"
            );
            return Ok(BlindSpotAnalysis::insufficient_data(total_sessions, total_responses, now));
        }

        let bounds = AnalysisWindows::at(now, &self.config.windows);
        let lookback = self.scores.find_since(user_id, bounds.baseline_start).await?;
        let windows = ScoreWindows::split(lookback, &bounds);

        let analysis = BlindSpotAnalyzer::analyze(total_sessions, total_responses, &windows, &self.config, now);

        info!(
            user_id = %user_id,
            lookback_records = windows.all.len(),
            recent_records = windows.recent.len(),
            skills_analyzed = analysis.skills_tracked(),
            blind_spots = analysis.blind_spot_count(),
            "Blind spot analysis complete"
        );
        Ok(analysis)
    }

    /// Whether `user_id` may see full per-skill insights.
    pub async fn has_pro_access(&self, user_id: &UserId) -> bool {
        self.check_access(user_id).await.is_allowed()
    }

    /// Full-insights decision for `user_id`.
    ///
    /// Checker failures deny access; they never fail the request.
    async fn check_access(&self, user_id: &UserId) -> AccessResult {
        match self.access_checker.can_access_full_insights(user_id).await {
            Ok(result) => result,
            Err(err) => {
                warn!(user_id = %user_id, error = %err, "Access check failed, treating as free tier");
                AccessResult::Denied(AccessDeniedReason::NoMembership)
            }
        }
    }

    /// Gate-aware summary for UI polling.
    pub async fn get_status(&self, user_id: &UserId) -> Result<BlindSpotStatus, DomainError> {
        let analysis = self.analyze(user_id).await?;
        let has_pro_access = self.has_pro_access(user_id).await;
        Ok(BlindSpotStatus::new(
            &analysis,
            has_pro_access,
            self.config.thresholds.minimum_sessions,
        ))
    }

    /// The analysis as `user_id` is allowed to see it.
    pub async fn get_gated_analysis(&self, user_id: &UserId) -> Result<GatedBlindSpotAnalysis, DomainError> {
        let analysis = self.analyze(user_id).await?;
        let access = self.check_access(user_id).await;
        let gated = GatedBlindSpotAnalysis::gate(analysis, access.is_allowed(), self.config.thresholds.minimum_sessions)
            .with_upgrade_message(access.denial_message());
        debug!(user_id = %user_id, state = ?gated.state(), "Gated blind spot analysis");
        Ok(gated)
    }

    /// Counts-only teaser, available on every tier.
    pub async fn get_teaser_data(&self, user_id: &UserId) -> Result<BlindSpotTeaser, DomainError> {
        let analysis = self.analyze(user_id).await?;
        Ok(BlindSpotTeaser::from_analysis(&analysis))
    }

    /// True when a user without pro access has a blind spot worth upselling.
    pub async fn should_show_teaser(&self, user_id: &UserId) -> Result<bool, DomainError> {
        if self.has_pro_access(user_id).await {
            return Ok(false);
        }
        let analysis = self.analyze(user_id).await?;
        Ok(should_show_teaser(&analysis, false))
    }

    /// Week-by-week failure rates for the last `weeks` weeks, oldest first.
    pub async fn get_historical_trends(
        &self,
        user_id: &UserId,
        weeks: u32,
    ) -> Result<Vec<WeeklySkillTrend>, DomainError> {
        self.get_historical_trends_at(user_id, weeks, Timestamp::now()).await
    }

    /// Week-by-week failure rates for the `weeks` weeks ending with the one
    /// containing `now`. At most `MAX_HISTORY_WEEKS` weeks are returned.
    pub async fn get_historical_trends_at(
        &self,
        user_id: &UserId,
        weeks: u32,
        now: Timestamp,
    ) -> Result<Vec<WeeklySkillTrend>, DomainError> {
        let weeks = weeks.min(MAX_HISTORY_WEEKS);
        let ranges = WeekRange::ending_at(now, weeks);
        let (Some(first), Some(last)) = (ranges.first(), ranges.last()) else {
            return Ok(Vec::new());
        };

        let records = self.scores.find_between(user_id, first.start, last.end).await?;
        let trends: Vec<WeeklySkillTrend> = ranges
            .iter()
            .map(|week| WeeklySkillTrend::summarize(*week, &records, &self.config))
            .collect();

        debug!(
            user_id = %user_id,
            weeks,
            records = records.len(),
            "Historical blind spot trends computed"
        );
        Ok(trends)
    }
}
