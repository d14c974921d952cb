//! HTTP handlers for blind spot insights.

use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::{FromRequestParts, Json, Query, State};
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::application::handlers::blind_spots::BlindSpotService;
use crate::config::InsightsConfig;
use crate::domain::blind_spots::{BlindSpotStatus, BlindSpotTeaser, GatedBlindSpotAnalysis, WeeklySkillTrend};
use crate::domain::foundation::{DomainError, ErrorCode, UserId};

use super::dto::{ErrorResponse, HistoryQuery};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state of the insights routes. Cloned per request.
#[derive(Clone)]
pub struct BlindSpotsAppState {
    pub service: Arc<BlindSpotService>,
    pub insights: InsightsConfig,
    /// Expose internal error messages in responses.
    pub verbose_errors: bool,
}

impl BlindSpotsAppState {
    pub fn new(service: Arc<BlindSpotService>, insights: InsightsConfig) -> Self {
        Self {
            service,
            insights,
            verbose_errors: false,
        }
    }

    pub fn with_verbose_errors(mut self, verbose: bool) -> Self {
        self.verbose_errors = verbose;
        self
    }

    fn api_error(&self, err: DomainError) -> InsightsApiError {
        InsightsApiError::new(err, self.verbose_errors)
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// User Context
// ════════════════════════════════════════════════════════════════════════════════

/// Caller identity, read from the `X-User-Id` header set by the gateway.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Rejection when no usable `X-User-Id` header is present.
pub struct AuthenticationRequired;

impl IntoResponse for AuthenticationRequired {
    fn into_response(self) -> Response {
        let error = ErrorResponse::new("AUTHENTICATION_REQUIRED", "Authentication is required");
        (StatusCode::UNAUTHORIZED, Json(error)).into_response()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AuthenticationRequired;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get("X-User-Id")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| UserId::new(s).ok())
            .ok_or(AuthenticationRequired)?;

        Ok(AuthenticatedUser { user_id })
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Query Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/insights/blind-spots
pub async fn get_blind_spots(
    State(state): State<BlindSpotsAppState>,
    user: AuthenticatedUser,
) -> Result<Json<GatedBlindSpotAnalysis>, InsightsApiError> {
    let gated = state
        .service
        .get_gated_analysis(&user.user_id)
        .await
        .map_err(|e| state.api_error(e))?;
    Ok(Json(gated))
}

/// GET /api/insights/blind-spots/status
pub async fn get_status(
    State(state): State<BlindSpotsAppState>,
    user: AuthenticatedUser,
) -> Result<Json<BlindSpotStatus>, InsightsApiError> {
    let status = state
        .service
        .get_status(&user.user_id)
        .await
        .map_err(|e| state.api_error(e))?;
    Ok(Json(status))
}

/// GET /api/insights/blind-spots/teaser
pub async fn get_teaser(
    State(state): State<BlindSpotsAppState>,
    user: AuthenticatedUser,
) -> Result<Json<BlindSpotTeaser>, InsightsApiError> {
    let teaser = state
        .service
        .get_teaser_data(&user.user_id)
        .await
        .map_err(|e| state.api_error(e))?;
    Ok(Json(teaser))
}

/// GET /api/insights/blind-spots/history?weeks=N
pub async fn get_history(
    State(state): State<BlindSpotsAppState>,
    user: AuthenticatedUser,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<WeeklySkillTrend>>, InsightsApiError> {
    let weeks = state.insights.history_weeks_for(query.weeks);
    let trends = state
        .service
        .get_historical_trends(&user.user_id, weeks)
        .await
        .map_err(|e| state.api_error(e))?;
    Ok(Json(trends))
}

/// GET /health
pub async fn health() -> &'static str {
    "ok"
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// Domain error on its way to an HTTP response.
#[derive(Debug)]
pub struct InsightsApiError {
    error: DomainError,
    verbose: bool,
}

impl InsightsApiError {
    pub fn new(error: DomainError, verbose: bool) -> Self {
        Self { error, verbose }
    }

    pub fn status(&self) -> StatusCode {
        match self.error.code {
            ErrorCode::ValidationFailed => StatusCode::BAD_REQUEST,
            ErrorCode::DatabaseError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DomainError> for InsightsApiError {
    fn from(error: DomainError) -> Self {
        Self::new(error, false)
    }
}

impl IntoResponse for InsightsApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.error.code.to_string();

        let body = if status.is_server_error() {
            tracing::error!(error_code = %code, error = %self.error.message, "Insights request failed");
            if self.verbose {
                ErrorResponse::new(code, self.error.message)
            } else {
                ErrorResponse::new(code, "Insights are temporarily unavailable, please try again")
            }
        } else if self.error.details.is_empty() {
            ErrorResponse::new(code, self.error.message)
        } else {
            let details = serde_json::to_value(&self.error.details).unwrap_or_default();
            ErrorResponse::with_details(code, self.error.message, details)
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::membership::StubAccessChecker;
    use crate::adapters::memory::InMemoryScoreStore;
    use crate::domain::blind_spots::{
        BlindSpotConfig, ScoreRecord, SkillCriteria, SkillDefinition, Thresholds, WindowLengths,
    };
    use crate::domain::foundation::{SessionId, Timestamp};
    use crate::domain::membership::MembershipTier;
    use axum::body::to_bytes;

    fn config() -> BlindSpotConfig {
        BlindSpotConfig::new(
            Thresholds::default(),
            WindowLengths::default(),
            vec![SkillDefinition::new("clarity", "Clarity", SkillCriteria::only_positive("clear_ask"))],
        )
    }

    fn user() -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: UserId::new("user-1").unwrap(),
        }
    }

    fn state_with(store: InMemoryScoreStore, checker: StubAccessChecker) -> BlindSpotsAppState {
        let service = BlindSpotService::new(Arc::new(store), Arc::new(checker), Arc::new(config()));
        BlindSpotsAppState::new(Arc::new(service), InsightsConfig::default())
    }

    /// Five completed sessions, each with one failing clarity response yesterday.
    fn store_with_blind_spot() -> InMemoryScoreStore {
        let store = InMemoryScoreStore::new();
        let user_id = user().user_id;
        for _ in 0..5 {
            let session = SessionId::new();
            store.complete_session(&user_id, session);
            store.append(
                ScoreRecord::new(user_id.clone(), session, Timestamp::now().minus_days(1))
                    .with_score("clear_ask", false),
            );
        }
        store
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn blind_spots_locked_for_free_tier() {
        let state = state_with(store_with_blind_spot(), StubAccessChecker::with_tier(MembershipTier::Free));
        let Json(gated) = get_blind_spots(State(state), user()).await.unwrap();
        assert!(matches!(gated, GatedBlindSpotAnalysis::Locked { .. }));
    }

    #[tokio::test]
    async fn blind_spots_unlocked_for_paid_tier() {
        let state = state_with(store_with_blind_spot(), StubAccessChecker::new());
        let Json(gated) = get_blind_spots(State(state), user()).await.unwrap();
        let GatedBlindSpotAnalysis::Unlocked { analysis } = gated else {
            panic!("expected unlocked analysis");
        };
        assert_eq!(analysis.blind_spot_count(), 1);
    }

    #[tokio::test]
    async fn status_reports_sessions_until_insights() {
        let store = InMemoryScoreStore::new();
        store.complete_session(&user().user_id, SessionId::new());
        let state = state_with(store, StubAccessChecker::new());

        let Json(status) = get_status(State(state), user()).await.unwrap();
        assert!(!status.has_enough_data);
        assert_eq!(status.sessions_until_insights, 4);
    }

    #[tokio::test]
    async fn teaser_counts_without_access() {
        let state = state_with(store_with_blind_spot(), StubAccessChecker::denying());
        let Json(teaser) = get_teaser(State(state), user()).await.unwrap();
        assert_eq!(teaser.blind_spot_count, 1);
    }

    #[tokio::test]
    async fn history_clamps_requested_weeks() {
        let state = state_with(InMemoryScoreStore::new(), StubAccessChecker::new());

        let Json(trends) = get_history(State(state.clone()), user(), Query(HistoryQuery { weeks: Some(500) }))
            .await
            .unwrap();
        assert_eq!(trends.len(), 52);

        let Json(trends) = get_history(State(state.clone()), user(), Query(HistoryQuery { weeks: Some(0) }))
            .await
            .unwrap();
        assert_eq!(trends.len(), 1);

        let Json(trends) = get_history(State(state), user(), Query(HistoryQuery::default()))
            .await
            .unwrap();
        assert_eq!(trends.len(), 8);
    }

    #[tokio::test]
    async fn database_error_hides_message_unless_verbose() {
        let err = DomainError::database("connection refused");

        let response = InsightsApiError::new(err.clone(), false).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error_code"], "DATABASE_ERROR");
        assert!(!body["message"].as_str().unwrap().contains("connection refused"));

        let body = body_json(InsightsApiError::new(err, true).into_response()).await;
        assert_eq!(body["message"], "connection refused");
    }

    #[test]
    fn validation_errors_are_bad_requests() {
        let err = InsightsApiError::from(DomainError::validation("weeks", "must be positive"));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn missing_user_header_is_unauthorized() {
        let response = AuthenticationRequired.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(response).await;
        assert_eq!(body["error_code"], "AUTHENTICATION_REQUIRED");
    }
}
