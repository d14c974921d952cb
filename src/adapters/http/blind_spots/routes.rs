//! Axum router configuration for blind spot endpoints.

use axum::{routing::get, Router};

use super::handlers::{get_blind_spots, get_history, get_status, get_teaser, BlindSpotsAppState};

/// Routes relative to `/insights/blind-spots`.
///
/// - `GET /` - Gated analysis
/// - `GET /status` - Data and access summary
/// - `GET /teaser` - Counts-only preview
/// - `GET /history` - Weekly failure rates
pub fn blind_spot_routes() -> Router<BlindSpotsAppState> {
    Router::new()
        .route("/", get(get_blind_spots))
        .route("/status", get(get_status))
        .route("/teaser", get(get_teaser))
        .route("/history", get(get_history))
}

/// Insights router, meant to be nested under `/api`.
///
/// ```ignore
/// let app = Router::new()
///     .nest("/api", blind_spots_router())
///     .with_state(state);
/// ```
pub fn blind_spots_router() -> Router<BlindSpotsAppState> {
    Router::new().nest("/insights/blind-spots", blind_spot_routes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::adapters::membership::StubAccessChecker;
    use crate::adapters::memory::InMemoryScoreStore;
    use crate::application::handlers::blind_spots::BlindSpotService;
    use crate::config::InsightsConfig;
    use crate::domain::blind_spots::{
        BlindSpotConfig, SkillCriteria, SkillDefinition, Thresholds, WindowLengths,
    };

    fn test_state() -> BlindSpotsAppState {
        let config = BlindSpotConfig::new(
            Thresholds::default(),
            WindowLengths::default(),
            vec![SkillDefinition::new("brevity", "Brevity", SkillCriteria::only_negative("over_length"))],
        );
        let service = BlindSpotService::new(
            Arc::new(InMemoryScoreStore::new()),
            Arc::new(StubAccessChecker::new()),
            Arc::new(config),
        );
        BlindSpotsAppState::new(Arc::new(service), InsightsConfig::default())
    }

    fn app() -> Router {
        Router::new().nest("/api", blind_spots_router()).with_state(test_state())
    }

    async fn get(uri: &str, user: Option<&str>) -> (StatusCode, serde_json::Value) {
        let mut request = Request::builder().uri(uri);
        if let Some(user) = user {
            request = request.header("X-User-Id", user);
        }
        let response = app()
            .oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, body)
    }

    #[test]
    fn routes_accept_state() {
        let _: Router<()> = blind_spot_routes().with_state(test_state());
    }

    #[tokio::test]
    async fn new_user_gets_insufficient_data() {
        let (status, body) = get("/api/insights/blind-spots", Some("new-user")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["state"], "insufficient_data");
        assert_eq!(body["sessionsRemaining"], 5);
    }

    #[tokio::test]
    async fn status_is_camel_case() {
        let (status, body) = get("/api/insights/blind-spots/status", Some("new-user")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["hasEnoughData"], false);
        assert_eq!(body["minimumSessions"], 5);
    }

    #[tokio::test]
    async fn history_honours_weeks_parameter() {
        let (status, body) = get("/api/insights/blind-spots/history?weeks=3", Some("new-user")).await;
        assert_eq!(status, StatusCode::OK);
        let weeks = body.as_array().unwrap();
        assert_eq!(weeks.len(), 3);
        assert!(weeks.iter().all(|w| w["data"].is_null()));
    }

    #[tokio::test]
    async fn invalid_weeks_parameter_is_rejected() {
        let (status, _) = get("/api/insights/blind-spots/history?weeks=lots", Some("new-user")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn missing_user_is_unauthorized() {
        let (status, body) = get("/api/insights/blind-spots/teaser", None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error_code"], "AUTHENTICATION_REQUIRED");
    }
}
