//! HTTP adapters - REST API implementations.

pub mod blind_spots;

pub use blind_spots::{blind_spots_router, BlindSpotsAppState};

use std::time::Duration;

use axum::routing::get;
use axum::Router;
use http::{HeaderValue, Method};
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::{FeatureFlags, ServerConfig};

/// Full application router: `/health` plus every API route under `/api`,
/// wrapped in CORS, timeout and (optionally) request tracing layers.
pub fn build_app(state: BlindSpotsAppState, server: &ServerConfig, features: &FeatureFlags) -> Router {
    let app = Router::new()
        .route("/health", get(blind_spots::handlers::health))
        .nest("/api", blind_spots_router())
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(cors_layer(server))
                .layer(TimeoutLayer::new(Duration::from_secs(server.request_timeout_secs))),
        );

    if features.enable_tracing {
        app.layer(TraceLayer::new_for_http())
    } else {
        app
    }
}

/// Configured origins in production; any origin when none are configured.
fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(Any);

    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(AllowOrigin::list(origins))
    }
}
