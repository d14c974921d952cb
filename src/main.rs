//! Practice Coach insights server.

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tracing::info;
use tracing_subscriber::EnvFilter;

use practice_coach::adapters::http::{build_app, BlindSpotsAppState};
use practice_coach::adapters::postgres::{PostgresAccessChecker, PostgresScoreRecordReader};
use practice_coach::application::BlindSpotService;
use practice_coach::config::{load_blind_spot_config, AppConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);

    let skills = load_blind_spot_config(&config.insights.skills_path)?;

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .idle_timeout(config.database.idle_timeout())
        .connect(&config.database.url)
        .await?;

    let service = BlindSpotService::new(
        Arc::new(PostgresScoreRecordReader::new(pool.clone())),
        Arc::new(PostgresAccessChecker::new(pool)),
        Arc::new(skills),
    );
    let state = BlindSpotsAppState::new(Arc::new(service), config.insights.clone())
        .with_verbose_errors(config.features.verbose_errors);
    let app = build_app(state, &config.server, &config.features);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, environment = ?config.server.environment, "Practice Coach insights server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// JSON logs in production, human-readable output elsewhere.
fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .compact()
            .init();
    }
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        tracing::warn!("Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
