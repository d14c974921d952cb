//! Application configuration
//!
//! Settings are read from environment variables with the `PRACTICE_COACH`
//! prefix, nested sections separated by `__`. A `.env` file is loaded first
//! when present. The skill catalog is a separate YAML file whose path comes
//! from `insights.skills_path`.
//!
//! # Example
//!
//! ```no_run
//! use practice_coach::config::{load_blind_spot_config, AppConfig};
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! let skills = load_blind_spot_config(&config.insights.skills_path).expect("Invalid catalog");
//! ```

mod database;
mod error;
mod features;
mod insights;
mod server;
mod skills;

pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use features::FeatureFlags;
pub use insights::InsightsConfig;
pub use server::{Environment, ServerConfig};
pub use skills::load_blind_spot_config;

use serde::Deserialize;

/// Root application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    /// PostgreSQL connection; `url` is required
    pub database: DatabaseConfig,

    #[serde(default)]
    pub insights: InsightsConfig,

    #[serde(default)]
    pub features: FeatureFlags,
}

impl AppConfig {
    /// Loads configuration from the environment.
    ///
    /// - `PRACTICE_COACH__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `PRACTICE_COACH__DATABASE__URL=...` -> `database.url = ...`
    /// - `PRACTICE_COACH__INSIGHTS__HISTORY_WEEKS=12` -> `insights.history_weeks = 12`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::LoadError` when a required variable is missing
    /// or a value cannot be parsed into its field type.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("PRACTICE_COACH")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Semantic checks on every section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.insights.validate()?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
