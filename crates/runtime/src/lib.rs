//! Process-level wiring for the Taskboard backend: tracing setup, service
//! construction, and shutdown handling.

use std::sync::Arc;

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use taskboard_auth::Authenticator;
use taskboard_config::AppConfig;
use taskboard_database::{initialize_database, ProfileRepository};
use taskboard_profiles::ProfileService;
use tracing::info;

pub mod telemetry {
    use anyhow::Result;
    use tracing::Level;
    use tracing_subscriber::{fmt::SubscriberBuilder, EnvFilter};

    pub fn init_tracing() -> Result<()> {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        let subscriber = SubscriberBuilder::default()
            .with_max_level(Level::INFO)
            .with_env_filter(env_filter)
            .finish();

        tracing::subscriber::set_global_default(subscriber)
            .map_err(|error| anyhow::anyhow!("failed to set tracing subscriber: {error}"))
    }
}

/// Everything a frontend (HTTP server, console, management command) needs
/// to talk to the backend.
#[derive(Clone)]
pub struct BackendServices {
    pub db_pool: SqlitePool,
    pub authenticator: Authenticator,
    pub profiles: Arc<ProfileService<ProfileRepository>>,
}

impl BackendServices {
    pub async fn initialise(config: &AppConfig) -> Result<Self> {
        let db_pool = initialize_database(&config.database)
            .await
            .context("failed to prepare the database")?;

        let authenticator = Authenticator::new(db_pool.clone(), &config.auth);
        let profiles = Arc::new(ProfileService::new(db_pool.clone()));

        info!("backend services ready");

        Ok(Self {
            db_pool,
            authenticator,
            profiles,
        })
    }
}

pub async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(?error, "failed to listen for shutdown signal");
    }
    info!("shutdown signal received");
}
