//! Test plan for the `taskboard-runtime` crate.
//!
//! `BackendServices::initialise` is the single entry point that turns a
//! configuration into a ready backend: database prepared and migrated,
//! authenticator and profile service wired to the same pool. These tests
//! drive it end to end against throwaway SQLite files.

use std::path::Path;

use anyhow::{Context, Result};
use taskboard_auth::NewAccount;
use taskboard_config::AppConfig;
use taskboard_profiles::ProfileTo;
use taskboard_runtime::BackendServices;
use tempfile::TempDir;

fn sqlite_url(path: &Path) -> String {
    format!("sqlite://{}", path.to_string_lossy())
}

fn build_config(database_url: String, max_connections: u32) -> AppConfig {
    let mut config = AppConfig::default();
    config.database.url = database_url;
    config.database.max_connections = max_connections;
    config
}

async fn initialise(config: &AppConfig) -> Result<BackendServices> {
    BackendServices::initialise(config)
        .await
        .context("failed to initialise backend services")
}

#[tokio::test(flavor = "multi_thread")]
async fn initialise_runs_migrations() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("runtime/init.db");
    let config = build_config(sqlite_url(&db_path), 4);

    let services = initialise(&config).await?;

    for table in ["users", "profiles", "sessions"] {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?",
        )
        .bind(table)
        .fetch_one(&services.db_pool)
        .await?;
        assert_eq!(1, count, "table {table} should exist after initialise");
    }

    drop(services);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn initialise_creates_missing_database_directories() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let db_dir = temp_dir.path().join("nested");
    let db_path = db_dir.join("prepared.db");
    let config = build_config(sqlite_url(&db_path), 2);

    assert!(!db_dir.exists());

    let services = initialise(&config).await?;
    assert!(db_dir.exists(), "database directory should be created");

    drop(services);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn initialise_applies_max_connections_setting() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("runtime/max_conn.db");
    let max_connections = 3;
    let config = build_config(sqlite_url(&db_path), max_connections);

    let services = initialise(&config).await?;
    assert_eq!(
        max_connections,
        services.db_pool.options().get_max_connections()
    );

    drop(services);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn initialise_wires_authentication_and_profiles_to_one_store() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("runtime/wired.db");
    let config = build_config(sqlite_url(&db_path), 2);

    let services = initialise(&config).await?;

    let user = services
        .authenticator
        .register_with_password(NewAccount {
            email: "runtime@example.com".to_string(),
            password: "Password123".to_string(),
            display_name: Some("Runtime".to_string()),
            ..Default::default()
        })
        .await?;

    let (logged_in, session) = services
        .authenticator
        .login_with_password("runtime@example.com", "Password123")
        .await?;
    assert_eq!(user.id, logged_in.id);

    services.profiles.record_login(user.id).await?;

    let transfer = ProfileTo {
        id: Some(user.id),
        mail_notifications: ["NEWS".to_string()].into_iter().collect(),
        disabled_notifications: Default::default(),
        last_login: None,
    };
    services.profiles.update_profile(user.id, &transfer).await?;

    let stored = services
        .profiles
        .get_profile(user.id)
        .await?
        .expect("profile should exist after login and update");
    assert!(stored.mail_notifications.contains("NEWS"));
    assert!(
        stored.last_login.is_some(),
        "last login stamp should survive the preference update"
    );

    // the authenticator reads sessions from the same pool
    let (resolved, _) = services.authenticator.authenticate_token(&session.token).await?;
    assert_eq!(user.id, resolved.id);

    drop(services);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn initialise_reports_database_failures_with_context() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let blocker = temp_dir.path().join("not-a-directory");
    std::fs::write(&blocker, b"plain file")?;

    // the db path's parent is a regular file, so directory creation must fail
    let db_path = blocker.join("unreachable.db");
    let config = build_config(sqlite_url(&db_path), 1);

    let error = match BackendServices::initialise(&config).await {
        Ok(_) => panic!("expected initialise to fail for an unreachable database path"),
        Err(error) => error,
    };
    let message = format!("{error:?}");
    assert!(
        message.contains("failed to prepare the database"),
        "expected database preparation context, got {message}"
    );
    Ok(())
}
